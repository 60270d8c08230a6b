//! The state shared by all console views.

use log::info;
use crate::api::auth::{Credentials, Token};
use crate::auth::{
    AuthProvider, LoggedInUser, NavigationGate, PageId, Permission, Session,
};
use super::backend::ConsoleApi;
use super::error::{Action, Error};
use super::store::StoredSession;
use super::validate::RegistrationForm;


//------------ Console -------------------------------------------------------

/// A console: the API, the way to log in, and the current session.
///
/// Views borrow the console to find out whether they may act and with
/// which token. Only login, logout and navigation change the session.
#[derive(Debug)]
pub struct Console<A> {
    api: A,
    auth: AuthProvider,
    session: Session,
    token: Option<Token>,
}

impl<A: ConsoleApi> Console<A> {
    /// Creates a console with nobody logged in.
    pub fn new(api: A, auth: AuthProvider) -> Self {
        Console { api, auth, session: Session::new(), token: None }
    }

    /// Creates a console continuing a stored session.
    pub fn restore(api: A, auth: AuthProvider, stored: StoredSession) -> Self {
        if stored.is_consistent() {
            Console {
                api, auth, session: stored.session, token: stored.token
            }
        }
        else {
            Self::new(api, auth)
        }
    }

    /// Returns the session in the form it is stored.
    pub fn stored(&self) -> StoredSession {
        StoredSession {
            token: self.token.clone(),
            session: self.session,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn auth(&self) -> &AuthProvider {
        &self.auth
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn gate(&self) -> NavigationGate {
        self.session.gate()
    }

    /// Logs in.
    ///
    /// A failed login leaves the current session untouched.
    pub async fn login(
        &mut self, credentials: &Credentials,
    ) -> Result<LoggedInUser, Error> {
        let user = self.auth.login(&self.api, credentials).await?;
        self.session = self.session.login(user.role);
        self.token = Some(user.token.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(role) = self.session.role() {
            info!("Logged out session with role {}", role);
        }
        self.session = self.session.logout();
        self.token = None;
    }

    pub fn navigate(&mut self, page: PageId) -> Result<(), Error> {
        self.session = self.session.navigate(page)?;
        Ok(())
    }

    /// Registers a new account. This needs no login.
    pub async fn register(&self, form: RegistrationForm) -> Result<(), Error> {
        let registration = form.validate()?;
        self.api.register(&registration).await.map_err(|err| {
            Error::api(Action::Register, err)
        })?;
        info!("Registered user {}", registration.username);
        Ok(())
    }

    /// Returns the token to use for an action needing `permission`.
    pub fn authorize(&self, permission: Permission) -> Result<&Token, Error> {
        let token = match (self.session.is_logged_in(), self.token.as_ref()) {
            (true, Some(token)) => token,
            _ => return Err(Error::NotAuthenticated),
        };
        if self.gate().has_permission(permission) {
            Ok(token)
        }
        else {
            Err(Error::Forbidden(permission))
        }
    }

    /// Returns the token to use for showing `page`.
    pub fn authorize_page(&self, page: PageId) -> Result<&Token, Error> {
        let token = self.authorize(page.required_permission())?;
        if self.gate().allows(page) {
            Ok(token)
        }
        else {
            Err(Error::Forbidden(page.required_permission()))
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::auth::providers::MockAuthProvider;
    use crate::console::ValidationError;
    use crate::test::TestApi;

    fn console() -> Console<TestApi> {
        Console::new(
            TestApi::new()
                .with_account("ana", "clave", "administrador")
                .with_account("op", "clave", "operario"),
            AuthProvider::default()
        )
    }

    #[tokio::test]
    async fn login_lands_on_first_menu_page() {
        let mut console = console();
        console.login(&Credentials::new("ana", "clave")).await.unwrap();
        assert_eq!(
            console.session().current_page(), Some(PageId::AdminDashboard)
        );
        assert_eq!(console.stored().token, Some(Token::from("token-ana")));
    }

    #[tokio::test]
    async fn failed_login_keeps_session() {
        let mut console = console();
        console.login(&Credentials::new("op", "clave")).await.unwrap();
        let before = console.stored();
        assert!(
            console.login(&Credentials::new("ana", "mala")).await.is_err()
        );
        assert_eq!(console.stored(), before);
    }

    #[tokio::test]
    async fn logout_forgets_token() {
        let mut console = console();
        console.login(&Credentials::new("op", "clave")).await.unwrap();
        console.logout();
        assert_eq!(console.stored(), StoredSession::default());
        assert!(matches!(
            console.authorize(Permission::ViewCameras),
            Err(Error::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn authorize_follows_role_table() {
        let mut console = console();
        assert!(matches!(
            console.authorize(Permission::ViewCameras),
            Err(Error::NotAuthenticated)
        ));

        console.login(&Credentials::new("op", "clave")).await.unwrap();
        assert!(console.authorize(Permission::ViewCameras).is_ok());
        assert!(matches!(
            console.authorize(Permission::DeleteUser),
            Err(Error::Forbidden(Permission::DeleteUser))
        ));
        assert!(matches!(
            console.authorize_page(PageId::UserList),
            Err(Error::Forbidden(Permission::ListUsers))
        ));
    }

    #[tokio::test]
    async fn navigate_checks_menu() {
        let mut console = Console::new(
            TestApi::new(), MockAuthProvider::new().into()
        );
        assert!(matches!(
            console.navigate(PageId::Dashboard), Err(Error::Session(_))
        ));
        console.login(&Credentials::new("supervisor", "x")).await.unwrap();
        console.navigate(PageId::AttendeeList).unwrap();
        assert!(console.navigate(PageId::AddAttendee).is_err());
        assert_eq!(
            console.session().current_page(), Some(PageId::AttendeeList)
        );
        assert_eq!(console.session().role(), Some(Role::Supervisor));
    }

    #[tokio::test]
    async fn register_validates_first() {
        let console = console();
        let form = RegistrationForm {
            username: "nuevo".into(),
            email: "nuevo@example".into(),
            password: "a".into(),
            confirm_password: "a".into(),
            role: Role::Operator,
        };
        assert!(matches!(
            console.register(form.clone()).await,
            Err(Error::Validation(ValidationError::InvalidEmail))
        ));
        assert_eq!(console.api().request_count(), 0);

        let form = RegistrationForm { email: "nuevo@example.com".into(), ..form };
        console.register(form).await.unwrap();
        assert_eq!(console.api().registrations(), vec!["nuevo".to_string()]);
    }

    #[test]
    fn restore_ignores_inconsistent_state() {
        let stored = StoredSession {
            token: None,
            session: Session::new().login(Role::Administrator),
        };
        let console = Console::restore(
            TestApi::new(), AuthProvider::default(), stored
        );
        assert!(!console.session().is_logged_in());
    }
}
