//! The console session.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use serde::{Deserialize, Serialize};
use super::{NavigationGate, PageId, Role};


//------------ Session -------------------------------------------------------

/// The login state of the console and the page currently shown.
///
/// Sessions are values: every transition consumes the current session and
/// returns the next one, so there is never a partially updated session.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    LoggedOut,

    LoggedIn {
        role: Role,
        current_page: PageId,
    },
}

impl Session {
    /// Creates the empty session present at startup.
    pub fn new() -> Self {
        Session::LoggedOut
    }

    /// Starts a session for a user that has been authenticated as `role`.
    ///
    /// The session opens on the landing page of the role. Logging in while
    /// already logged in replaces the old session entirely.
    pub fn login(self, role: Role) -> Self {
        let gate = NavigationGate::for_role(role);
        let current_page = gate.landing_page().unwrap_or(PageId::Dashboard);
        Session::LoggedIn { role, current_page }
    }

    /// Ends the session.
    pub fn logout(self) -> Self {
        Session::LoggedOut
    }

    /// Switches to another page.
    ///
    /// Only legal while logged in, and only for pages the role's menu
    /// offers.
    pub fn navigate(self, page: PageId) -> Result<Self, SessionError> {
        match self {
            Session::LoggedOut => Err(SessionError::NotLoggedIn),
            Session::LoggedIn { role, .. } => {
                if NavigationGate::for_role(role).allows(page) {
                    Ok(Session::LoggedIn { role, current_page: page })
                }
                else {
                    Err(SessionError::PageNotAllowed(role, page))
                }
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Session::LoggedIn { role, .. } => Some(*role),
            Session::LoggedOut => None,
        }
    }

    pub fn current_page(&self) -> Option<PageId> {
        match self {
            Session::LoggedIn { current_page, .. } => Some(*current_page),
            Session::LoggedOut => None,
        }
    }

    /// Returns the navigation gate for the session's role.
    pub fn gate(&self) -> NavigationGate {
        NavigationGate::new(self.role())
    }

    /// Returns the flat view of the session.
    pub fn view(&self) -> SessionView {
        SessionView {
            logged_in: self.is_logged_in(),
            role: self.role().map(|r| r.as_str()).unwrap_or("").to_string(),
            current_page: self.current_page().map(|p| {
                p.as_str()
            }).unwrap_or("").to_string(),
        }
    }
}


//------------ SessionView ---------------------------------------------------

/// The session as a flat record of strings.
///
/// Empty strings stand in for the role and page of a logged out session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SessionView {
    pub logged_in: bool,
    pub role: String,
    pub current_page: String,
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.logged_in {
            writeln!(f, "Logged in: yes")?;
            writeln!(f, "Role:      {}", self.role)?;
            write!(f, "Page:      {}", self.current_page)
        }
        else {
            write!(f, "Logged in: no")
        }
    }
}


//------------ SessionError --------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    NotLoggedIn,
    PageNotAllowed(Role, PageId),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::NotLoggedIn => {
                f.write_str("Debe iniciar sesión primero")
            }
            SessionError::PageNotAllowed(role, page) => {
                write!(
                    f, "La página '{}' no está disponible para el rol {}",
                    page, role
                )
            }
        }
    }
}

impl std::error::Error for SessionError { }


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_logout() {
        let session = Session::new().login(Role::Administrator);
        assert_eq!(
            session.view(),
            SessionView {
                logged_in: true,
                role: "administrador".into(),
                current_page: "adminDashboard".into(),
            }
        );

        let session = session.logout();
        assert_eq!(
            session.view(),
            SessionView {
                logged_in: false,
                role: String::new(),
                current_page: String::new(),
            }
        );
    }

    #[test]
    fn navigate_is_idempotent() {
        let session = Session::new().login(Role::Administrator);
        let once = session.navigate(PageId::UserList).unwrap();
        assert_eq!(once.current_page(), Some(PageId::UserList));
        let twice = once.navigate(PageId::UserList).unwrap();
        assert_eq!(twice.current_page(), Some(PageId::UserList));
        assert_eq!(once, twice);
    }

    #[test]
    fn navigate_keeps_role() {
        let session = Session::new().login(Role::Supervisor);
        let session = session.navigate(PageId::AttendeeList).unwrap();
        assert_eq!(session.role(), Some(Role::Supervisor));
        assert!(session.is_logged_in());
    }

    #[test]
    fn navigate_requires_login() {
        assert_eq!(
            Session::new().navigate(PageId::Dashboard),
            Err(SessionError::NotLoggedIn)
        );
    }

    #[test]
    fn navigate_refuses_pages_outside_menu() {
        let session = Session::new().login(Role::Operator);
        assert_eq!(
            session.navigate(PageId::UserList),
            Err(SessionError::PageNotAllowed(Role::Operator, PageId::UserList))
        );
    }

    #[test]
    fn serde_round_trip() {
        let session = Session::new().login(Role::Operator);
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(
            json,
            r#"{"state":"logged_in","role":"operario","current_page":"dashboard"}"#
        );
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
