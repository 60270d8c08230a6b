use log::{debug, info};
use crate::api::auth::Credentials;
use crate::auth::Role;
use crate::console::{Action, ConsoleApi, Error};
use super::LoggedInUser;


//------------ TokenAuthProvider ---------------------------------------------

/// Logs in by exchanging the credentials for a bearer token at the API.
///
/// The API also decides the role of the user. A role this console does not
/// know is refused rather than mapped to an empty menu.
#[derive(Clone, Debug, Default)]
pub struct TokenAuthProvider;

impl TokenAuthProvider {
    pub fn new() -> Self {
        TokenAuthProvider
    }

    pub async fn login<A: ConsoleApi>(
        &self, api: &A, credentials: &Credentials,
    ) -> Result<LoggedInUser, Error> {
        let res = api.token(credentials).await.map_err(|err| {
            Error::api(Action::Login, err)
        })?;

        if !res.token_type.eq_ignore_ascii_case("bearer") {
            debug!(
                "Token endpoint returned token type '{}', using it as bearer",
                res.token_type
            );
        }

        let role = res.role.parse::<Role>()?;
        info!("User logged in: {} as {}", credentials.username, role);

        Ok(LoggedInUser {
            token: res.access_token,
            username: credentials.username.clone(),
            role,
        })
    }
}


//============ Tests =========================================================
