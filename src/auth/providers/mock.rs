use log::info;
use crate::api::auth::{Credentials, Token};
use crate::auth::Role;
use crate::constants::MOCK_TOKEN_PREFIX;
use super::LoggedInUser;


//------------ MockAuthProvider ----------------------------------------------

/// Logs in without asking the API.
///
/// The role is guessed from the user name: names containing `admin` get the
/// administrator role, names containing `super` the supervisor role, and
/// everyone else is an operator. Any password is accepted. This is meant
/// for demonstrating the console without a backend only.
#[derive(Clone, Debug, Default)]
pub struct MockAuthProvider;

impl MockAuthProvider {
    pub fn new() -> Self {
        MockAuthProvider
    }

    pub fn role_for(username: &str) -> Role {
        if username.contains("admin") {
            Role::Administrator
        }
        else if username.contains("super") {
            Role::Supervisor
        }
        else {
            Role::Operator
        }
    }

    pub fn login(&self, credentials: &Credentials) -> LoggedInUser {
        let role = Self::role_for(&credentials.username);
        info!(
            "User logged in without verification: {} as {}",
            credentials.username, role
        );
        LoggedInUser {
            token: Token::from(
                format!("{}{}", MOCK_TOKEN_PREFIX, credentials.username)
            ),
            username: credentials.username.clone(),
            role,
        }
    }
}


//============ Tests =========================================================
