//! The ways a console user can log in.

pub use self::mock::MockAuthProvider;
pub use self::token::TokenAuthProvider;

mod mock;
mod token;

use std::fmt;
use crate::api::auth::{Credentials, Token};
use crate::config::AuthMode;
use crate::console::{validate, ConsoleApi, Error};
use super::Role;


//------------ LoggedInUser --------------------------------------------------

/// The outcome of a successful login.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoggedInUser {
    pub token: Token,
    pub username: String,
    pub role: Role,
}

impl fmt::Display for LoggedInUser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.role)
    }
}


//------------ AuthProvider --------------------------------------------------

/// The login mechanism selected by the configuration.
#[derive(Clone, Debug)]
pub enum AuthProvider {
    Token(TokenAuthProvider),
    Mock(MockAuthProvider),
}

impl From<TokenAuthProvider> for AuthProvider {
    fn from(provider: TokenAuthProvider) -> Self {
        AuthProvider::Token(provider)
    }
}

impl From<MockAuthProvider> for AuthProvider {
    fn from(provider: MockAuthProvider) -> Self {
        AuthProvider::Mock(provider)
    }
}

impl AuthProvider {
    pub fn new(mode: AuthMode) -> Self {
        match mode {
            AuthMode::Api => TokenAuthProvider::new().into(),
            AuthMode::Mock => MockAuthProvider::new().into(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            AuthProvider::Token(_) => AuthMode::Api,
            AuthProvider::Mock(_) => AuthMode::Mock,
        }
    }

    /// Checks the credentials and determines the user's role.
    ///
    /// Empty user names or passwords are refused before anything else
    /// happens.
    pub async fn login<A: ConsoleApi>(
        &self, api: &A, credentials: &Credentials,
    ) -> Result<LoggedInUser, Error> {
        validate::login(credentials)?;

        match self {
            AuthProvider::Token(provider) => {
                provider.login(api, credentials).await
            }
            AuthProvider::Mock(provider) => Ok(provider.login(credentials)),
        }
    }
}

impl Default for AuthProvider {
    fn default() -> Self {
        TokenAuthProvider::new().into()
    }
}
