//! Types for logging in and registering.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::auth::Role;


//------------ Token ---------------------------------------------------------

/// A bearer token issued by the API.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Token(String);

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token(s)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//------------ Credentials ---------------------------------------------------

/// The user name and password sent to the token endpoint.
///
/// These are sent form encoded, the way OAuth2 password flows expect.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>, password: impl Into<String>
    ) -> Self {
        Credentials { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}


//------------ TokenResponse -------------------------------------------------

/// The response of the token endpoint.
///
/// The role is kept as a plain string: the API may know roles this console
/// does not.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TokenResponse {
    pub access_token: Token,

    #[serde(default = "TokenResponse::bearer")]
    pub token_type: String,

    pub role: String,
}

impl TokenResponse {
    fn bearer() -> String {
        "bearer".into()
    }
}


//------------ Registration --------------------------------------------------

/// A self-registration request.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<hidden>")
            .field("role", &self.role)
            .finish()
    }
}
