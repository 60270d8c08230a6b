//! Keeping the session between console invocations.

use std::fmt;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::api::auth::Token;
use crate::auth::Session;
use crate::commons::file::{self, FileError};


//------------ StoredSession -------------------------------------------------

/// What is kept on disk: the bearer token and the session it belongs to.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,

    #[serde(default)]
    pub session: Session,
}

impl StoredSession {
    pub fn new(token: Token, session: Session) -> Self {
        StoredSession { token: Some(token), session }
    }

    /// Returns whether token and session agree.
    ///
    /// A logged in session needs a token and a logged out one must not
    /// have one.
    pub fn is_consistent(&self) -> bool {
        self.token.is_some() == self.session.is_logged_in()
    }
}


//------------ SessionStore --------------------------------------------------

/// The file holding the [`StoredSession`].
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session.
    ///
    /// A missing file gives a logged out session. So does a file where
    /// token and session disagree.
    pub fn load(&self) -> Result<StoredSession, StoreError> {
        match file::load_json::<StoredSession>(&self.path)? {
            None => {
                debug!("No session stored at {}", self.path.display());
                Ok(StoredSession::default())
            }
            Some(stored) if stored.is_consistent() => Ok(stored),
            Some(_) => {
                warn!(
                    "Ignoring inconsistent session stored at {}",
                    self.path.display()
                );
                Ok(StoredSession::default())
            }
        }
    }

    pub fn save(&self, stored: &StoredSession) -> Result<(), StoreError> {
        if stored.session.is_logged_in() {
            file::save_json(stored, &self.path)?;
        }
        else {
            self.clear()?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        file::delete_file(&self.path).map_err(StoreError)
    }
}


//------------ StoreError ----------------------------------------------------

#[derive(Debug)]
pub struct StoreError(FileError);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "No se pudo acceder a la sesión guardada: {}", self.0)
    }
}

impl std::error::Error for StoreError { }

impl From<FileError> for StoreError {
    fn from(err: FileError) -> Self {
        StoreError(err)
    }
}


//============ Tests =========================================================
