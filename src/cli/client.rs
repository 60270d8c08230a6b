//! The console as driven from the command line.

use std::fmt;
use log::debug;
use url::Url;
use crate::auth::{AuthProvider, PageId};
use crate::config::{Config, ConfigError};
use crate::console::store::SessionStore;
use crate::console::cameras::StreamTable;
use crate::console::{self, Console, HttpConsoleApi};


//------------ ConsoleClient -------------------------------------------------

/// A console whose session lives in the session file.
///
/// Every command creates a client, acts through its console, and writes the
/// session back if the command changed it.
pub struct ConsoleClient {
    console: Console<HttpConsoleApi>,
    store: SessionStore,
    streams: StreamTable,
}

impl ConsoleClient {
    /// Creates a client from the config.
    ///
    /// If `api_uri` is given, it overrides the URI from the config.
    pub fn new(config: &Config, api_uri: Option<Url>) -> Result<Self, Error> {
        let api_uri = match api_uri {
            Some(uri) => uri,
            None => config.api_uri()?,
        };
        debug!("Using console API at {}", api_uri);

        let store = SessionStore::new(config.session_file.clone());
        let stored = store.load().map_err(console::Error::from)?;
        let console = Console::restore(
            HttpConsoleApi::new(api_uri),
            AuthProvider::new(config.auth_mode),
            stored,
        );

        Ok(ConsoleClient {
            console,
            store,
            streams: config.stream_table()?,
        })
    }

    pub fn console(&self) -> &Console<HttpConsoleApi> {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console<HttpConsoleApi> {
        &mut self.console
    }

    pub fn streams(&self) -> &StreamTable {
        &self.streams
    }

    /// Writes the session to the session file.
    pub fn persist(&self) -> Result<(), Error> {
        self.store.save(&self.console.stored()).map_err(|err| {
            Error::Console(err.into())
        })
    }

    /// Moves the session to the given page and keeps it there.
    pub fn open(&mut self, page: PageId) -> Result<(), Error> {
        if self.console.session().current_page() != Some(page) {
            self.console.navigate(page)?;
            self.persist()?;
        }
        Ok(())
    }
}


//------------ Error ---------------------------------------------------------

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Console(console::Error),
    Input(String),
}

impl Error {
    pub fn input(msg: impl fmt::Display) -> Self {
        Error::Input(msg.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "Invalid configuration: {}", err),
            Error::Console(err) => err.fmt(f),
            Error::Input(msg) => msg.fmt(f),
        }
    }
}

impl std::error::Error for Error { }

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<console::Error> for Error {
    fn from(err: console::Error) -> Self {
        Error::Console(err)
    }
}

impl From<crate::auth::SessionError> for Error {
    fn from(err: crate::auth::SessionError) -> Self {
        Error::Console(err.into())
    }
}


//============ Tests =========================================================
