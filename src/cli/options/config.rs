//! Options for creating a console config.

use std::fmt;
use serde::ser::{Serialize, Serializer, SerializeStruct};
use crate::config::{Config, ConfigError};


//------------ Show ----------------------------------------------------------

#[derive(clap::Parser)]
pub struct Show {
    /// Print the configuration in use rather than the defaults
    #[arg(long)]
    current: bool,
}

impl Show {
    pub fn run(self, config: &Config) -> Result<ConfigFile, ConfigError> {
        if self.current {
            config.to_toml().map(Into::into)
        }
        else {
            Config::default().to_toml().map(Into::into)
        }
    }
}


//------------ ConfigFile ----------------------------------------------------

/// A config file as a command result.
pub struct ConfigFile(String);

impl From<String> for ConfigFile {
    fn from(src: String) -> Self {
        Self(src)
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ConfigFile {
    fn serialize<S: Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        let mut serializer = serializer.serialize_struct("ConfigFile", 1)?;
        serializer.serialize_field("content", &self.0)?;
        serializer.end()
    }
}
