//! Configuration of the console.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fmt, fs, io};
use log::{LevelFilter, debug};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use url::Url;
use crate::console::cameras::{StreamEntry, StreamTable};
use crate::constants::{
    CAMADMIN_CONFIG_FILE_NAME, CAMADMIN_ENV_CONFIG, CAMADMIN_ENV_LOG_LEVEL,
    CAMADMIN_HOME_DIR, CAMADMIN_SESSION_FILE_NAME, DEFAULT_API_URI,
    DEFAULT_STREAM_ID, DEFAULT_STREAM_URI,
};


//------------ ConfigDefaults ------------------------------------------------

pub struct ConfigDefaults;

impl ConfigDefaults {
    fn home_dir() -> PathBuf {
        let mut path = match env::var_os("HOME") {
            Some(home) => PathBuf::from(home),
            None => PathBuf::from("."),
        };
        path.push(CAMADMIN_HOME_DIR);
        path
    }

    /// Returns the path of the config file used when none is given.
    pub fn config_file() -> PathBuf {
        match env::var_os(CAMADMIN_ENV_CONFIG) {
            Some(path) => PathBuf::from(path),
            None => Self::home_dir().join(CAMADMIN_CONFIG_FILE_NAME),
        }
    }

    fn api_uri() -> String {
        DEFAULT_API_URI.to_string()
    }

    fn stream_uri() -> String {
        DEFAULT_STREAM_URI.to_string()
    }

    fn default_stream() -> String {
        DEFAULT_STREAM_ID.to_string()
    }

    fn auth_mode() -> AuthMode {
        AuthMode::Api
    }

    fn session_file() -> PathBuf {
        Self::home_dir().join(CAMADMIN_SESSION_FILE_NAME)
    }

    fn log_level() -> LevelFilter {
        match env::var(CAMADMIN_ENV_LOG_LEVEL) {
            Ok(level) => match LevelFilter::from_str(&level) {
                Ok(level) => level,
                Err(_) => {
                    eprintln!(
                        "Unrecognized value for log level in env var {}, \
                         using 'warn'",
                        CAMADMIN_ENV_LOG_LEVEL
                    );
                    LevelFilter::Warn
                }
            },
            _ => LevelFilter::Warn,
        }
    }

    fn log_type() -> LogType {
        LogType::Stderr
    }

    fn log_file() -> PathBuf {
        Self::home_dir().join("camadmin.log")
    }
}


//------------ Config --------------------------------------------------------

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// The base URI of the console API. Must end with a slash.
    #[serde(default = "ConfigDefaults::api_uri")]
    pub api_uri: String,

    /// The base URI of the streaming server. Must end with a slash.
    #[serde(default = "ConfigDefaults::stream_uri")]
    pub stream_uri: String,

    /// The stream played for cameras not listed in `streams`.
    #[serde(default = "ConfigDefaults::default_stream")]
    pub default_stream: String,

    #[serde(default = "ConfigDefaults::auth_mode")]
    pub auth_mode: AuthMode,

    #[serde(default = "ConfigDefaults::session_file")]
    pub session_file: PathBuf,

    #[serde(
        default = "ConfigDefaults::log_level",
        deserialize_with = "de_level_filter",
        serialize_with = "ser_level_filter"
    )]
    pub log_level: LevelFilter,

    #[serde(default = "ConfigDefaults::log_type")]
    pub log_type: LogType,

    #[serde(default = "ConfigDefaults::log_file")]
    pub log_file: PathBuf,

    /// The stream source of each camera, keyed by camera id.
    #[serde(default)]
    pub streams: BTreeMap<String, StreamEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_uri: ConfigDefaults::api_uri(),
            stream_uri: ConfigDefaults::stream_uri(),
            default_stream: ConfigDefaults::default_stream(),
            auth_mode: ConfigDefaults::auth_mode(),
            session_file: ConfigDefaults::session_file(),
            log_level: ConfigDefaults::log_level(),
            log_type: ConfigDefaults::log_type(),
            log_file: ConfigDefaults::log_file(),
            streams: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// If `path` is given, the file must exist. Otherwise the default
    /// config file is used if there is one and the defaults if not.
    pub fn create(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::read_config(path)?,
            None => {
                let path = ConfigDefaults::config_file();
                if path.exists() {
                    Self::read_config(&path)?
                }
                else {
                    debug!(
                        "No config file at {}, using defaults",
                        path.display()
                    );
                    Config::default()
                }
            }
        };
        config.verify()?;
        Ok(config)
    }

    pub fn read_config(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::Other(format!(
                "cannot read config file '{}': {}", path.display(), e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn verify(&self) -> Result<(), ConfigError> {
        Self::check_base_uri("api_uri", &self.api_uri)?;
        Self::check_base_uri("stream_uri", &self.stream_uri)?;

        if self.default_stream.is_empty() || self.default_stream.contains('/')
        {
            return Err(ConfigError::other(
                "default_stream must be a non-empty stream name without '/'"
            ))
        }

        for (camera, entry) in &self.streams {
            if let StreamEntry::Stream(stream) = entry {
                if stream.is_empty() {
                    return Err(ConfigError::Other(format!(
                        "empty stream name for camera {}", camera
                    )))
                }
            }
        }

        Ok(())
    }

    fn check_base_uri(name: &str, uri: &str) -> Result<Url, ConfigError> {
        if !uri.ends_with('/') {
            return Err(ConfigError::Other(format!("{} must end with '/'", name)))
        }
        let res = Url::parse(uri).map_err(|e| {
            ConfigError::Other(format!("invalid {} '{}': {}", name, uri, e))
        })?;
        if res.cannot_be_a_base() {
            return Err(ConfigError::Other(format!(
                "{} '{}' cannot be used as a base URI", name, uri
            )))
        }
        Ok(res)
    }

    pub fn api_uri(&self) -> Result<Url, ConfigError> {
        Self::check_base_uri("api_uri", &self.api_uri)
    }

    /// Builds the stream table from the configured streams.
    pub fn stream_table(&self) -> Result<StreamTable, ConfigError> {
        let uri = Self::check_base_uri("stream_uri", &self.stream_uri)?;
        let mut table = StreamTable::new(uri, self.default_stream.clone());
        for (camera, entry) in &self.streams {
            table.insert(camera.as_str(), entry.clone().into());
        }
        Ok(table)
    }

    /// Returns the config in TOML format.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| {
            ConfigError::Other(format!("cannot serialize config: {}", e))
        })
    }

    pub fn init_logging(&self) -> Result<(), ConfigError> {
        match self.log_type {
            LogType::File => self.file_logger(&self.log_file),
            LogType::Stderr => self.stderr_logger(),
        }
    }

    /// Creates a stderr logger.
    fn stderr_logger(&self) -> Result<(), ConfigError> {
        self.fern_logger()
            .chain(io::stderr())
            .apply()
            .map_err(|e| {
                ConfigError::Other(
                    format!("Failed to init stderr logging: {}", e)
                )
            })
    }

    /// Creates a file logger using the file provided by `path`.
    fn file_logger(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fern::log_file(path).map_err(|err| {
            ConfigError::Other(format!(
                "Failed to open log file '{}': {}", path.display(), err
            ))
        })?;
        self.fern_logger()
            .chain(file)
            .apply()
            .map_err(|e| {
                ConfigError::Other(
                    format!("Failed to init file logging: {}", e)
                )
            })
    }

    /// Creates and returns a fern logger with log level tweaks.
    fn fern_logger(&self) -> fern::Dispatch {
        // suppress overly noisy logging
        let framework_level = self.log_level.min(LevelFilter::Warn);

        let show_target = self.log_level == LevelFilter::Trace
            || self.log_level == LevelFilter::Debug;
        fern::Dispatch::new()
            .format(move |out, message, record| {
                if show_target {
                    out.finish(format_args!(
                        "{} [{}] [{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.target(),
                        message
                    ))
                }
                else {
                    out.finish(format_args!(
                        "{} [{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        message
                    ))
                }
            })
            .level(self.log_level)
            .level_for("rustls", framework_level)
            .level_for("hyper", framework_level)
            .level_for("hyper_util", framework_level)
            .level_for("mio", framework_level)
            .level_for("reqwest", framework_level)
            .level_for("want", framework_level)
            .level_for("h2", framework_level)
    }
}

fn de_level_filter<'de, D: Deserializer<'de>>(
    d: D
) -> Result<LevelFilter, D::Error> {
    let string = String::deserialize(d)?;
    LevelFilter::from_str(&string).map_err(de::Error::custom)
}

fn ser_level_filter<S: Serializer>(
    level: &LevelFilter, s: S
) -> Result<S::Ok, S::Error> {
    s.serialize_str(&level.as_str().to_lowercase())
}


//------------ ConfigError ---------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    TomlError(toml::de::Error),
    Other(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => e.fmt(f),
            ConfigError::TomlError(e) => e.fmt(f),
            ConfigError::Other(s) => s.fmt(f),
        }
    }
}

impl std::error::Error for ConfigError { }

impl ConfigError {
    pub fn other(s: &str) -> ConfigError {
        ConfigError::Other(s.to_string())
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::TomlError(e)
    }
}


//------------ LogType -------------------------------------------------------

/// The target to log to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogType {
    Stderr,
    File,
}

impl LogType {
    pub fn as_str(self) -> &'static str {
        match self {
            LogType::Stderr => "stderr",
            LogType::File => "file",
        }
    }
}

impl<'de> Deserialize<'de> for LogType {
    fn deserialize<D>(d: D) -> Result<LogType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(d)?;
        match string.as_str() {
            "stderr" => Ok(LogType::Stderr),
            "file" => Ok(LogType::File),
            _ => Err(de::Error::custom(format!(
                "expected \"stderr\" or \"file\", found : \"{}\"",
                string
            ))),
        }
    }
}

impl Serialize for LogType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}


//------------ AuthMode ------------------------------------------------------

/// How users log in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthMode {
    /// Exchange credentials for a token at the API.
    Api,

    /// Derive the role from the user name without asking the API.
    Mock,
}

impl AuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Api => "api",
            AuthMode::Mock => "mock",
        }
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(AuthMode::Api),
            "mock" => Ok(AuthMode::Mock),
            _ => Err(format!(
                "expected \"api\" or \"mock\", found: \"{}\"", s
            )),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AuthMode {
    fn deserialize<D>(d: D) -> Result<AuthMode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(d)?;
        AuthMode::from_str(&string).map_err(de::Error::custom)
    }
}

impl Serialize for AuthMode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cameras::{Camera, CameraStatus};
    use crate::console::cameras::Feed;

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("");
        assert_eq!(config.api_uri, "http://localhost:8000/");
        assert_eq!(config.stream_uri, "http://localhost:8888/");
        assert_eq!(config.default_stream, "camara");
        assert_eq!(config.auth_mode, AuthMode::Api);
        assert_eq!(config.log_type, LogType::Stderr);
        assert!(config.streams.is_empty());
        config.verify().unwrap();
    }

    #[test]
    fn full_file() {
        let config = parse(r#"
            api_uri = "https://console.example.net/api/"
            stream_uri = "https://media.example.net/"
            default_stream = "entrada"
            auth_mode = "mock"
            session_file = "/tmp/camadmin/session.json"
            log_level = "debug"
            log_type = "file"
            log_file = "/tmp/camadmin/camadmin.log"

            [streams]
            1 = "camara"
            2 = { type = "iframe", url = "http://192.0.2.2/" }
        "#);
        config.verify().unwrap();
        assert_eq!(config.auth_mode, AuthMode::Mock);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(
            config.api_uri().unwrap().as_str(),
            "https://console.example.net/api/"
        );

        let table = config.stream_table().unwrap();
        let camera = |id: u64| Camera {
            id: id.into(),
            name: String::new(),
            location: String::new(),
            active: Some(true),
            status: None,
            source: None,
        };
        assert_eq!(
            table.feed(&camera(1)).url(),
            Some("https://media.example.net/camara/index.m3u8")
        );
        assert_eq!(
            table.feed(&camera(2)),
            Feed::Iframe { url: "http://192.0.2.2/".into() }
        );
        assert_eq!(
            table.feed(&camera(3)).url(),
            Some("https://media.example.net/entrada/index.m3u8")
        );
        assert_eq!(camera(3).status(), CameraStatus::Active);
    }

    #[test]
    fn base_uris_need_trailing_slash() {
        let config = parse(r#"api_uri = "http://localhost:8000/api""#);
        assert!(config.verify().is_err());

        let config = parse(r#"stream_uri = "not a uri/""#);
        assert!(config.verify().is_err());
    }

    #[test]
    fn unknown_modes_are_refused() {
        let err = toml::from_str::<Config>(r#"log_type = "syslog""#)
            .unwrap_err();
        assert!(err.to_string().contains("expected \"stderr\" or \"file\""));

        assert!(toml::from_str::<Config>(r#"auth_mode = "ldap""#).is_err());
    }

    #[test]
    fn default_config_round_trips() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let back = parse(&text);
        assert_eq!(back.api_uri, config.api_uri);
        assert_eq!(back.auth_mode, config.auth_mode);
        assert_eq!(back.log_level, config.log_level);
        assert_eq!(back.session_file, config.session_file);
    }

    #[test]
    fn default_config_gives_stream_table() {
        let config = Config::default();
        config.verify().unwrap();
        let table = config.stream_table().unwrap();
        assert_eq!(table.stream_uri().as_str(), DEFAULT_STREAM_URI);
        assert_eq!(
            table.hls_url(DEFAULT_STREAM_ID),
            "http://localhost:8888/camara/index.m3u8"
        );
    }

    #[test]
    fn read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camadmin.conf");
        fs::write(&path, "auth_mode = \"mock\"\n").unwrap();
        let config = Config::create(Some(&path)).unwrap();
        assert_eq!(config.auth_mode, AuthMode::Mock);

        assert!(Config::create(Some(&dir.path().join("missing.conf"))).is_err());
    }
}
