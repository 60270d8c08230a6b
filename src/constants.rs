//! Various console-wide constants.


//------------ Binary Names -------------------------------------------------

/// The user agent sent with every API request.
pub const CAMADMIN_USER_AGENT: &str = "camadmin";


//------------ Config Files Paths -------------------------------------------

/// The name of the directory under the user's home holding console state.
pub const CAMADMIN_HOME_DIR: &str = ".camadmin";

/// The file name of the config file inside [`CAMADMIN_HOME_DIR`].
pub const CAMADMIN_CONFIG_FILE_NAME: &str = "camadmin.conf";

/// The file name of the session file inside [`CAMADMIN_HOME_DIR`].
pub const CAMADMIN_SESSION_FILE_NAME: &str = "session.json";


//------------ Environment Variables ----------------------------------------

/// The environment variable with the path to the config file.
pub const CAMADMIN_ENV_CONFIG: &str = "CAMADMIN_CONFIG";

/// The environment variable with the base URI of the console API.
///
/// It overrides `api_uri` from the config file.
pub const CAMADMIN_ENV_API_URI: &str = "CAMADMIN_API_URI";

/// The environment variable with the log level.
///
/// The variable should contain the name of a [`log::LevelFilter`]. It will
/// be overwritten by the config file. The default is “warn.”
pub const CAMADMIN_ENV_LOG_LEVEL: &str = "CAMADMIN_LOG_LEVEL";

/// The environment variable directing `camadmin` to print the request and
/// exit.
///
/// If this variable is set, the client will not execute the requested
/// function but just print out the HTTP request it would need to perform
/// and exit.
pub const CAMADMIN_CLI_API_ENV: &str = "CAMADMIN_CLI_API";

/// The environment variable with the report format.
pub const CAMADMIN_ENV_FORMAT: &str = "CAMADMIN_FORMAT";


//------------ HTTP ---------------------------------------------------------

/// The timeout for requests against the console API.
pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;

/// The default base URI of the console API.
pub const DEFAULT_API_URI: &str = "http://localhost:8000/";

/// The default base URI of the streaming server.
pub const DEFAULT_STREAM_URI: &str = "http://localhost:8888/";

/// The stream used for cameras missing from the stream table.
pub const DEFAULT_STREAM_ID: &str = "camara";

/// The name of the HLS playlist below each stream path.
pub const HLS_PLAYLIST: &str = "index.m3u8";


//------------ API Paths ----------------------------------------------------

pub const API_TOKEN_PATH: &str = "token";
pub const API_REGISTER_PATH: &str = "register";
pub const API_USERS_PATH: &str = "users";
pub const API_ATTENDEES_PATH: &str = "attendees";
pub const API_CAMERAS_PATH: &str = "cameras";


//------------ Session ------------------------------------------------------

/// The prefix of tokens issued by the offline mock authenticator.
pub const MOCK_TOKEN_PREFIX: &str = "mock-";
