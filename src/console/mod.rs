//! The console views and the state they share.

pub use self::backend::ConsoleApi;
pub use self::client::HttpConsoleApi;
pub use self::context::Console;
pub use self::error::{Action, Error};
pub use self::resource::RemoteList;
pub use self::validate::ValidationError;

pub mod attendees;
pub mod backend;
pub mod cameras;
pub mod client;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod resource;
pub mod store;
pub mod users;
pub mod validate;
