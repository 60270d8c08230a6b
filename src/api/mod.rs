//! Data structures exchanged with the console API.

pub mod attendees;
pub mod auth;
pub mod cameras;
pub mod ident;
pub mod status;
pub mod users;
