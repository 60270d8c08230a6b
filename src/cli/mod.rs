//! The command line client.

pub mod client;
pub mod options;
pub mod report;
