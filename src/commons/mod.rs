//! Utilities shared across the console.

pub mod file;
pub mod httpclient;
