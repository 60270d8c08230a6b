//! The _camadmin_ library crate.
//!
//! An administration console for camera-surveillance installations: role
//! based navigation, user and attendee management, and the camera grid,
//! all backed by a remote REST API.

pub mod api;
pub mod auth;
pub mod cli;
pub mod commons;
pub mod config;
pub mod console;
pub mod constants;

#[cfg(test)]
mod test;
