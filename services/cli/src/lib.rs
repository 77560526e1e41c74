//! Command-line front end for the learning assistant.
//!
//! The binary in `bin/tutor.rs` is a thin wrapper: it loads configuration,
//! installs logging and hands the parsed command line to [`app::run`].

pub mod app;
pub mod cli;
pub mod config;
pub mod session;
