//! seedxml command-line front end: argument parsing, logging setup,
//! command orchestration and summary rendering.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
