#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::module_name_repetitions)]

//! WHOIS lookups for domains, URLs and IP addresses.
//!
//! The library half is [`whois`]: resolve the input to `domain.suffix`, pick
//! the registry server for the suffix, query it on port 43 (blocking or on a
//! tokio runtime) and extract the common registration fields. [`run`] drives
//! the `whoiskit` command-line tool on top of it.

use std::process::ExitCode;

mod app;
mod cli;
pub mod error;
mod logging;
pub mod providers;
mod results;
mod user_config;
pub mod whois;

pub use error::{Error, Result};

/// Runs the command-line application.
///
/// Parses the arguments, loads the user config, performs one lookup and
/// prints it. A failed lookup is reported in the output and turned into a
/// failure exit code rather than an `Err`.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized, the config file cannot
/// be written, or JSON serialization fails.
pub async fn run() -> anyhow::Result<ExitCode> {
  let app = app::App::new()?;
  app.run().await
}
