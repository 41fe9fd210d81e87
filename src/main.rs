#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::struct_excessive_bools)]

use std::process::ExitCode;

use anyhow::Result;
use whoiskit::run;

#[tokio::main]
async fn main() -> Result<ExitCode> {
  run().await
}
