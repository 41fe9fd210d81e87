use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "whoiskit", version)]
#[command(
  about = "Look up the WHOIS registration record of a domain, URL, or IP address.",
  long_about = "Resolves the input to its registrable domain (reverse DNS for IP addresses), picks the authoritative WHOIS server for its suffix, queries it over port 43 and extracts the common registration fields from the reply."
)]
pub struct Cli {
  /// Domain, URL, or IP address to look up.
  #[arg(required_unless_present_any = ["config_show", "save_defaults"])]
  pub target: Option<String>,

  /// Overall query budget in seconds (connect, send and read).
  #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
  pub timeout: Option<u64>,

  /// Run the lookup on a blocking socket instead of the async runtime.
  #[arg(long, conflicts_with = "no_blocking")]
  pub blocking: bool,

  /// Run the lookup on the async runtime even if blocking is the saved
  /// default.
  #[arg(long)]
  pub no_blocking: bool,

  /// Output the result in JSON format instead of human-readable text.
  #[arg(long, conflicts_with = "raw")]
  pub json: bool,

  /// Print the registry's reply verbatim instead of the extracted fields.
  #[arg(long)]
  pub raw: bool,

  /// Minimum log level written to stderr (overrides `RUST_LOG`).
  #[arg(long, value_enum, value_name = "LEVEL")]
  pub log_level: Option<LogLevel>,

  /// Persist `--timeout` and `--blocking`/`--no-blocking` as the new defaults.
  #[arg(long)]
  pub save_defaults: bool,

  /// Print the current merged configuration and exit.
  #[arg(long)]
  pub config_show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
  Off,
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl From<LogLevel> for LevelFilter {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Off => Self::Off,
      LogLevel::Error => Self::Error,
      LogLevel::Warn => Self::Warn,
      LogLevel::Info => Self::Info,
      LogLevel::Debug => Self::Debug,
      LogLevel::Trace => Self::Trace,
    }
  }
}
