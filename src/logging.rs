//! Logger setup for the binary. Library code only uses the `log` macros.

use std::io::Write;

use console::style;
use log::{Level, LevelFilter};

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` is honored (default `warn`); an explicit `level` from the
/// command line takes precedence over it.
///
/// # Errors
///
/// Returns an error if a logger is already installed.
pub fn init(level: Option<LevelFilter>) -> Result<(), log::SetLoggerError> {
  let mut builder = env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("warn"),
  );

  if let Some(level) = level {
    builder.filter_level(level);
  }
  // Malformed UDP answers are retried internally and only add noise.
  builder.filter_module("hickory_proto", LevelFilter::Error);

  builder.format(|buf, record| {
    writeln!(
      buf,
      "{} {} {}",
      level_tag(record.level()),
      style(record.target()).dim(),
      record.args()
    )
  });

  builder.try_init()
}

fn level_tag(level: Level) -> console::StyledObject<&'static str> {
  match level {
    Level::Error => style("ERROR").red().bold(),
    Level::Warn => style("WARN ").yellow(),
    Level::Info => style("INFO ").green(),
    Level::Debug => style("DEBUG").blue(),
    Level::Trace => style("TRACE").magenta(),
  }
}
