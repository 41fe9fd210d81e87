use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{cli::Cli, whois::DEFAULT_TIMEOUT};

const APP_NAME: &str = "whoiskit";
const FILE_NAME: Option<&str> = None;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
  pub default_timeout_secs: u64,
  pub blocking: bool,
}

impl Default for UserConfig {
  fn default() -> Self {
    Self {
      default_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
      blocking: false,
    }
  }
}

impl UserConfig {
  /// Applies command-line overrides on top of the stored defaults.
  #[must_use]
  pub fn merged(mut self, cli: &Cli) -> Self {
    if let Some(secs) = cli.timeout {
      self.default_timeout_secs = secs;
    }
    if cli.blocking {
      self.blocking = true;
    } else if cli.no_blocking {
      self.blocking = false;
    }
    self
  }

  /// A hand-edited zero would time out every query, so it is read as one
  /// second.
  #[must_use]
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.default_timeout_secs.max(1))
  }
}

/// Read ~/.config/whoiskit/default-config.toml (or OS equivalent).
pub fn load() -> UserConfig {
  confy::load(APP_NAME, FILE_NAME).unwrap_or_else(|e| {
    log::warn!("ignoring unreadable config file: {e}");
    UserConfig::default()
  })
}

pub fn store(cfg: &UserConfig) -> anyhow::Result<()> {
  confy::store(APP_NAME, FILE_NAME, cfg).map_err(Into::into)
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("whoiskit").chain(args.iter().copied()))
      .unwrap()
  }

  #[test]
  fn test_defaults() {
    let cfg = UserConfig::default();
    assert_eq!(cfg.timeout(), DEFAULT_TIMEOUT);
    assert!(!cfg.blocking);
  }

  #[test]
  fn test_flags_override_stored_values() {
    let stored = UserConfig {
      default_timeout_secs: 30,
      blocking: false,
    };
    let merged = stored.clone().merged(&cli(&["example.com", "--timeout", "5", "--blocking"]));
    assert_eq!(merged.timeout(), Duration::from_secs(5));
    assert!(merged.blocking);

    let untouched = stored.clone().merged(&cli(&["example.com"]));
    assert_eq!(untouched, stored);
  }

  #[test]
  fn test_stored_blocking_survives_without_flag() {
    let stored = UserConfig {
      default_timeout_secs: 10,
      blocking: true,
    };
    assert!(stored.clone().merged(&cli(&["example.com"])).blocking);
  }

  #[test]
  fn test_no_blocking_overrides_stored_blocking() {
    let stored = UserConfig {
      default_timeout_secs: 10,
      blocking: true,
    };
    assert!(!stored.merged(&cli(&["example.com", "--no-blocking"])).blocking);
  }

  #[test]
  fn test_zero_timeout_is_clamped() {
    let cfg = UserConfig {
      default_timeout_secs: 0,
      blocking: false,
    };
    assert_eq!(cfg.timeout(), Duration::from_secs(1));
  }

  #[test]
  fn test_missing_keys_use_defaults() {
    let cfg: UserConfig = serde_json::from_str(r#"{"blocking": true}"#).unwrap();
    assert_eq!(cfg.default_timeout_secs, DEFAULT_TIMEOUT.as_secs());
    assert!(cfg.blocking);
  }
}
