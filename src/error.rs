use std::{io, time::Duration};

use thiserror::Error;

/// Everything that can end a WHOIS lookup.
///
/// Each variant is terminal for the lookup that produced it; nothing in the
/// crate retries. Parsing has no variant here because it cannot fail.
#[derive(Debug, Error)]
pub enum Error {
  /// Reverse DNS produced no hostname for an IP literal.
  #[error("could not resolve {address} to a hostname: {reason}")]
  Resolution { address: String, reason: String },

  /// No WHOIS server is known for the suffix.
  #[error("no WHOIS server known for suffix '{suffix}'")]
  UnsupportedSuffix { suffix: String },

  /// Resolving, connecting to, or talking to the WHOIS server failed.
  #[error("connection to {server} failed: {source}")]
  Connection {
    server: String,
    #[source]
    source: io::Error,
  },

  /// The query did not complete within the caller's budget.
  #[error("query to {server} timed out after {timeout:?}")]
  Timeout { server: String, timeout: Duration },

  /// The input did not yield a registrable domain and suffix.
  #[error("'{input}' is not a resolvable domain: {reason}")]
  InvalidTarget { input: String, reason: String },
}

impl Error {
  pub(crate) fn connection(server: &str, source: io::Error) -> Self {
    Self::Connection {
      server: server.to_string(),
      source,
    }
  }

  pub(crate) fn timeout(server: &str, timeout: Duration) -> Self {
    Self::Timeout {
      server: server.to_string(),
      timeout,
    }
  }

  /// Short, stable name of the error kind, used in JSON output.
  #[must_use]
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::Resolution { .. } => "resolution",
      Self::UnsupportedSuffix { .. } => "unsupported_suffix",
      Self::Connection { .. } => "connection",
      Self::Timeout { .. } => "timeout",
      Self::InvalidTarget { .. } => "invalid_target",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
