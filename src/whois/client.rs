//! The lookup facade: resolve -> directory -> query -> parse.

use std::time::Duration;

use serde::Serialize;

use super::{
  parser::{self, ParsedRecord},
  query::{self, QueryResult, WHOIS_PORT},
  resolve::{self, Resolved},
  servers::{self, ServerEntry},
};
use crate::{
  error::Result,
  providers::{PublicSuffixExtractor, ReverseDns, SuffixExtractor, SystemReverseDns},
};

/// Budget used by the CLI when neither a flag nor the config file sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoisResult {
  /// The `domain.suffix` that was queried.
  pub domain: String,
  /// The host that answered.
  pub server: String,
  /// The full reply text.
  pub raw_text: String,
  /// Fields extracted from `raw_text`; may be empty.
  pub record: ParsedRecord,
}

/// Everything decided before the network is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
  pub domain: String,
  pub entry: ServerEntry,
  /// Query line in the registry's style, without CRLF.
  pub query_line: String,
}

/// Runs lookups with pluggable suffix extraction and reverse DNS.
///
/// Holds no per-lookup state; one client can serve any number of concurrent
/// lookups.
#[derive(Debug, Clone)]
pub struct WhoisClient<E = PublicSuffixExtractor, R = SystemReverseDns> {
  extractor: E,
  reverse: R,
  server_override: Option<String>,
  port: u16,
}

impl WhoisClient {
  /// A client with the public suffix list and system DNS.
  #[must_use]
  pub const fn new() -> Self {
    Self::with_collaborators(PublicSuffixExtractor, SystemReverseDns)
  }
}

impl Default for WhoisClient {
  fn default() -> Self {
    Self::new()
  }
}

impl<E, R> WhoisClient<E, R>
where
  E: SuffixExtractor,
  R: ReverseDns,
{
  #[must_use]
  pub const fn with_collaborators(extractor: E, reverse: R) -> Self {
    Self {
      extractor,
      reverse,
      server_override: None,
      port: WHOIS_PORT,
    }
  }

  /// Sends every query to `server` instead of the directory's host. The
  /// directory still decides the query style and the rule set.
  #[must_use]
  pub fn with_server_override(mut self, server: impl Into<String>) -> Self {
    self.server_override = Some(server.into());
    self
  }

  #[must_use]
  pub fn with_port(mut self, port: u16) -> Self {
    self.port = port;
    self
  }

  /// Resolves `input` and picks its server, blocking on reverse DNS if
  /// needed. No WHOIS traffic.
  ///
  /// # Errors
  ///
  /// [`Error::Resolution`](crate::Error::Resolution),
  /// [`Error::InvalidTarget`](crate::Error::InvalidTarget) or
  /// [`Error::UnsupportedSuffix`](crate::Error::UnsupportedSuffix).
  pub fn prepare(&self, input: &str) -> Result<Prepared> {
    let resolved = resolve::resolve(input, &self.extractor, &self.reverse)?;
    Self::route(resolved)
  }

  /// [`prepare`](Self::prepare) with suspending reverse DNS.
  ///
  /// # Errors
  ///
  /// Same as [`prepare`](Self::prepare).
  pub async fn prepare_async(&self, input: &str) -> Result<Prepared> {
    let resolved =
      resolve::resolve_async(input, &self.extractor, &self.reverse).await?;
    Self::route(resolved)
  }

  /// Full lookup, blocking the calling thread.
  ///
  /// # Errors
  ///
  /// Any error from [`prepare`](Self::prepare), or
  /// [`Error::Connection`](crate::Error::Connection) /
  /// [`Error::Timeout`](crate::Error::Timeout) from the query.
  pub fn lookup(&self, input: &str, timeout: Duration) -> Result<WhoisResult> {
    let prepared = self.prepare(input)?;
    let server = self.server_for(&prepared);
    let reply = query::query_on(&prepared.query_line, server, self.port, timeout)?;
    Ok(finish(prepared, server, reply))
  }

  /// Full lookup, suspending at DNS, connect and every read.
  ///
  /// # Errors
  ///
  /// Same as [`lookup`](Self::lookup).
  pub async fn lookup_async(
    &self,
    input: &str,
    timeout: Duration,
  ) -> Result<WhoisResult> {
    let prepared = self.prepare_async(input).await?;
    let server = self.server_for(&prepared);
    let reply =
      query::query_async_on(&prepared.query_line, server, self.port, timeout)
        .await?;
    Ok(finish(prepared, server, reply))
  }

  fn route(resolved: Resolved) -> Result<Prepared> {
    let entry = servers::lookup(&resolved.suffix)?;
    let query_line = entry.query_line(&resolved.domain);
    log::debug!(
      "{} -> {} ({:?} rules)",
      resolved.domain,
      entry.server,
      entry.rules
    );
    Ok(Prepared {
      domain: resolved.domain,
      entry,
      query_line,
    })
  }

  fn server_for<'a>(&'a self, prepared: &Prepared) -> &'a str {
    self.server_override.as_deref().unwrap_or(prepared.entry.server)
  }
}

fn finish(prepared: Prepared, server: &str, reply: QueryResult) -> WhoisResult {
  let record = parser::parse_with_fallback(&reply.query_text, prepared.entry.rules);
  if record.is_empty() {
    log::debug!("no fields recognized in the reply from {server}");
  }
  WhoisResult {
    domain: prepared.domain,
    server: server.to_string(),
    raw_text: reply.query_text,
    record,
  }
}
