//! WHOIS resolution: from a URL, hostname or IP to a parsed registry record.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let result = whoiskit::whois::lookup("https://www.rust-lang.org", Duration::from_secs(10))?;
//! println!("{} via {}", result.domain, result.server);
//! if let Some(registrar) = result.record.registrar() {
//!   println!("registrar: {registrar}");
//! }
//! # Ok::<(), whoiskit::Error>(())
//! ```

use std::time::Duration;

use crate::error::Result;

pub mod client;
pub mod parser;
pub mod query;
pub mod resolve;
pub mod rules;
pub mod servers;

pub use client::{Prepared, WhoisClient, WhoisResult, DEFAULT_TIMEOUT};
pub use parser::{Field, FieldValue, ParsedRecord};
pub use query::QueryResult;
pub use rules::RuleSetTag;
pub use servers::{QueryStyle, ServerEntry};

/// Looks up `input` with the default collaborators, blocking the caller.
///
/// # Errors
///
/// See [`WhoisClient::lookup`].
pub fn lookup(input: &str, timeout: Duration) -> Result<WhoisResult> {
  WhoisClient::new().lookup(input, timeout)
}

/// Looks up `input` with the default collaborators on the caller's runtime.
///
/// # Errors
///
/// See [`WhoisClient::lookup_async`].
pub async fn lookup_async(input: &str, timeout: Duration) -> Result<WhoisResult> {
  WhoisClient::new().lookup_async(input, timeout).await
}
