//! Input normalization: URL, hostname or IP literal -> `domain.suffix`.

use std::net::IpAddr;

use crate::{
  error::{Error, Result},
  providers::{ExtractResult, ReverseDns, SuffixExtractor},
};

/// A registrable domain and the directory key for its suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
  /// `domain + "." + suffix`, the name that goes on the query line.
  pub domain: String,
  /// Single-label suffix used as the directory key.
  pub suffix: String,
}

/// Resolves `input`, blocking on reverse DNS when it is an IP literal.
///
/// # Errors
///
/// - [`Error::Resolution`] if an IP literal has no hostname.
/// - [`Error::InvalidTarget`] if no domain or suffix can be extracted.
pub fn resolve<E, R>(input: &str, extractor: &E, reverse: &R) -> Result<Resolved>
where
  E: SuffixExtractor + ?Sized,
  R: ReverseDns + ?Sized,
{
  let mut parts = extractor.extract(input)?;
  if let Some(address) = ip_literal(&parts.domain) {
    let host = reverse.reverse(address)?;
    log::debug!("{address} reverse-resolved to {host}");
    parts = extractor.extract(&host)?;
  }
  finish(input, &parts)
}

/// Resolves `input`, suspending on reverse DNS when it is an IP literal.
///
/// # Errors
///
/// Same as [`resolve`].
pub async fn resolve_async<E, R>(
  input: &str,
  extractor: &E,
  reverse: &R,
) -> Result<Resolved>
where
  E: SuffixExtractor + ?Sized,
  R: ReverseDns + ?Sized,
{
  let mut parts = extractor.extract(input)?;
  if let Some(address) = ip_literal(&parts.domain) {
    let host = reverse.reverse_async(address).await?;
    log::debug!("{address} reverse-resolved to {host}");
    parts = extractor.extract(&host)?;
  }
  finish(input, &parts)
}

/// Whole-string IPv4/IPv6 match; a label that merely starts with digits is
/// not an address.
fn ip_literal(domain: &str) -> Option<IpAddr> {
  domain.trim().parse().ok()
}

/// Collapses a multi-label suffix to its last label ("co.uk" -> "uk").
///
/// Registries that serve a compound suffix from a different server than the
/// bare ccTLD are resolved to the ccTLD server. Known limitation.
fn directory_key(suffix: &str) -> &str {
  suffix.rsplit('.').next().unwrap_or(suffix)
}

fn finish(input: &str, parts: &ExtractResult) -> Result<Resolved> {
  let invalid = |reason: &str| Error::InvalidTarget {
    input: input.to_string(),
    reason: reason.to_string(),
  };

  let domain = parts.domain.trim().to_ascii_lowercase();
  if domain.is_empty() {
    return Err(invalid("no registrable domain"));
  }
  let suffix = directory_key(parts.suffix.trim().trim_matches('.'))
    .to_ascii_lowercase();
  if suffix.is_empty() {
    return Err(invalid("no public suffix"));
  }

  Ok(Resolved {
    domain: format!("{domain}.{suffix}"),
    suffix,
  })
}
