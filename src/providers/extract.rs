//! Splits URLs and hostnames into subdomain, registrable domain and suffix.
//!
//! The heavy lifting is done by `tldextract` against its bundled public suffix
//! snapshot. This module only isolates the host part of the input and
//! short-circuits IP literals, which have no suffix to extract.

use std::{net::IpAddr, sync::LazyLock};

use tldextract::{TldExtractor, TldOption};

use crate::error::{Error, Result};

static TLD_EXTRACTOR: LazyLock<TldExtractor> =
  LazyLock::new(|| TldExtractor::new(TldOption::default()));

/// Output of suffix extraction.
///
/// `suffix` may span several labels ("co.uk"). For an IP literal input the
/// literal is reported as `domain` and `suffix` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractResult {
  pub subdomain: String,
  pub domain: String,
  pub suffix: String,
}

/// Anything that can split an input into subdomain/domain/suffix.
pub trait SuffixExtractor: Send + Sync {
  /// # Errors
  ///
  /// Returns [`Error::InvalidTarget`] when the input cannot be split at all.
  fn extract(&self, input: &str) -> Result<ExtractResult>;
}

/// Public suffix list backed extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PublicSuffixExtractor;

impl SuffixExtractor for PublicSuffixExtractor {
  fn extract(&self, input: &str) -> Result<ExtractResult> {
    let host = host_of(input.trim());
    if host.is_empty() {
      return Err(Error::InvalidTarget {
        input: input.to_string(),
        reason: "no host component".to_string(),
      });
    }

    if host.parse::<IpAddr>().is_ok() {
      return Ok(ExtractResult {
        domain: host.to_string(),
        ..ExtractResult::default()
      });
    }

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let parts = TLD_EXTRACTOR.extract(&format!("http://{host}")).map_err(
      |e| Error::InvalidTarget {
        input: input.to_string(),
        reason: e.to_string(),
      },
    )?;

    Ok(ExtractResult {
      subdomain: parts.subdomain.unwrap_or_default(),
      domain: parts.domain.unwrap_or_default(),
      suffix: parts.suffix.unwrap_or_default(),
    })
  }
}

/// Returns the host portion of a URL, `host:port`, or bare hostname.
fn host_of(input: &str) -> &str {
  let rest = input.split_once("://").map_or(input, |(_, rest)| rest);
  let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
  let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

  if let Some(bracketed) = host.strip_prefix('[') {
    let literal = bracketed.split(']').next().unwrap_or(bracketed);
    return without_zone(literal);
  }
  // Bare IPv6 literals contain colons that are not a port separator.
  let unzoned = without_zone(host);
  if unzoned.parse::<IpAddr>().is_ok() {
    return unzoned;
  }
  host.split(':').next().unwrap_or(host)
}

/// Drops an IPv6 zone id (`fe80::1%eth0`, or `%25eth0` inside a URL).
fn without_zone(host: &str) -> &str {
  match host.split_once('%') {
    Some((address, _zone)) if address.parse::<IpAddr>().is_ok() => address,
    _ => host,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_host_of_strips_url_parts() {
    assert_eq!(host_of("http://www.example.com/page"), "www.example.com");
    assert_eq!(host_of("https://user:pw@example.com:8443/?q=1"), "example.com");
    assert_eq!(host_of("example.com#frag"), "example.com");
    assert_eq!(host_of("example.com"), "example.com");
  }

  #[test]
  fn test_host_of_keeps_ip_literals() {
    assert_eq!(host_of("8.8.8.8"), "8.8.8.8");
    assert_eq!(host_of("8.8.8.8:43"), "8.8.8.8");
    assert_eq!(host_of("2001:4860:4860::8888"), "2001:4860:4860::8888");
    assert_eq!(host_of("http://[2001:db8::1]:80/x"), "2001:db8::1");
  }

  #[test]
  fn test_host_of_drops_ipv6_zone() {
    assert_eq!(host_of("fe80::1%eth0"), "fe80::1");
    assert_eq!(host_of("http://[fe80::1%25eth0]:43/"), "fe80::1");
    assert_eq!(host_of("example.com%zone"), "example.com%zone");

    let parts = PublicSuffixExtractor.extract("fe80::1%eth0").unwrap();
    assert_eq!(parts.domain, "fe80::1");
    assert!(parts.suffix.is_empty());
  }

  #[test]
  fn test_ip_literal_has_no_suffix() {
    let parts = PublicSuffixExtractor.extract("1.1.1.1").unwrap();
    assert_eq!(parts.domain, "1.1.1.1");
    assert!(parts.suffix.is_empty());
  }

  #[test]
  fn test_url_extraction() {
    let parts = PublicSuffixExtractor
      .extract("http://www.example.com/page")
      .unwrap();
    assert_eq!(parts.subdomain, "www");
    assert_eq!(parts.domain, "example");
    assert_eq!(parts.suffix, "com");
  }

  #[test]
  fn test_multi_label_suffix() {
    let parts = PublicSuffixExtractor.extract("shop.example.co.uk").unwrap();
    assert_eq!(parts.domain, "example");
    assert_eq!(parts.suffix, "co.uk");
  }

  #[test]
  fn test_empty_input_is_invalid() {
    assert!(matches!(
      PublicSuffixExtractor.extract("   "),
      Err(Error::InvalidTarget { .. })
    ));
  }
}
