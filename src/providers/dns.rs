use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::{Resolver, TokioResolver};

use crate::error::{Error, Result};

/// Maps an IP address to a hostname (PTR lookup).
///
/// Both forms share one contract: a hostname without the trailing root dot,
/// or [`Error::Resolution`].
#[async_trait]
pub trait ReverseDns: Send + Sync {
  /// Blocks the calling thread for the duration of the lookup.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Resolution`] if no hostname is found.
  fn reverse(&self, address: IpAddr) -> Result<String>;

  /// Suspends at the DNS exchange instead of blocking.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Resolution`] if no hostname is found.
  async fn reverse_async(&self, address: IpAddr) -> Result<String>;
}

/// Reverse DNS through the operating system (blocking) and a tokio
/// `hickory` resolver built from the system configuration (suspending).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemReverseDns;

#[async_trait]
impl ReverseDns for SystemReverseDns {
  fn reverse(&self, address: IpAddr) -> Result<String> {
    let name = dns_lookup::lookup_addr(&address)
      .map_err(|e| resolution_error(address, &e))?;
    accept_hostname(address, Some(name))
  }

  async fn reverse_async(&self, address: IpAddr) -> Result<String> {
    let resolver: TokioResolver = Resolver::builder_tokio()
      .map_err(|e| resolution_error(address, &e))?
      .build();

    let answer = resolver
      .reverse_lookup(address)
      .await
      .map_err(|e| resolution_error(address, &e))?;

    accept_hostname(address, answer.iter().next().map(|name| name.to_utf8()))
  }
}

fn resolution_error(address: IpAddr, reason: &dyn std::fmt::Display) -> Error {
  log::warn!("reverse DNS lookup for {address} failed: {reason}");
  Error::Resolution {
    address: address.to_string(),
    reason: reason.to_string(),
  }
}

/// Normalizes a PTR answer, rejecting empty names and names that are just
/// the address echoed back (`getnameinfo` does this when no PTR exists).
fn accept_hostname(address: IpAddr, name: Option<String>) -> Result<String> {
  let name = name
    .map(|n| n.trim().trim_end_matches('.').to_ascii_lowercase())
    .unwrap_or_default();

  if name.is_empty() {
    return Err(resolution_error(address, &"no PTR record"));
  }
  if name.parse::<IpAddr>().is_ok() {
    return Err(resolution_error(address, &"PTR answer is an address"));
  }
  Ok(name)
}
