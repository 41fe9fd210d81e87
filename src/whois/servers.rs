//! Suffix -> WHOIS server directory.
//!
//! Built once from a static table and never mutated, so concurrent lookups
//! read it without synchronization.

use std::{collections::HashMap, sync::LazyLock};

use super::rules::RuleSetTag;
use crate::error::{Error, Result};

/// How a registry expects the query line to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStyle {
  /// The bare domain name.
  Plain,
  /// DENIC only answers with registration data for `-T dn,ace <domain>`.
  Denic,
  /// JPRS answers in Japanese unless the query ends in `/e`.
  Jprs,
}

impl QueryStyle {
  /// Formats the query line, without the CRLF terminator.
  #[must_use]
  pub fn format(self, domain: &str) -> String {
    match self {
      Self::Plain => domain.to_string(),
      Self::Denic => format!("-T dn,ace {domain}"),
      Self::Jprs => format!("{domain}/e"),
    }
  }
}

/// One supported suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerEntry {
  pub suffix: &'static str,
  pub server: &'static str,
  pub query_style: QueryStyle,
  pub rules: RuleSetTag,
}

impl ServerEntry {
  const fn new(
    suffix: &'static str,
    server: &'static str,
    rules: RuleSetTag,
  ) -> Self {
    Self {
      suffix,
      server,
      query_style: QueryStyle::Plain,
      rules,
    }
  }

  const fn styled(mut self, query_style: QueryStyle) -> Self {
    self.query_style = query_style;
    self
  }

  /// The line to send for `domain` (CRLF is added by the executor).
  #[must_use]
  pub fn query_line(&self, domain: &str) -> String {
    self.query_style.format(domain)
  }
}

const fn thin(suffix: &'static str, server: &'static str) -> ServerEntry {
  ServerEntry::new(suffix, server, RuleSetTag::Thin)
}

const fn thick(suffix: &'static str, server: &'static str) -> ServerEntry {
  ServerEntry::new(suffix, server, RuleSetTag::Thick)
}

const fn generic(suffix: &'static str, server: &'static str) -> ServerEntry {
  ServerEntry::new(suffix, server, RuleSetTag::Generic)
}

const fn with(
  suffix: &'static str,
  server: &'static str,
  rules: RuleSetTag,
) -> ServerEntry {
  ServerEntry::new(suffix, server, rules)
}

#[rustfmt::skip]
const SERVERS: &[ServerEntry] = &[
  // Verisign and other thin registries
  thin("com", "whois.verisign-grs.com"),
  thin("net", "whois.verisign-grs.com"),
  thin("cc", "ccwhois.verisign-grs.com"),
  thin("tv", "tvwhois.verisign-grs.com"),
  thin("edu", "whois.educause.edu"),
  thin("jobs", "whois.nic.jobs"),

  // Legacy gTLDs
  thick("org", "whois.pir.org"),
  thick("info", "whois.nic.info"),
  thick("biz", "whois.nic.biz"),
  thick("name", "whois.nic.name"),
  thick("mobi", "whois.nic.mobi"),
  thick("pro", "whois.nic.pro"),
  thick("aero", "whois.aero"),
  thick("asia", "whois.nic.asia"),
  thick("cat", "whois.nic.cat"),
  thick("coop", "whois.nic.coop"),
  thick("tel", "whois.nic.tel"),
  thick("travel", "whois.nic.travel"),
  thick("xxx", "whois.nic.xxx"),
  thick("museum", "whois.nic.museum"),
  generic("gov", "whois.dotgov.gov"),
  generic("int", "whois.iana.org"),
  generic("mil", "whois.nic.mil"),

  // New gTLDs
  thick("app", "whois.nic.google"),
  thick("dev", "whois.nic.google"),
  thick("page", "whois.nic.google"),
  thick("blog", "whois.nic.blog"),
  thick("cloud", "whois.nic.cloud"),
  thick("xyz", "whois.nic.xyz"),
  thick("online", "whois.nic.online"),
  thick("site", "whois.nic.site"),
  thick("tech", "whois.nic.tech"),
  thick("store", "whois.nic.store"),
  thick("shop", "whois.nic.shop"),
  thick("top", "whois.nic.top"),
  thick("club", "whois.nic.club"),
  thick("live", "whois.nic.live"),
  thick("news", "whois.nic.news"),
  thick("email", "whois.nic.email"),
  thick("digital", "whois.nic.digital"),
  thick("agency", "whois.nic.agency"),
  thick("company", "whois.nic.company"),
  thick("world", "whois.nic.world"),
  thick("today", "whois.nic.today"),
  thick("space", "whois.nic.space"),
  thick("website", "whois.nic.website"),
  thick("link", "whois.uniregistry.net"),
  thick("design", "whois.nic.design"),
  thick("art", "whois.nic.art"),
  thick("vip", "whois.nic.vip"),
  thick("win", "whois.nic.win"),
  thick("network", "whois.nic.network"),
  thick("solutions", "whois.nic.solutions"),
  thick("systems", "whois.nic.systems"),
  thick("software", "whois.nic.software"),
  thick("studio", "whois.nic.studio"),
  thick("media", "whois.nic.media"),
  thick("group", "whois.nic.group"),
  thick("life", "whois.nic.life"),
  thick("fun", "whois.nic.fun"),
  thick("games", "whois.nic.games"),
  thick("zone", "whois.nic.zone"),
  thick("bank", "whois.nic.bank"),

  // ccTLDs operated with ICANN-style output
  thick("io", "whois.nic.io"),
  thick("ai", "whois.nic.ai"),
  thick("co", "whois.nic.co"),
  thick("me", "whois.nic.me"),
  thick("us", "whois.nic.us"),
  thick("ca", "whois.cira.ca"),
  thick("in", "whois.registry.in"),
  thick("sh", "whois.nic.sh"),
  thick("ac", "whois.nic.ac"),
  thick("la", "whois.nic.la"),
  thick("ws", "whois.website.ws"),
  thick("mx", "whois.mx"),
  thick("bz", "whois.afilias-grs.info"),
  thick("sx", "whois.sx"),
  thick("id", "whois.id"),

  // ccTLDs with their own formats
  with("uk", "whois.nic.uk", RuleSetTag::Nominet),
  with("de", "whois.denic.de", RuleSetTag::Denic).styled(QueryStyle::Denic),
  with("fr", "whois.nic.fr", RuleSetTag::Afnic),
  with("re", "whois.nic.re", RuleSetTag::Afnic),
  with("pm", "whois.nic.pm", RuleSetTag::Afnic),
  with("tf", "whois.nic.tf", RuleSetTag::Afnic),
  with("wf", "whois.nic.wf", RuleSetTag::Afnic),
  with("yt", "whois.nic.yt", RuleSetTag::Afnic),
  with("jp", "whois.jprs.jp", RuleSetTag::Jprs).styled(QueryStyle::Jprs),
  with("ru", "whois.tcinet.ru", RuleSetTag::Tci),
  with("su", "whois.tcinet.ru", RuleSetTag::Tci),
  with("br", "whois.registro.br", RuleSetTag::RegistroBr),
  with("au", "whois.auda.org.au", RuleSetTag::Auda),
  with("eu", "whois.eu", RuleSetTag::Eurid),
  with("nl", "whois.domain-registry.nl", RuleSetTag::Sidn),
  with("cn", "whois.cnnic.cn", RuleSetTag::Cnnic),
  with("se", "whois.iis.se", RuleSetTag::Iis),
  with("nu", "whois.iis.nu", RuleSetTag::Iis),

  // ccTLDs parsed with the generic rules only
  generic("ae", "whois.aeda.net.ae"),
  generic("am", "whois.amnic.net"),
  generic("at", "whois.nic.at"),
  generic("be", "whois.dns.be"),
  generic("bg", "whois.register.bg"),
  generic("by", "whois.cctld.by"),
  generic("ch", "whois.nic.ch"),
  generic("cl", "whois.nic.cl"),
  generic("cz", "whois.nic.cz"),
  generic("dk", "whois.punktum.dk"),
  generic("ee", "whois.tld.ee"),
  generic("es", "whois.nic.es"),
  generic("fi", "whois.fi"),
  generic("gg", "whois.gg"),
  generic("hk", "whois.hkirc.hk"),
  generic("hr", "whois.dns.hr"),
  generic("hu", "whois.nic.hu"),
  generic("ie", "whois.weare.ie"),
  generic("il", "whois.isoc.org.il"),
  generic("ir", "whois.nic.ir"),
  generic("is", "whois.isnic.is"),
  generic("it", "whois.nic.it"),
  generic("je", "whois.je"),
  generic("kr", "whois.kr"),
  generic("kz", "whois.nic.kz"),
  generic("li", "whois.nic.li"),
  generic("lt", "whois.domreg.lt"),
  generic("lu", "whois.dns.lu"),
  generic("lv", "whois.nic.lv"),
  generic("md", "whois.nic.md"),
  generic("my", "whois.mynic.my"),
  generic("no", "whois.norid.no"),
  generic("nz", "whois.irs.net.nz"),
  generic("pl", "whois.dns.pl"),
  generic("pt", "whois.dns.pt"),
  generic("ro", "whois.rotld.ro"),
  generic("rs", "whois.rnids.rs"),
  generic("sg", "whois.sgnic.sg"),
  generic("si", "whois.register.si"),
  generic("sk", "whois.sk-nic.sk"),
  generic("th", "whois.thnic.co.th"),
  generic("tr", "whois.trabis.gov.tr"),
  generic("tw", "whois.twnic.net.tw"),
  generic("ua", "whois.ua"),
  generic("uz", "whois.cctld.uz"),
  generic("za", "whois.registry.net.za"),
];

static DIRECTORY: LazyLock<HashMap<&'static str, ServerEntry>> =
  LazyLock::new(|| SERVERS.iter().map(|entry| (entry.suffix, *entry)).collect());

/// Looks up the server entry for a single-label suffix, case-insensitively.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuffix`] if the suffix is not in the table.
pub fn lookup(suffix: &str) -> Result<ServerEntry> {
  let key = suffix.trim().trim_matches('.').to_ascii_lowercase();
  DIRECTORY
    .get(key.as_str())
    .copied()
    .ok_or(Error::UnsupportedSuffix { suffix: key })
}

/// Every supported suffix, in table order.
pub fn suffixes() -> impl Iterator<Item = &'static str> {
  SERVERS.iter().map(|entry| entry.suffix)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_lookup_com() {
    let entry = lookup("com").unwrap();
    assert_eq!(entry.server, "whois.verisign-grs.com");
    assert_eq!(entry.rules, RuleSetTag::Thin);
    assert_eq!(entry.query_line("example.com"), "example.com");
  }

  #[test]
  fn test_lookup_is_case_insensitive_and_stable() {
    let first = lookup("UK").unwrap();
    let second = lookup(".uk").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.server, "whois.nic.uk");
  }

  #[test]
  fn test_unknown_suffix() {
    match lookup("invalidsuffix") {
      Err(Error::UnsupportedSuffix { suffix }) => {
        assert_eq!(suffix, "invalidsuffix");
      }
      other => panic!("unexpected result: {other:?}"),
    }
    assert!(lookup("").is_err());
  }

  #[test]
  fn test_query_styles() {
    assert_eq!(
      lookup("de").unwrap().query_line("example.de"),
      "-T dn,ace example.de"
    );
    assert_eq!(lookup("jp").unwrap().query_line("example.jp"), "example.jp/e");
  }

  #[test]
  fn test_table_has_no_duplicate_suffixes() {
    let mut seen = HashSet::new();
    for suffix in suffixes() {
      assert!(seen.insert(suffix), "duplicate suffix {suffix}");
      assert!(!suffix.contains('.'), "{suffix} is not a single label");
      assert_eq!(suffix, suffix.to_ascii_lowercase());
    }
  }
}
