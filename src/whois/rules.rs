//! Extraction rules per registry format.
//!
//! Each registry family gets a flat `(field, pattern)` table; [`RuleSetTag`]
//! names the table a directory entry uses. The generic table is the fallback
//! for every suffix and deliberately loose: case-insensitive and tolerant of
//! the many spellings registries use for the same label.

use std::sync::LazyLock;

use super::parser::{Field, RuleSet};

/// Names the rule set a suffix is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSetTag {
  /// No registry-specific rules; only the generic fallback applies.
  Generic,
  /// ICANN thin registries (Verisign: com, net, cc, tv, ...).
  Thin,
  /// ICANN thick registries (org, info and most new gTLDs).
  Thick,
  /// Nominet (uk): label on one line, value(s) indented below.
  Nominet,
  /// DENIC (de).
  Denic,
  /// AFNIC (fr and the French overseas suffixes).
  Afnic,
  /// JPRS (jp), English output (`/e`).
  Jprs,
  /// Technical Center of Internet (ru, su).
  Tci,
  /// Registro.br (br).
  RegistroBr,
  /// auDA (au).
  Auda,
  /// EURid (eu).
  Eurid,
  /// SIDN (nl).
  Sidn,
  /// CNNIC (cn).
  Cnnic,
  /// Internetstiftelsen (se, nu).
  Iis,
}

impl RuleSetTag {
  pub const ALL: [Self; 14] = [
    Self::Generic,
    Self::Thin,
    Self::Thick,
    Self::Nominet,
    Self::Denic,
    Self::Afnic,
    Self::Jprs,
    Self::Tci,
    Self::RegistroBr,
    Self::Auda,
    Self::Eurid,
    Self::Sidn,
    Self::Cnnic,
    Self::Iis,
  ];

  /// The registry-specific rules, `None` for [`RuleSetTag::Generic`].
  #[must_use]
  pub fn rules(self) -> Option<&'static RuleSet> {
    let set: &'static LazyLock<RuleSet> = match self {
      Self::Generic => return None,
      Self::Thin => &THIN,
      Self::Thick => &THICK,
      Self::Nominet => &NOMINET,
      Self::Denic => &DENIC,
      Self::Afnic => &AFNIC,
      Self::Jprs => &JPRS,
      Self::Tci => &TCI,
      Self::RegistroBr => &REGISTRO_BR,
      Self::Auda => &AUDA,
      Self::Eurid => &EURID,
      Self::Sidn => &SIDN,
      Self::Cnnic => &CNNIC,
      Self::Iis => &IIS,
    };
    Some(LazyLock::force(set))
  }
}

/// The fallback rule set applied when nothing more specific matched.
#[must_use]
pub fn generic() -> &'static RuleSet {
  &GENERIC
}

fn compile(table: &[(Field, &str)]) -> RuleSet {
  RuleSet::from_table(table).expect("built-in WHOIS rule tables are valid")
}

// Captures everything after the label on the same line.
macro_rules! same_line {
  ($label:literal) => {
    concat!(r"(?m)^[ \t]*", $label, r"[ \t]*:[ \t]*(.+)$")
  };
}

// Captures the indented, non-blank lines below a label line.
macro_rules! indented_block {
  ($label:literal) => {
    concat!(
      r"(?m)^[ \t]*",
      $label,
      r":[ \t]*\r?\n((?:[ \t]+\S.*(?:\r?\n|$))+)"
    )
  };
}

// Captures the first indented line below a label line.
macro_rules! next_line {
  ($label:literal) => {
    concat!(r"(?m)^[ \t]*", $label, r":[ \t]*\r?\n[ \t]+(\S.*)$")
  };
}

const EMAIL: &str = r"(?i)\b([a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,})\b";

static GENERIC: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("(?i:domain name|domain)")),
    (
      Field::Registrar,
      same_line!(
        "(?i:registrar(?: name)?|sponsoring registrar(?: organization)?|registrar organization)"
      ),
    ),
    (Field::RegistrarUrl, same_line!("(?i:registrar url|referral url)")),
    (
      Field::WhoisServer,
      same_line!("(?i:registrar whois server|whois server|whois)"),
    ),
    (
      Field::CreationDate,
      same_line!(
        "(?i:creation date|created(?: on| date)?|registered(?: on| date)?|registration (?:date|time)|domain registration date)"
      ),
    ),
    (
      Field::UpdatedDate,
      same_line!(
        "(?i:updated date|last[ -]updated?(?: on| date)?|last[ -]modified|changed|modified)"
      ),
    ),
    (
      Field::ExpirationDate,
      same_line!(
        "(?i:registry expiry date|registrar registration expiration date|expir(?:y|ation|es)(?: date| on| time)?|paid-till|renewal date|valid until)"
      ),
    ),
    (
      Field::NameServers,
      same_line!("(?i:name ?servers?|nserver|dns|host ?name)"),
    ),
    (Field::Status, same_line!("(?i:domain status|status|state)")),
    (Field::Dnssec, same_line!("(?i:dnssec)")),
    (Field::RegistrantName, same_line!("(?i:registrant(?: name)?)")),
    (
      Field::RegistrantOrganization,
      same_line!("(?i:registrant organi[sz]ation|org(?:-name)?)"),
    ),
    (
      Field::RegistrantCountry,
      same_line!("(?i:registrant country(?: code)?|country)"),
    ),
    (Field::Emails, EMAIL),
  ])
});

static THIN: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain Name")),
    (Field::Registrar, same_line!("Registrar")),
    (Field::RegistrarUrl, same_line!("Registrar URL")),
    (Field::WhoisServer, same_line!("Registrar WHOIS Server")),
    (Field::CreationDate, same_line!("Creation Date")),
    (Field::UpdatedDate, same_line!("Updated Date")),
    (Field::ExpirationDate, same_line!("Registry Expiry Date")),
    (Field::NameServers, same_line!("Name Server")),
    (Field::Status, same_line!("Domain Status")),
    (Field::Dnssec, same_line!("DNSSEC")),
    (Field::Emails, same_line!("Registrar Abuse Contact Email")),
  ])
});

static THICK: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain Name")),
    (Field::Registrar, same_line!("Registrar")),
    (Field::RegistrarUrl, same_line!("Registrar URL")),
    (Field::WhoisServer, same_line!("Registrar WHOIS Server")),
    (Field::CreationDate, same_line!("Creation Date")),
    (Field::UpdatedDate, same_line!("Updated Date")),
    (Field::ExpirationDate, same_line!("Registry Expiry Date")),
    (
      Field::ExpirationDate,
      same_line!("Registrar Registration Expiration Date"),
    ),
    (Field::NameServers, same_line!("Name Server")),
    (Field::Status, same_line!("Domain Status")),
    (Field::Dnssec, same_line!("DNSSEC")),
    (Field::RegistrantName, same_line!("Registrant Name")),
    (Field::RegistrantOrganization, same_line!("Registrant Organization")),
    (Field::RegistrantCountry, same_line!("Registrant Country")),
    (
      Field::Emails,
      same_line!("(?:Registrant|Admin|Tech|Registrar Abuse Contact) Email"),
    ),
  ])
});

static NOMINET: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, next_line!("Domain name")),
    (Field::RegistrantName, next_line!("Registrant")),
    (Field::Registrar, next_line!("Registrar")),
    (Field::RegistrarUrl, same_line!("URL")),
    (Field::CreationDate, same_line!("Registered on")),
    (Field::ExpirationDate, same_line!("Expiry date")),
    (Field::UpdatedDate, same_line!("Last updated")),
    (Field::Status, indented_block!("Registration status")),
    (Field::NameServers, indented_block!("Name servers")),
    (Field::Dnssec, next_line!("DNSSEC")),
  ])
});

static DENIC: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain")),
    (Field::NameServers, same_line!("Nserver")),
    (Field::Status, same_line!("Status")),
    (Field::UpdatedDate, same_line!("Changed")),
  ])
});

static AFNIC: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("domain")),
    (Field::Status, same_line!("status")),
    (Field::Registrar, same_line!("registrar")),
    (Field::ExpirationDate, same_line!("Expiry Date")),
    (Field::CreationDate, same_line!("created")),
    (Field::UpdatedDate, same_line!("last-update")),
    (Field::NameServers, same_line!("nserver")),
    (Field::Emails, same_line!("e-mail")),
  ])
});

// JPRS labels are bracketed and separated from the value by spaces only.
static JPRS: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, r"(?m)^(?:[a-z]\. )?\[Domain Name\][ \t]*(.+)$"),
    (Field::RegistrantName, r"(?m)^(?:[a-z]\. )?\[Registrant\][ \t]*(.+)$"),
    (
      Field::RegistrantOrganization,
      r"(?m)^(?:[a-z]\. )?\[Organization\][ \t]*(.+)$",
    ),
    (Field::NameServers, r"(?m)^(?:[a-z]\. )?\[Name Server\][ \t]*(.+)$"),
    (Field::CreationDate, r"(?m)^\[(?:Created on|Registered Date)\][ \t]*(.+)$"),
    (Field::ExpirationDate, r"(?m)^\[Expires on\][ \t]*(.+)$"),
    (Field::UpdatedDate, r"(?m)^\[Last Updated?\][ \t]*(.+)$"),
    (Field::Status, r"(?m)^\[(?:Status|State)\][ \t]*(.+)$"),
    (Field::Emails, r"(?m)^\[Email\][ \t]*(.+)$"),
  ])
});

static TCI: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("domain")),
    (Field::NameServers, same_line!("nserver")),
    (Field::Status, same_line!("state")),
    (Field::RegistrantOrganization, same_line!("org")),
    (Field::RegistrantName, same_line!("person")),
    (Field::Registrar, same_line!("registrar")),
    (Field::CreationDate, same_line!("created")),
    (Field::ExpirationDate, same_line!("paid-till")),
    (Field::Emails, same_line!("e-mail")),
  ])
});

static REGISTRO_BR: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("domain")),
    (Field::RegistrantOrganization, same_line!("owner")),
    (Field::RegistrantCountry, same_line!("country")),
    (Field::NameServers, same_line!("nserver")),
    (Field::CreationDate, same_line!("created")),
    (Field::UpdatedDate, same_line!("changed")),
    (Field::ExpirationDate, same_line!("expires")),
    (Field::Status, same_line!("status")),
    (Field::Emails, same_line!("e-mail")),
  ])
});

static AUDA: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain Name")),
    (Field::UpdatedDate, same_line!("Last Modified")),
    (Field::Registrar, same_line!("Registrar Name")),
    (Field::Status, same_line!("Status")),
    (Field::RegistrantOrganization, same_line!("Registrant")),
    (Field::RegistrantName, same_line!("Registrant Contact Name")),
    (Field::NameServers, same_line!("Name Server")),
    (Field::Dnssec, same_line!("DNSSEC")),
  ])
});

static EURID: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain")),
    (
      Field::Registrar,
      r"(?m)^Registrar:[ \t]*\r?\n[ \t]+Name:[ \t]*(.+)$",
    ),
    (Field::RegistrarUrl, same_line!("Website")),
    (Field::NameServers, indented_block!("Name servers")),
    (Field::Emails, same_line!("Email")),
  ])
});

static SIDN: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain name")),
    (Field::Status, same_line!("Status")),
    (Field::Registrar, next_line!("Registrar")),
    (Field::Dnssec, same_line!("DNSSEC")),
    (Field::NameServers, indented_block!("Domain nameservers")),
    (Field::CreationDate, same_line!("Creation Date")),
    (Field::UpdatedDate, same_line!("Updated Date")),
  ])
});

static CNNIC: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("Domain Name")),
    (Field::Status, same_line!("Domain Status")),
    (Field::RegistrantName, same_line!("Registrant")),
    (Field::Emails, same_line!("Registrant Contact Email")),
    (Field::Registrar, same_line!("Sponsoring Registrar")),
    (Field::NameServers, same_line!("Name Server")),
    (Field::CreationDate, same_line!("Registration Time")),
    (Field::ExpirationDate, same_line!("Expiration Time")),
    (Field::Dnssec, same_line!("DNSSEC")),
  ])
});

static IIS: LazyLock<RuleSet> = LazyLock::new(|| {
  compile(&[
    (Field::DomainName, same_line!("domain")),
    (Field::RegistrantName, same_line!("holder")),
    (Field::CreationDate, same_line!("created")),
    (Field::UpdatedDate, same_line!("modified")),
    (Field::ExpirationDate, same_line!("expires")),
    (Field::NameServers, same_line!("nserver")),
    (Field::Dnssec, same_line!("dnssec")),
    (Field::Status, same_line!("status")),
    (Field::Registrar, same_line!("registrar")),
  ])
});

#[cfg(test)]
mod tests {
  use super::*;
  use crate::whois::parser::parse;

  #[test]
  fn test_every_table_compiles() {
    for tag in RuleSetTag::ALL {
      match tag.rules() {
        Some(set) => assert!(!set.rules().is_empty(), "{tag:?} is empty"),
        None => assert_eq!(tag, RuleSetTag::Generic),
      }
    }
    assert!(!generic().rules().is_empty());
  }

  #[test]
  fn test_generic_covers_every_field() {
    for field in Field::ALL {
      assert!(
        generic().rules().iter().any(|rule| rule.field() == field),
        "no generic rule for {field}"
      );
    }
  }

  #[test]
  fn test_generic_tolerates_label_variants() {
    let raw = "\
sponsoring registrar:   ACME Names
registered on: 2001-02-03
Expiry Date: 2030-02-03
nserver:   ns1.acme.test
NSERVER:   ns2.acme.test
status: ok
";
    let record = parse(raw, generic());
    assert_eq!(record.registrar(), Some("ACME Names"));
    assert_eq!(record.single(Field::CreationDate), Some("2001-02-03"));
    assert_eq!(record.single(Field::ExpirationDate), Some("2030-02-03"));
    assert_eq!(record.name_servers(), ["ns1.acme.test", "ns2.acme.test"]);
    assert_eq!(record.status(), ["ok"]);
  }

  #[test]
  fn test_generic_does_not_confuse_registrar_url() {
    let raw = "Registrar URL: http://www.acme.test\nRegistrar: ACME\n";
    let record = parse(raw, generic());
    assert_eq!(record.registrar(), Some("ACME"));
    assert_eq!(
      record.single(Field::RegistrarUrl),
      Some("http://www.acme.test")
    );
  }

  #[test]
  fn test_generic_collects_emails() {
    let raw = "Registrant Email: owner@acme.test\nTech Email: tech@acme.test\n";
    let record = parse(raw, generic());
    assert_eq!(
      record.multiple(Field::Emails),
      ["owner@acme.test", "tech@acme.test"]
    );
  }

  #[test]
  fn test_nominet_blocks() {
    let raw = "
    Domain name:
        example.co.uk

    Registrant:
        Example Ltd

    Registrar:
        Example Registrar Ltd [Tag = EXAMPLE]
        URL: https://registrar.example

    Relevant dates:
        Registered on: 26-Jun-1996
        Expiry date:  26-Jun-2030
        Last updated:  18-May-2024

    Registration status:
        Registered until expiry date.

    Name servers:
        ns1.example.co.uk
        ns2.example.co.uk

";
    let record = parse(raw, RuleSetTag::Nominet.rules().unwrap());

    assert_eq!(record.single(Field::DomainName), Some("example.co.uk"));
    assert_eq!(
      record.registrar(),
      Some("Example Registrar Ltd [Tag = EXAMPLE]")
    );
    assert_eq!(record.single(Field::RegistrantName), Some("Example Ltd"));
    assert_eq!(record.single(Field::CreationDate), Some("26-Jun-1996"));
    assert_eq!(record.single(Field::ExpirationDate), Some("26-Jun-2030"));
    assert_eq!(record.status(), ["Registered until expiry date."]);
    assert_eq!(
      record.name_servers(),
      ["ns1.example.co.uk", "ns2.example.co.uk"]
    );
  }

  #[test]
  fn test_denic_reply() {
    let raw = "Domain: example.de\nNserver: a.nic.de\nNserver: f.nic.de\nStatus: connect\nChanged: 2018-03-12T21:44:25+01:00\n";
    let record = parse(raw, RuleSetTag::Denic.rules().unwrap());
    assert_eq!(record.single(Field::DomainName), Some("example.de"));
    assert_eq!(record.name_servers(), ["a.nic.de", "f.nic.de"]);
    assert_eq!(record.status(), ["connect"]);
  }

  #[test]
  fn test_jprs_reply() {
    let raw = "\
[Domain Name]                   EXAMPLE.JP

[Registrant]                    Example Corp
[Name Server]                   ns1.example.jp
[Name Server]                   ns2.example.jp
[Created on]                    2001/01/01
[Expires on]                    2025/01/31
[Status]                        Active
[Last Updated]                  2024/02/01 01:05:05 (JST)
";
    let record = parse(raw, RuleSetTag::Jprs.rules().unwrap());
    assert_eq!(record.single(Field::DomainName), Some("EXAMPLE.JP"));
    assert_eq!(record.single(Field::RegistrantName), Some("Example Corp"));
    assert_eq!(record.name_servers().len(), 2);
    assert_eq!(record.single(Field::ExpirationDate), Some("2025/01/31"));
    assert_eq!(
      record.single(Field::UpdatedDate),
      Some("2024/02/01 01:05:05 (JST)")
    );
  }

  #[test]
  fn test_eurid_registrar_block() {
    let raw = "\
Domain: example.eu

Registrar:
        Name: Example Registrar
        Website: https://registrar.example

Name servers:
        ns1.example.eu
        ns2.example.eu

";
    let record = parse(raw, RuleSetTag::Eurid.rules().unwrap());
    assert_eq!(record.registrar(), Some("Example Registrar"));
    assert_eq!(record.name_servers(), ["ns1.example.eu", "ns2.example.eu"]);
  }
}
