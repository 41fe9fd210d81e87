//! Turns free-text WHOIS replies into a field map.
//!
//! There is no common response schema across registries, so extraction is
//! best effort: a [`RuleSet`] is an ordered list of `(field, pattern)` pairs,
//! the first capture group of a matching pattern is the value, and anything
//! that does not match is simply absent from the record. Parsing never fails.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::rules::{self, RuleSetTag};

/// Normalized field names shared by every rule set.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
  DomainName,
  Registrar,
  RegistrarUrl,
  WhoisServer,
  CreationDate,
  UpdatedDate,
  ExpirationDate,
  NameServers,
  Status,
  Dnssec,
  RegistrantName,
  RegistrantOrganization,
  RegistrantCountry,
  Emails,
}

impl Field {
  pub const ALL: [Self; 14] = [
    Self::DomainName,
    Self::Registrar,
    Self::RegistrarUrl,
    Self::WhoisServer,
    Self::CreationDate,
    Self::UpdatedDate,
    Self::ExpirationDate,
    Self::NameServers,
    Self::Status,
    Self::Dnssec,
    Self::RegistrantName,
    Self::RegistrantOrganization,
    Self::RegistrantCountry,
    Self::Emails,
  ];

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::DomainName => "domain_name",
      Self::Registrar => "registrar",
      Self::RegistrarUrl => "registrar_url",
      Self::WhoisServer => "whois_server",
      Self::CreationDate => "creation_date",
      Self::UpdatedDate => "updated_date",
      Self::ExpirationDate => "expiration_date",
      Self::NameServers => "name_servers",
      Self::Status => "status",
      Self::Dnssec => "dnssec",
      Self::RegistrantName => "registrant_name",
      Self::RegistrantOrganization => "registrant_organization",
      Self::RegistrantCountry => "registrant_country",
      Self::Emails => "emails",
    }
  }

  /// Fields that registries list more than once (one name server per line
  /// and so on). All occurrences are kept, in text order.
  #[must_use]
  pub const fn is_multi_valued(self) -> bool {
    matches!(self, Self::NameServers | Self::Status | Self::Emails)
  }
}

impl std::fmt::Display for Field {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Single(String),
  Multiple(Vec<String>),
}

impl FieldValue {
  #[must_use]
  pub fn as_single(&self) -> Option<&str> {
    match self {
      Self::Single(value) => Some(value),
      Self::Multiple(_) => None,
    }
  }

  #[must_use]
  pub fn as_multiple(&self) -> Option<&[String]> {
    match self {
      Self::Single(_) => None,
      Self::Multiple(values) => Some(values),
    }
  }
}

/// Parsed WHOIS fields. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedRecord {
  fields: BTreeMap<Field, FieldValue>,
}

impl ParsedRecord {
  #[must_use]
  pub fn get(&self, field: Field) -> Option<&FieldValue> {
    self.fields.get(&field)
  }

  /// Value of a single-valued field.
  #[must_use]
  pub fn single(&self, field: Field) -> Option<&str> {
    self.get(field).and_then(FieldValue::as_single)
  }

  /// Values of a multi-valued field, empty when absent.
  #[must_use]
  pub fn multiple(&self, field: Field) -> &[String] {
    self.get(field).and_then(FieldValue::as_multiple).unwrap_or(&[])
  }

  #[must_use]
  pub fn registrar(&self) -> Option<&str> {
    self.single(Field::Registrar)
  }

  #[must_use]
  pub fn name_servers(&self) -> &[String] {
    self.multiple(Field::NameServers)
  }

  #[must_use]
  pub fn status(&self) -> &[String] {
    self.multiple(Field::Status)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
    self.fields.iter().map(|(field, value)| (*field, value))
  }
}

/// One extraction rule: the first capture group of `pattern` is the value.
#[derive(Debug, Clone)]
pub struct Rule {
  field: Field,
  pattern: Regex,
}

impl Rule {
  /// # Errors
  ///
  /// Returns the regex compile error for an invalid pattern.
  pub fn new(field: Field, pattern: &str) -> Result<Self, regex::Error> {
    Ok(Self {
      field,
      pattern: Regex::new(pattern)?,
    })
  }

  #[must_use]
  pub const fn field(&self) -> Field {
    self.field
  }
}

/// Ordered rules for one registry format.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
  rules: Vec<Rule>,
}

impl RuleSet {
  /// # Errors
  ///
  /// Returns the first pattern that fails to compile.
  pub fn from_table(table: &[(Field, &str)]) -> Result<Self, regex::Error> {
    let rules = table
      .iter()
      .map(|(field, pattern)| Rule::new(*field, pattern))
      .collect::<Result<_, _>>()?;
    Ok(Self { rules })
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }
}

/// Applies `rules` to `raw` in order.
///
/// The first rule that yields a value for a field wins; later rules for the
/// same field are skipped. Values are trimmed and otherwise passed through.
#[must_use]
pub fn parse(raw: &str, rules: &RuleSet) -> ParsedRecord {
  let mut fields = BTreeMap::new();

  for rule in rules.rules() {
    if fields.contains_key(&rule.field) {
      continue;
    }

    let captures = rule
      .pattern
      .captures_iter(raw)
      .filter_map(|caps| caps.get(1))
      .map(|m| m.as_str());

    if rule.field.is_multi_valued() {
      // Block captures (one value per indented line) are split here.
      let values: Vec<String> = captures
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
      if !values.is_empty() {
        fields.insert(rule.field, FieldValue::Multiple(values));
      }
    } else if let Some(value) =
      captures.map(str::trim).find(|value| !value.is_empty())
    {
      fields.insert(rule.field, FieldValue::Single(value.to_string()));
    }
  }

  ParsedRecord { fields }
}

/// Parses with the rule set named by `tag`, falling back to the generic
/// rules when that set matches nothing.
#[must_use]
pub fn parse_with_fallback(raw: &str, tag: RuleSetTag) -> ParsedRecord {
  if let Some(specific) = tag.rules() {
    let record = parse(raw, specific);
    if !record.is_empty() {
      return record;
    }
    log::debug!("{tag:?} rules matched nothing, using generic rules");
  }
  parse(raw, rules::generic())
}

#[cfg(test)]
mod tests {
  use super::*;

  const THIN_REPLY: &str = "   Domain Name: EXAMPLE.COM\r\n\
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN\r\n\
   Registrar WHOIS Server: whois.iana.org\r\n\
   Updated Date: 2024-08-14T07:01:34Z\r\n\
   Creation Date: 1995-08-14T04:00:00Z\r\n\
   Registry Expiry Date: 2025-08-13T04:00:00Z\r\n\
   Registrar: RESERVED-Internet Assigned Numbers Authority\r\n\
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited\r\n\
   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited\r\n\
   Name Server: A.IANA-SERVERS.NET\r\n\
   Name Server: B.IANA-SERVERS.NET\r\n\
   DNSSEC: signedDelegation\r\n";

  #[test]
  fn test_generic_keeps_every_name_server() {
    let raw = "Registrar: Example Inc.\nName Server: ns1.example.com\nName Server: ns2.example.com\n";
    let record = parse(raw, rules::generic());

    assert_eq!(record.registrar(), Some("Example Inc."));
    assert_eq!(
      record.name_servers(),
      ["ns1.example.com".to_string(), "ns2.example.com".to_string()]
    );
  }

  #[test]
  fn test_empty_text_gives_empty_record() {
    assert!(parse("", rules::generic()).is_empty());
    assert!(parse_with_fallback("", RuleSetTag::Thin).is_empty());
  }

  #[test]
  fn test_garbage_text_gives_empty_record() {
    let record = parse_with_fallback("%%% no match for this query\n\n", RuleSetTag::Thick);
    assert!(record.is_empty());
  }

  #[test]
  fn test_parsing_is_deterministic() {
    let first = parse_with_fallback(THIN_REPLY, RuleSetTag::Thin);
    let second = parse_with_fallback(THIN_REPLY, RuleSetTag::Thin);
    assert_eq!(first, second);
  }

  #[test]
  fn test_thin_reply_fields() {
    let record = parse_with_fallback(THIN_REPLY, RuleSetTag::Thin);

    assert_eq!(record.single(Field::DomainName), Some("EXAMPLE.COM"));
    assert_eq!(
      record.registrar(),
      Some("RESERVED-Internet Assigned Numbers Authority")
    );
    assert_eq!(
      record.single(Field::CreationDate),
      Some("1995-08-14T04:00:00Z")
    );
    assert_eq!(
      record.single(Field::ExpirationDate),
      Some("2025-08-13T04:00:00Z")
    );
    assert_eq!(record.single(Field::WhoisServer), Some("whois.iana.org"));
    assert_eq!(record.name_servers().len(), 2);
    // Values are passed through untouched, trailing URL included.
    assert_eq!(
      record.status()[0],
      "clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited"
    );
    assert_eq!(record.single(Field::Dnssec), Some("signedDelegation"));
  }

  #[test]
  fn test_first_rule_wins_for_a_field() {
    let set = RuleSet::from_table(&[
      (Field::Registrar, r"(?m)^Registrar:[ \t]*(.+)$"),
      (Field::Registrar, r"(?m)^Sponsor:[ \t]*(.+)$"),
    ])
    .unwrap();
    let record = parse("Sponsor: Second\nRegistrar: First\n", &set);
    assert_eq!(record.registrar(), Some("First"));
  }

  #[test]
  fn test_blank_values_are_absent() {
    let record = parse("Registrar:    \nName Server:\n", rules::generic());
    assert!(record.registrar().is_none());
    assert!(record.name_servers().is_empty());
  }

  #[test]
  fn test_fallback_when_specific_rules_miss() {
    // A DENIC-tagged reply written in ICANN style still yields fields.
    let raw = "Domain Name: example.de\nRegistrar: Some Registrar\n";
    let record = parse_with_fallback(raw, RuleSetTag::Denic);
    assert_eq!(record.registrar(), Some("Some Registrar"));
  }

  #[test]
  fn test_record_serializes_with_field_names() {
    let raw = "Registrar: Example Inc.\nName Server: ns1.example.com\n";
    let record = parse(raw, rules::generic());
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["registrar"], "Example Inc.");
    assert_eq!(json["name_servers"][0], "ns1.example.com");
  }

  #[test]
  fn test_field_names_are_unique() {
    let names: std::collections::HashSet<_> =
      Field::ALL.iter().map(|f| f.as_str()).collect();
    assert_eq!(names.len(), Field::ALL.len());
  }
}
