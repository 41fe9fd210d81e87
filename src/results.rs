use anyhow::{Context, Result};
use console::{style, Style};
use serde::Serialize;

use crate::{
  error::Error,
  user_config::UserConfig,
  whois::{Field, FieldValue, WhoisResult},
};

/// What the CLI prints for one target.
#[derive(Debug, Serialize)]
pub struct Report {
  pub target: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub whois: Option<WhoisResult>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<ReportError>,
}

#[derive(Debug, Serialize)]
pub struct ReportError {
  pub kind: &'static str,
  pub message: String,
}

impl Report {
  pub fn new(target: &str, outcome: Result<WhoisResult, Error>) -> Self {
    let (whois, error) = match outcome {
      Ok(result) => (Some(result), None),
      Err(e) => (
        None,
        Some(ReportError {
          kind: e.kind(),
          message: e.to_string(),
        }),
      ),
    };
    Self {
      target: target.to_string(),
      whois,
      error,
    }
  }

  pub const fn is_success(&self) -> bool {
    self.error.is_none()
  }
}

/// Helper: coloured keys so the summary is easy to scan.
fn key(s: &str) -> console::StyledObject<&str> {
  style(s).bold().cyan()
}

fn header_line(title: &str, emoji: &str) -> String {
  format!(
    "\n{} {}",
    style(emoji).bold(),
    Style::new().bold().underlined().apply_to(title)
  )
}

/// Helper: print a section header ("📜 WHOIS") once.
fn header(title: &str, emoji: &str) {
  println!("{}", header_line(title, emoji));
}

const fn label(field: Field) -> &'static str {
  match field {
    Field::DomainName => "Domain Name:",
    Field::Registrar => "Registrar:",
    Field::RegistrarUrl => "Registrar URL:",
    Field::WhoisServer => "WHOIS Server:",
    Field::CreationDate => "Created:",
    Field::UpdatedDate => "Updated:",
    Field::ExpirationDate => "Expires:",
    Field::NameServers => "Name Servers:",
    Field::Status => "Status:",
    Field::Dnssec => "DNSSEC:",
    Field::RegistrantName => "Registrant:",
    Field::RegistrantOrganization => "Registrant Org:",
    Field::RegistrantCountry => "Registrant Country:",
    Field::Emails => "Emails:",
  }
}

fn print_whois_info(whois: &WhoisResult) {
  header("WHOIS", "📜");
  println!("  {} {}", key("Queried:"), whois.domain);
  println!("  {} {}", key("Server:"), whois.server);

  if whois.record.is_empty() {
    println!(
      "  {}",
      style("No fields recognized in the reply (try --raw)").dim()
    );
    return;
  }

  for (field, value) in whois.record.iter() {
    let text = match value {
      FieldValue::Single(v) => v.clone(),
      FieldValue::Multiple(vs) => vs.join(", "),
    };
    println!("  {} {}", key(label(field)), text);
  }
}

/// Header and message both go to stderr so the block stays together.
fn print_error(error: &ReportError) {
  eprintln!("{}", header_line("Error", "❌"));
  eprintln!(
    "  {} {}",
    style(format!("[{}]", error.kind)).dim(),
    style(&error.message).red().bold()
  );
}

pub fn print_human_readable(report: &Report) {
  println!(
    "{} {}",
    style("•").magenta(),
    Style::new()
      .bold()
      .magenta()
      .apply_to(format!("WHOIS lookup for: {}", &report.target))
  );

  if let Some(whois) = &report.whois {
    print_whois_info(whois);
  }
  if let Some(error) = &report.error {
    print_error(error);
  }
}

/// Reply text only, exactly as the server sent it.
pub fn print_raw(report: &Report) {
  if let Some(whois) = &report.whois {
    print!("{}", whois.raw_text);
  }
  if let Some(error) = &report.error {
    eprintln!("{}", style(&error.message).red());
  }
}

pub fn print_json(report: &Report) -> Result<()> {
  serde_json::to_string_pretty(report)
    .map(|s| println!("{s}"))
    .context("Failed to serialize results to JSON")
}

pub fn print_config(cfg: &UserConfig) {
  header("Configuration", "⚙");
  println!("  {} {}s", key("Timeout:"), cfg.default_timeout_secs);
  println!("  {} {}", key("Blocking:"), cfg.blocking);
}
