use std::{process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
  cli::Cli,
  logging,
  results::{self, Report},
  user_config::{self, UserConfig},
  whois::{self, WhoisResult},
};

pub struct App {
  cli: Cli,
  config: UserConfig,
}

impl App {
  pub fn new() -> Result<Self> {
    let cli = Cli::parse();
    logging::init(cli.log_level.map(Into::into))
      .context("Failed to initialize logging")?;
    let config = user_config::load().merged(&cli);
    Ok(Self { cli, config })
  }

  pub async fn run(&self) -> Result<ExitCode> {
    if self.cli.save_defaults {
      user_config::store(&self.config)
        .context("Failed to write the config file")?;
      log::info!("saved defaults: {:?}", self.config);
    }
    if self.cli.config_show {
      results::print_config(&self.config);
      return Ok(ExitCode::SUCCESS);
    }
    let Some(target) = self.cli.target.as_deref() else {
      return Ok(ExitCode::SUCCESS);
    };

    let spinner = self.spinner(target);
    let outcome = self.lookup(target).await;
    if let Some(spinner) = spinner {
      spinner.finish_and_clear();
    }

    let report = Report::new(target, outcome);
    self.print_results(&report)?;
    Ok(if report.is_success() {
      ExitCode::SUCCESS
    } else {
      ExitCode::FAILURE
    })
  }

  async fn lookup(&self, target: &str) -> crate::Result<WhoisResult> {
    let timeout = self.config.timeout();
    if self.config.blocking {
      log::debug!("blocking lookup of '{target}' with a {timeout:?} budget");
      tokio::task::block_in_place(|| whois::lookup(target, timeout))
    } else {
      log::debug!("async lookup of '{target}' with a {timeout:?} budget");
      whois::lookup_async(target, timeout).await
    }
  }

  /// Progress indicator for interactive runs; machine output stays clean.
  fn spinner(&self, target: &str) -> Option<ProgressBar> {
    if self.cli.json || self.cli.raw {
      return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
      spinner.set_style(style);
    }
    spinner.set_message(format!("Fetching WHOIS info for {target}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
  }

  fn print_results(&self, report: &Report) -> Result<()> {
    if self.cli.json {
      results::print_json(report)
    } else if self.cli.raw {
      results::print_raw(report);
      Ok(())
    } else {
      results::print_human_readable(report);
      Ok(())
    }
  }
}
