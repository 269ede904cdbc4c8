//! Titles command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use notelink_core::{normalize_title, TitleSet};

use crate::config::CliConfig;
use crate::report::ReportFormat;
use crate::vault::Vault;

/// Arguments for the titles command
#[derive(Debug, Args)]
pub struct TitlesArgs {
    /// Vault directory containing Markdown notes
    #[arg(value_name = "VAULT")]
    pub vault: PathBuf,

    /// Also print the derived acronym table
    #[arg(short, long)]
    pub acronyms: bool,

    /// Also print each title's normalized comparison form
    #[arg(long)]
    pub normalized: bool,

    /// Configuration file (default: <VAULT>/.notelink.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub report: ReportFormat,

    /// Suppress logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl TitlesArgs {
    /// Execute the titles command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose)?;

        let config = CliConfig::load(self.config.as_deref(), &self.vault)?;
        let vault = Vault::scan(&self.vault, &config.scan.ignore)?;
        let titles: Vec<String> = vault.notes().iter().map(|n| n.title.clone()).collect();
        let set = TitleSet::build(&titles, None);

        log::info!(
            "{} linkable titles, {} derived acronyms",
            set.len(),
            set.acronyms().len()
        );

        match self.report {
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
            ReportFormat::Text => print!("{}", self.render_text(&set)),
        }
        Ok(())
    }

    fn render_text(&self, set: &TitleSet) -> String {
        let mut out = String::new();
        for title in set.classic_titles() {
            if self.normalized {
                out.push_str(&format!("{title}\t{}\n", normalize_title(title)));
            } else {
                out.push_str(&format!("{title}\n"));
            }
        }
        if self.acronyms {
            for entry in set.acronyms() {
                out.push_str(&format!("{} -> {}\n", entry.acronym, entry.title));
            }
        }
        out
    }
}
