//! Unlink command implementation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use notelink_core::strip_references;

use crate::config::CliConfig;
use crate::progress::ProgressReporter;
use crate::report::{NoteReport, ReportFormat, RunSummary};
use crate::vault::{display_path, Note, Vault};

/// Arguments for the unlink command
#[derive(Debug, Args)]
pub struct UnlinkArgs {
    /// Vault directory containing Markdown notes
    #[arg(value_name = "VAULT")]
    pub vault: PathBuf,

    /// Single note to process, relative to the vault (default: every note)
    #[arg(value_name = "NOTE")]
    pub note: Option<PathBuf>,

    /// Copy each note here before rewriting it, relative to the vault
    #[arg(short, long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Compute and report without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Configuration file (default: <VAULT>/.notelink.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub report: ReportFormat,

    /// Suppress progress bars and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl UnlinkArgs {
    /// Execute the unlink command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose)?;
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref(), &self.vault)?;
        let vault = Vault::scan(&self.vault, &config.scan.ignore)?;
        let backup_dir = self.backup_dir.as_ref().map(|dir| self.vault.join(dir));

        let selection: Vec<Note> = match &self.note {
            Some(requested) => vec![vault.select(requested)?],
            None => vault.notes().to_vec(),
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_notes(selection.len() as u64);

        let mut summary = RunSummary::default();
        for note in &selection {
            match self.unlink_note(note, vault.root(), backup_dir.as_deref()) {
                Ok(report) => summary.record(report),
                Err(err) => {
                    let relative = display_path(&note.path, vault.root());
                    log::error!("{relative}: {err:#}");
                    summary.record(NoteReport::failed(relative, format!("{err:#}")));
                }
            }
            progress.note_completed(&note.title);
        }
        progress.finish();

        if self.dry_run {
            log::info!("Dry run: nothing was written");
        }
        println!("{}", summary.render(self.report, "removed references")?);
        Ok(())
    }

    /// Strip references from one note, rewriting it in place.
    fn unlink_note(
        &self,
        note: &Note,
        root: &Path,
        backup_dir: Option<&Path>,
    ) -> Result<NoteReport> {
        let relative = display_path(&note.path, root);
        let text = fs::read_to_string(&note.path)
            .with_context(|| format!("Failed to read {}", note.path.display()))?;

        let result = strip_references(&text);
        if result.removed_references == 0 {
            return Ok(NoteReport::unchanged(relative));
        }

        if !self.dry_run {
            if let Some(backup_dir) = backup_dir {
                back_up(note, root, backup_dir)?;
            }
            fs::write(&note.path, &result.text)
                .with_context(|| format!("Failed to write {}", note.path.display()))?;
        }

        log::debug!("{relative}: {} removed references", result.removed_references);
        Ok(NoteReport::changed(relative, result.removed_references))
    }
}

/// Copy the note into the backup directory before it is rewritten.
/// An existing backup is never overwritten.
fn back_up(note: &Note, root: &Path, backup_dir: &Path) -> Result<()> {
    let target = backup_dir.join(note.path.strip_prefix(root).unwrap_or(&note.path));
    if target.exists() {
        log::warn!("Backup already exists, keeping it: {}", target.display());
        return Ok(());
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(&note.path, &target)
        .with_context(|| format!("Failed to back up {}", note.path.display()))?;
    Ok(())
}
