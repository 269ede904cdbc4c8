//! Link command implementation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use notelink_core::{Linker, TitleSet};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::progress::ProgressReporter;
use crate::report::{NoteReport, ReportFormat, RunSummary};
use crate::vault::{display_path, Note, Vault};

/// Arguments for the link command
#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Vault directory containing Markdown notes
    #[arg(value_name = "VAULT")]
    pub vault: PathBuf,

    /// Single note to process, relative to the vault (default: every note)
    #[arg(value_name = "NOTE")]
    pub note: Option<PathBuf>,

    /// Directory for linkified copies, relative to the vault
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing files in the output directory
    #[arg(short, long)]
    pub force: bool,

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

impl LinkArgs {
    /// Execute the link command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose)?;
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref(), &self.vault)?;
        let vault = Vault::scan(&self.vault, &config.scan.ignore)?;

        let output_dir = match &self.output_dir {
            Some(dir) => self.vault.join(dir),
            None => self.vault.join(&config.output.dir),
        };
        let force = self.force || config.output.force;

        // Notes already sitting in the output directory are artifacts of an
        // earlier run, not corpus material.
        let notes: Vec<Note> = vault
            .notes()
            .iter()
            .filter(|n| !n.path.starts_with(&output_dir))
            .cloned()
            .collect();
        let titles: Vec<String> = notes.iter().map(|n| n.title.clone()).collect();

        log::info!(
            "Linkifying against {} titles from {}",
            titles.len(),
            vault.root().display()
        );

        let selection: Vec<Note> = match &self.note {
            Some(requested) => {
                let target = vault.root().join(requested);
                let note = notes
                    .iter()
                    .find(|n| n.path == target)
                    .cloned()
                    .ok_or_else(|| CliError::NoteNotFound(requested.display().to_string()))?;
                vec![note]
            }
            None => notes,
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_notes(selection.len() as u64);

        let mut summary = RunSummary::default();
        for note in &selection {
            match self.link_note(note, &titles, vault.root(), &output_dir, force) {
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
        println!("{}", summary.render(self.report, "new references")?);
        Ok(())
    }

    /// Linkify one note into the output directory.
    ///
    /// The full linkified text is written even when no reference was added,
    /// so the output directory always holds a complete copy of the vault.
    fn link_note(
        &self,
        note: &Note,
        titles: &[String],
        root: &Path,
        output_dir: &Path,
        force: bool,
    ) -> Result<NoteReport> {
        let relative = display_path(&note.path, root);
        let text = fs::read_to_string(&note.path)
            .with_context(|| format!("Failed to read {}", note.path.display()))?;

        let set = TitleSet::build(titles, Some(&note.title));
        let linker = Linker::new(&set, Some(&note.title))?;
        let result = linker.link_document(&text);

        let destination = output_dir.join(note.path.strip_prefix(root).unwrap_or(&note.path));
        if destination.exists() && !force {
            let err = CliError::DestinationExists(destination.display().to_string());
            log::error!("{err}");
            return Ok(NoteReport::skipped(relative, err.to_string()));
        }

        if !self.dry_run {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&destination, &result.text)
                .with_context(|| format!("Failed to write {}", destination.display()))?;
        }

        log::debug!("{relative}: {} new references", result.new_references);
        if result.new_references > 0 {
            Ok(NoteReport::changed(relative, result.new_references))
        } else {
            Ok(NoteReport::unchanged(relative))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NoteStatus;
    use tempfile::TempDir;

    fn args_for(vault: &Path) -> LinkArgs {
        LinkArgs {
            vault: vault.to_path_buf(),
            note: None,
            output_dir: None,
            force: false,
            dry_run: false,
            config: None,
            report: ReportFormat::Text,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn link_note_writes_a_linkified_copy() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Model.md"), "A note about models.").unwrap();
        fs::write(dir.path().join("Journal.md"), "I trained a model today.").unwrap();

        let args = args_for(dir.path());
        let titles = vec!["Model".to_string(), "Journal".to_string()];
        let note = Note {
            path: dir.path().join("Journal.md"),
            title: "Journal".to_string(),
        };
        let output_dir = dir.path().join("linkified");

        let report = args
            .link_note(&note, &titles, dir.path(), &output_dir, false)
            .unwrap();
        assert_eq!(report.status, NoteStatus::Changed);
        assert_eq!(report.references, 1);

        let out = fs::read_to_string(output_dir.join("Journal.md")).unwrap();
        assert_eq!(out, "I trained a [[Model|model]] today.");
    }

    #[test]
    fn a_note_never_links_to_its_own_title() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Model.md"), "A model is a model.").unwrap();

        let args = args_for(dir.path());
        let titles = vec!["Model".to_string()];
        let note = Note {
            path: dir.path().join("Model.md"),
            title: "Model".to_string(),
        };
        let output_dir = dir.path().join("linkified");

        let report = args
            .link_note(&note, &titles, dir.path(), &output_dir, false)
            .unwrap();
        assert_eq!(report.status, NoteStatus::Unchanged);

        let out = fs::read_to_string(output_dir.join("Model.md")).unwrap();
        assert_eq!(out, "A model is a model.");
    }

    #[test]
    fn existing_destination_is_skipped_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Model.md"), "").unwrap();
        fs::write(dir.path().join("Journal.md"), "the model").unwrap();
        let output_dir = dir.path().join("linkified");
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(output_dir.join("Journal.md"), "keep me").unwrap();

        let args = args_for(dir.path());
        let titles = vec!["Model".to_string(), "Journal".to_string()];
        let note = Note {
            path: dir.path().join("Journal.md"),
            title: "Journal".to_string(),
        };

        let report = args
            .link_note(&note, &titles, dir.path(), &output_dir, false)
            .unwrap();
        assert_eq!(report.status, NoteStatus::Skipped);
        assert_eq!(
            fs::read_to_string(output_dir.join("Journal.md")).unwrap(),
            "keep me"
        );

        let report = args
            .link_note(&note, &titles, dir.path(), &output_dir, true)
            .unwrap();
        assert_eq!(report.status, NoteStatus::Changed);
        assert_eq!(
            fs::read_to_string(output_dir.join("Journal.md")).unwrap(),
            "the [[Model|model]]"
        );
    }

    #[test]
    fn dry_run_computes_without_writing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Model.md"), "").unwrap();
        fs::write(dir.path().join("Journal.md"), "a model").unwrap();

        let mut args = args_for(dir.path());
        args.dry_run = true;
        let titles = vec!["Model".to_string(), "Journal".to_string()];
        let note = Note {
            path: dir.path().join("Journal.md"),
            title: "Journal".to_string(),
        };
        let output_dir = dir.path().join("linkified");

        let report = args
            .link_note(&note, &titles, dir.path(), &output_dir, false)
            .unwrap();
        assert_eq!(report.status, NoteStatus::Changed);
        assert_eq!(report.references, 1);
        assert!(!output_dir.exists());
    }
}
