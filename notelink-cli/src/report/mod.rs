//! Run summaries and their rendering

use anyhow::Result;
use serde::Serialize;

/// Supported report formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    /// One line per note plus totals
    Text,
    /// Pretty-printed JSON
    Json,
}

/// What happened to one note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    /// Rewritten with at least one reference touched
    Changed,
    /// Processed, nothing to do
    Unchanged,
    /// Not processed, e.g. its destination already exists
    Skipped,
    /// Reading or writing the note failed
    Failed,
}

/// Per-note outcome
#[derive(Debug, Clone, Serialize)]
pub struct NoteReport {
    /// Path relative to the vault root
    pub path: String,
    pub status: NoteStatus,
    /// References inserted or removed in this note
    pub references: usize,
    /// Human-readable reason for skips and failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl NoteReport {
    pub fn changed(path: String, references: usize) -> Self {
        Self {
            path,
            status: NoteStatus::Changed,
            references,
            detail: None,
        }
    }

    pub fn unchanged(path: String) -> Self {
        Self {
            path,
            status: NoteStatus::Unchanged,
            references: 0,
            detail: None,
        }
    }

    pub fn skipped(path: String, detail: String) -> Self {
        Self {
            path,
            status: NoteStatus::Skipped,
            references: 0,
            detail: Some(detail),
        }
    }

    pub fn failed(path: String, detail: String) -> Self {
        Self {
            path,
            status: NoteStatus::Failed,
            references: 0,
            detail: Some(detail),
        }
    }
}

/// Whole-run summary, printed after the note loop finishes
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub files: Vec<NoteReport>,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Total references inserted or removed across the run
    pub references: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: NoteReport) {
        match report.status {
            NoteStatus::Changed => self.changed += 1,
            NoteStatus::Unchanged => self.unchanged += 1,
            NoteStatus::Skipped => self.skipped += 1,
            NoteStatus::Failed => self.failed += 1,
        }
        self.references += report.references;
        self.files.push(report);
    }

    /// Render in the requested format. `noun` names what `references`
    /// counts, e.g. "new references" or "removed references".
    pub fn render(&self, format: ReportFormat, noun: &str) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text(noun)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self, noun: &str) -> String {
        let mut out = String::new();
        for report in &self.files {
            let line = match report.status {
                NoteStatus::Changed => {
                    format!("{}: {} {}", report.path, report.references, noun)
                }
                NoteStatus::Unchanged => format!("{}: no change", report.path),
                NoteStatus::Skipped => format!(
                    "{}: skipped ({})",
                    report.path,
                    report.detail.as_deref().unwrap_or("unknown reason")
                ),
                NoteStatus::Failed => format!(
                    "{}: failed ({})",
                    report.path,
                    report.detail.as_deref().unwrap_or("unknown error")
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }

        out.push_str(&format!(
            "{} {} across {} notes ({} changed, {} unchanged, {} skipped, {} failed)",
            self.references,
            noun,
            self.files.len(),
            self.changed,
            self.unchanged,
            self.skipped,
            self.failed
        ));
        out
    }
}
