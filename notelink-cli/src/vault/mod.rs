//! Vault scanning and note discovery

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;

use crate::error::CliError;

/// A Markdown note discovered in a vault.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path to the file.
    pub path: PathBuf,
    /// The note's title: its file stem.
    pub title: String,
}

/// A scanned vault: the root directory plus every note found under it.
#[derive(Debug)]
pub struct Vault {
    root: PathBuf,
    notes: Vec<Note>,
}

impl Vault {
    /// Scan `root` recursively for `*.md` notes.
    ///
    /// Files under dot-prefixed directories below the vault root are
    /// skipped, as are paths matching any of the `ignore` globs (which are
    /// interpreted relative to the root). Results are sorted by path.
    pub fn scan(root: &Path, ignore: &[String]) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!(CliError::VaultNotFound(root.display().to_string()));
        }

        let ignore = compile_ignores(ignore)?;
        let pattern = root.join("**").join("*.md");
        let pattern = pattern.to_string_lossy().into_owned();

        let mut notes = Vec::new();
        let paths =
            glob::glob(&pattern).with_context(|| format!("Invalid scan pattern: {pattern}"))?;
        for path_result in paths {
            let path = path_result
                .with_context(|| format!("Error scanning vault: {}", root.display()))?;
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            if is_hidden(relative) || ignore.iter().any(|p| p.matches_path(relative)) {
                continue;
            }
            let Some(stem) = path.file_stem() else {
                continue;
            };
            notes.push(Note {
                title: stem.to_string_lossy().into_owned(),
                path,
            });
        }

        if notes.is_empty() {
            anyhow::bail!("No Markdown notes found under {}", root.display());
        }

        notes.sort_by(|a, b| a.path.cmp(&b.path));
        notes.dedup_by(|a, b| a.path == b.path);

        Ok(Self {
            root: root.to_path_buf(),
            notes,
        })
    }

    /// The vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every discovered note, sorted by path.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Find a note by its path relative to the vault root.
    pub fn select(&self, note: &Path) -> Result<Note> {
        let target = self.root.join(note);
        self.notes
            .iter()
            .find(|n| n.path == target)
            .cloned()
            .ok_or_else(|| CliError::NoteNotFound(note.display().to_string()).into())
    }
}

/// Render `path` relative to `root` for logs and reports.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// A component starting with `.` hides the file, but only below the vault
/// root, so a vault living inside a dotted ancestor still scans.
fn is_hidden(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

fn compile_ignores(ignore: &[String]) -> Result<Vec<Pattern>> {
    ignore
        .iter()
        .map(|raw| {
            Pattern::new(raw).with_context(|| format!("Invalid ignore pattern: {raw}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_note(root: &Path, relative: &str, text: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn finds_notes_recursively_with_stems_as_titles() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "Model.md", "");
        write_note(dir.path(), "sub/Machine Learning.md", "");

        let vault = Vault::scan(dir.path(), &[]).unwrap();
        let titles: Vec<&str> = vault.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Model", "Machine Learning"]);
    }

    #[test]
    fn skips_dot_directories_and_non_markdown() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "keep.md", "");
        write_note(dir.path(), ".obsidian/cache.md", "");
        write_note(dir.path(), "notes.txt", "");

        let vault = Vault::scan(dir.path(), &[]).unwrap();
        assert_eq!(vault.notes().len(), 1);
        assert_eq!(vault.notes()[0].title, "keep");
    }

    #[test]
    fn applies_ignore_globs_relative_to_the_root() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "keep.md", "");
        write_note(dir.path(), "drafts/wip.md", "");

        let vault = Vault::scan(dir.path(), &["drafts/**".to_string()]).unwrap();
        assert_eq!(vault.notes().len(), 1);
        assert_eq!(vault.notes()[0].title, "keep");
    }

    #[test]
    fn selects_a_note_by_relative_path() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "sub/a.md", "");

        let vault = Vault::scan(dir.path(), &[]).unwrap();
        let note = vault.select(Path::new("sub/a.md")).unwrap();
        assert_eq!(note.title, "a");

        let err = vault.select(Path::new("missing.md")).unwrap_err();
        assert!(err.to_string().contains("Note not found"));
    }

    #[test]
    fn missing_vault_is_an_error() {
        let err = Vault::scan(Path::new("/definitely/not/here"), &[]).unwrap_err();
        assert!(err.to_string().contains("Vault not found"));
    }

    #[test]
    fn empty_vault_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Vault::scan(dir.path(), &[]).unwrap_err();
        assert!(err.to_string().contains("No Markdown notes"));
    }

    #[test]
    fn display_path_strips_the_root() {
        let root = Path::new("/vault");
        assert_eq!(display_path(Path::new("/vault/sub/a.md"), root), "sub/a.md");
        assert_eq!(display_path(Path::new("/elsewhere/b.md"), root), "/elsewhere/b.md");
    }
}
