//! Reference linker: rewrites known titles into `[[...]]` markers

use std::cmp::Reverse;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::segment::{segment, SpanKind};
use crate::title_set::TitleSet;

/// An already-marked reference, including a trailing plural `s`. Such
/// regions are reserved before any pass runs so repeated linkification is a
/// fixed point.
static EXISTING_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[.*?\]\]s?").expect("valid regex"));

/// The outcome of linkifying one document or span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkifyResult {
    /// The rewritten text.
    pub text: String,
    /// How many new reference markers were inserted.
    pub new_references: usize,
}

enum PassKind {
    /// Case-insensitive match on the title's own text.
    Classic,
    /// Case-sensitive match on a derived short form.
    Acronym { acronym: String },
}

/// One scan over the text for a single title or acronym.
struct Pass {
    title: String,
    pattern: Regex,
    kind: PassKind,
}

/// Rewrites occurrences of known titles into reference markers.
///
/// Passes run longest title first (stable on input order), then acronyms in
/// derivation order. All matches are resolved against the immutable input
/// into one non-overlapping set, so no pass ever sees another pass's output.
pub struct Linker {
    passes: Vec<Pass>,
}

impl Linker {
    /// Compile one pass per classic title and per acronym.
    ///
    /// The document's own title is excluded here as well, so a caller that
    /// built the [`TitleSet`] without exclusion still cannot self-link.
    pub fn new(titles: &TitleSet, current_file_title: Option<&str>) -> Result<Self> {
        let mut classic: Vec<&String> = titles
            .classic_titles()
            .iter()
            .filter(|title| current_file_title != Some(title.as_str()))
            .collect();
        classic.sort_by_key(|title| Reverse(title.chars().count()));

        let mut passes = Vec::with_capacity(classic.len() + titles.acronyms().len());
        for title in classic {
            passes.push(Pass {
                title: title.clone(),
                pattern: compile_pattern(title, true)?,
                kind: PassKind::Classic,
            });
        }
        for entry in titles.acronyms() {
            if current_file_title == Some(entry.title.as_str()) {
                continue;
            }
            passes.push(Pass {
                title: entry.title.clone(),
                pattern: compile_pattern(&entry.acronym, false)?,
                kind: PassKind::Acronym {
                    acronym: entry.acronym.clone(),
                },
            });
        }

        Ok(Self { passes })
    }

    /// Linkify a whole document: protected spans pass through untouched,
    /// linkable spans are rewritten, and the pieces are reassembled.
    pub fn link_document(&self, text: &str) -> LinkifyResult {
        let mut out = String::with_capacity(text.len());
        let mut new_references = 0;

        for span in segment(text) {
            match span.kind {
                SpanKind::Linkable => {
                    let linked = self.link_span(span.text);
                    out.push_str(&linked.text);
                    new_references += linked.new_references;
                }
                SpanKind::Protected => out.push_str(span.text),
            }
        }

        LinkifyResult {
            text: out,
            new_references,
        }
    }

    /// Linkify one linkable span.
    ///
    /// Existing markers are reserved first. Each pass then scans left to
    /// right: a match overlapping a reserved interval is skipped, a match
    /// containing marker delimiters reserves its interval without emitting,
    /// and a match whose right edge touches a word character is rejected.
    /// Accepted matches reserve their interval and emit one replacement.
    pub fn link_span(&self, text: &str) -> LinkifyResult {
        let mut reserved: Vec<Range<usize>> = EXISTING_REF_RE
            .find_iter(text)
            .map(|m| m.range())
            .collect();
        let mut replacements: Vec<(Range<usize>, String)> = Vec::new();

        for pass in &self.passes {
            let mut pos = 0;
            while let Some(found) = pass.pattern.find_at(text, pos) {
                let range = found.range();

                if overlaps(&reserved, &range) {
                    pos = range.start + 1;
                    continue;
                }

                let surface = found.as_str();
                if surface.contains("[[") || surface.contains("]]") {
                    pos = range.end;
                    reserved.push(range);
                    continue;
                }

                if followed_by_word(text, range.end) {
                    pos = range.start + 1;
                    continue;
                }

                pos = range.end;
                replacements.push((range.clone(), pass.render(surface)));
                reserved.push(range);
            }
        }

        replacements.sort_by_key(|(range, _)| range.start);

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let new_references = replacements.len();
        for (range, rendered) in replacements {
            out.push_str(&text[cursor..range.start]);
            out.push_str(&rendered);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);

        LinkifyResult {
            text: out,
            new_references,
        }
    }
}

impl Pass {
    /// Build the marker that replaces a matched surface.
    fn render(&self, surface: &str) -> String {
        let title = &self.title;
        match &self.kind {
            PassKind::Classic => {
                if let Some(stem) = surface.strip_suffix(['s', 'S']) {
                    if stem.to_lowercase() == title.to_lowercase() {
                        return format!("[[{title}]]s");
                    }
                }
                if surface != title {
                    format!("[[{title}|{surface}]]")
                } else {
                    format!("[[{title}]]")
                }
            }
            PassKind::Acronym { acronym } => match surface.strip_suffix('s') {
                Some(stem) if stem == acronym => format!("[[{title}|{acronym}]]s"),
                _ => format!("[[{title}|{surface}]]"),
            },
        }
    }
}

/// A matchable name wrapped in its decoration: an opening word boundary or
/// marker delimiter, an optional plural `s`, and an optional closing
/// delimiter with its own plural tail. The decoration lets a pass see
/// partially-marked forms whole, so the delimiter guard can reserve them.
fn compile_pattern(name: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(&format!(
        r"(?:\b|\[\[){}s?(?:\]\])?s?",
        regex::escape(name)
    ))
    .case_insensitive(case_insensitive)
    .build()
    .map_err(|source| Error::Pattern {
        title: name.to_string(),
        source,
    })
}

fn overlaps(reserved: &[Range<usize>], range: &Range<usize>) -> bool {
    reserved
        .iter()
        .any(|r| r.start < range.end && range.start < r.end)
}

/// True when the byte offset is directly followed by a word character, in
/// which case a match ending there sits inside a larger word.
fn followed_by_word(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        Some(c) => c.is_alphanumeric() || c == '_',
        None => false,
    }
}
