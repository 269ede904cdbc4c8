//! Reference stripping: the inverse of linkification

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::segment::{segment, SpanKind};

/// A reference marker with its target and optional display text.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]*)(?:\|([^\]]*))?\]\]").expect("valid regex"));

/// The outcome of stripping one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlinkResult {
    /// The text with reference markers removed.
    pub text: String,
    /// How many markers were removed.
    pub removed_references: usize,
}

/// Replace every reference marker with its prose form.
///
/// `[[Target]]` becomes `Target` and `[[Target|Display]]` becomes
/// `Display`; a plural `s` outside the marker re-joins the word. Protected
/// spans are left untouched, so literal markers inside code fences survive.
pub fn strip_references(text: &str) -> UnlinkResult {
    let mut out = String::with_capacity(text.len());
    let mut removed = 0;

    for span in segment(text) {
        match span.kind {
            SpanKind::Linkable => {
                let stripped = REFERENCE_RE.replace_all(span.text, |caps: &Captures| {
                    removed += 1;
                    match caps.get(2) {
                        Some(display) => display.as_str().to_string(),
                        None => caps[1].to_string(),
                    }
                });
                out.push_str(&stripped);
            }
            SpanKind::Protected => out.push_str(span.text),
        }
    }

    UnlinkResult {
        text: out,
        removed_references: removed,
    }
}
