//! Lossless segmentation into linkable prose and protected regions

use std::sync::LazyLock;

use regex::Regex;

/// Regions the linker must never rewrite, in precedence order: fenced code,
/// display math, inline math, table rows. The fence constructs (``` and $$)
/// protect through end of text when unterminated; a lone `$` opens nothing.
static PROTECTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s:```.*?(?:```|\z))|(?s:\$\$.*?(?:\$\$|\z))|(?s:\$.*?\$)|(?m:^\|[^\r\n]*\|\r?$)",
    )
    .expect("valid regex")
});

/// Whether a span may be rewritten by the linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Prose the linker may rewrite.
    Linkable,
    /// Code, math, or table content that passes through untouched.
    Protected,
}

/// A contiguous piece of the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// The slice of the original text.
    pub text: &'a str,
    /// Whether the linker may rewrite it.
    pub kind: SpanKind,
}

/// Partition a document into linkable and protected spans.
///
/// Concatenating the span texts in order reproduces the input exactly.
/// Empty spans are never emitted.
pub fn segment(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut emitted = 0;
    let mut pos = 0;

    while let Some(found) = PROTECTED_RE.find_at(text, pos) {
        let (start, end) = (found.start(), found.end());

        // A dollar sign directly preceded by a backtick is inline code,
        // not a math opener. Skip it and rescan one character later.
        if text.as_bytes()[start] == b'$' && start > 0 && text.as_bytes()[start - 1] == b'`' {
            pos = start + 1;
            continue;
        }

        if start > emitted {
            spans.push(Span {
                text: &text[emitted..start],
                kind: SpanKind::Linkable,
            });
        }
        spans.push(Span {
            text: &text[start..end],
            kind: SpanKind::Protected,
        });
        emitted = end;
        pos = end;
    }

    if emitted < text.len() {
        spans.push(Span {
            text: &text[emitted..],
            kind: SpanKind::Linkable,
        });
    }

    spans
}
