//! Wiki-reference linkification for plain-text note vaults
//!
//! This crate rewrites prose so that occurrences of known note titles become
//! `[[Title]]` reference markers, the way wiki-style note tools expect them.
//! Case variants keep their surface text as a display alias, plural forms
//! keep the `s` outside the marker, and titles donate all-uppercase acronyms
//! that link back to them. Fenced code, math, table rows, and existing
//! markers are never touched, so running the linker twice is a fixed point.
//!
//! The engine is pure: no I/O, no logging, and the same input always
//! produces the same output.
//!
//! # Example
//!
//! ```rust
//! use notelink_core::{Linker, TitleSet};
//!
//! let titles = vec!["Machine Learning".to_string(), "Model".to_string()];
//! let set = TitleSet::build(&titles, None);
//! let linker = Linker::new(&set, None)?;
//!
//! let result = linker.link_document("Training a model with machine learning.");
//! assert_eq!(
//!     result.text,
//!     "Training a [[Model|model]] with [[Machine Learning|machine learning]]."
//! );
//! assert_eq!(result.new_references, 2);
//! # Ok::<(), notelink_core::Error>(())
//! ```

mod error;
mod link;
mod normalize;
mod segment;
mod title_set;
mod unlink;

pub use error::{Error, Result};
pub use link::{Linker, LinkifyResult};
pub use normalize::normalize_title;
pub use segment::{segment, Span, SpanKind};
pub use title_set::{AcronymEntry, TitleSet};
pub use unlink::{strip_references, UnlinkResult};
