//! Title classification: classic titles and the acronyms derived from them

use std::collections::HashSet;

use serde::Serialize;

use crate::normalize::normalize_title;

/// An acronym derived from a classic title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcronymEntry {
    /// The all-uppercase short form, e.g. `ML`.
    pub acronym: String,
    /// The title the short form links to.
    pub title: String,
}

/// The linkable corpus for one document: every known title except the
/// document's own, plus the acronyms derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct TitleSet {
    classic: Vec<String>,
    acronyms: Vec<AcronymEntry>,
}

impl TitleSet {
    /// Classify raw titles into the corpus used to link one document.
    ///
    /// Duplicates keep their first occurrence and the document's own title
    /// is excluded by exact match. Titles that are empty, whitespace-only,
    /// or contain `[`, `]`, or `|` cannot appear inside a reference marker
    /// and are dropped.
    ///
    /// Each admitted title donates an acronym candidate built from the
    /// upper-cased initials of its normalized words. A candidate is kept
    /// only when it is at least two characters, consists solely of ASCII
    /// letters, and was not already claimed by an earlier title.
    pub fn build(titles: &[String], current_file_title: Option<&str>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut claimed: HashSet<String> = HashSet::new();
        let mut classic = Vec::new();
        let mut acronyms = Vec::new();

        for title in titles {
            if !is_usable(title) {
                continue;
            }
            if current_file_title == Some(title.as_str()) {
                continue;
            }
            if !seen.insert(title.as_str()) {
                continue;
            }
            classic.push(title.clone());

            if let Some(acronym) = derive_acronym(title) {
                if claimed.insert(acronym.clone()) {
                    acronyms.push(AcronymEntry {
                        acronym,
                        title: title.clone(),
                    });
                }
            }
        }

        Self { classic, acronyms }
    }

    /// Titles that link by their own text, in input order.
    pub fn classic_titles(&self) -> &[String] {
        &self.classic
    }

    /// Derived acronyms, in derivation order.
    pub fn acronyms(&self) -> &[AcronymEntry] {
        &self.acronyms
    }

    /// True when nothing can be linked.
    pub fn is_empty(&self) -> bool {
        self.classic.is_empty()
    }

    /// Number of classic titles.
    pub fn len(&self) -> usize {
        self.classic.len()
    }
}

fn is_usable(title: &str) -> bool {
    !title.trim().is_empty() && !title.contains(['[', ']', '|'])
}

/// Upper-cased initials of the normalized words, or `None` when the result
/// would be too short or contain anything but ASCII letters.
fn derive_acronym(title: &str) -> Option<String> {
    let normalized = normalize_title(title);
    let acronym: String = normalized
        .split('_')
        .filter_map(|word| word.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let usable = acronym.len() > 1 && acronym.bytes().all(|b| b.is_ascii_uppercase());
    usable.then_some(acronym)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn derives_acronyms_from_word_initials() {
        let set = TitleSet::build(&titles(&["Machine Learning", "Off-Policy Evaluation"]), None);
        assert_eq!(
            set.acronyms(),
            &[
                AcronymEntry {
                    acronym: "ML".to_string(),
                    title: "Machine Learning".to_string(),
                },
                AcronymEntry {
                    acronym: "OPE".to_string(),
                    title: "Off-Policy Evaluation".to_string(),
                },
            ]
        );
    }

    #[test]
    fn single_word_titles_get_no_acronym() {
        let set = TitleSet::build(&titles(&["Model"]), None);
        assert_eq!(set.classic_titles(), &["Model".to_string()]);
        assert!(set.acronyms().is_empty());
    }

    #[test]
    fn first_title_claims_a_contested_acronym() {
        let set = TitleSet::build(&titles(&["Machine Learning", "Meta Language"]), None);
        assert_eq!(set.acronyms().len(), 1);
        assert_eq!(set.acronyms()[0].title, "Machine Learning");
        assert_eq!(set.classic_titles().len(), 2);
    }

    #[test]
    fn initials_with_digits_are_rejected() {
        let set = TitleSet::build(&titles(&["3rd Party Audit"]), None);
        assert!(set.acronyms().is_empty());
    }

    #[test]
    fn excludes_the_current_document() {
        let set = TitleSet::build(
            &titles(&["Machine Learning", "Model"]),
            Some("Machine Learning"),
        );
        assert_eq!(set.classic_titles(), &["Model".to_string()]);
        assert!(set.acronyms().is_empty());
    }

    #[test]
    fn deduplicates_keeping_first_occurrence() {
        let set = TitleSet::build(&titles(&["Model", "Model", "Agent"]), None);
        assert_eq!(
            set.classic_titles(),
            &["Model".to_string(), "Agent".to_string()]
        );
    }

    #[test]
    fn drops_titles_that_cannot_round_trip() {
        let set = TitleSet::build(&titles(&["", "   ", "a|b", "x[y]", "Model"]), None);
        assert_eq!(set.classic_titles(), &["Model".to_string()]);
    }

    #[test]
    fn accented_titles_donate_ascii_acronyms() {
        let set = TitleSet::build(&titles(&["École Normale"]), None);
        assert_eq!(set.acronyms()[0].acronym, "EN");
    }
}
