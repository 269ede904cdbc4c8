//! Title normalization for comparison and acronym derivation

use unicode_normalization::UnicodeNormalization;

/// Reduce a title to its comparison form.
///
/// The title is NFKD-decomposed, everything outside ASCII is dropped, the
/// rest is lowercased, and spaces and hyphens become `_` joiners. Accented
/// letters survive as their base letter ("Écart" compares as "ecart"), while
/// a title with no ASCII-representable characters reduces to the empty
/// string.
pub fn normalize_title(title: &str) -> String {
    title
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| match c {
            ' ' | '-' => '_',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(normalize_title("Machine Learning"), "machine_learning");
        assert_eq!(normalize_title("Off-Policy Evaluation"), "off_policy_evaluation");
    }

    #[test]
    fn strips_accents_via_decomposition() {
        assert_eq!(normalize_title("Éléphant"), "elephant");
        assert_eq!(normalize_title("naïve Bayes"), "naive_bayes");
    }

    #[test]
    fn folds_compatibility_forms_to_ascii() {
        assert_eq!(normalize_title("ＭＬ"), "ml");
    }

    #[test]
    fn drops_unrepresentable_characters() {
        assert_eq!(normalize_title("日本語"), "");
        assert_eq!(normalize_title("Tokyo 東京"), "tokyo_");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_title(""), "");
    }
}
