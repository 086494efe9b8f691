//! Field-name suggestions and case-id checks.

use stroke_core::SNAPSHOT_FIELDS;

/// Closest snapshot field name to `input`, compared case-insensitively.
///
/// Nothing is suggested when the edit distance exceeds half the longer of the
/// two names.
pub(crate) fn closest_field(input: &str) -> Option<&'static str> {
    let lowered = input.to_lowercase();
    let (field, dist) = SNAPSHOT_FIELDS
        .iter()
        .map(|&field| (field, levenshtein(&lowered, field)))
        .min_by_key(|&(_, dist)| dist)?;

    (dist <= input.len().max(field.len()) / 2).then_some(field)
}

/// Levenshtein edit distance, single-row.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Case ids are kebab-case: lowercase alphanumeric words joined by single hyphens.
pub(crate) fn is_kebab_case(id: &str) -> bool {
    !id.is_empty()
        && id.split('-').all(|word| {
            !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("inr", "inr"), 0);
    }

    #[test]
    fn suggests_close_field_names() {
        assert_eq!(closest_field("heart_rte"), Some("heart_rate"));
        assert_eq!(closest_field("Platelets"), Some("platelet_count"));
        assert_eq!(closest_field("platelet_cnt"), Some("platelet_count"));
        assert_eq!(closest_field("systolic"), Some("systolic_bp"));
        assert_eq!(closest_field("NIHSS_SCORE"), Some("nihss_score"));
    }

    #[test]
    fn no_suggestion_for_distant_names() {
        assert_eq!(closest_field("zzzzzzzzzzzzz"), None);
    }

    #[test]
    fn kebab_case_ids() {
        assert!(is_kebab_case("p001-initial"));
        assert!(is_kebab_case("baseline"));
        assert!(!is_kebab_case("P001_initial"));
        assert!(!is_kebab_case("-p001"));
        assert!(!is_kebab_case("p001-"));
        assert!(!is_kebab_case("p001--a"));
        assert!(!is_kebab_case(""));
    }
}
