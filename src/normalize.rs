use std::cmp::Ordering;

use feruca::Collator;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, decompose and strip combining diacritical marks.
///
/// Two spellings that differ only by case or accents normalize to the same
/// string, so every comparison in the crate goes through here.
///
/// ```
/// use recipe_facets::normalize;
///
/// assert_eq!(normalize("Crème Brûlée"), "creme brulee");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// Same as [`normalize`], with a missing value treated as empty text.
pub fn normalize_option(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Collate two values by their normalized form (Unicode root collation).
///
/// Values that normalize to the same text compare equal.
pub fn cmp_normalized(a: &str, b: &str) -> Ordering {
    Collator::default().collate(&normalize(a), &normalize(b))
}

/// Sort values in place by the collation of their normalized form.
///
/// The sort is stable: values with the same normalized form keep the order
/// they came in.
pub fn sort_normalized(values: &mut Vec<String>) {
    let mut collator = Collator::default();
    let mut keyed: Vec<(String, String)> = values
        .drain(..)
        .map(|value| (normalize(&value), value))
        .collect();
    keyed.sort_by(|a, b| collator.collate(&a.0, &b.0));
    values.extend(keyed.into_iter().map(|(_, value)| value));
}

// Combining Diacritical Marks block
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_accents() {
        assert_eq!(normalize("Pommé"), "pomme");
        assert_eq!(normalize("ÉPINARDS"), "epinards");
        assert_eq!(normalize("Crème fraîche"), "creme fraiche");
        assert_eq!(normalize("Cuillère à Soupe"), "cuillere a soupe");
    }

    #[test]
    fn test_precomposed_and_decomposed_forms_are_equal() {
        let precomposed = "caf\u{00E9}";
        let decomposed = "cafe\u{0301}";
        assert_eq!(normalize(precomposed), normalize(decomposed));
    }

    #[test]
    fn test_missing_text_is_empty() {
        assert_eq!(normalize_option(None), "");
        assert_eq!(normalize_option(Some("Four")), "four");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_non_latin_text_is_kept() {
        assert_eq!(normalize("Ñandú"), "nandu");
        assert_eq!(normalize("ΣΟΥΠΑ"), "σουπα");
    }

    #[test]
    fn test_accented_values_sort_with_plain_ones() {
        let mut values = vec![
            "Oeuf".to_string(),
            "Épinards".to_string(),
            "ail".to_string(),
            "Eau".to_string(),
            "Farine".to_string(),
        ];
        sort_normalized(&mut values);
        assert_eq!(values, vec!["ail", "Eau", "Épinards", "Farine", "Oeuf"]);
    }

    #[test]
    fn test_ligatures_collate_with_latin_letters() {
        let mut values = vec![
            "Pomme".to_string(),
            "Oignon".to_string(),
            "Œuf".to_string(),
            "Zeste".to_string(),
        ];
        sort_normalized(&mut values);
        assert_eq!(values, vec!["Œuf", "Oignon", "Pomme", "Zeste"]);
    }

    #[test]
    fn test_same_normalized_form_keeps_input_order() {
        let mut values = vec![
            "Œuf".to_string(),
            "Oignon".to_string(),
            "Pomme".to_string(),
            "sucre".to_string(),
            "Sucre".to_string(),
        ];
        sort_normalized(&mut values);
        assert_eq!(values, vec!["Œuf", "Oignon", "Pomme", "sucre", "Sucre"]);

        let mut values = vec!["Sucre".to_string(), "Pomme".to_string(), "sucre".to_string()];
        sort_normalized(&mut values);
        assert_eq!(values, vec!["Pomme", "Sucre", "sucre"]);
    }

    #[test]
    fn test_cmp_normalized() {
        assert_eq!(cmp_normalized("Sucre", "sucre"), Ordering::Equal);
        assert_eq!(cmp_normalized("Épinards", "epinards"), Ordering::Equal);
        assert_eq!(cmp_normalized("Beurre", "ail"), Ordering::Greater);
        assert_eq!(cmp_normalized("Œuf", "Oignon"), Ordering::Less);
    }
}
