use chrono::{Datelike, NaiveDate};
use serde_yaml_ng::Value;

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// URL-friendly form of a product name for query strings
pub fn slugify(text: &str) -> String {
    text.to_lowercase().replace([' ', '/', '\\'], "-")
}

/// File name for a model page
///
/// Keeps word characters, whitespace and hyphens, then lowercases and
/// joins words with `-`.
pub fn model_slug(model: &str) -> String {
    let kept: String = model
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.trim().to_lowercase().replace(' ', "-")
}

/// First character uppercased, the rest lowercased
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Prefix of at most `max` characters, never splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Render a YAML value for a Markdown bullet
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", display_value(k), display_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Tagged(tagged) => display_value(&tagged.value),
    }
}

/// `2 janvier 2024`
pub fn french_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        FRENCH_MONTHS[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Souffleuse 24 po"), "souffleuse-24-po");
        assert_eq!(slugify("Pelle A/B\\C"), "pelle-a-b-c");
        assert_eq!(slugify("Équipement"), "équipement");
    }

    #[test]
    fn test_model_slug() {
        assert_eq!(model_slug("SA92B-SA98B (2019)"), "sa92b-sa98b-2019");
        assert_eq!(model_slug("  Skandic WT 600 "), "skandic-wt-600");
        assert_eq!(model_slug("Modèle_Été!"), "modèle_été");
        assert_eq!(model_slug("???"), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("motoneiges"), "Motoneiges");
        assert_eq!(capitalize("VTT"), "Vtt");
        assert_eq!(capitalize("équipement"), "Équipement");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("éèà", 2), "éè");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::String("600 cc".into())), "600 cc");
        assert_eq!(display_value(&Value::from(24)), "24");
        assert_eq!(display_value(&Value::Bool(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
        let seq = Value::Sequence(vec![Value::from("a"), Value::from(2)]);
        assert_eq!(display_value(&seq), "a, 2");
    }

    #[test]
    fn test_french_long_date() {
        let date = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        assert_eq!(french_long_date(date), "2 janvier 2006");
        let date = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        assert_eq!(french_long_date(date), "31 août 2024");
    }
}
