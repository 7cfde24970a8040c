use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Region label for every number the extractor accepts; the numbering plan
/// is single-country.
pub const REGION: &str = "Россия";

pub const UNKNOWN_OPERATOR: &str = "Неизвестный оператор";

/// Two-digit national prefixes mapped to carrier names. Checked in
/// declaration order, first match wins; 98 historically appeared under both
/// МТС and ЮТел, here the МТС entry is kept.
const OPERATOR_PREFIXES: &[(&str, &str)] = &[
    ("79", "МТС"),
    ("91", "МТС"),
    ("98", "МТС"),
    ("90", "Билайн"),
    ("96", "Билайн"),
    ("92", "МегаФон"),
    ("93", "МегаФон"),
    ("95", "МегаФон"),
    ("99", "ЮТел"),
];

/// Candidate patterns, tried in priority order per scan: international
/// grouped, domestic grouped, dash-grouped local, bare digit runs.
static CANDIDATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+7\s?[(\-]?\d{3}[)\-]?\s?\d{3}-?\d{2}-?\d{2}",
        r"8\s?[(\-]?\d{3}[)\-]?\s?\d{3}-?\d{2}-?\d{2}",
        r"\b\d{3}-\d{3}-\d{2}-\d{2}\b",
        r"\b\d{11,15}\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid phone pattern"))
    .collect()
});

/// A phone number recovered from free text, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneMatch {
    pub number: String,
    pub operator: String,
    pub region: String,
    pub original: String,
}

/// Scans free text for phone-number-like substrings.
///
/// Malformed or under/overlength candidates are silently skipped; the result
/// is deduplicated by formatted number, first occurrence wins. Never fails:
/// text without numbers yields an empty vec.
pub fn extract_phones(text: &str) -> Vec<PhoneMatch> {
    let mut found: Vec<PhoneMatch> = Vec::new();
    for pattern in CANDIDATE_PATTERNS.iter() {
        for candidate in pattern.find_iter(text) {
            let raw = candidate.as_str();
            let Some(number) = normalize_phone(raw) else {
                continue;
            };
            if found.iter().any(|phone| phone.number == number) {
                continue;
            }
            let operator = operator_for(&number);
            found.push(PhoneMatch {
                number,
                operator: operator.to_string(),
                region: REGION.to_string(),
                original: raw.to_string(),
            });
        }
    }
    found
}

/// Normalizes a raw candidate to the canonical `+7 XXX XXX XXXX` form.
///
/// Strips every character except digits and `+`, then fits the remainder
/// against three rules in order: `+7` plus ten digits, a leading `8` plus ten
/// digits, or exactly ten bare digits. Anything else is rejected.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '+')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // Rules are ordered: a bare ten-digit run may itself start with 8.
    let ten_digits =
        |value: &str| value.len() == 10 && value.chars().all(|ch| ch.is_ascii_digit());
    let national = if cleaned.strip_prefix("+7").is_some_and(ten_digits) {
        &cleaned[2..]
    } else if cleaned.strip_prefix('8').is_some_and(ten_digits) {
        &cleaned[1..]
    } else if ten_digits(&cleaned) {
        cleaned.as_str()
    } else {
        return None;
    };

    let formatted = format!(
        "+7 {} {} {}",
        &national[..3],
        &national[3..6],
        &national[6..]
    );
    let digit_count = formatted.chars().filter(char::is_ascii_digit).count();
    if !(10..=12).contains(&digit_count) {
        return None;
    }
    Some(formatted)
}

fn operator_for(formatted: &str) -> &'static str {
    let national: String = formatted
        .chars()
        .filter(char::is_ascii_digit)
        .skip(1)
        .collect();
    OPERATOR_PREFIXES
        .iter()
        .find(|(prefix, _)| national.starts_with(prefix))
        .map(|(_, operator)| *operator)
        .unwrap_or(UNKNOWN_OPERATOR)
}

#[cfg(test)]
mod tests {
    use super::{extract_phones, normalize_phone};

    #[test]
    fn normalize_accepts_international_domestic_and_bare_forms() {
        assert_eq!(
            normalize_phone("+7 (916) 123-45-67").as_deref(),
            Some("+7 916 123 4567")
        );
        assert_eq!(
            normalize_phone("8 916 123-45-67").as_deref(),
            Some("+7 916 123 4567")
        );
        assert_eq!(
            normalize_phone("9161234567").as_deref(),
            Some("+7 916 123 4567")
        );
    }

    #[test]
    fn bare_ten_digit_run_starting_with_eight_is_not_a_prefix() {
        assert_eq!(
            normalize_phone("891-234-56-78").as_deref(),
            Some("+7 891 234 5678")
        );
    }

    #[test]
    fn normalize_rejects_wrong_lengths() {
        assert!(normalize_phone("12345").is_none());
        assert!(normalize_phone("+7916123456").is_none());
        // A bare 11-digit run with a leading 7 fits none of the three rules.
        assert!(normalize_phone("79161234567").is_none());
        assert!(normalize_phone("").is_none());
        assert!(normalize_phone("call me").is_none());
    }

    #[test]
    fn duplicate_numbers_collapse_to_first_occurrence() {
        let phones = extract_phones("+79161234567 also 89161234567");
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].number, "+7 916 123 4567");
        assert_eq!(phones[0].original, "+79161234567");
    }

    #[test]
    fn operator_lookup_uses_national_prefix() {
        let phones = extract_phones("8 (906) 111-22-33 and 8 (916) 111-22-33");
        assert_eq!(phones.len(), 2);
        assert_eq!(phones[0].operator, "Билайн");
        assert_eq!(phones[1].operator, "МТС");
    }

    #[test]
    fn ambiguous_prefix_resolves_to_first_table_entry() {
        let phones = extract_phones("8 (980) 111-22-33");
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].operator, "МТС");
    }

    #[test]
    fn unknown_prefix_gets_fallback_label() {
        let phones = extract_phones("8 (831) 111-22-33");
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].operator, "Неизвестный оператор");
        assert_eq!(phones[0].region, "Россия");
    }

    #[test]
    fn text_without_digits_yields_nothing() {
        assert!(extract_phones("no numbers here").is_empty());
        assert!(extract_phones("").is_empty());
    }

    #[test]
    fn dash_grouped_local_numbers_are_recognized() {
        let phones = extract_phones("офис: 916-123-45-67");
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].number, "+7 916 123 4567");
    }
}
