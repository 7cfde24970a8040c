use once_cell::sync::Lazy;
use regex::Regex;

const MAX_EMAIL_LEN: usize = 254;
const MIN_DOMAIN_LEN: usize = 4;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email pattern")
});

static EMAIL_STRICT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Stricter check than the extraction pattern, applied to every address
/// before it is counted or stored.
pub fn validate_email(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_EMAIL_LEN {
        return false;
    }
    if !EMAIL_STRICT.is_match(value) {
        return false;
    }
    if value
        .chars()
        .any(|ch| matches!(ch, '<' | '>' | '(' | ')' | '[' | ']' | '\\' | ';' | ':' | ','))
    {
        return false;
    }
    match value.split_once('@') {
        Some((_, domain)) => domain.len() >= MIN_DOMAIN_LEN,
        None => false,
    }
}

/// Scans free text for email addresses that pass [`validate_email`].
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .filter(|address| validate_email(address))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_emails, normalize_email, validate_email};

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Ada@Example.com ");
        assert_eq!(value.as_deref(), Some("ada@example.com"));
        assert!(normalize_email("   ").is_none());
    }

    #[test]
    fn validate_accepts_plain_addresses() {
        assert!(validate_email("ada@example.com"));
        assert!(validate_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn validate_rejects_oversized_addresses() {
        let local = "a".repeat(250);
        assert!(!validate_email(&format!("{local}@ex.com")));
    }

    #[test]
    fn validate_rejects_short_domains() {
        assert!(!validate_email("ada@a.b"));
    }

    #[test]
    fn validate_rejects_forbidden_characters() {
        assert!(!validate_email("ada;x@example.com"));
        assert!(!validate_email("plain-text"));
    }

    #[test]
    fn extract_keeps_only_validated_matches() {
        let found = extract_emails("пишите на ada@example.com или x@a.b");
        assert_eq!(found, vec!["ada@example.com".to_string()]);
    }

    #[test]
    fn extract_on_plain_text_is_empty() {
        assert!(extract_emails("ничего не найдено").is_empty());
    }
}
