/// Maximum length of any single displayed value, in characters.
pub const MAX_VALUE_LEN: usize = 500;

/// Strips markup-breaking characters from a value before it is displayed.
///
/// Removes angle brackets, quotes and control characters, trims surrounding
/// whitespace and truncates to [`MAX_VALUE_LEN`] characters. This is a display
/// safety measure, not a security boundary.
pub fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|ch| !matches!(ch, '<' | '>' | '"' | '\'' | '\u{0}'..='\u{1f}' | '\u{7f}'))
        .collect();
    cleaned.trim().chars().take(MAX_VALUE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::{sanitize, MAX_VALUE_LEN};

    #[test]
    fn sanitize_strips_markup_characters() {
        let value = sanitize("<script>alert('x')</script>");
        assert!(!value.contains('<'));
        assert!(!value.contains('>'));
        assert!(!value.contains('\''));
        assert_eq!(value, "scriptalert(x)/script");
    }

    #[test]
    fn sanitize_strips_control_characters_and_trims() {
        let value = sanitize("  line\x00one\x1ftwo\x7f  ");
        assert_eq!(value, "lineonetwo");
    }

    #[test]
    fn sanitize_truncates_long_values() {
        let long = "a".repeat(MAX_VALUE_LEN + 50);
        assert_eq!(sanitize(&long).chars().count(), MAX_VALUE_LEN);
    }

    #[test]
    fn sanitize_keeps_multibyte_text() {
        assert_eq!(sanitize(" Иванов Иван "), "Иванов Иван");
    }
}
