use crate::domain::sanitize::sanitize;
use serde::{Deserialize, Serialize};

/// The fixed set of query kinds the upstream providers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Phone,
    Email,
    Vk,
    Ok,
    Facebook,
    Inn,
    Snils,
    Nickname,
    Ogrn,
    Unknown,
}

impl SearchKind {
    /// Parses the wire/CLI token; anything unrecognized maps to `Unknown`
    /// rather than failing.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "phone" => SearchKind::Phone,
            "email" => SearchKind::Email,
            "vk" => SearchKind::Vk,
            "ok" => SearchKind::Ok,
            "fc" | "facebook" => SearchKind::Facebook,
            "inn" => SearchKind::Inn,
            "snils" => SearchKind::Snils,
            "nick" | "nickname" => SearchKind::Nickname,
            "ogrn" => SearchKind::Ogrn,
            _ => SearchKind::Unknown,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SearchKind::Phone => "phone",
            SearchKind::Email => "email",
            SearchKind::Vk => "vk",
            SearchKind::Ok => "ok",
            SearchKind::Facebook => "fc",
            SearchKind::Inn => "inn",
            SearchKind::Snils => "snils",
            SearchKind::Nickname => "nick",
            SearchKind::Ogrn => "ogrn",
            SearchKind::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Phone => "Номер телефона",
            SearchKind::Email => "Email",
            SearchKind::Vk => "VK",
            SearchKind::Ok => "OK",
            SearchKind::Facebook => "Facebook",
            SearchKind::Inn => "ИНН",
            SearchKind::Snils => "СНИЛС",
            SearchKind::Nickname => "Никнейм",
            SearchKind::Ogrn => "ОГРН",
            SearchKind::Unknown => "Неизвестно",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SearchKind::Phone => "📱",
            SearchKind::Email => "✉️",
            SearchKind::Vk => "🔵",
            SearchKind::Ok => "🟠",
            SearchKind::Facebook => "🔷",
            SearchKind::Inn => "🔢",
            SearchKind::Snils => "🆔",
            SearchKind::Nickname => "🔸",
            SearchKind::Ogrn => "📊",
            SearchKind::Unknown => "🔍",
        }
    }

    /// Report title for a query; the query is sanitized before embedding.
    pub fn title(&self, query: &str) -> String {
        let query = sanitize(query);
        match self {
            SearchKind::Phone => format!("Результаты поиска по номеру {query}"),
            SearchKind::Email => format!("Результаты поиска по почте {query}"),
            SearchKind::Vk => format!("Результаты поиска по Вконтакте {query}"),
            SearchKind::Ok => format!("Результаты поиска по Одноклассникам {query}"),
            SearchKind::Facebook => format!("Результаты поиска по Facebook {query}"),
            SearchKind::Inn => format!("Результаты поиска по ИНН {query}"),
            SearchKind::Snils => format!("Результаты поиска по СНИЛС {query}"),
            SearchKind::Nickname => format!("Результаты поиска по нику {query}"),
            SearchKind::Ogrn => format!("Результаты поиска по ОГРН {query}"),
            SearchKind::Unknown => format!("Результаты поиска {query}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchKind;

    #[test]
    fn parse_recognizes_known_tokens() {
        assert_eq!(SearchKind::parse("phone"), SearchKind::Phone);
        assert_eq!(SearchKind::parse("NICK"), SearchKind::Nickname);
        assert_eq!(SearchKind::parse("facebook"), SearchKind::Facebook);
        assert_eq!(SearchKind::parse("telegram"), SearchKind::Unknown);
    }

    #[test]
    fn title_sanitizes_the_query() {
        let title = SearchKind::Phone.title("<b>123</b>");
        assert!(!title.contains('<'));
        assert!(title.contains("b123/b"));
    }
}
