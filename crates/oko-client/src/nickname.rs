use crate::provider::{HttpOptions, SearchProvider};
use crate::Result;
use oko_core::domain::SearchKind;
use serde_json::{json, Value};
use url::Url;

const GITHUB_API: &str = "https://api.github.com";

/// Social platforms probed for an existing profile page.
const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("ВКонтакте", "https://vk.com/{}"),
    ("GitHub", "https://github.com/{}"),
    ("Twitch", "https://twitch.tv/{}"),
    ("Steam", "https://steamcommunity.com/id/{}"),
    ("Pinterest", "https://pinterest.com/{}"),
    ("DevTo", "https://dev.to/{}"),
    ("Producthunt", "https://www.producthunt.com/@{}"),
];

/// Nickname lookup: a GitHub profile fetch plus HEAD probes of fixed
/// social-profile URL templates. Individual platform failures are skipped;
/// only platforms answering 200 become records.
#[derive(Debug, Clone)]
pub struct NicknameProvider {
    github_base: String,
    http: HttpOptions,
}

impl NicknameProvider {
    pub fn new(http: HttpOptions) -> Self {
        Self {
            github_base: GITHUB_API.to_string(),
            http,
        }
    }

    pub fn with_github_base(github_base: String, http: HttpOptions) -> Self {
        Self { github_base, http }
    }
}

impl SearchProvider for NicknameProvider {
    fn source_name(&self) -> &'static str {
        "nickname"
    }

    fn search(&self, _kind: SearchKind, query: &str) -> Result<Value> {
        let client = self.http.build_client()?;
        let mut results = Vec::new();

        let profile_url = Url::parse(&format!(
            "{}/users/{}",
            self.github_base.trim_end_matches('/'),
            query
        ))?;
        if let Ok(response) = client.get(profile_url).send() {
            if response.status().is_success() {
                if let Ok(profile) = response.json::<Value>() {
                    results.push(map_github_profile(&profile));
                }
            }
        }

        for (platform, template) in SOCIAL_PLATFORMS {
            let url = template.replace("{}", query);
            let Ok(response) = client.head(&url).send() else {
                continue;
            };
            if response.status().is_success() {
                results.push(profile_record(platform, &url));
            }
        }

        Ok(json!({ "results": results }))
    }
}

/// Maps a GitHub user object onto the upstream record shape; absent fields
/// stay null and are dropped at render time.
pub fn map_github_profile(profile: &Value) -> Value {
    let field = |name: &str| profile.get(name).cloned().unwrap_or(Value::Null);
    json!({
        "🏫Источник": "GitHub",
        "👤Логин": field("login"),
        "🏢Компания": field("company"),
        "📍Местоположение": field("location"),
        "🌐Веб-сайт": field("blog"),
        "📂Публичные репозитории": field("public_repos"),
        "🎁Подарки": field("public_gists"),
        "👥Подписчики": field("followers"),
        "🔔Подписки": field("following"),
        "📅Создан": field("created_at"),
        "🔄Обновлен": field("updated_at"),
        "🔧Тип": field("type"),
        "🔗Профиль": field("html_url"),
    })
}

fn profile_record(platform: &str, url: &str) -> Value {
    json!({
        "🏫Источник": platform,
        "👤Профиль": url,
        "🔗Ссылка": url,
    })
}

#[cfg(test)]
mod tests {
    use super::map_github_profile;
    use serde_json::json;

    #[test]
    fn github_profile_maps_known_fields() {
        let profile = json!({
            "login": "octocat",
            "company": "GitHub",
            "location": "San Francisco",
            "public_repos": 8,
            "followers": 9000,
            "html_url": "https://github.com/octocat"
        });
        let record = map_github_profile(&profile);
        assert_eq!(record["🏫Источник"], "GitHub");
        assert_eq!(record["👤Логин"], "octocat");
        assert_eq!(record["📂Публичные репозитории"], 8);
        assert_eq!(record["🔗Профиль"], "https://github.com/octocat");
        assert!(record["🌐Веб-сайт"].is_null());
    }
}
