use crate::provider::{HttpOptions, SearchProvider};
use crate::{ClientError, Result};
use oko_core::domain::SearchKind;
use url::Url;

/// Generic people-search aggregator. The upstream already returns the
/// `{"results": [...]}` shape the report assembler expects, so its response
/// is passed through untouched.
#[derive(Debug, Clone)]
pub struct DepSearchProvider {
    base_url: String,
    token: Option<String>,
    http: HttpOptions,
}

impl DepSearchProvider {
    pub fn new(base_url: String, token: Option<String>, http: HttpOptions) -> Self {
        Self {
            base_url,
            token,
            http,
        }
    }

    /// The upstream routes the query inside the path segment, not the query
    /// string; the token and language ride as regular parameters.
    fn request_url(&self, query: &str) -> Result<Url> {
        let token = self
            .token
            .as_deref()
            .ok_or(ClientError::MissingToken("depsearch"))?;
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/quest={query}"))?;
        url.query_pairs_mut()
            .append_pair("token", token)
            .append_pair("lang", "ru");
        Ok(url)
    }
}

impl SearchProvider for DepSearchProvider {
    fn source_name(&self) -> &'static str {
        "depsearch"
    }

    fn search(&self, _kind: SearchKind, query: &str) -> Result<serde_json::Value> {
        let url = self.request_url(query)?;
        let client = self.http.build_client()?;
        let response = client.get(url).send()?.error_for_status()?;
        let payload = response.json()?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::DepSearchProvider;
    use crate::provider::HttpOptions;
    use crate::ClientError;

    #[test]
    fn request_url_carries_token_and_language() {
        let provider = DepSearchProvider::new(
            "https://search.example".to_string(),
            Some("secret".to_string()),
            HttpOptions::default(),
        );
        let url = provider.request_url("79161234567").expect("url");
        assert_eq!(url.path(), "/quest=79161234567");
        assert_eq!(url.query(), Some("token=secret&lang=ru"));
    }

    #[test]
    fn missing_token_is_an_error() {
        let provider =
            DepSearchProvider::new("https://search.example".to_string(), None, HttpOptions::default());
        let err = provider.request_url("q").unwrap_err();
        assert!(matches!(err, ClientError::MissingToken("depsearch")));
    }
}
