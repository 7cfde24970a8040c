use crate::Result;
use oko_core::domain::SearchKind;
use reqwest::blocking::Client;
use std::time::Duration;

/// One upstream data source. Implementations own their transport details;
/// the payload they return feeds the report assembler verbatim.
pub trait SearchProvider {
    fn source_name(&self) -> &'static str;
    fn search(&self, kind: SearchKind, query: &str) -> Result<serde_json::Value>;
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "oko".to_string(),
        }
    }
}

impl HttpOptions {
    pub(crate) fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.timeout_secs.min(10)))
            .build()?;
        Ok(client)
    }
}
