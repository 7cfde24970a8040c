use crate::provider::{HttpOptions, SearchProvider};
use crate::{ClientError, Result};
use oko_core::domain::SearchKind;
use serde_json::{json, Value};
use url::Url;

/// Company-registry lookup by ОГРН. A non-success upstream status yields an
/// empty result list rather than an error, matching the degrade-to-empty
/// contract of the report assembler.
#[derive(Debug, Clone)]
pub struct RegistryProvider {
    base_url: String,
    key: Option<String>,
    http: HttpOptions,
}

impl RegistryProvider {
    pub fn new(base_url: String, key: Option<String>, http: HttpOptions) -> Self {
        Self {
            base_url,
            key,
            http,
        }
    }

    fn request_url(&self, ogrn: &str) -> Result<Url> {
        let key = self
            .key
            .as_deref()
            .ok_or(ClientError::MissingToken("ofdata"))?;
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/company"))?;
        url.query_pairs_mut()
            .append_pair("key", key)
            .append_pair("ogrn", ogrn);
        Ok(url)
    }
}

impl SearchProvider for RegistryProvider {
    fn source_name(&self) -> &'static str {
        "registry"
    }

    fn search(&self, _kind: SearchKind, query: &str) -> Result<Value> {
        let url = self.request_url(query)?;
        let client = self.http.build_client()?;
        let response = client.get(url).send()?;
        if !response.status().is_success() {
            return Ok(json!({ "results": [] }));
        }
        let payload: Value = response.json()?;
        Ok(json!({ "results": [map_company(&payload)] }))
    }
}

/// Flattens the registry's nested `data` object into one report record.
pub fn map_company(payload: &Value) -> Value {
    let data = payload.get("data").cloned().unwrap_or(Value::Null);
    let field = |name: &str| data.get(name).cloned().unwrap_or(Value::Null);

    let address = data
        .get("ЮрАдрес")
        .and_then(|addr| addr.get("АдресРФ"))
        .cloned()
        .unwrap_or(Value::Null);
    let head = data
        .get("Руковод")
        .and_then(Value::as_array)
        .and_then(|heads| heads.first())
        .and_then(|head| head.get("ФИО"))
        .cloned()
        .unwrap_or(Value::Null);
    let status = data
        .get("Статус")
        .and_then(|status| status.get("Наим"))
        .cloned()
        .unwrap_or(Value::Null);

    json!({
        "🏫Источник": "OFDATA",
        "📊ОГРН": field("ОГРН"),
        "🔢ИНН": field("ИНН"),
        "🏢Наименование": field("НаимПолн"),
        "📍Адрес": address,
        "📅Дата регистрации": field("ДатаРег"),
        "👤Руководитель": head,
        "💼Статус": status,
        "📞Телефоны": join_contacts(&data, "Тел"),
        "📧Email": join_contacts(&data, "Емэйл"),
    })
}

fn join_contacts(data: &Value, field: &str) -> Value {
    let joined = data
        .get("Контакты")
        .and_then(|contacts| contacts.get(field))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    Value::String(joined)
}

#[cfg(test)]
mod tests {
    use super::map_company;
    use serde_json::json;

    #[test]
    fn company_record_flattens_nested_fields() {
        let payload = json!({
            "data": {
                "ОГРН": "1027700132195",
                "ИНН": "7707083893",
                "НаимПолн": "ПАО Пример",
                "ЮрАдрес": { "АдресРФ": "г. Москва" },
                "ДатаРег": "2002-08-02",
                "Руковод": [{ "ФИО": "Иванов Иван" }],
                "Статус": { "Наим": "Действует" },
                "Контакты": {
                    "Тел": ["+7 916 123-45-67", "+7 916 123-45-68"],
                    "Емэйл": ["info@example.ru"]
                }
            }
        });
        let record = map_company(&payload);
        assert_eq!(record["📊ОГРН"], "1027700132195");
        assert_eq!(record["📍Адрес"], "г. Москва");
        assert_eq!(record["👤Руководитель"], "Иванов Иван");
        assert_eq!(record["💼Статус"], "Действует");
        assert_eq!(record["📞Телефоны"], "+7 916 123-45-67, +7 916 123-45-68");
        assert_eq!(record["📧Email"], "info@example.ru");
    }

    #[test]
    fn empty_payload_still_maps() {
        let record = map_company(&json!({}));
        assert_eq!(record["🏫Источник"], "OFDATA");
        assert!(record["📊ОГРН"].is_null());
        assert_eq!(record["📞Телефоны"], "");
    }
}
