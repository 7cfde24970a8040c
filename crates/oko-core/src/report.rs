use crate::domain::email::extract_emails;
use crate::domain::phone::{extract_phones, PhoneMatch};
use crate::domain::sanitize::sanitize;
use crate::domain::search::SearchKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upstream field naming the database a record came from.
pub const SOURCE_FIELD: &str = "🏫Источник";
const UNKNOWN_SOURCE: &str = "Неизвестный источник";

/// Fields whose values count as names for the summary statistics.
const NAME_FIELDS: &[&str] = &["👤Фамилия", "👤Имя", "👤Отчество", "👤ФИО", "🔸Никнейм"];

/// Hard cap on phones collected across the whole report.
pub const MAX_PHONES: usize = 5;
/// Emails shown in the rendered report; the count stays uncapped.
pub const MAX_EMAILS_SHOWN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLine {
    pub key: String,
    pub value: String,
}

/// One rendered record: either a structured key/value block or the opaque
/// fallback for payloads that did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordBlock {
    Structured { source: String, lines: Vec<DataLine> },
    Raw { text: String },
}

/// Aggregated view of all records for a single query. Built once per search,
/// consumed by a renderer; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub query: String,
    pub kind: SearchKind,
    pub title: String,
    pub icon: String,
    pub record_count: usize,
    pub name_count: usize,
    pub phone_count: usize,
    pub email_count: usize,
    pub blocks: Vec<RecordBlock>,
    pub phones: Vec<PhoneMatch>,
    pub emails: Vec<String>,
}

/// Assembles the report for one search request.
///
/// The payload is expected to be JSON of the form `{"results": [...]}`; any
/// shape that fails to parse degrades to a single opaque block holding the
/// sanitized raw text. This function never fails.
pub fn build_report(query: &str, kind: SearchKind, raw: &str) -> ReportSummary {
    let mut summary = ReportSummary {
        query: sanitize(query),
        kind,
        title: kind.title(query),
        icon: kind.icon().to_string(),
        record_count: 0,
        name_count: 0,
        phone_count: 0,
        email_count: 0,
        blocks: Vec::new(),
        phones: Vec::new(),
        emails: Vec::new(),
    };

    match parse_records(raw) {
        Some(records) => {
            let mut names = 0usize;
            for record in &records {
                summary.blocks.push(structured_block(record));
                names += count_names(record);
                collect_phones(record, &mut summary.phones);
                collect_emails(record, &mut summary.emails);
            }
            summary.name_count = names;
        }
        None => {
            summary.blocks.push(RecordBlock::Raw {
                text: sanitize(raw),
            });
        }
    }

    summary.record_count = summary.blocks.len();
    summary.phone_count = summary.phones.len();
    summary.email_count = summary.emails.len();
    summary
}

/// `None` means the payload did not parse and the caller should fall back to
/// the opaque block. A well-formed object without a `results` list is a valid,
/// empty response.
fn parse_records(raw: &str) -> Option<Vec<serde_json::Map<String, Value>>> {
    let parsed: Value = serde_json::from_str(raw).ok()?;
    let object = parsed.as_object()?;
    let results = match object.get("results") {
        None | Some(Value::Null) => return Some(Vec::new()),
        Some(Value::Array(results)) => results,
        Some(_) => return None,
    };
    let mut records = Vec::with_capacity(results.len());
    for result in results {
        records.push(result.as_object()?.clone());
    }
    Some(records)
}

fn structured_block(record: &serde_json::Map<String, Value>) -> RecordBlock {
    let source = record
        .get(SOURCE_FIELD)
        .map(display_value)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

    let mut lines = Vec::new();
    for (key, value) in record {
        if key == SOURCE_FIELD {
            continue;
        }
        let value = display_value(value);
        if value.is_empty() {
            continue;
        }
        lines.push(DataLine {
            key: sanitize(key),
            value,
        });
    }
    RecordBlock::Structured { source, lines }
}

/// Scalar rendering before sanitization; null becomes empty and is dropped
/// by the caller.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => sanitize(text),
        other => sanitize(&other.to_string()),
    }
}

fn count_names(record: &serde_json::Map<String, Value>) -> usize {
    NAME_FIELDS
        .iter()
        .filter(|field| {
            record
                .get(**field)
                .map(display_value)
                .is_some_and(|value| !value.is_empty())
        })
        .count()
}

fn collect_phones(record: &serde_json::Map<String, Value>, phones: &mut Vec<PhoneMatch>) {
    for value in record.values() {
        let Some(text) = value.as_str() else {
            continue;
        };
        for found in extract_phones(text) {
            if phones.len() >= MAX_PHONES {
                return;
            }
            if !phones.iter().any(|phone| phone.number == found.number) {
                phones.push(found);
            }
        }
    }
}

fn collect_emails(record: &serde_json::Map<String, Value>, emails: &mut Vec<String>) {
    for value in record.values() {
        let Some(text) = value.as_str() else {
            continue;
        };
        for address in extract_emails(text) {
            if !emails.iter().any(|known| known == &address) {
                emails.push(address);
            }
        }
    }
}
