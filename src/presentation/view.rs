use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Record, Vulnerability};

/// Display shape of a search result. Nullable fields are already flattened
/// to strings so templates never have to branch on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    pub id: i64,
    pub description: String,
    pub file: String,
    pub author: String,
    #[serde(rename = "type")]
    pub vuln_type: String,
    pub platform: String,
    pub date: NaiveDate,
    /// Exploits only; empty string when the exploit has no port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        let port = match record {
            Record::Exploit(e) => Some(e.port.map(|p| p.to_string()).unwrap_or_default()),
            Record::Shellcode(_) => None,
        };
        Self {
            id: record.id(),
            description: record.description().to_string(),
            file: record.file().to_string(),
            author: record.author().to_string(),
            vuln_type: record.vuln_type().to_string(),
            platform: record.platform().to_string(),
            date: record.date(),
            port,
        }
    }
}

impl RecordView {
    pub fn from_records(records: &[Record]) -> Vec<Self> {
        records.iter().map(Self::from).collect()
    }
}
