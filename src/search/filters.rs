use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::HoundError;
use crate::models::Vulnerability;
use super::enumeration::FilterValue;

/// Operator choices in index order.
pub const OPERATOR_CHOICES: [(usize, &str); 2] = [(0, "AND"), (1, "OR")];

/// Auto-replacement choices in index order.
pub const BOOLEAN_CHOICES: [(usize, &str); 2] = [(0, "False"), (1, "True")];

/// How free text and structured filters combine in advanced search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    pub fn from_index(index: usize) -> Result<Self, HoundError> {
        match index {
            0 => Ok(Self::And),
            1 => Ok(Self::Or),
            other => Err(HoundError::Validation(format!("Unknown operator index: {}", other))),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::And => 0,
            Self::Or => 1,
        }
    }
}

pub fn bool_from_index(index: usize) -> Result<bool, HoundError> {
    match index {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(HoundError::Validation(format!("Unknown boolean index: {}", other))),
    }
}

/// Lowercased, trimmed needle for substring matching. `None` for an empty query.
#[derive(Debug, Clone)]
pub struct TextQuery {
    needle: Option<String>,
}

impl TextQuery {
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// Matches against description, author and file path. `None` when the query is empty.
    pub fn matches<R: Vulnerability + ?Sized>(&self, record: &R) -> Option<bool> {
        let needle = self.needle.as_deref()?;
        let hit = [record.description(), record.author(), record.file()]
            .iter()
            .any(|field| field.to_lowercase().contains(needle));
        Some(hit)
    }
}

/// Fully resolved advanced search request.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedQuery {
    pub text: String,
    pub operator: Operator,
    #[serde(rename = "type")]
    pub vuln_type: FilterValue,
    pub platform: FilterValue,
    /// Empty means no constraint.
    pub author: String,
    pub port: Option<u16>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for AdvancedQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            operator: Operator::And,
            vuln_type: FilterValue::All,
            platform: FilterValue::All,
            author: String::new(),
            port: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl AdvancedQuery {
    pub fn new(text: impl Into<String>, operator: Operator) -> Self {
        Self {
            text: text.into(),
            operator,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, value: FilterValue) -> Self {
        self.vuln_type = value;
        self
    }

    pub fn with_platform(mut self, value: FilterValue) -> Self {
        self.platform = value;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn has_active_filters(&self) -> bool {
        !self.vuln_type.is_all()
            || !self.platform.is_all()
            || !self.author.trim().is_empty()
            || self.port.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }

    /// Conjunction of the active structured filters, `None` when none is active.
    pub fn structural_match<R: Vulnerability + ?Sized>(&self, record: &R) -> Option<bool> {
        if !self.has_active_filters() {
            return None;
        }

        if let FilterValue::Value(t) = &self.vuln_type {
            if record.vuln_type() != t {
                return Some(false);
            }
        }
        if let FilterValue::Value(p) = &self.platform {
            if record.platform() != p {
                return Some(false);
            }
        }
        let author = self.author.trim();
        if !author.is_empty() && !record.author().to_lowercase().contains(&author.to_lowercase()) {
            return Some(false);
        }
        if let Some(port) = self.port {
            if record.port() != Some(port) {
                return Some(false);
            }
        }
        if let Some(start) = self.start_date {
            if record.date() < start {
                return Some(false);
            }
        }
        if let Some(end) = self.end_date {
            if record.date() > end {
                return Some(false);
            }
        }
        Some(true)
    }

    /// Combine text and structured matches under the operator.
    ///
    /// Absent components are skipped: under AND they are vacuously true,
    /// under OR they contribute nothing. With both absent every record matches.
    pub fn matches<R: Vulnerability + ?Sized>(&self, text: &TextQuery, record: &R) -> bool {
        let components = [text.matches(record), self.structural_match(record)];
        let mut present = components.iter().flatten().peekable();
        if present.peek().is_none() {
            return true;
        }
        match self.operator {
            Operator::And => present.all(|m| *m),
            Operator::Or => present.any(|m| *m),
        }
    }
}
