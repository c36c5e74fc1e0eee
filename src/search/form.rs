//! Submitted advanced-search forms and the suggested-search link format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::HoundError;
use super::date_range::is_date_range_valid;
use super::engine::FilterEnumerations;
use super::filters::{AdvancedQuery, Operator};

/// Placeholder for an empty author in suggested links.
pub const NONE_AUTHOR: &str = "_None_";
/// Placeholder for an absent port or date in suggested links.
pub const NONE_VALUE: &str = "None";

const LINK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Advanced search form as the client submits it: choices by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSearchForm {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub operator: usize,
    #[serde(rename = "type", default)]
    pub type_index: usize,
    #[serde(rename = "platform", default)]
    pub platform_index: usize,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub port: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Version of the type enumeration the form was rendered with.
    #[serde(default)]
    pub type_version: Option<u64>,
    #[serde(default)]
    pub platform_version: Option<u64>,
}

impl AdvancedSearchForm {
    /// Validate the form and resolve its indices against freshly computed enumerations.
    ///
    /// `search_text` is passed separately because the caller may have already
    /// substituted it with a stored suggestion.
    pub fn resolve(&self, search_text: &str, enums: &FilterEnumerations) -> Result<AdvancedQuery, HoundError> {
        if !is_date_range_valid(self.start_date, self.end_date) {
            return Err(HoundError::InvalidDateRange);
        }
        let port = parse_port(self.port)?;
        let operator = Operator::from_index(self.operator)?;
        let vuln_type = enums.types.resolve_versioned(self.type_index, self.type_version)?;
        let platform = enums.platforms.resolve_versioned(self.platform_index, self.platform_version)?;

        Ok(AdvancedQuery {
            text: search_text.to_string(),
            operator,
            vuln_type,
            platform,
            author: self.author.trim().to_string(),
            port,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }

    /// Relative link that replays this search with `suggested` as the text.
    /// Free-text segments are percent-encoded.
    pub fn suggested_link(&self, suggested: &str) -> String {
        let author = if self.author.trim().is_empty() {
            NONE_AUTHOR.to_string()
        } else {
            urlencoding::encode(self.author.trim()).into_owned()
        };
        let port = self.port.map(|p| p.to_string()).unwrap_or_else(|| NONE_VALUE.to_string());
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(LINK_DATE_FORMAT).to_string())
                .unwrap_or_else(|| NONE_VALUE.to_string())
        };

        format!(
            "{}/{}/{}/{}/{}/{}/{}/{}",
            urlencoding::encode(suggested),
            self.operator,
            self.type_index,
            self.platform_index,
            author,
            port,
            date(self.start_date),
            date(self.end_date),
        )
    }
}

fn parse_port(port: Option<i64>) -> Result<Option<u16>, HoundError> {
    match port {
        None => Ok(None),
        Some(p) => u16::try_from(p)
            .map(Some)
            .map_err(|_| HoundError::InvalidPort(format!("{} is outside 0-65535", p))),
    }
}

/// Path segments of a suggested advanced search, as they arrive in the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestedAdvancedPath {
    pub input: String,
    pub operator: usize,
    #[serde(rename = "type")]
    pub type_index: usize,
    #[serde(rename = "platform")]
    pub platform_index: usize,
    pub author: String,
    pub port: String,
    pub start_date: String,
    pub end_date: String,
}

impl SuggestedAdvancedPath {
    /// Lenient conversion back into a form: `_None_` author becomes empty, an
    /// unparsable port drops the port filter, and if either date fails to
    /// parse both date filters are dropped.
    pub fn into_form(self) -> AdvancedSearchForm {
        let author = if self.author == NONE_AUTHOR { String::new() } else { self.author };
        let port = self.port.parse::<i64>().ok();
        let dates = NaiveDate::parse_from_str(&self.start_date, LINK_DATE_FORMAT)
            .and_then(|start| NaiveDate::parse_from_str(&self.end_date, LINK_DATE_FORMAT).map(|end| (start, end)))
            .ok();

        AdvancedSearchForm {
            search_text: self.input,
            operator: self.operator,
            type_index: self.type_index,
            platform_index: self.platform_index,
            author,
            port,
            start_date: dates.map(|(s, _)| s),
            end_date: dates.map(|(_, e)| e),
            type_version: None,
            platform_version: None,
        }
    }
}
