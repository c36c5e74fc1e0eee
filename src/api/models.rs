use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::presentation::RecordView;
use crate::search::AdvancedSearchForm;

#[derive(Deserialize)]
pub struct SimpleSearchRequest {
    #[serde(default)]
    pub search_text: String,
}

#[derive(Deserialize)]
pub struct SuggestionRequest {
    pub searched: String,
    pub suggestion: String,
    /// Boolean choice index: 0 = False, 1 = True.
    #[serde(default)]
    pub autoreplacement: usize,
}

/// Results for both collections plus the suggestion annotations.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub searched_item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_search_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_suggested_link: Option<String>,
    pub exploits_results: Vec<RecordView>,
    pub n_exploits_results: usize,
    pub shellcodes_results: Vec<RecordView>,
    pub n_shellcodes_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<AdvancedSearchForm>,
}

impl SearchResponse {
    pub fn new(searched_item: String, exploits: &[Record], shellcodes: &[Record]) -> Self {
        Self {
            searched_item,
            suggested_search_text: None,
            relative_suggested_link: None,
            exploits_results: RecordView::from_records(exploits),
            n_exploits_results: exploits.len(),
            shellcodes_results: RecordView::from_records(shellcodes),
            n_shellcodes_results: shellcodes.len(),
            form: None,
        }
    }
}
