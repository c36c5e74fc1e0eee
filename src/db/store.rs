use crate::errors::HoundError;
use crate::models::{Collection, Record, Suggestion};
use super::Database;

/// Read access to the two record collections.
pub trait RecordStore {
    /// All records of `collection`, ordered by date descending then id ascending.
    fn records(&self, collection: Collection) -> Result<Vec<Record>, HoundError>;

    fn record(&self, collection: Collection, id: i64) -> Result<Option<Record>, HoundError>;
}

/// Persistence for search-term corrections.
pub trait SuggestionStore {
    /// Case-insensitive lookup by searched term.
    fn find_by_searched(&self, searched: &str) -> Result<Option<Suggestion>, HoundError>;

    /// Atomic insert-or-update keyed by the lowercased searched term.
    fn upsert(&self, searched: &str, suggestion: &str, autoreplacement: bool) -> Result<Suggestion, HoundError>;

    fn delete(&self, id: i64) -> Result<(), HoundError>;

    fn list(&self) -> Result<Vec<Suggestion>, HoundError>;
}

impl RecordStore for Database {
    fn records(&self, collection: Collection) -> Result<Vec<Record>, HoundError> {
        self.list_records(collection)
    }

    fn record(&self, collection: Collection, id: i64) -> Result<Option<Record>, HoundError> {
        self.get_record(collection, id)
    }
}

impl SuggestionStore for Database {
    fn find_by_searched(&self, searched: &str) -> Result<Option<Suggestion>, HoundError> {
        self.find_suggestion(searched)
    }

    fn upsert(&self, searched: &str, suggestion: &str, autoreplacement: bool) -> Result<Suggestion, HoundError> {
        self.upsert_suggestion(searched, suggestion, autoreplacement)
    }

    fn delete(&self, id: i64) -> Result<(), HoundError> {
        self.delete_suggestion(id)
    }

    fn list(&self) -> Result<Vec<Suggestion>, HoundError> {
        self.list_suggestions()
    }
}
