use std::cmp::Reverse;

use tracing::debug;

use crate::db::RecordStore;
use crate::errors::HoundError;
use crate::models::{Collection, Record, Vulnerability};
use super::enumeration::{EnumerationKind, FilterEnumeration};
use super::filters::{AdvancedQuery, TextQuery};

/// Newest first, ties broken by ascending id.
pub fn sort_results(records: &mut [Record]) {
    records.sort_by_key(|r| (Reverse(r.date()), r.id()));
}

/// Simple-mode matching over a snapshot. Empty query keeps everything.
pub fn filter_simple(records: Vec<Record>, query: &str) -> Vec<Record> {
    let text = TextQuery::new(query);
    let mut results: Vec<Record> = records
        .into_iter()
        .filter(|r| text.matches(r).unwrap_or(true))
        .collect();
    sort_results(&mut results);
    results
}

/// Advanced-mode matching over a snapshot.
pub fn filter_advanced(records: Vec<Record>, query: &AdvancedQuery) -> Vec<Record> {
    let text = TextQuery::new(&query.text);
    let mut results: Vec<Record> = records
        .into_iter()
        .filter(|r| query.matches(&text, r))
        .collect();
    sort_results(&mut results);
    results
}

/// Type and platform enumerations computed from the same snapshot.
#[derive(Debug, Clone)]
pub struct FilterEnumerations {
    pub types: FilterEnumeration,
    pub platforms: FilterEnumeration,
}

impl FilterEnumerations {
    pub fn from_snapshot(exploits: &[Record], shellcodes: &[Record]) -> Self {
        Self {
            types: FilterEnumeration::compute(EnumerationKind::Type, exploits.iter().chain(shellcodes)),
            platforms: FilterEnumeration::compute(EnumerationKind::Platform, exploits.iter().chain(shellcodes)),
        }
    }
}

/// Both collections read once, so enumerations and results agree.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub exploits: Vec<Record>,
    pub shellcodes: Vec<Record>,
}

impl CatalogSnapshot {
    pub fn enumerations(&self) -> FilterEnumerations {
        FilterEnumerations::from_snapshot(&self.exploits, &self.shellcodes)
    }

    /// Advanced search over both collections, returned as (exploits, shellcodes).
    pub fn search_advanced(self, query: &AdvancedQuery) -> (Vec<Record>, Vec<Record>) {
        let exploits = filter_advanced(self.exploits, query);
        let shellcodes = filter_advanced(self.shellcodes, query);
        debug!(
            query = %query.text,
            operator = ?query.operator,
            active_filters = query.has_active_filters(),
            exploits = exploits.len(),
            shellcodes = shellcodes.len(),
            "Advanced search over snapshot"
        );
        (exploits, shellcodes)
    }
}

/// Runs searches against a record store.
pub struct SearchEngine<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> SearchEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn search_in_db(&self, query: &str, collection: Collection) -> Result<Vec<Record>, HoundError> {
        let records = self.store.records(collection)?;
        let total = records.len();
        let results = filter_simple(records, query);
        debug!(%collection, query, total, matched = results.len(), "Simple search");
        Ok(results)
    }

    /// Simple search addressed by collection or legacy table name.
    pub fn search_in_db_named(&self, query: &str, collection_name: &str) -> Result<Vec<Record>, HoundError> {
        self.search_in_db(query, collection_name.parse()?)
    }

    pub fn search_advanced(&self, query: &AdvancedQuery, collection: Collection) -> Result<Vec<Record>, HoundError> {
        let records = self.store.records(collection)?;
        let total = records.len();
        let results = filter_advanced(records, query);
        debug!(
            %collection,
            query = %query.text,
            operator = ?query.operator,
            active_filters = query.has_active_filters(),
            total,
            matched = results.len(),
            "Advanced search"
        );
        Ok(results)
    }

    pub fn search_advanced_named(&self, query: &AdvancedQuery, collection_name: &str) -> Result<Vec<Record>, HoundError> {
        self.search_advanced(query, collection_name.parse()?)
    }

    pub fn snapshot(&self) -> Result<CatalogSnapshot, HoundError> {
        Ok(CatalogSnapshot {
            exploits: self.store.records(Collection::Exploits)?,
            shellcodes: self.store.records(Collection::Shellcodes)?,
        })
    }

    /// Recompute the filter enumerations from the current contents of both collections.
    pub fn enumerations(&self) -> Result<FilterEnumerations, HoundError> {
        Ok(self.snapshot()?.enumerations())
    }
}
