pub mod date_range;
pub mod engine;
pub mod enumeration;
pub mod filters;
pub mod form;

pub use date_range::is_date_range_valid;
pub use engine::{CatalogSnapshot, FilterEnumerations, SearchEngine, filter_advanced, filter_simple, sort_results};
pub use enumeration::{EnumerationError, EnumerationKind, FilterEnumeration, FilterValue, ALL_LABEL};
pub use filters::{AdvancedQuery, Operator, TextQuery, BOOLEAN_CHOICES, OPERATOR_CHOICES, bool_from_index};
pub use form::{AdvancedSearchForm, SuggestedAdvancedPath};
