use serde::{Deserialize, Serialize};

/// A stored search-term correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    /// Lowercase term the user typed. Unique across the store.
    pub searched: String,
    /// Lowercase replacement.
    pub suggestion: String,
    /// Apply silently instead of proposing it as a hint.
    pub autoreplacement: bool,
}
