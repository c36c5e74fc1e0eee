pub mod engine;

pub use engine::{SuggestionEngine, SuggestionOutcome};
