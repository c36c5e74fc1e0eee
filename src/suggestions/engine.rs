use serde::Serialize;
use tracing::{info, warn};

use crate::db::SuggestionStore;
use crate::errors::HoundError;
use crate::models::Suggestion;
use crate::search::bool_from_index;

/// Result of running raw input through the suggestion store once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    /// Text to search with: the stored correction when auto-replacement is on, otherwise the input.
    pub search_text: String,
    /// Manual correction to offer as a hint, empty when there is none.
    pub suggested_search_text: String,
}

pub struct SuggestionEngine<'a, S: SuggestionStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SuggestionStore + ?Sized> SuggestionEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Look up `input`, degrading to "no suggestion" when the store holds duplicates.
    fn lookup(&self, input: &str) -> Result<Option<Suggestion>, HoundError> {
        let term = input.trim();
        if term.is_empty() {
            return Ok(None);
        }
        match self.store.find_by_searched(term) {
            Err(HoundError::DataInconsistency(detail)) => {
                warn!(term, %detail, "Ignoring inconsistent suggestion entries");
                Ok(None)
            }
            other => other,
        }
    }

    /// The stored correction if it is marked for auto-replacement, otherwise `input` unchanged.
    pub fn substitute_with_suggestions(&self, input: &str) -> Result<String, HoundError> {
        Ok(self.annotate(input)?.search_text)
    }

    /// The stored correction if it is a manual one, otherwise an empty string.
    pub fn propose_suggestions(&self, input: &str) -> Result<String, HoundError> {
        Ok(self.annotate(input)?.suggested_search_text)
    }

    /// Both answers from a single lookup.
    pub fn annotate(&self, input: &str) -> Result<SuggestionOutcome, HoundError> {
        let outcome = match self.lookup(input)? {
            Some(s) if s.autoreplacement => SuggestionOutcome {
                search_text: s.suggestion,
                suggested_search_text: String::new(),
            },
            Some(s) => SuggestionOutcome {
                search_text: input.to_string(),
                suggested_search_text: s.suggestion,
            },
            None => SuggestionOutcome {
                search_text: input.to_string(),
                suggested_search_text: String::new(),
            },
        };
        Ok(outcome)
    }

    /// Create or update the correction for `searched`. `autoreplacement_index`
    /// follows the boolean choice convention (0 = False, 1 = True).
    pub fn add_suggestion(
        &self,
        searched: &str,
        suggestion: &str,
        autoreplacement_index: usize,
    ) -> Result<Suggestion, HoundError> {
        let searched = searched.trim();
        let suggestion = suggestion.trim();
        if searched.is_empty() {
            return Err(HoundError::Validation("searched term is required".into()));
        }
        if suggestion.is_empty() {
            return Err(HoundError::Validation("suggestion is required".into()));
        }
        let autoreplacement = bool_from_index(autoreplacement_index)?;

        let stored = self.store.upsert(searched, suggestion, autoreplacement)?;
        info!(id = stored.id, searched = %stored.searched, autoreplacement, "Saved suggestion");
        Ok(stored)
    }

    pub fn delete_suggestion(&self, id: i64) -> Result<(), HoundError> {
        self.store.delete(id)?;
        info!(id, "Deleted suggestion");
        Ok(())
    }

    pub fn list_suggestions(&self) -> Result<Vec<Suggestion>, HoundError> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn seeded() -> Database {
        let db = Database::in_memory().unwrap();
        db.upsert_suggestion("wordpres", "wordpress", true).unwrap();
        db.upsert_suggestion("jomla", "joomla", false).unwrap();
        db
    }

    #[test]
    fn test_autoreplacement_substitutes_and_never_proposes() {
        let db = seeded();
        let engine = SuggestionEngine::new(&db);
        assert_eq!(engine.substitute_with_suggestions("wordpres").unwrap(), "wordpress");
        assert_eq!(engine.propose_suggestions("wordpres").unwrap(), "");
    }

    #[test]
    fn test_manual_suggestion_proposes_and_never_substitutes() {
        let db = seeded();
        let engine = SuggestionEngine::new(&db);
        assert_eq!(engine.substitute_with_suggestions("jomla").unwrap(), "jomla");
        assert_eq!(engine.propose_suggestions("jomla").unwrap(), "joomla");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let db = seeded();
        let engine = SuggestionEngine::new(&db);
        assert_eq!(engine.substitute_with_suggestions("WordPres").unwrap(), "wordpress");
        assert_eq!(engine.propose_suggestions("JOMLA").unwrap(), "joomla");
    }

    #[test]
    fn test_unknown_input_is_noop() {
        let db = seeded();
        let engine = SuggestionEngine::new(&db);
        assert_eq!(engine.substitute_with_suggestions("drupal").unwrap(), "drupal");
        assert_eq!(engine.propose_suggestions("drupal").unwrap(), "");
        assert_eq!(engine.substitute_with_suggestions("").unwrap(), "");
        assert_eq!(engine.propose_suggestions("   ").unwrap(), "");
    }

    #[test]
    fn test_outcomes_are_mutually_exclusive() {
        let db = seeded();
        let engine = SuggestionEngine::new(&db);
        for input in ["wordpres", "jomla", "drupal"] {
            let outcome = engine.annotate(input).unwrap();
            let substituted = outcome.search_text != input;
            let proposed = !outcome.suggested_search_text.is_empty();
            assert!(!(substituted && proposed), "{} both substituted and proposed", input);
        }
    }

    #[test]
    fn test_add_suggestion_validates_and_updates() {
        let db = Database::in_memory().unwrap();
        let engine = SuggestionEngine::new(&db);

        assert!(engine.add_suggestion("", "x", 0).unwrap_err().is_validation());
        assert!(engine.add_suggestion("x", " ", 0).unwrap_err().is_validation());
        assert!(engine.add_suggestion("x", "y", 2).unwrap_err().is_validation());

        let first = engine.add_suggestion("Sql Injection", "SQLi", 0).unwrap();
        assert_eq!(first.searched, "sql injection");
        assert_eq!(first.suggestion, "sqli");
        assert!(!first.autoreplacement);

        let second = engine.add_suggestion("sql injection", "sqli", 1).unwrap();
        assert_eq!(second.id, first.id);
        assert!(second.autoreplacement);
        assert_eq!(engine.substitute_with_suggestions("SQL injection").unwrap(), "sqli");
    }

    #[test]
    fn test_delete_missing_suggestion_reports_error() {
        let db = Database::in_memory().unwrap();
        let engine = SuggestionEngine::new(&db);
        assert!(matches!(engine.delete_suggestion(3), Err(HoundError::SuggestionNotFound(3))));
    }

    #[test]
    fn test_inconsistent_store_degrades_to_no_suggestion() {
        let db = Database::in_memory().unwrap();
        {
            let conn = db.conn.lock().unwrap();
            conn.execute_batch(
                "DROP TABLE searcher_suggestion;
                 CREATE TABLE searcher_suggestion (id INTEGER PRIMARY KEY, searched TEXT, suggestion TEXT, autoreplacement INTEGER);
                 INSERT INTO searcher_suggestion VALUES (1, 'php', 'php5', 1);
                 INSERT INTO searcher_suggestion VALUES (2, 'php', 'php7', 0);",
            )
            .unwrap();
        }
        let engine = SuggestionEngine::new(&db);
        assert_eq!(engine.substitute_with_suggestions("php").unwrap(), "php");
        assert_eq!(engine.propose_suggestions("php").unwrap(), "");
    }
}
