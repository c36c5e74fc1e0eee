use rusqlite::TransactionBehavior;
use crate::errors::HoundError;
use crate::models::Suggestion;
use super::Database;

fn suggestion_from_row(row: &rusqlite::Row) -> rusqlite::Result<Suggestion> {
    Ok(Suggestion {
        id: row.get(0)?,
        searched: row.get(1)?,
        suggestion: row.get(2)?,
        autoreplacement: row.get::<_, i64>(3)? != 0,
    })
}

impl Database {
    /// Case-insensitive lookup. More than one hit means the unique constraint was bypassed.
    pub fn find_suggestion(&self, searched: &str) -> Result<Option<Suggestion>, HoundError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, searched, suggestion, autoreplacement FROM searcher_suggestion WHERE searched = ?1 COLLATE NOCASE ORDER BY id"
        ).map_err(|e| HoundError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![searched.to_lowercase()], suggestion_from_row)
            .map_err(|e| HoundError::from_sqlite("Query error", e))?;

        let mut found = Vec::new();
        for row in rows {
            found.push(row.map_err(|e| HoundError::Database(format!("Row error: {}", e)))?);
        }

        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            n => Err(HoundError::DataInconsistency(format!(
                "{} suggestions stored for searched term '{}'",
                n, searched
            ))),
        }
    }

    /// Insert a new suggestion or update the existing row for the same term.
    ///
    /// Runs in an immediate transaction so concurrent writers for the same
    /// term serialize on the write lock; the id comes from AUTOINCREMENT.
    pub fn upsert_suggestion(
        &self,
        searched: &str,
        suggestion: &str,
        autoreplacement: bool,
    ) -> Result<Suggestion, HoundError> {
        let searched = searched.to_lowercase();
        let suggestion = suggestion.to_lowercase();

        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| HoundError::from_sqlite("Failed to begin transaction", e))?;

        tx.execute(
            "INSERT INTO searcher_suggestion (searched, suggestion, autoreplacement) VALUES (?1, ?2, ?3) \
             ON CONFLICT(searched) DO UPDATE SET suggestion = excluded.suggestion, autoreplacement = excluded.autoreplacement",
            rusqlite::params![searched, suggestion, autoreplacement as i64],
        ).map_err(|e| HoundError::from_sqlite("Failed to upsert suggestion", e))?;

        let stored = tx.query_row(
            "SELECT id, searched, suggestion, autoreplacement FROM searcher_suggestion WHERE searched = ?1",
            rusqlite::params![searched],
            suggestion_from_row,
        ).map_err(|e| HoundError::from_sqlite("Failed to read back suggestion", e))?;

        tx.commit()
            .map_err(|e| HoundError::from_sqlite("Failed to commit suggestion", e))?;
        Ok(stored)
    }

    /// Delete by id. A missing id is an error, never a silent success.
    pub fn delete_suggestion(&self, id: i64) -> Result<(), HoundError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM searcher_suggestion WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| HoundError::from_sqlite("Delete failed", e))?;
        if affected == 0 {
            return Err(HoundError::SuggestionNotFound(id));
        }
        Ok(())
    }

    pub fn list_suggestions(&self) -> Result<Vec<Suggestion>, HoundError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, searched, suggestion, autoreplacement FROM searcher_suggestion ORDER BY id"
        ).map_err(|e| HoundError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], suggestion_from_row)
            .map_err(|e| HoundError::Database(format!("Query error: {}", e)))?;

        let mut suggestions = Vec::new();
        for row in rows {
            suggestions.push(row.map_err(|e| HoundError::Database(format!("Row error: {}", e)))?);
        }
        Ok(suggestions)
    }
}
