use chrono::NaiveDate;
use tracing::warn;
use crate::errors::HoundError;
use crate::models::{Collection, Exploit, Record, Shellcode, Vulnerability};
use super::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = "id, file, description, date, author, type, platform, port";

/// A row as SQLite hands it back, before the date is validated.
struct RawRecord {
    id: i64,
    file: String,
    description: String,
    date: String,
    author: String,
    vuln_type: String,
    platform: String,
    port: Option<i64>,
}

impl RawRecord {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            file: row.get(1)?,
            description: row.get(2)?,
            date: row.get(3)?,
            author: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            vuln_type: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            platform: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            port: row.get(7)?,
        })
    }

    fn into_record(self, collection: Collection) -> Result<Record, HoundError> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            HoundError::DataInconsistency(format!(
                "{} {} has unparsable date '{}': {}",
                collection, self.id, self.date, e
            ))
        })?;
        let port = match self.port {
            None => None,
            Some(p) => Some(u16::try_from(p).map_err(|_| {
                HoundError::DataInconsistency(format!("{} {} has out-of-range port {}", collection, self.id, p))
            })?),
        };

        Ok(match collection {
            Collection::Exploits => Record::Exploit(Exploit {
                id: self.id,
                file: self.file,
                description: self.description,
                date,
                author: self.author,
                vuln_type: self.vuln_type,
                platform: self.platform,
                port,
            }),
            Collection::Shellcodes => Record::Shellcode(Shellcode {
                id: self.id,
                file: self.file,
                description: self.description,
                date,
                author: self.author,
                vuln_type: self.vuln_type,
                platform: self.platform,
                port,
            }),
        })
    }
}

impl Database {
    /// Insert or replace a record in the collection matching its variant.
    pub fn upsert_record(&self, record: &Record) -> Result<(), HoundError> {
        let conn = self.lock()?;
        let sql = format!(
            "INSERT OR REPLACE INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            record.collection().table(),
            SELECT_COLUMNS
        );
        conn.execute(
            &sql,
            rusqlite::params![
                record.id(),
                record.file(),
                record.description(),
                record.date().format(DATE_FORMAT).to_string(),
                record.author(),
                record.vuln_type(),
                record.platform(),
                record.port().map(i64::from),
            ],
        )
        .map_err(|e| HoundError::from_sqlite("Failed to insert record", e))?;
        Ok(())
    }

    /// Every record of a collection, newest first, ties broken by id.
    ///
    /// Rows that cannot be mapped are logged and skipped so they never match.
    pub fn list_records(&self, collection: Collection) -> Result<Vec<Record>, HoundError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY date DESC, id ASC",
            SELECT_COLUMNS,
            collection.table()
        );
        let mut stmt = conn.prepare(&sql)
            .map_err(|e| HoundError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], RawRecord::from_row)
            .map_err(|e| HoundError::Database(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = match row {
                Ok(raw) => raw,
                Err(e @ (rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..))) => {
                    warn!(%collection, error = %e, "Skipping unreadable record row");
                    continue;
                }
                Err(e) => return Err(HoundError::Database(format!("Row error: {}", e))),
            };
            let id = raw.id;
            match raw.into_record(collection) {
                Ok(record) => records.push(record),
                Err(HoundError::DataInconsistency(detail)) => {
                    warn!(%collection, id, %detail, "Skipping inconsistent record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    pub fn get_record(&self, collection: Collection, id: i64) -> Result<Option<Record>, HoundError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", SELECT_COLUMNS, collection.table());
        let mut stmt = conn.prepare(&sql)
            .map_err(|e| HoundError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![id], RawRecord::from_row) {
            Ok(raw) => Ok(Some(raw.into_record(collection)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(HoundError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn count_records(&self, collection: Collection) -> Result<usize, HoundError> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table());
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))
            .map_err(|e| HoundError::Database(format!("Query error: {}", e)))?;
        Ok(count as usize)
    }
}
