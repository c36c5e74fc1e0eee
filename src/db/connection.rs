use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use crate::errors::HoundError;

pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(path: &str) -> Result<Self, HoundError> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| HoundError::Database(format!("Failed to open database: {}", e)))?;

        // WAL lets readers proceed while a suggestion write holds the lock
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| HoundError::Database(format!("Failed to set pragmas: {}", e)))?;
        conn.busy_timeout(Duration::from_millis(250))
            .map_err(|e| HoundError::Database(format!("Failed to set busy timeout: {}", e)))?;

        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self, HoundError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| HoundError::Database(format!("Failed to open in-memory db: {}", e)))?;
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), HoundError> {
        let conn = self.lock()?;
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| HoundError::Database(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, HoundError> {
        self.conn
            .lock()
            .map_err(|_| HoundError::Internal("Database connection mutex poisoned".into()))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}
