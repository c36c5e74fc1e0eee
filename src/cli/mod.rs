pub mod commands;
pub mod import;
pub mod search;
pub mod serve;
pub mod suggestions;

pub use commands::{Cli, Commands};

use std::path::PathBuf;

use crate::config::{self, Settings};
use crate::errors::HoundError;

/// Resolve effective settings from the optional config file and the global `--db` flag.
pub async fn load_settings(config_path: Option<&str>, db: Option<&str>) -> Result<Settings, HoundError> {
    let file_config = match config_path {
        Some(path) => Some(config::parse_config(&PathBuf::from(path)).await?),
        None => None,
    };
    let mut settings = Settings::from_config(file_config.as_ref());
    if let Some(db) = db {
        settings.db_path = db.to_string();
    }
    Ok(settings)
}
