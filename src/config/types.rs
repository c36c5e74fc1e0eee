use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_PATH: &str = "./data/houndsploit.db";
pub const DEFAULT_ARTIFACTS_DIR: &str = "./static/vulnerabilities";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HoundConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub artifacts: Option<ArtifactsConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Allow cross-origin requests from any origin.
    pub cors: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    pub path: Option<String>,
    /// Attempts for suggestion writes that hit a locked database.
    pub write_retries: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ArtifactsConfig {
    /// Root directory holding the exploit and shellcode source files.
    pub directory: Option<String>,
}

/// Effective settings after merging CLI flags over the file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub cors: bool,
    pub db_path: String,
    pub write_retries: u32,
    pub artifacts_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: false,
            db_path: DEFAULT_DB_PATH.to_string(),
            write_retries: 5,
            artifacts_dir: DEFAULT_ARTIFACTS_DIR.to_string(),
        }
    }
}

impl Settings {
    pub fn from_config(config: Option<&HoundConfig>) -> Self {
        let defaults = Self::default();
        let Some(config) = config else {
            return defaults;
        };
        let server = config.server.clone().unwrap_or_default();
        let database = config.database.clone().unwrap_or_default();
        let artifacts = config.artifacts.clone().unwrap_or_default();

        Self {
            host: server.host.unwrap_or(defaults.host),
            port: server.port.unwrap_or(defaults.port),
            cors: server.cors.unwrap_or(defaults.cors),
            db_path: database.path.unwrap_or(defaults.db_path),
            write_retries: database.write_retries.unwrap_or(defaults.write_retries),
            artifacts_dir: artifacts.directory.unwrap_or(defaults.artifacts_dir),
        }
    }
}
