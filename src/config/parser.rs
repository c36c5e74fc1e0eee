use std::path::Path;
use crate::errors::HoundError;
use super::types::HoundConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<HoundConfig, HoundError> {
    if !path.exists() {
        return Err(HoundError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(HoundError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: HoundConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), HoundError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| HoundError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| HoundError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory: typed parsing below is the hard gate
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that parse but cannot work.
fn validate_semantics(config: &HoundConfig) -> Result<(), HoundError> {
    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(HoundError::Config("server.port must be between 1 and 65535".into()));
        }
        if server.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(HoundError::Config("server.host must not be empty".into()));
        }
    }

    if let Some(db) = &config.database {
        if db.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(HoundError::Config("database.path must not be empty".into()));
        }
    }

    if let Some(artifacts) = &config.artifacts {
        match artifacts.directory.as_deref() {
            Some(dir) if dir.trim().is_empty() => {
                return Err(HoundError::Config("artifacts.directory must not be empty".into()));
            }
            Some(dir) if !Path::new(dir).is_dir() => {
                warn!(directory = dir, "Artifacts directory does not exist; code views will report missing files");
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ServerConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_semantics_rejects_port_zero() {
        let config = HoundConfig {
            server: Some(ServerConfig { port: Some(0), ..Default::default() }),
            ..Default::default()
        };
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_validate_semantics_rejects_empty_db_path() {
        let config = HoundConfig {
            database: Some(DatabaseConfig { path: Some("  ".into()), write_retries: None }),
            ..Default::default()
        };
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_validate_semantics_empty_config() {
        assert!(validate_semantics(&HoundConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_parse_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  host: 0.0.0.0\n  port: 9000\ndatabase:\n  path: ./x.db").unwrap();

        let config = parse_config(file.path()).await.unwrap();
        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, Some(9000));
        assert_eq!(config.database.unwrap().path.as_deref(), Some("./x.db"));
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/houndsploit.yaml")).await.unwrap_err();
        assert!(matches!(err, HoundError::Config(_)));
    }

    #[tokio::test]
    async fn test_parse_config_type_mismatch() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: not-a-number").unwrap();
        assert!(parse_config(file.path()).await.is_err());
    }
}
