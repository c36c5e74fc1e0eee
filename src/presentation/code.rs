use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::errors::HoundError;
use crate::models::{Record, Vulnerability};
use super::view::RecordView;

pub const FILE_NOT_FOUND_MESSAGE: &str = "Sorry! This file does not exist :(";

/// URL prefix under which the static layer serves artifacts.
pub const PUBLIC_ARTIFACT_PREFIX: &str = "/static/vulnerabilities/";

static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(?P<extension>\w+)").expect("extension regex is valid")
});

/// Extension of the artifact's file name including the dot, or empty.
pub fn vulnerability_extension(file: &str) -> String {
    let name = file.rsplit('/').next().unwrap_or(file);
    EXTENSION_RE
        .captures(name)
        .and_then(|c| c.name("extension"))
        .map(|m| format!(".{}", m.as_str()))
        .unwrap_or_default()
}

/// Everything the code viewer shows for one record.
#[derive(Debug, Clone, Serialize)]
pub struct CodeDetails {
    #[serde(flatten)]
    pub record: RecordView,
    pub code: String,
    pub file_path: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CodeView {
    Found(CodeDetails),
    Missing { error: String },
}

impl CodeView {
    fn missing() -> Self {
        CodeView::Missing { error: FILE_NOT_FOUND_MESSAGE.to_string() }
    }
}

/// Join `file` under `root`, refusing anything that could escape it.
fn artifact_path(root: &Path, file: &str) -> Option<PathBuf> {
    let relative = Path::new(file);
    let safe = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    (safe && !file.is_empty()).then(|| root.join(relative))
}

/// Read the artifact behind `record`. A missing file becomes a user-facing
/// message; any other I/O failure propagates.
pub async fn load_source_code(root: &Path, record: &Record) -> Result<CodeView, HoundError> {
    let Some(path) = artifact_path(root, record.file()) else {
        warn!(file = record.file(), "Rejected artifact path outside the artifacts root");
        return Ok(CodeView::missing());
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Artifact file not found");
            return Ok(CodeView::missing());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(CodeView::Found(CodeDetails {
        record: RecordView::from(record),
        code: String::from_utf8_lossy(&bytes).into_owned(),
        file_path: format!("{}{}", PUBLIC_ARTIFACT_PREFIX, record.file()),
        file_name: format!("{}{}", record.description(), vulnerability_extension(record.file())),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exploit;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(file: &str) -> Record {
        Record::Exploit(Exploit {
            id: 40616,
            file: file.into(),
            description: "Dirty COW".into(),
            date: NaiveDate::from_ymd_opt(2016, 10, 21).unwrap(),
            author: "FireFart".into(),
            vuln_type: "local".into(),
            platform: "linux".into(),
            port: None,
        })
    }

    #[test]
    fn test_extension_from_file_name() {
        assert_eq!(vulnerability_extension("exploits/linux/local/40616.c"), ".c");
        assert_eq!(vulnerability_extension("exploits/php/web.apps/1.php"), ".php");
        assert_eq!(vulnerability_extension("exploits/misc/README"), "");
    }

    #[test]
    fn test_artifact_path_rejects_escape() {
        let root = Path::new("/srv/artifacts");
        assert!(artifact_path(root, "../etc/passwd").is_none());
        assert!(artifact_path(root, "/etc/passwd").is_none());
        assert!(artifact_path(root, "").is_none());
        assert_eq!(
            artifact_path(root, "exploits/a.c").unwrap(),
            PathBuf::from("/srv/artifacts/exploits/a.c")
        );
    }

    #[tokio::test]
    async fn test_load_existing_artifact() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("exploits/linux/local")).unwrap();
        std::fs::write(dir.path().join("exploits/linux/local/40616.c"), "int main() {}").unwrap();

        let view = load_source_code(dir.path(), &record("exploits/linux/local/40616.c")).await.unwrap();
        match view {
            CodeView::Found(details) => {
                assert_eq!(details.code, "int main() {}");
                assert_eq!(details.file_name, "Dirty COW.c");
                assert_eq!(details.file_path, "/static/vulnerabilities/exploits/linux/local/40616.c");
                assert_eq!(details.record.port.as_deref(), Some(""));
            }
            CodeView::Missing { .. } => panic!("expected artifact to load"),
        }
    }

    #[tokio::test]
    async fn test_missing_artifact_is_user_message() {
        let dir = TempDir::new().unwrap();
        let view = load_source_code(dir.path(), &record("exploits/nope.c")).await.unwrap();
        match view {
            CodeView::Missing { error } => assert_eq!(error, FILE_NOT_FOUND_MESSAGE),
            CodeView::Found(_) => panic!("expected missing artifact"),
        }
    }
}
