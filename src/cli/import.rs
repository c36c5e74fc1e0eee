use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::info;

use crate::cli::commands::ImportArgs;
use crate::config::Settings;
use crate::db::Database;
use crate::errors::HoundError;
use crate::models::{Collection, Exploit, Record, Shellcode};

/// Shape of an import file.
#[derive(Debug, Default, Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    pub exploits: Vec<Exploit>,
    #[serde(default)]
    pub shellcodes: Vec<Shellcode>,
}

impl ImportFile {
    pub fn into_records(self) -> Vec<Record> {
        self.exploits
            .into_iter()
            .map(Record::from)
            .chain(self.shellcodes.into_iter().map(Record::from))
            .collect()
    }
}

pub async fn read_import_file(path: &Path) -> Result<ImportFile, HoundError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Upsert every record, ticking `progress` once per record.
pub fn import_records(db: &Database, records: &[Record], progress: &ProgressBar) -> Result<(), HoundError> {
    for record in records {
        db.upsert_record(record)?;
        progress.inc(1);
    }
    Ok(())
}

pub async fn handle_import(args: ImportArgs, settings: Settings) -> Result<(), HoundError> {
    let file = read_import_file(Path::new(&args.file)).await?;
    let records = file.into_records();
    let db = Database::new(&settings.db_path)?;

    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:30.cyan/dark_gray} {pos}/{len} records | {msg}")
            .map_err(|e| HoundError::Internal(format!("Invalid progress template: {}", e)))?
            .progress_chars("█▓░"),
    );
    bar.set_message(args.file.clone());

    import_records(&db, &records, &bar)?;
    bar.finish_and_clear();

    let exploits = db.count_records(Collection::Exploits)?;
    let shellcodes = db.count_records(Collection::Shellcodes)?;
    info!(file = %args.file, imported = records.len(), exploits, shellcodes, "Import finished");
    println!(
        "{} {} records from {} ({} exploits, {} shellcodes in store)",
        style("Imported").green(),
        records.len(),
        args.file,
        exploits,
        shellcodes
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vulnerability;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "exploits": [
            {"id": 1, "file": "exploits/a.c", "description": "A", "date": "2020-01-02",
             "author": "x", "type": "remote", "platform": "linux", "port": 22}
        ],
        "shellcodes": [
            {"id": 7, "file": "shellcodes/b.c", "description": "B", "date": "2019-05-06",
             "author": "y", "type": "shellcode", "platform": "windows"}
        ]
    }"#;

    #[tokio::test]
    async fn test_import_file_into_store() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = read_import_file(file.path()).await.unwrap().into_records();
        assert_eq!(records.len(), 2);

        let db = Database::in_memory().unwrap();
        import_records(&db, &records, &ProgressBar::hidden()).unwrap();
        assert_eq!(db.count_records(Collection::Exploits).unwrap(), 1);
        assert_eq!(db.count_records(Collection::Shellcodes).unwrap(), 1);

        let exploit = db.get_record(Collection::Exploits, 1).unwrap().unwrap();
        assert_eq!(exploit.port(), Some(22));
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"exploits\": [{\"id\": 1, \"date\": \"yesterday\"}]}").unwrap();
        assert!(matches!(read_import_file(file.path()).await, Err(HoundError::Json(_))));
    }
}
