// Backup: export / import of the flight log as a JSON file

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::store::{JsonStore, StoreError};
use crate::features::logbook::{load_logs, save_logs};
use crate::models::flight_log::FlightLog;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("There is no flight data to back up.")]
    NothingToExport,
    #[error("Error: the file could not be read.")]
    Unreadable,
    #[error("Error: the file format is not valid (expected a list of flights).")]
    NotAList,
    #[error("Error: entry #{index} is not a valid flight ({reason}).")]
    InvalidEntry { index: usize, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A ready-to-send backup file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub content: Vec<u8>,
    pub entries: usize,
}

/// `sfc_backup_YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("sfc_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Serialize the whole log; refuses to export an empty log
pub fn export_logs(logs: &[FlightLog], today: NaiveDate) -> Result<BackupFile, BackupError> {
    if logs.is_empty() {
        return Err(BackupError::NothingToExport);
    }

    let content = serde_json::to_vec(logs).map_err(StoreError::from)?;

    Ok(BackupFile {
        file_name: backup_file_name(today),
        content,
        entries: logs.len(),
    })
}

/// Validate a backup payload into flight entries
pub fn parse_backup(bytes: &[u8]) -> Result<Vec<FlightLog>, BackupError> {
    let text = std::str::from_utf8(bytes).map_err(|_| BackupError::Unreadable)?;
    let value: Value = serde_json::from_str(text).map_err(|_| BackupError::Unreadable)?;

    let Value::Array(items) = value else {
        return Err(BackupError::NotAList);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut log: FlightLog =
                serde_json::from_value(item).map_err(|e| BackupError::InvalidEntry {
                    index: index + 1,
                    reason: e.to_string(),
                })?;
            log.sync_year();
            Ok(log)
        })
        .collect()
}

/// Export the stored log
pub async fn export_from_store(
    store: &JsonStore,
    today: NaiveDate,
) -> Result<BackupFile, BackupError> {
    let logs = load_logs(store).await?;
    let file = export_logs(&logs, today)?;
    info!("Exported {} flight(s) to {}", file.entries, file.file_name);
    Ok(file)
}

/// Replace the stored log with a backup; nothing is written if validation fails
pub async fn import_into_store(store: &JsonStore, bytes: &[u8]) -> Result<usize, BackupError> {
    let logs = match parse_backup(bytes) {
        Ok(logs) => logs,
        Err(e) => {
            warn!("Rejected backup import: {}", e);
            return Err(e);
        }
    };

    save_logs(store, &logs).await?;
    info!("Imported {} flight(s) from backup", logs.len());
    Ok(logs.len())
}
