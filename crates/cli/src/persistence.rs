use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use trashpoker_core::{EconomyLedger, SavedLedger};

#[derive(Debug)]
pub struct LoadedState {
    pub ledger: EconomyLedger,
    pub last_saved: Option<DateTime<Utc>>,
}

pub fn default_save_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TRASHPOKER_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".trashpoker_save.json"))
}

/// Missing or corrupt saves degrade to a fresh ledger; legacy fields are
/// migrated by the core schema.
pub fn load_ledger(path: &Path) -> LoadedState {
    let Ok(body) = fs::read_to_string(path) else {
        return LoadedState {
            ledger: EconomyLedger::new(),
            last_saved: None,
        };
    };
    match serde_json::from_str::<SavedLedger>(&body) {
        Ok(saved) => {
            let last_saved = saved
                .last_saved
                .as_deref()
                .and_then(|stamp| DateTime::parse_from_rfc3339(stamp).ok())
                .map(|stamp| stamp.with_timezone(&Utc));
            LoadedState {
                ledger: EconomyLedger::from_saved(saved),
                last_saved,
            }
        }
        Err(_) => LoadedState {
            ledger: EconomyLedger::new(),
            last_saved: None,
        },
    }
}

pub fn save_ledger(ledger: &EconomyLedger, path: &Path) -> Result<(), String> {
    let payload = ledger.to_saved(Some(Utc::now().to_rfc3339()));
    let body = serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?;
    fs::write(path, body).map_err(|err| err.to_string())
}
