//! Last-run persistence: a small JSON record written when a run ends, read
//! back at startup so the title screen can show the previous outcome.

use crate::APP_NAME;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const RUN_STATE_FORMAT_VERSION: u32 = 1;

pub const OUTCOME_VICTORY: &str = "WIN_CLEAR";
pub const OUTCOME_GAME_OVER: &str = "HP_ZERO";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunStateFile {
    pub format_version: u32,
    pub run_seed: u64,
    pub map_fingerprint_hex: String,
    pub score: u32,
    pub kills: u32,
    pub outcome: String,
    pub updated_at_unix_ms: u64,
}

impl RunStateFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_run.json");
            path
        })
    }

    /// Write via a temp file plus rename so a crash mid-write never leaves a
    /// torn record behind.
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        Ok(state)
    }
}

pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}
