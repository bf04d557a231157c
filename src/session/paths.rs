// ABOUTME: Session file paths — paired log and JSON locations for a chat session.
// ABOUTME: New sessions stamp both names with the start time; resumed sessions derive the log from the JSON.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

const JSON_PREFIX: &str = "conversation_";
const JSON_SUFFIX: &str = ".json";
const LOG_PREFIX: &str = "log_";
const LOG_SUFFIX: &str = ".txt";

/// Where a session's transcript log and JSON record are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub log: PathBuf,
    pub json: PathBuf,
}

impl SessionPaths {
    /// Paths for a brand-new session started at `now`.
    pub fn for_new(logs_dir: &Path, now: DateTime<Local>) -> Self {
        let stamp = now.format("%Y%m%d_%H%M%S").to_string();
        Self {
            log: logs_dir.join(format!("{LOG_PREFIX}{stamp}{LOG_SUFFIX}")),
            json: logs_dir.join(format!("{JSON_PREFIX}{stamp}{JSON_SUFFIX}")),
        }
    }

    /// Paths for continuing a saved session: the JSON record is reused and the
    /// log sits next to it with `log_`/`.txt` in place of `conversation_`/`.json`.
    pub fn for_resumed(json_path: &Path) -> Self {
        let filename = json_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = filename.strip_prefix(JSON_PREFIX).unwrap_or(&filename);
        let stem = stem.strip_suffix(JSON_SUFFIX).unwrap_or(stem);
        Self {
            log: json_path.with_file_name(format!("{LOG_PREFIX}{stem}{LOG_SUFFIX}")),
            json: json_path.to_path_buf(),
        }
    }
}
