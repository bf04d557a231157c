// ABOUTME: Session record persistence — save and load full conversation snapshots as JSON.
// ABOUTME: Lists saved sessions by recency and writes every file atomically via tmp + rename.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::conversation::Turn;

/// Filename pattern of saved session records inside the logs directory.
pub const SESSION_FILE_GLOB: &str = "conversation_*.json";

/// Full conversation snapshot written after every exchange.
///
/// Every field is optional on read, so any record the session list shows
/// can also be loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Time of the most recent save.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub conversation: Vec<Turn>,
    #[serde(default)]
    pub total_messages: usize,
    /// Time the session was first created. Absent in records written before
    /// this field existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SessionRecord {
    /// Snapshot a conversation, stamping the current time.
    pub fn snapshot(conversation: &[Turn], created_at: Option<&str>) -> Self {
        Self {
            timestamp: now_timestamp(),
            conversation: conversation.to_vec(),
            total_messages: conversation.len(),
            created_at: created_at.map(str::to_string),
        }
    }
}

/// Listing entry for the resume menu, built from a record's header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub filename: String,
    pub filepath: PathBuf,
    pub timestamp: String,
    pub total_messages: usize,
}

/// Header fields of a record; the conversation body is skipped.
#[derive(Debug, Deserialize)]
struct RecordHeader {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    total_messages: usize,
}

/// Local time as a sortable ISO-8601 string with microseconds.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub fn now_timestamp() -> String {
    format_timestamp(Local::now())
}

/// Write `contents` to `path` atomically, creating parent directories as needed.
pub fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = tmp_path_for(path)?;
    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> anyhow::Result<PathBuf> {
    let Some(name) = path.file_name() else {
        anyhow::bail!("not a file path: {}", path.display());
    };
    let mut tmp_name = OsString::from(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

/// Save a conversation as a session record, replacing any previous contents.
pub fn write_json(conversation: &[Turn], created_at: Option<&str>, path: &Path) -> anyhow::Result<()> {
    let record = SessionRecord::snapshot(conversation, created_at);
    save_record(path, &record)
}

/// Save an already-built record to `path`.
pub fn save_record(path: &Path, record: &SessionRecord) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(record)?;
    write_atomic(path, &content)
}

/// Load a session record, if the file exists.
pub fn load_record(path: &Path) -> anyhow::Result<Option<SessionRecord>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let record: SessionRecord = serde_json::from_str(&content)?;
    Ok(Some(record))
}

/// Load the conversation stored at `path`.
///
/// Never fails: a missing or malformed file yields an empty conversation and
/// a warning diagnostic.
pub fn load_json(path: &Path) -> Vec<Turn> {
    match load_record(path) {
        Ok(Some(record)) => record.conversation,
        Ok(None) => {
            warn!(path = %path.display(), "session file not found");
            Vec::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load session");
            Vec::new()
        }
    }
}

fn is_session_file(name: &str) -> bool {
    Pattern::new(SESSION_FILE_GLOB)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

fn read_summary(path: &Path, filename: String) -> anyhow::Result<SessionSummary> {
    let content = std::fs::read_to_string(path)?;
    let header: RecordHeader = serde_json::from_str(&content)?;
    Ok(SessionSummary {
        filename,
        filepath: path.to_path_buf(),
        timestamp: header.timestamp,
        total_messages: header.total_messages,
    })
}

/// List saved sessions in `dir`, most recent first.
///
/// Files that cannot be read or parsed are skipped. A missing directory
/// yields an empty list.
pub fn list_sessions(dir: &Path) -> Vec<SessionSummary> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(dir = %dir.display(), error = %e, "failed to read sessions directory");
            }
            return Vec::new();
        }
    };

    let mut summaries: Vec<SessionSummary> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let filename = entry.file_name().to_str()?.to_string();
            if !is_session_file(&filename) {
                return None;
            }
            let path = entry.path();
            match read_summary(&path, filename) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unreadable session");
                    None
                }
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.filename.cmp(&a.filename))
    });
    summaries
}
