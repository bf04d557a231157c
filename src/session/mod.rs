// ABOUTME: Session module — conversation model and its on-disk persistence.
// ABOUTME: Provides the JSON session record, the plain-text log, and session path derivation.

pub mod conversation;
pub mod log;
pub mod paths;
pub mod persistence;

pub use conversation::{Conversation, DEFAULT_SYSTEM_PROMPT, Role, Turn};
pub use log::write_log;
pub use paths::SessionPaths;
pub use persistence::{SessionRecord, SessionSummary, list_sessions, load_json, load_record, write_json};
