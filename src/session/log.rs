// ABOUTME: Plain-text transcript log — rewrites a numbered, human-readable copy of the conversation.
// ABOUTME: Written alongside the JSON record after every exchange and on exit.

use std::fmt::Write as _;
use std::path::Path;

use chrono::Local;

use crate::session::conversation::Turn;
use crate::session::persistence::write_atomic;

/// Render the transcript log body with a header stamped at `stamped_at`.
pub fn render_log(conversation: &[Turn], stamped_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== CONVERSATION LOG - {} ===", stamped_at);
    out.push('\n');
    for (idx, turn) in conversation.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:02}. [{}]: {}",
            idx + 1,
            turn.role.as_str().to_uppercase(),
            turn.content
        );
    }
    out.push('\n');
    out.push_str("=== END OF LOG ===\n");
    out
}

/// Replace the log file at `path` with the current transcript.
pub fn write_log(conversation: &[Turn], path: &Path) -> anyhow::Result<()> {
    let stamped_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    write_atomic(path, &render_log(conversation, &stamped_at))
}
