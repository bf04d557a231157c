// ABOUTME: Text rendering for the console — reply panels, the context table, and the session list.
// ABOUTME: Layout is measured with unicode-width so wide glyphs keep borders aligned.

use crossterm::style::Stylize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::session::{SessionSummary, Turn};

const INDEX_WIDTH: usize = 4;
const ROLE_WIDTH: usize = 10;
const MIN_CONTENT_WIDTH: usize = 10;

/// Current terminal width, or 80 columns when it cannot be queried.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80)
}

/// Break `text` into lines no wider than `width` columns, honoring newlines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut line = String::new();
        let mut used = 0;
        for ch in raw.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            line.push(ch);
            used += w;
        }
        lines.push(line);
    }
    lines
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Draw `text` inside a rounded box with `title` set into the top border.
pub fn render_panel(title: &str, text: &str, width: usize) -> String {
    let max_inner = width.saturating_sub(4).max(MIN_CONTENT_WIDTH);
    let body = wrap(text, max_inner);
    // Shrink to the widest line, but never below the title.
    let inner = body
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(title.width() + 2))
        .max()
        .unwrap_or(0)
        .min(max_inner.max(title.width() + 2));

    let top_fill = (inner + 2).saturating_sub(title.width() + 2);
    let mut out = vec![format!(
        "{} {} {}",
        "╭─".cyan(),
        title.bold(),
        format!("{}╮", "─".repeat(top_fill.saturating_sub(1))).cyan()
    )];
    for line in &body {
        out.push(format!("{} {} {}", "│".cyan(), pad(line, inner), "│".cyan()));
    }
    out.push(format!("╰{}╯", "─".repeat(inner + 2)).cyan().to_string());
    out.join("\n")
}

fn rule(left: char, mid: char, right: char, content_width: usize) -> String {
    format!(
        "{left}{}{mid}{}{mid}{}{right}",
        "─".repeat(INDEX_WIDTH + 2),
        "─".repeat(ROLE_WIDTH + 2),
        "─".repeat(content_width + 2),
    )
}

/// Render the numbered context table shown by the `contexto` command.
pub fn render_context(turns: &[Turn], width: usize) -> String {
    let title = "Conversation context";
    if turns.is_empty() {
        return render_panel(title, "(empty)", width);
    }

    let content_width = width
        .saturating_sub(INDEX_WIDTH + ROLE_WIDTH + 10)
        .max(MIN_CONTENT_WIDTH);
    let mut out = vec![title.bold().to_string()];
    out.push(rule('┌', '┬', '┐', content_width));
    out.push(format!(
        "│ {} │ {} │ {} │",
        pad("#", INDEX_WIDTH).blue().bold(),
        pad("Role", ROLE_WIDTH).blue().bold(),
        pad("Content", content_width).blue().bold(),
    ));

    for (idx, turn) in turns.iter().enumerate() {
        out.push(rule('├', '┼', '┤', content_width));
        let number = format!("{:02}", idx + 1);
        for (line_no, line) in wrap(&turn.content, content_width).iter().enumerate() {
            let (number, role) = if line_no == 0 {
                (number.as_str(), turn.role.as_str())
            } else {
                ("", "")
            };
            out.push(format!(
                "│ {} │ {} │ {} │",
                pad(number, INDEX_WIDTH).dim(),
                pad(role, ROLE_WIDTH).magenta(),
                pad(line, content_width),
            ));
        }
    }
    out.push(rule('└', '┴', '┘', content_width));
    out.join("\n")
}

/// Human form of a record timestamp: first 19 characters with `T` as a space.
pub fn display_timestamp(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "Unknown".to_string();
    }
    timestamp.chars().take(19).collect::<String>().replace('T', " ")
}

/// Render the 1-indexed list of saved sessions for the resume menu.
pub fn render_session_list(sessions: &[SessionSummary]) -> String {
    let mut out = vec![format!("Saved conversations ({}):", sessions.len())
        .blue()
        .bold()
        .to_string()];
    for (idx, session) in sessions.iter().enumerate() {
        out.push(format!(
            "{:2}. {} - {} ({} messages)",
            idx + 1,
            session.filename.as_str().cyan(),
            display_timestamp(&session.timestamp),
            session.total_messages
        ));
    }
    out.join("\n")
}
