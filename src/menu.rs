// ABOUTME: Startup menus — choose between a new chat and resuming a saved one.
// ABOUTME: Invalid input re-prompts; interrupts and end-of-input fall back to a new chat.

use crossterm::style::Stylize;

use crate::console::{Console, ReadOutcome};
use crate::render::render_session_list;
use crate::session::SessionSummary;

/// What the user picked at the startup menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    New,
    Resume,
}

/// Show the new/resume menu and wait for a valid choice.
pub fn select_start(console: &mut dyn Console) -> anyhow::Result<StartChoice> {
    console.print(&format!("\n{}", "=== MENU ===".cyan().bold()));
    console.print(&format!("1. {}", "New chat".green()));
    console.print(&format!("2. {}", "Continue a previous chat".blue()));

    loop {
        match console.read_line("\nSelect an option (1 or 2): ")? {
            ReadOutcome::Line(line) => match line.trim() {
                "1" => return Ok(StartChoice::New),
                "2" => return Ok(StartChoice::Resume),
                _ => console.print(&"Invalid option. Please select 1 or 2.".red().to_string()),
            },
            ReadOutcome::Interrupted | ReadOutcome::Eof => {
                console.print(&"\nInterrupted, starting a new chat...".red().to_string());
                return Ok(StartChoice::New);
            }
        }
    }
}

/// List saved sessions and let the user pick one; `None` means cancel.
pub fn select_session<'a>(
    console: &mut dyn Console,
    sessions: &'a [SessionSummary],
) -> anyhow::Result<Option<&'a SessionSummary>> {
    if sessions.is_empty() {
        console.print(&"No previous conversations available.".yellow().to_string());
        return Ok(None);
    }

    console.print(&format!("\n{}", render_session_list(sessions)));
    let prompt = format!(
        "\nSelect a conversation (1-{}) or 0 to cancel: ",
        sessions.len()
    );

    loop {
        let line = match console.read_line(&prompt)? {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted | ReadOutcome::Eof => {
                console.print(&"\nCancelling...".red().to_string());
                return Ok(None);
            }
        };

        match line.trim().parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= sessions.len() => return Ok(Some(&sessions[n - 1])),
            Ok(_) => console.print(
                &format!(
                    "Invalid option. Please select 1-{} or 0.",
                    sessions.len()
                )
                .red()
                .to_string(),
            ),
            Err(_) => console.print(&"Please enter a valid number.".red().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::path::PathBuf;

    use super::*;

    /// Console that replays canned input and records everything printed.
    struct Scripted {
        input: VecDeque<ReadOutcome>,
        output: Vec<String>,
    }

    impl Scripted {
        fn lines(lines: &[&str]) -> Self {
            Self::outcomes(lines.iter().map(|l| ReadOutcome::Line(l.to_string())).collect())
        }

        fn outcomes(input: Vec<ReadOutcome>) -> Self {
            Self {
                input: input.into(),
                output: Vec::new(),
            }
        }

        fn printed(&self) -> String {
            self.output.join("\n")
        }
    }

    impl Console for Scripted {
        fn read_line(&mut self, _prompt: &str) -> anyhow::Result<ReadOutcome> {
            Ok(self.input.pop_front().unwrap_or(ReadOutcome::Eof))
        }

        fn print(&mut self, text: &str) {
            self.output.push(text.to_string());
        }
    }

    fn summaries(n: usize) -> Vec<SessionSummary> {
        (1..=n)
            .map(|i| SessionSummary {
                filename: format!("conversation_{i}.json"),
                filepath: PathBuf::from(format!("logs/conversation_{i}.json")),
                timestamp: format!("2026-01-0{i}T00:00:00"),
                total_messages: i,
            })
            .collect()
    }

    #[test]
    fn start_menu_reprompts_until_valid() {
        let mut console = Scripted::lines(&["", "3", "new", " 2 "]);
        assert_eq!(select_start(&mut console).unwrap(), StartChoice::Resume);
        assert_eq!(console.printed().matches("Invalid option").count(), 3);
    }

    #[test]
    fn start_menu_interrupt_means_new() {
        let mut console = Scripted::outcomes(vec![ReadOutcome::Interrupted]);
        assert_eq!(select_start(&mut console).unwrap(), StartChoice::New);
    }

    #[test]
    fn start_menu_eof_means_new() {
        let mut console = Scripted::outcomes(vec![]);
        assert_eq!(select_start(&mut console).unwrap(), StartChoice::New);
    }

    #[test]
    fn session_picker_without_sessions_cancels() {
        let mut console = Scripted::lines(&["1"]);
        assert!(select_session(&mut console, &[]).unwrap().is_none());
        assert!(console.printed().contains("No previous conversations"));
    }

    #[test]
    fn session_picker_rejects_bad_input_then_selects() {
        let sessions = summaries(3);
        let mut console = Scripted::lines(&["abc", "7", "2"]);
        let picked = select_session(&mut console, &sessions).unwrap().unwrap();
        assert_eq!(picked.filename, "conversation_2.json");
        let printed = console.printed();
        assert!(printed.contains("Please enter a valid number."));
        assert!(printed.contains("Invalid option. Please select 1-3 or 0."));
    }

    #[test]
    fn session_picker_zero_cancels() {
        let sessions = summaries(2);
        let mut console = Scripted::lines(&["0"]);
        assert!(select_session(&mut console, &sessions).unwrap().is_none());
    }

    #[test]
    fn session_picker_interrupt_cancels() {
        let sessions = summaries(2);
        let mut console = Scripted::outcomes(vec![ReadOutcome::Interrupted]);
        assert!(select_session(&mut console, &sessions).unwrap().is_none());
    }
}
