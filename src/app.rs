// ABOUTME: Session controller — picks a new or saved session, then runs the chat loop.
// ABOUTME: Every answered exchange and every exit rewrites both the log and the JSON record.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::style::Stylize;
use tracing::debug;

use crate::agent::CompletionClient;
use crate::config::SessionConfig;
use crate::console::{Console, ReadOutcome};
use crate::menu::{StartChoice, select_session, select_start};
use crate::render::{render_context, render_panel, terminal_width};
use crate::session::persistence::{format_timestamp, now_timestamp};
use crate::session::{
    Conversation, SessionPaths, SessionSummary, list_sessions, load_json, load_record, write_json,
    write_log,
};

/// In-memory state of the conversation being chatted in.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub conversation: Conversation,
    pub paths: SessionPaths,
    /// Creation time carried into every saved record.
    pub created_at: String,
}

impl ChatSession {
    /// A fresh session whose files are stamped with `now`.
    pub fn start(system_prompt: &str, logs_dir: &Path, now: DateTime<Local>) -> Self {
        Self {
            conversation: Conversation::new(system_prompt),
            paths: SessionPaths::for_new(logs_dir, now),
            created_at: format_timestamp(now),
        }
    }

    /// Continue the session saved at `summary`, placing a fresh system turn
    /// ahead of the loaded transcript.
    pub fn resume(system_prompt: &str, summary: &SessionSummary) -> Self {
        let (loaded, created_at) = match load_record(&summary.filepath) {
            Ok(Some(record)) => {
                let created_at = record
                    .created_at
                    .or(Some(record.timestamp).filter(|t| !t.is_empty()));
                (record.conversation, created_at)
            }
            _ => (load_json(&summary.filepath), None),
        };
        // Records without any timestamp start their history now.
        let created_at = created_at
            .or(Some(summary.timestamp.clone()).filter(|t| !t.is_empty()))
            .unwrap_or_else(now_timestamp);
        Self {
            conversation: Conversation::resumed(system_prompt, loaded),
            paths: SessionPaths::for_resumed(&summary.filepath),
            created_at,
        }
    }

    /// Rewrite the transcript log and the JSON record.
    pub fn save(&self) -> anyhow::Result<()> {
        let turns = self.conversation.turns();
        write_log(turns, &self.paths.log)?;
        write_json(turns, Some(&self.created_at), &self.paths.json)?;
        debug!(json = %self.paths.json.display(), turns = turns.len(), "session saved");
        Ok(())
    }
}

/// How a line typed in the chat loop is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Exit,
    ShowContext,
    Send(String),
}

impl ChatCommand {
    /// Keywords match case-insensitively after trimming surrounding
    /// whitespace, so `" exit"` also ends the session rather than being sent
    /// to the model.
    pub fn parse(line: &str) -> Self {
        let keyword = line.trim().to_lowercase();
        match keyword.as_str() {
            "exit" | "quit" => ChatCommand::Exit,
            "contexto" => ChatCommand::ShowContext,
            _ => ChatCommand::Send(line.to_string()),
        }
    }
}

/// Drives the menus and the chat loop against a console and a completion client.
pub struct App<C: Console> {
    console: C,
    client: Arc<dyn CompletionClient>,
    model: String,
    logs_dir: PathBuf,
    system_prompt: String,
}

impl<C: Console> App<C> {
    pub fn new(
        console: C,
        client: Arc<dyn CompletionClient>,
        model: impl Into<String>,
        session: &SessionConfig,
    ) -> Self {
        Self {
            console,
            client,
            model: model.into(),
            logs_dir: session.logs_dir.clone(),
            system_prompt: session.system_prompt.clone(),
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run the whole program: menus, then the chat loop until exit.
    /// Returns the session as it was last saved.
    pub async fn run(&mut self) -> anyhow::Result<ChatSession> {
        self.console.print(
            &"Stateful Chatbot (Completions API, type 'exit' to quit)"
                .cyan()
                .bold()
                .to_string(),
        );
        let mut session = self.open_session()?;
        self.chat_loop(&mut session).await?;
        Ok(session)
    }

    /// Pick a new or saved session through the startup menus.
    pub fn open_session(&mut self) -> anyhow::Result<ChatSession> {
        if select_start(&mut self.console)? == StartChoice::Resume {
            let sessions = list_sessions(&self.logs_dir);
            if let Some(summary) = select_session(&mut self.console, &sessions)? {
                let session = ChatSession::resume(&self.system_prompt, summary);
                self.console.print(
                    &format!("Conversation loaded: {}", summary.filename)
                        .green()
                        .to_string(),
                );
                self.console.print(
                    &format!("Messages loaded: {}", session.conversation.len() - 1)
                        .dim()
                        .to_string(),
                );
                return Ok(session);
            }
            self.console
                .print(&"Starting a new chat...".yellow().to_string());
        }

        let session = ChatSession::start(&self.system_prompt, &self.logs_dir, Local::now());
        self.console.print(
            &format!("Conversation will be saved to: {}", session.paths.log.display())
                .dim()
                .to_string(),
        );
        self.console.print(
            &format!("JSON will be saved to: {}", session.paths.json.display())
                .dim()
                .to_string(),
        );
        Ok(session)
    }

    /// Read lines until the user exits, answering each message.
    pub async fn chat_loop(&mut self, session: &mut ChatSession) -> anyhow::Result<()> {
        loop {
            let command = match self.console.read_line("You: ")? {
                ReadOutcome::Line(line) => ChatCommand::parse(&line),
                ReadOutcome::Interrupted | ReadOutcome::Eof => ChatCommand::Exit,
            };

            match command {
                ChatCommand::Exit => {
                    session.save()?;
                    self.console.print(
                        &format!("Conversation saved to: {}", session.paths.log.display())
                            .green()
                            .to_string(),
                    );
                    self.console.print(
                        &format!("JSON saved to: {}", session.paths.json.display())
                            .green()
                            .to_string(),
                    );
                    self.console.print("Goodbye!");
                    return Ok(());
                }
                ChatCommand::ShowContext => {
                    let table = render_context(session.conversation.turns(), terminal_width());
                    self.console.print(&table);
                }
                ChatCommand::Send(text) => self.exchange(session, text).await?,
            }
        }
    }

    /// Send one user message. A failed completion is reported and leaves the
    /// unanswered user turn in memory without saving.
    pub async fn exchange(&mut self, session: &mut ChatSession, text: String) -> anyhow::Result<()> {
        session.conversation.push_user(text);
        let reply = self
            .client
            .complete(&self.model, session.conversation.turns())
            .await;

        match reply {
            Ok(reply) => {
                let reply = reply.trim().to_string();
                self.console
                    .print(&render_panel("Bot", &reply, terminal_width()));
                session.conversation.push_assistant(reply);
                session.save()?;
            }
            Err(e) => self.console.print(&format!("Error: {:#}", e)),
        }
        Ok(())
    }
}
