// ABOUTME: Shared test doubles — a scripted console and a canned completion client.
// ABOUTME: Lets integration tests drive the full menu and chat flow without a terminal or network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use statefulchat::agent::CompletionClient;
use statefulchat::console::{Console, ReadOutcome};
use statefulchat::session::Turn;

/// Console that replays canned input and records everything printed.
/// Running out of input behaves like Ctrl-D.
pub struct ScriptedConsole {
    input: VecDeque<ReadOutcome>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn lines(lines: &[&str]) -> Self {
        Self::outcomes(lines.iter().map(|l| ReadOutcome::Line(l.to_string())).collect())
    }

    pub fn outcomes(input: Vec<ReadOutcome>) -> Self {
        Self {
            input: input.into(),
            output: Vec::new(),
        }
    }

    pub fn printed(&self) -> String {
        self.output.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<ReadOutcome> {
        Ok(self.input.pop_front().unwrap_or(ReadOutcome::Eof))
    }

    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

/// Completion client that answers from a queue and records each request.
pub struct MockClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    pub requests: Mutex<Vec<(String, Vec<Turn>)>>,
}

impl MockClient {
    pub fn with_replies(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
        let replies = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Vec<Turn> {
        self.requests.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    async fn complete(&self, model: &str, conversation: &[Turn]) -> anyhow::Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), conversation.to_vec()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}
