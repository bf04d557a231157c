// ABOUTME: Conversation data model — role-tagged turns in an append-only transcript.
// ABOUTME: The full transcript is replayed verbatim to the completion service on every request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// System prompt that opens every conversation unless config overrides it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Who authored a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Any other role found in a loaded record (e.g. `developer`), kept verbatim.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        match name.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(name),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered transcript. Always starts with a system turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a fresh conversation holding only the system turn.
    pub fn new(system_prompt: &str) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    /// Start a conversation with a fresh system turn followed by previously
    /// saved turns. A saved leading system turn is kept as-is, so resumed
    /// transcripts carry two system turns.
    pub fn resumed(system_prompt: &str, loaded: Vec<Turn>) -> Self {
        let mut conversation = Self::new(system_prompt);
        conversation.turns.extend(loaded);
        conversation
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: a conversation holds at least its system turn.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_starts_with_system_turn() {
        let conversation = Conversation::new(DEFAULT_SYSTEM_PROMPT);
        assert_eq!(conversation.len(), 1);
        assert!(!conversation.is_empty());
        assert_eq!(conversation.turns()[0], Turn::system("You are a helpful assistant."));
    }

    #[test]
    fn resumed_keeps_loaded_system_turn() {
        let loaded = vec![
            Turn::system(DEFAULT_SYSTEM_PROMPT),
            Turn::user("hola"),
            Turn::assistant("hola!"),
        ];
        let conversation = Conversation::resumed(DEFAULT_SYSTEM_PROMPT, loaded);
        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.turns()[0].role, Role::System);
        assert_eq!(conversation.turns()[1].role, Role::System);
        assert_eq!(conversation.last(), Some(&Turn::assistant("hola!")));
    }

    #[test]
    fn pushes_append_in_order() {
        let mut conversation = Conversation::new("sys");
        conversation.push_user("one");
        conversation.push_assistant("two");
        let roles: Vec<Role> = conversation.turns().iter().map(|t| t.role.clone()).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
    }

    #[test]
    fn turn_serializes_with_lowercase_role() {
        let json = serde_json::to_string(&Turn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn unknown_role_is_kept_verbatim() {
        let turn: Turn = serde_json::from_str(r#"{"role":"developer","content":"x"}"#).unwrap();
        assert_eq!(turn.role, Role::Other("developer".to_string()));
        assert_eq!(
            serde_json::to_string(&turn).unwrap(),
            r#"{"role":"developer","content":"x"}"#
        );
    }

    #[test]
    fn known_role_names_map_to_variants() {
        let turn: Turn = serde_json::from_str(r#"{"role":"system","content":"s"}"#).unwrap();
        assert_eq!(turn.role, Role::System);
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let turn: Turn = serde_json::from_str(r#"{"role":"user"}"#).unwrap();
        assert_eq!(turn, Turn::user(""));
    }
}
