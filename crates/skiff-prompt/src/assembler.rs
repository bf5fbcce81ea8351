//! Builds the single upstream payload from persona, recent history, and
//! the current message.

use crate::persona::Persona;
use skiff_core::types::{ChatMessage, Turn};

/// One extracted upload, ready to be folded into the user message.
#[derive(Debug, Clone)]
pub struct FileSection {
    /// Original (client-supplied) filename, shown to the model.
    pub name: String,
    pub content: String,
}

/// Fold extracted file contents into the raw message text. With no files
/// the message passes through untouched.
pub fn compose_user_message(message: &str, files: &[FileSection]) -> String {
    if files.is_empty() {
        return message.to_string();
    }
    let file_text = files
        .iter()
        .map(|f| format!("\nFile: {}\nContent:\n{}\n", f.name, f.content))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{message}\n\nI have uploaded the following files for your reference:\n{file_text}\nPlease analyze these files and help me with my request."
    )
}

/// The assembled request: system template, bounded recent history in
/// chronological order, and the current user message.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    pub persona: Persona,
    pub history: Vec<Turn>,
    pub current: String,
}

impl AssembledPrompt {
    pub fn new(persona: Persona, history: Vec<Turn>, current: impl Into<String>) -> Self {
        Self {
            persona,
            history,
            current: current.into(),
        }
    }

    /// Render as one linear text block: system message, each turn as
    /// `<role>: <content>`, then the current message as `User: ...`,
    /// blank-line separated, strictly chronological.
    pub fn render_text(&self) -> String {
        let mut blocks = Vec::with_capacity(self.history.len() + 2);
        blocks.push(self.persona.system_message().to_string());
        for turn in &self.history {
            blocks.push(format!("{}: {}", turn.role, turn.content));
        }
        blocks.push(format!("User: {}", self.current));
        blocks.join("\n\n")
    }

    /// The equivalent structured message list for message-shaped upstream
    /// APIs: one system message, then the history, then the current turn.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(self.persona.system_message()));
        messages.extend(self.history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(self.current));
        messages
    }
}
