//! Transcript data model
//!
//! An append-only sequence of entries for the current session. Messages are
//! immutable once appended; the only way to empty the transcript is an
//! explicit reset.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::intent::CtaButton;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Display time, HH:MM
    pub timestamp: String,
}

impl Message {
    /// Create a message stamped with the current local time
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: short_time(),
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    /// Map card shown after a reply to a location query
    MapWidget { timestamp: String },
    /// Row of call-to-action buttons (no timestamp, per the chat layout)
    Ctas(Vec<CtaButton>),
}

impl Entry {
    pub fn map_widget() -> Self {
        Entry::MapWidget {
            timestamp: short_time(),
        }
    }

    /// The message, if this entry is one
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Entry::Message(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Current local time as HH:MM
pub fn short_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Append-only view of the session's messages
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries appended since the given length mark
    pub fn since(&self, mark: usize) -> &[Entry] {
        &self.entries[mark.min(self.entries.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialize() {
        let msg = Message {
            sender: Sender::User,
            text: "Hello".into(),
            timestamp: "12:30".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(json.contains("Hello"));
    }

    #[test]
    fn test_transcript_push_and_clear() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(Entry::Message(Message::now(Sender::Bot, "Welcome")));
        transcript.push(Entry::map_widget());
        assert_eq!(transcript.len(), 2);

        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_transcript_since() {
        let mut transcript = Transcript::new();
        transcript.push(Entry::Message(Message::now(Sender::User, "hi")));
        let mark = transcript.len();
        transcript.push(Entry::Message(Message::now(Sender::Bot, "hello")));

        let new_entries = transcript.since(mark);
        assert_eq!(new_entries.len(), 1);
        assert_eq!(new_entries[0].as_message().unwrap().text, "hello");
    }

    #[test]
    fn test_short_time_shape() {
        let time = short_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }
}
