//! Chat session controller
//!
//! Owns the transcript and the per-session flags, and turns one user
//! message into one worker request plus the resulting transcript entries:
//! the bot reply, an optional map card, and an optional CTA row.
//!
//! All failures are absorbed here: the worker errors become a static
//! friendly fallback message and the session stays usable.

use tracing::error;

use crate::config::Settings;
use crate::intent;
use crate::transcript::{Entry, Message, Sender, Transcript};
use crate::worker::{CompletionBackend, WorkerError};

/// Apology shown when the worker answers with an application error.
pub const FALLBACK_API: &str = "I'm sorry, I encountered an error. Please try again or call us!";

/// Apology shown when the request cannot complete at all.
pub const FALLBACK_TRANSPORT: &str =
    "I'm having trouble connecting right now. Please check your internet or call us.";

/// Chat session state: transcript, flags, and the worker backend.
pub struct ChatController<B: CompletionBackend> {
    backend: B,
    settings: Settings,
    transcript: Transcript,
    /// Gates new sends while a request is outstanding
    busy: bool,
    /// Last user message was a location query; consumed after the next
    /// successful reply
    pending_map: bool,
    suggestions_visible: bool,
}

impl<B: CompletionBackend> ChatController<B> {
    /// Create a controller and seed the time-of-day greeting.
    pub fn new(backend: B, settings: Settings) -> Self {
        let mut controller = Self {
            backend,
            settings,
            transcript: Transcript::new(),
            busy: false,
            pending_map: false,
            suggestions_visible: true,
        };
        controller
            .transcript
            .push(Entry::Message(Message::now(Sender::Bot, welcome())));
        controller
    }

    /// Send one user message. Returns the entries appended this turn;
    /// empty when the text is blank or a request is already in flight.
    pub async fn send(&mut self, text: &str) -> Vec<Entry> {
        let text = text.trim();
        if text.is_empty() || self.busy {
            return Vec::new();
        }

        // First interaction hides the quick replies
        self.suggestions_visible = false;

        self.pending_map = intent::is_location_query(text);
        let ctas = intent::ctas_for(text);

        let mark = self.transcript.len();
        self.transcript
            .push(Entry::Message(Message::now(Sender::User, text)));

        self.busy = true;
        let result = self
            .backend
            .complete(text, &self.settings.system_instruction, &self.settings.model)
            .await;
        self.busy = false;

        match result {
            Ok(reply) => {
                self.transcript
                    .push(Entry::Message(Message::now(Sender::Bot, reply)));
                if self.pending_map {
                    self.transcript.push(Entry::map_widget());
                    self.pending_map = false;
                }
                if !ctas.is_empty() {
                    self.transcript.push(Entry::Ctas(ctas));
                }
            }
            Err(e) => {
                error!("worker request failed: {}", e);
                let fallback = match e {
                    WorkerError::Transport(_) => FALLBACK_TRANSPORT,
                    WorkerError::Api(_) => FALLBACK_API,
                };
                self.transcript
                    .push(Entry::Message(Message::now(Sender::Bot, fallback)));
            }
        }

        self.transcript.since(mark).to_vec()
    }

    /// Clear the session: empty transcript, fresh greeting, quick replies
    /// restored, location flag dropped.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.transcript
            .push(Entry::Message(Message::now(Sender::Bot, welcome())));
        self.suggestions_visible = true;
        self.pending_map = false;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Quick replies, or an empty slice once they have been dismissed.
    pub fn suggestions(&self) -> &[String] {
        if self.suggestions_visible {
            &self.settings.suggestions
        } else {
            &[]
        }
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }
}

/// Time-of-day welcome line.
pub fn welcome() -> String {
    use chrono::Timelike;
    let hour = chrono::Local::now().hour();
    format!(
        "{}! I'm your Colchuck's Concierge. How can I help you today?",
        greeting_for_hour(hour)
    )
}

/// Greeting word for a local hour of day.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}
