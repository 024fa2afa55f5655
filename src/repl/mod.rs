//! Interactive REPL for concierge-chat
//!
//! Readline-based chat panel standing in for the website widget:
//! - Quick-reply suggestion bar (pick by number)
//! - Typing indicator while a request is in flight
//! - Map card and CTA buttons rendered after replies
//! - Slash commands (/clear resets the session)

pub mod colors;
mod formatter;
mod helper;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use url::Url;

use crate::config::Settings;
use crate::controller::ChatController;
use crate::intent::{self, CtaAction, CtaButton};
use crate::transcript::{Entry, Sender};
use crate::worker::WorkerClient;

use helper::ConciergeHelper;

/// REPL state
pub struct Repl {
    /// Readline editor with history and completion
    editor: Editor<ConciergeHelper, DefaultHistory>,
    /// Chat session controller over the real worker client
    controller: ChatController<WorkerClient>,
    /// History file path
    history_path: std::path::PathBuf,
    /// CTA buttons from the most recent reply, addressable via /cta <n>
    last_ctas: Vec<CtaButton>,
}

impl Repl {
    pub fn new(settings: Settings) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(ConciergeHelper::new()));

        // History file in ~/.concierge/chat_history
        let history_path = dirs::home_dir()
            .unwrap_or_default()
            .join(".concierge")
            .join("chat_history");

        let client = WorkerClient::new(settings.worker_url.clone(), settings.project_id.clone());
        let controller = ChatController::new(client, settings);

        Ok(Self {
            editor,
            controller,
            history_path,
            last_ctas: Vec::new(),
        })
    }

    /// Load command history
    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    /// Save command history
    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }

    /// Run the REPL loop
    pub async fn run(&mut self) -> Result<()> {
        self.load_history();

        println!("Type your message (Ctrl+D to exit, /help for commands)");
        println!();

        // Greeting seeded by the controller
        self.render_entries(self.controller.transcript().entries().to_vec());
        self.render_suggestions();
        println!();

        loop {
            let line = match self.editor.readline(">>> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            self.editor.add_history_entry(&line)?;

            // Handle slash commands
            if trimmed.starts_with('/') {
                if !self.handle_command(trimmed) {
                    break;
                }
                continue;
            }

            // A bare number picks a quick reply while the bar is showing
            let input = self.resolve_quick_reply(trimmed);

            self.send_and_render(&input).await;
        }

        println!("Goodbye!");
        self.save_history();
        Ok(())
    }

    /// Map "2" to the second suggestion while the bar is visible
    fn resolve_quick_reply(&self, input: &str) -> String {
        if let Ok(n) = input.parse::<usize>() {
            let suggestions = self.controller.suggestions();
            if n >= 1 && n <= suggestions.len() {
                return suggestions[n - 1].clone();
            }
        }
        input.to_string()
    }

    /// Dispatch one message and render whatever the controller appended
    async fn send_and_render(&mut self, text: &str) {
        println!("{}", colors::status("Concierge is typing..."));

        let appended = self.controller.send(text).await;
        self.render_entries(appended);
        println!();
    }

    fn render_entries(&mut self, entries: Vec<Entry>) {
        for entry in entries {
            match entry {
                Entry::Message(msg) => {
                    // The user's own line was just typed; only bot messages
                    // need rendering
                    if msg.sender == Sender::Bot {
                        println!(
                            "{} {}",
                            colors::timestamp(&msg.timestamp),
                            formatter::format_reply(&msg.text)
                        );
                    }
                }
                Entry::MapWidget { timestamp } => self.render_map_card(&timestamp),
                Entry::Ctas(buttons) => self.render_ctas(buttons),
            }
        }
    }

    fn render_map_card(&self, timestamp: &str) {
        let venue = &self.controller.settings().venue;
        println!("{}", colors::separator(44));
        println!(
            "{} {}",
            colors::header(&format!("📍 {} Location", venue.name)),
            colors::timestamp(timestamp)
        );
        println!("   {}", venue.address);
        println!("   {}", colors::link(&venue.maps_url));
        println!("{}", colors::separator(44));
    }

    fn render_ctas(&mut self, buttons: Vec<CtaButton>) {
        for (i, button) in buttons.iter().enumerate() {
            println!(
                "  [{}] {}",
                i + 1,
                colors::cta_label(&button.label)
            );
        }
        println!("{}", colors::status("Activate with /cta <n>"));
        self.last_ctas = buttons;
    }

    fn render_suggestions(&self) {
        let suggestions = self.controller.suggestions();
        if suggestions.is_empty() {
            return;
        }
        let bar: Vec<String> = suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| format!("[{}] {}", i + 1, colors::cta_label(s)))
            .collect();
        println!("Quick replies: {}", bar.join("  "));
    }

    /// Handle a slash command; returns false to quit
    fn handle_command(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "/help" => {
                println!("Commands:");
                println!("  /help         Show this help");
                println!("  /version      Show version");
                println!("  /clear        Reset the chat session");
                println!("  /suggestions  Show the quick replies");
                println!("  /cta <n>      Activate button n from the last reply");
                println!("  /quit, /exit  Leave the chat");
            }
            "/version" => {
                println!("concierge-chat {}", env!("CARGO_PKG_VERSION"));
            }
            "/clear" => {
                self.controller.reset();
                self.last_ctas.clear();
                println!("{}", colors::success("Session cleared."));
                self.render_entries(self.controller.transcript().entries().to_vec());
                self.render_suggestions();
            }
            "/suggestions" => {
                if self.controller.suggestions_visible() {
                    self.render_suggestions();
                } else {
                    println!("{}", colors::status("Quick replies are hidden; /clear restores them."));
                }
            }
            "/cta" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
                Some(n) if n >= 1 && n <= self.last_ctas.len() => {
                    let target = self.last_ctas[n - 1].target.clone();
                    self.activate_cta(&target);
                }
                _ => {
                    println!("{}", colors::warning("Usage: /cta <n> (after a reply with buttons)"));
                }
            },
            "/quit" | "/exit" => return false,
            _ => {
                println!("{}", colors::warning(&format!("Unknown command: {}", cmd)));
            }
        }
        true
    }

    /// Perform the terminal equivalent of a CTA click
    fn activate_cta(&self, target: &str) {
        match intent::resolve_target(target) {
            CtaAction::OpenModal(name) => self.open_modal(&name),
            CtaAction::ScrollTo(anchor) => {
                let venue = &self.controller.settings().venue;
                println!(
                    "See the {} section: {}",
                    anchor,
                    colors::link(&format!("{}#{}", venue.site_url.trim_end_matches('/'), anchor))
                );
            }
            CtaAction::OpenExternal(url) => {
                println!("Opening {}", colors::link(&url));
            }
            CtaAction::Navigate(page) => {
                println!("Opening {}", colors::link(&self.resolve_page(&page)));
            }
        }
    }

    /// Join a relative page target against the venue site URL
    fn resolve_page(&self, page: &str) -> String {
        let site = &self.controller.settings().venue.site_url;
        Url::parse(site)
            .and_then(|base| base.join(page))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| page.to_string())
    }

    fn open_modal(&self, name: &str) {
        let venue = &self.controller.settings().venue;
        match name {
            "reservation" => {
                println!("{}", colors::separator(44));
                println!("{}", colors::header(&format!("Reserve a table at {}", venue.name)));
                println!("   Call {} to book.", venue.phone);
                println!("   Groups over 10, please call ahead.");
                println!("{}", colors::separator(44));
            }
            other => {
                println!("{}", colors::warning(&format!("No such panel: {}", other)));
            }
        }
    }
}
