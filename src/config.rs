//! Configuration file support for concierge-chat
//!
//! Loads config from ~/.concierge/config.toml and carries the built-in
//! defaults for the Colchuck's deployment.

use serde::Deserialize;
use std::path::PathBuf;

/// Default completion worker endpoint.
pub const DEFAULT_WORKER_URL: &str = "https://withered-base-1bc3.cogniq-yatendra.workers.dev/";

/// Default project identifier sent in the X-Project-ID header.
pub const DEFAULT_PROJECT_ID: &str = "COLCHUCKS";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemma-3-4b-it";

/// Default quick-reply suggestions shown on a fresh session.
pub const DEFAULT_SUGGESTIONS: &[&str] = &["Location", "Happy Hour", "Reservations", "Menu"];

/// System instruction for the concierge persona.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
You are the \"Colchuck's Concierge\", a friendly, knowledgeable, and professional \
representative for Colchuck's restaurant in Leavenworth, Washington.

CRITICAL: Keep answers VERY brief, direct, and accurate. Maximum 2-3 sentences. No fluff.

About Colchuck's:
- Owners: Carl and Gavin Evans (Father & Son duo).
- Mission: Providing modern German comfort food with a Pacific Northwest twist.
- Location: 801 Front St, Leavenworth, WA 98826. (Note: We are located upstairs, above Stein).

Operating Hours:
- Monday, Thursday: 3:00 PM - 8:30 PM
- Tuesday & Wednesday: CLOSED
- Friday, Saturday: 12:00 PM - 9:00 PM
- Sunday: 12:00 PM - 8:30 PM

Special Offers:
- Happy Hour: Daily 3:00 PM - 4:30 PM ($5 off cocktails/shareables/wine, half-price pitchers).
- Kids Eat Free: Daily 12:00 PM - 3:00 PM (Ages 12 & under) with adult meal.

Menu Highlights:
- Shareables: Deviled Eggs, Fried Brie, Pretzel Bites, Crispy Brussels.
- Mains: Wiener Schnitzel, Jagerschnitzel, Kobe Burgers, Brat Burger.
- Desserts: Apple Strudel, Sticky Toffee Pudding.

Policies:
- Reservations: Recommended. Groups >10 call (509) 548-5074.
- Accessibility: No wheelchair access (stairs only).
- Takeout: Available! Call to order. No delivery.";

/// Venue details rendered in the map card and reservation panel.
#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub maps_url: String,
    pub site_url: String,
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            name: "Colchuck's".into(),
            address: "801 Front St, Leavenworth, WA 98826".into(),
            phone: "(509) 548-5074".into(),
            maps_url: "https://www.google.com/maps/search/?api=1&query=Colchuck's+801+Front+St+Leavenworth+WA".into(),
            site_url: "https://colchucks.com/".into(),
        }
    }
}

/// Configuration for concierge-chat
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Completion worker endpoint URL
    pub worker_url: Option<String>,

    /// Project identifier for the X-Project-ID header
    pub project_id: Option<String>,

    /// Model identifier sent with each request
    pub model: Option<String>,

    /// System instruction override
    pub system_instruction: Option<String>,

    /// Quick-reply suggestions
    pub suggestions: Option<Vec<String>>,

    /// Venue details override
    pub venue: Option<Venue>,
}

impl Config {
    /// Load config from ~/.concierge/config.toml
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Fully resolved settings after CLI args > env > config file > defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub worker_url: String,
    pub project_id: String,
    pub model: String,
    pub system_instruction: String,
    pub suggestions: Vec<String>,
    pub venue: Venue,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            worker_url: DEFAULT_WORKER_URL.into(),
            project_id: DEFAULT_PROJECT_ID.into(),
            model: DEFAULT_MODEL.into(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.into(),
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            venue: Venue::default(),
        }
    }
}

impl Settings {
    /// Overlay file config onto the defaults.
    pub fn from_config(config: Config) -> Self {
        let mut settings = Self::default();
        if let Some(url) = config.worker_url {
            settings.worker_url = url;
        }
        if let Some(id) = config.project_id {
            settings.project_id = id;
        }
        if let Some(model) = config.model {
            settings.model = model;
        }
        if let Some(instruction) = config.system_instruction {
            settings.system_instruction = instruction;
        }
        if let Some(suggestions) = config.suggestions {
            settings.suggestions = suggestions;
        }
        if let Some(venue) = config.venue {
            settings.venue = venue;
        }
        settings
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".concierge")
        .join("config.toml")
}
