//! Keyword classification for user messages
//!
//! Two lightweight classifiers over the raw message text:
//! - location intent, which queues a map card for the next reply
//! - call-to-action intents (menu, private dining, booking), which attach
//!   quick-link buttons after the reply
//!
//! Intentionally simple pattern matching, not a parser.

use once_cell::sync::Lazy;
use regex::Regex;

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(location|map|where|address|directions|how to (get|reach|find)|navigate)")
        .expect("location pattern is valid")
});

static MENU_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmenu\b").expect("menu pattern is valid"));

static DINING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(private|private dining|dining|events|private events)\b")
        .expect("dining pattern is valid")
});

static BOOKING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(booking|book|reservation|reserve)\b").expect("booking pattern is valid")
});

static EXTERNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("url pattern is valid"));

/// Whether the message asks where the restaurant is.
pub fn is_location_query(text: &str) -> bool {
    LOCATION_RE.is_match(text)
}

/// A call-to-action button attached after a bot reply.
///
/// The target is a site page, a `modal:<name>` directive, an in-page
/// `#anchor`, or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaButton {
    pub label: String,
    pub target: String,
}

impl CtaButton {
    fn new(label: &str, target: &str) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Derive the CTA buttons for a user message.
pub fn ctas_for(text: &str) -> Vec<CtaButton> {
    let mut ctas = Vec::new();

    if MENU_RE.is_match(text) {
        ctas.push(CtaButton::new("View Menu", "menu.html"));
    }

    if DINING_RE.is_match(text) {
        ctas.push(CtaButton::new("View Dining", "private-dining.html"));
    }

    if BOOKING_RE.is_match(text) {
        // Both buttons lead to the reservation modal
        ctas.push(CtaButton::new("Booking", "modal:reservation"));
        ctas.push(CtaButton::new("Reserve Table", "modal:reservation"));
    }

    ctas
}

/// What activating a CTA should do, dispatched on the target's prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaAction {
    /// Open the named modal panel
    OpenModal(String),
    /// Jump to an in-page anchor
    ScrollTo(String),
    /// Open an absolute URL externally
    OpenExternal(String),
    /// Navigate to a site page
    Navigate(String),
}

/// Resolve a CTA target into an action.
pub fn resolve_target(target: &str) -> CtaAction {
    if let Some(name) = target.strip_prefix("modal:") {
        return CtaAction::OpenModal(name.into());
    }

    if let Some(anchor) = target.strip_prefix('#') {
        return CtaAction::ScrollTo(anchor.into());
    }

    if EXTERNAL_RE.is_match(target) {
        return CtaAction::OpenExternal(target.into());
    }

    CtaAction::Navigate(target.into())
}
