//! Concierge Chat - terminal client for the Colchuck's restaurant assistant
//!
//! A small chat client that:
//! - Forwards visitor messages to the completion worker endpoint
//! - Classifies messages for location intent and call-to-action buttons
//! - Keeps an append-only transcript for the current session
//! - Degrades to a friendly fallback message when the worker is unreachable

pub mod config;
pub mod controller;
pub mod intent;
pub mod repl;
pub mod transcript;
pub mod worker;
