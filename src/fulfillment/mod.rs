//! Intent dispatch for the NLU webhook

pub mod booking;
mod intent;
pub use intent::{BookingRequest, Intent};

/// Substring of the unauthenticated booking reply that the chat relay
/// watches for to tell the UI to render an authorization link
pub const NEEDS_AUTH_MARKER: &str = "isn't linked yet";

pub const WELCOME_REPLY: &str =
    "Hello! I'm your AI assistant. I can help you book, check or manage tasks.";
pub const FALLBACK_REPLY: &str = "Sorry, I didn't understand. Could you please tell again.";
