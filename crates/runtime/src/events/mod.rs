//! Topic-based event routing and narration.
//!
//! Events come straight from the session's structured log. Consumers
//! subscribe to the topics they need; narration renders text for display
//! and is never parsed back.

mod bus;
mod narration;

pub use bus::{EventBus, Topic};
pub use narration::Narrator;
