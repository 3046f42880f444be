//! Topic screening and canned answers for SehatBot.
//!
//! Two pure pieces:
//!
//! - [`screen`] — decides whether a query is in scope for a health
//!   assistant, or should be answered with a canned redirect.
//! - [`fallback_reply`] — the always-available local answer, used when no
//!   remote provider is configured or all of them failed.
//!
//! All keyword and answer tables are static data so localization is a data
//! change, not a control-flow change.

mod fallback;
mod screen;

pub use fallback::{fallback_reply, welcome_message};
pub use screen::{is_greeting, screen, OFF_TOPIC_REDIRECT, UNCLEAR_REDIRECT};
