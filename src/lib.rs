//! Rekindle — follow-up scheduling and notification engine for a personal
//! relationship manager.
//!
//! Connections carry a follow-up policy (frequency + enabled flag) and a
//! single authoritative `next_follow_up_at` instant. The engine groups due
//! connections into urgency buckets, raises at most one active reminder per
//! connection, and advances the schedule when the user logs an interaction.
//! Voice capture, LLM extraction, and all rendering live in the surrounding
//! app, not here.

pub mod db;
pub mod error;
pub mod followups;
mod migrations;
pub mod services;

pub use error::{FollowUpError, UserFacingError};
pub use followups::frequency::FollowUpFrequency;
pub use followups::urgency::Urgency;
