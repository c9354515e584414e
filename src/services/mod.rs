//! Orchestration layer consumed by the app shell (UI commands, session
//! startup hooks). Thin wrappers over the engine and the store.

pub mod followups;
pub mod notifications;
