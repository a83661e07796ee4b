//! # Scriptforge Core
//!
//! Session state and persistence for the script generator.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                      Session                          │
//! │  ┌───────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐  │
//! │  │ Checklist │ │ Templates│ │  History │ │  Config │  │
//! │  └───────────┘ └──────────┘ └──────────┘ └─────────┘  │
//! │        │                                              │
//! │        ▼                                              │
//! │  validate → provider.generate/fix → script → history  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! The session drives the step-by-step flow (prepare → describe →
//! result), gates generation behind description validation, and records
//! successful generations in a bounded history. Display markup comes
//! from the highlight crate; the generative exchange goes through the
//! provider crate's trait, so tests can script it.

pub mod checklist;
pub mod config;
pub mod history;
pub mod session;
pub mod template;

pub use checklist::{Checklist, ChecklistItem};
pub use config::{Config, ConfigError};
pub use history::{History, HistoryEntry, HistoryError};
pub use session::{MIN_DESCRIPTION_LEN, Session, Step};
pub use template::{Template, builtin_templates};

use scriptforge_provider::ProviderError;

/// Result type for session operations.
pub type CoreResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("description too short: at least {min} characters required")]
    DescriptionTooShort { min: usize },

    #[error("no script available yet")]
    NoScript,

    #[error("error report is empty, nothing to fix")]
    EmptyErrorReport,

    #[error("no history entry at index {0}")]
    HistoryIndex(usize),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("history error: {0}")]
    History(#[from] HistoryError),
}
