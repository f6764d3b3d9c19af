//! Client core for the idea review dashboard
//!
//! Engineers submit improvement ideas; SDMs review them. This crate fetches
//! ideas from the REST API, fills in missing descriptions, and derives the
//! per-role statistics and review workflow the dashboard shows.

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod enrich;
pub mod error;
pub mod idea;
pub mod notify;
pub mod session;
pub mod stats;
pub mod submission;
pub mod workflow;

// Re-export commonly used types for easier testing
pub use api::{HttpIdeaApi, IdeaApi};
pub use config::{ClientConfig, RefreshPolicy};
pub use dashboard::{Dashboard, DashboardLoader};
pub use error::{ClientError, Result};
pub use idea::{BenefitLevel, Category, Idea, IdeaStatus, RawIdea, ReviewState};
pub use notify::{NotificationLevel, Notifier, TerminalNotifier};
pub use session::{Role, Session, SessionStore, User};
pub use workflow::{Decision, Refreshed, ReviewCoordinator, ReviewOutcome};
