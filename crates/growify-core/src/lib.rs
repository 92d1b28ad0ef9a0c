//! Shared domain types and configuration for Growify.
//!
//! Holds the platform enum, the unified analytics record written by every
//! platform sync, user-authored content types, and the env-driven app
//! configuration used by the server and CLI.

pub mod app_config;
pub mod config;
pub mod content;
pub mod crm;
pub mod platform;
pub mod record;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{DraftPost, GeneratedContent, PostStatus, ScheduledPost};
pub use crm::{ContactRecord, DealRecord, SyncSource};
pub use platform::{Platform, UnknownPlatform};
pub use record::{PlatformAnalyticsRecord, PostSummary};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
