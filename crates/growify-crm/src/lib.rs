//! HubSpot CRM integration: property mapping, webhook dispatch, bulk
//! sync, and webhook signature validation.
//!
//! The mapping functions are pure; everything that touches the network
//! lives in [`sync`], and everything that touches storage goes through
//! the `growify-store` traits.

pub mod error;
pub mod map;
pub mod signature;
pub mod sync;
pub mod webhook;

pub use error::CrmError;
pub use map::{map_contact, map_deal};
pub use signature::validate_signature;
pub use sync::{HubSpotClient, SyncOptions, SyncStats};
pub use webhook::{process_events, EventResult, WebhookEvent};
