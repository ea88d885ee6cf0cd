//! Synchronizing the services directory with the remote store
//!
//! - [`determine_direction`]: per-file upload/download/in-sync classification
//! - [`SyncEngine`]: full per-file reconciliation through [`merge`]
//!
//! [`merge`]: crate::merge::merge

mod engine;
mod state;

pub use engine::{SyncEngine, SyncReport};
pub use state::{SyncState, determine_direction};
