//! Request construction and replica synchronization for poodle
//!
//! This crate sits above the Layer 0 crates and below the CLI:
//!
//! ```text
//!                 poodle-cli
//!                     |
//!                poodle-core
//!                     |
//!          +----------+----------+
//!          |                     |
//!      poodle-fs            poodle-meta
//! ```
//!
//! It provides:
//!
//! - **Template engine** ([`template`]): placeholder extraction and
//!   single-pass substitution
//! - **Request builder** ([`Caller`]): headers, auth, URL, query and body for
//!   one endpoint, sent through a [`Transport`]
//! - **Replicas** ([`ReplicaStore`]) and their last-write-wins [`merge`]
//! - **Remote store** ([`RemoteStore`], [`GistClient`]) and the
//!   [`SyncEngine`] driving a sync

pub mod caller;
pub mod error;
pub mod http;
pub mod merge;
pub mod remote;
pub mod replica;
pub mod sync;
pub mod template;

pub use caller::Caller;
pub use error::{Error, Result};
pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use merge::{MergeReport, merge};
pub use remote::{AuthStatus, Blob, BlobFile, BlobResponse, GistClient, RemoteStore};
pub use replica::{ReplicaFile, ReplicaStore};
pub use sync::{SyncEngine, SyncReport, SyncState, determine_direction};
pub use template::{Field, Fields, extract_fields, merge_fields, resolve_template};
