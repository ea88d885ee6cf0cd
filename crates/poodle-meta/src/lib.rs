//! Service definition and configuration model for poodle.
//!
//! This crate owns the two on-disk documents the tool works with:
//!
//! - the local configuration file ([`Configs`]), and
//! - one service definition file per API ([`Service`]), loaded and indexed
//!   into a [`Catalog`].
//!
//! Everything here is decoded and validated up front so that the layers
//! above can assume well-formed methods, timeouts and security schemes.

pub mod config;
pub mod error;
pub mod loader;
pub mod method;
pub mod service;
pub mod validation;

pub use config::{Configs, General, Gist, Services, SortBy};
pub use error::{Error, Result};
pub use loader::{Catalog, CatalogEntry, ServiceLoader};
pub use method::HttpMethod;
pub use service::{Endpoint, HeaderTemplate, Main, Security, Service, endpoint_key};
pub use validation::{validate_service, validate_service_id};
