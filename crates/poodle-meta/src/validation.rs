//! Load-time validation of service definitions

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result, Service};

static SERVICE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_/]+$").expect("Invalid service id regex"));

/// Check a service id typed by the user when creating a new definition.
pub fn validate_service_id(id: &str) -> Result<()> {
    let trimmed = id.trim();
    if trimmed.is_empty()
        || !SERVICE_ID.is_match(trimmed)
        || trimmed.starts_with('/')
        || trimmed.split('/').any(|part| part.is_empty())
    {
        return Err(Error::InvalidServiceId { id: id.to_string() });
    }
    Ok(())
}

/// Reject definitions that could only fail later, at call time.
///
/// Checks that the service has an id, that its timeout parses, that endpoint
/// ids are unique and that every endpoint method is supported.
pub fn validate_service(service: &Service) -> Result<()> {
    let id = &service.main.id;
    if id.trim().is_empty() {
        return Err(Error::InvalidServiceId { id: id.clone() });
    }

    service.main.timeout()?;

    let mut seen = HashSet::new();
    for endpoint in &service.endpoints {
        if !seen.insert(endpoint.id.as_str()) {
            return Err(Error::DuplicateEndpoint {
                service: id.clone(),
                endpoint: endpoint.id.clone(),
            });
        }
        endpoint.http_method(id)?;
    }

    Ok(())
}
