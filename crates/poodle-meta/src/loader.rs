//! Loading service definitions from the services directory
//!
//! ```text
//! definitions/
//!   github.toml
//!   team/
//!     billing.toml
//! ```
//!
//! Every `*.toml` file is decoded and validated. A single bad file aborts the
//! load: the catalog is either complete or not built at all.

use std::collections::HashMap;

use poodle_fs::{ConfigStore, NormalizedPath, list_files};

use crate::config::SortBy;
use crate::{Error, Result, Service, validate_service};

/// Extension of service definition files.
pub const SERVICE_EXTENSION: &str = "toml";

/// Decodes service definition files.
#[derive(Debug, Default)]
pub struct ServiceLoader {
    store: ConfigStore,
}

impl ServiceLoader {
    pub fn new() -> Self {
        Self {
            store: ConfigStore::new(),
        }
    }

    /// Decode and validate one definition file.
    pub fn load_file(&self, path: &NormalizedPath) -> Result<Service> {
        let service: Service = self.store.load(path).map_err(|e| match e {
            poodle_fs::Error::ConfigParse { path, message, .. } => {
                Error::ServiceDecode { path, message }
            }
            other => Error::Fs(other),
        })?;

        validate_service(&service)?;
        tracing::debug!(path = %path, id = %service.main.id, "Loaded service");
        Ok(service)
    }

    /// Load every definition under `dir`, sorted by file path.
    pub fn load_dir(&self, dir: &NormalizedPath) -> Result<Vec<(NormalizedPath, Service)>> {
        let files = list_files(dir, Some(SERVICE_EXTENSION))?;
        let mut services = Vec::with_capacity(files.len());

        for file in files {
            let service = self.load_file(&file.absolute)?;
            services.push((file.absolute, service));
        }

        Ok(services)
    }
}

/// One callable endpoint in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// `"<Service.ID> - <Endpoint.ID>"`
    pub key: String,
    pub service_id: String,
    pub service_name: String,
    pub endpoint_name: String,
    pub method: String,
}

/// All services of a directory, indexed by endpoint key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<(NormalizedPath, Service)>,
    entries: Vec<CatalogEntry>,
    by_key: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a services directory.
    pub fn load_dir(dir: &NormalizedPath, sort: SortBy) -> Result<Self> {
        let services = ServiceLoader::new().load_dir(dir)?;
        Ok(Self::from_services(services, sort))
    }

    /// Load a catalog made of a single definition file.
    pub fn load_file(path: &NormalizedPath) -> Result<Self> {
        let service = ServiceLoader::new().load_file(path)?;
        Ok(Self::from_services(vec![(path.clone(), service)], SortBy::Key))
    }

    pub fn from_services(services: Vec<(NormalizedPath, Service)>, sort: SortBy) -> Self {
        let mut entries = Vec::new();
        let mut by_key = HashMap::new();

        for (index, (_, service)) in services.iter().enumerate() {
            for endpoint in &service.endpoints {
                let key = service.endpoint_key(endpoint);
                if by_key.insert(key.clone(), index).is_some() {
                    tracing::warn!(key = %key, "Endpoint key defined by more than one service, last one wins");
                }
                entries.push(CatalogEntry {
                    key,
                    service_id: service.main.id.clone(),
                    service_name: service.main.name.clone(),
                    endpoint_name: endpoint.name.clone(),
                    method: endpoint.method.to_uppercase(),
                });
            }
        }

        match sort {
            SortBy::Key => entries.sort_by(|a, b| a.key.cmp(&b.key)),
            SortBy::Name => entries.sort_by(|a, b| {
                (&a.service_name, &a.endpoint_name, &a.key)
                    .cmp(&(&b.service_name, &b.endpoint_name, &b.key))
            }),
        }

        Self {
            services,
            entries,
            by_key,
        }
    }

    /// Callable endpoints in listing order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }

    /// Loaded services with the file each came from.
    pub fn services(&self) -> &[(NormalizedPath, Service)] {
        &self.services
    }

    /// The service owning the endpoint addressed by `key`.
    pub fn service_for(&self, key: &str) -> Option<&Service> {
        self.by_key.get(key).map(|&index| &self.services[index].1)
    }

    /// Find a service and its file by service id.
    pub fn service_by_id(&self, id: &str) -> Option<&(NormalizedPath, Service)> {
        self.services.iter().find(|(_, s)| s.main.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
