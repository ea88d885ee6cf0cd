//! Shared fakes for poodle-core integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use poodle_core::{
    AuthStatus, Blob, BlobResponse, Error, HttpRequest, HttpResponse, RemoteStore, ReplicaStore,
    Result, Transport,
};

/// Transport that records requests and answers from a queue.
#[derive(Default)]
pub struct RecordingTransport {
    pub requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<HttpResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: HttpResponse) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    pub fn sent(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests.borrow().last().cloned().expect("no request sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, "")))
    }
}

fn rfc3339(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap()
        .to_rfc3339()
}

/// In-memory remote store with a manual clock.
pub struct MemoryStore {
    blobs: RefCell<BTreeMap<String, BlobResponse>>,
    pub calls: RefCell<Vec<String>>,
    scopes: String,
    next_id: Cell<u32>,
    now: Cell<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_scopes("gist, repo")
    }

    pub fn with_scopes(scopes: &str) -> Self {
        Self {
            blobs: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            scopes: scopes.to_string(),
            next_id: Cell::new(1),
            now: Cell::new(1_000),
        }
    }

    /// Set the time stamped on the next create/update.
    pub fn set_now(&self, now: i64) {
        self.now.set(now);
    }

    /// Store `replica` as the payload of blob `id`, updated at `updated_at`.
    pub fn seed(&self, id: &str, replica: &ReplicaStore, updated_at: i64) {
        let blob = Blob::with_payload(false, replica).unwrap();
        self.blobs.borrow_mut().insert(
            id.to_string(),
            BlobResponse {
                id: id.to_string(),
                description: blob.description,
                public: false,
                created_at: rfc3339(updated_at),
                updated_at: rfc3339(updated_at),
                files: blob.files,
            },
        );
    }

    pub fn replica(&self, id: &str) -> ReplicaStore {
        self.blobs.borrow()[id].replica().unwrap()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl RemoteStore for MemoryStore {
    fn auth_check(&self) -> Result<AuthStatus> {
        self.record("auth_check");
        Ok(AuthStatus {
            scopes: self.scopes.clone(),
            valid: self.scopes.split(',').any(|s| s.trim() == "gist"),
        })
    }

    fn create(&self, blob: &Blob) -> Result<BlobResponse> {
        self.record("create");
        let id = format!("blob{}", self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let response = BlobResponse {
            id: id.clone(),
            description: blob.description.clone(),
            public: blob.public,
            created_at: rfc3339(self.now.get()),
            updated_at: rfc3339(self.now.get()),
            files: blob.files.clone(),
        };
        self.blobs.borrow_mut().insert(id, response.clone());
        Ok(response)
    }

    fn get(&self, id: &str) -> Result<BlobResponse> {
        self.record("get");
        self.blobs
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::RemoteNotFound { id: id.to_string() })
    }

    fn update(&self, id: &str, blob: &Blob) -> Result<BlobResponse> {
        self.record("update");
        let mut blobs = self.blobs.borrow_mut();
        let existing = blobs
            .get_mut(id)
            .ok_or_else(|| Error::RemoteNotFound { id: id.to_string() })?;
        existing.files = blob.files.clone();
        existing.updated_at = rfc3339(self.now.get());
        Ok(existing.clone())
    }
}

/// Write `content` at `dir/relative` with the given modification time.
pub fn write_file(dir: &Path, relative: &str, content: &str, modified: i64) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    let when = DateTime::<Utc>::from_timestamp(modified, 0).unwrap();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(when.into())
        .unwrap();
}

pub fn mtime(path: &Path) -> i64 {
    DateTime::<Utc>::from(fs::metadata(path).unwrap().modified().unwrap()).timestamp()
}
