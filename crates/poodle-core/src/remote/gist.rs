//! GitHub gist backend

use poodle_meta::HttpMethod;
use serde::de::DeserializeOwned;

use super::{AuthStatus, Blob, BlobResponse, RemoteStore};
use crate::http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::{Error, Result};

/// GitHub REST API root.
pub const GITHUB_API: &str = "https://api.github.com";

/// Scope a token needs to read and write gists.
const GIST_SCOPE: &str = "gist";

/// Gist client authenticated with a personal access token.
pub struct GistClient<T = ReqwestTransport> {
    transport: T,
    api_url: String,
    username: String,
    token: String,
}

impl GistClient<ReqwestTransport> {
    /// Client for `api.github.com` over the blocking HTTP transport.
    pub fn github(username: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self::new(ReqwestTransport::new()?, GITHUB_API, username, token))
    }
}

impl<T: Transport> GistClient<T> {
    pub fn new(
        transport: T,
        api_url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            token: token.into(),
        }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.api_url, path))
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "poodle")
    }

    fn send(&self, request: HttpRequest, expected: u16) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Gist request");
        let response = self.transport.send(&request)?;
        if response.status != expected {
            return Err(Error::transport(
                Some(response.status),
                format!("Invalid status code {}", response.status),
            ));
        }
        Ok(response)
    }

    fn with_json(&self, request: HttpRequest, blob: &Blob) -> Result<HttpRequest> {
        Ok(request
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(blob)?))
    }
}

fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D> {
    serde_json::from_str(&response.body).map_err(|e| Error::PayloadDecode {
        message: e.to_string(),
    })
}

impl<T: Transport> RemoteStore for GistClient<T> {
    fn auth_check(&self) -> Result<AuthStatus> {
        let request = self.request(HttpMethod::Get, &format!("/users/{}", self.username));
        let response = self.transport.send(&request)?;

        if response.status == 401 {
            return Ok(AuthStatus {
                scopes: String::new(),
                valid: false,
            });
        }
        if !response.is_success() {
            return Err(Error::transport(
                Some(response.status),
                format!("Invalid status code {}", response.status),
            ));
        }

        let scopes = response.header("X-OAuth-Scopes").unwrap_or_default().to_string();
        let valid = scopes.split(',').any(|scope| scope.trim() == GIST_SCOPE);
        tracing::debug!(username = %self.username, scopes = %scopes, valid, "Checked gist credentials");
        Ok(AuthStatus { scopes, valid })
    }

    fn create(&self, blob: &Blob) -> Result<BlobResponse> {
        let request = self.with_json(self.request(HttpMethod::Post, "/gists"), blob)?;
        let response = self.send(request, 201)?;
        let created: BlobResponse = decode(&response)?;
        tracing::info!(id = %created.id, "Created gist");
        Ok(created)
    }

    fn get(&self, id: &str) -> Result<BlobResponse> {
        let request = self.request(HttpMethod::Get, &format!("/gists/{}", id));
        match self.send(request, 200) {
            Err(Error::Transport {
                status: Some(404), ..
            }) => Err(Error::RemoteNotFound { id: id.to_string() }),
            Err(e) => Err(e),
            Ok(response) => decode(&response),
        }
    }

    fn update(&self, id: &str, blob: &Blob) -> Result<BlobResponse> {
        let request = self.with_json(self.request(HttpMethod::Patch, &format!("/gists/{}", id)), blob)?;
        let response = self.send(request, 200)?;
        tracing::info!(id = %id, "Updated gist");
        decode(&response)
    }
}
