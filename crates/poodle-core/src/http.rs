//! HTTP requests and responses as plain data
//!
//! The request builder and the gist client produce [`HttpRequest`] values and
//! read [`HttpResponse`] values; only a [`Transport`] touches the network.
//! Tests swap in a recording transport.

use std::fmt::Write as _;
use std::time::Duration;

use poodle_meta::HttpMethod;

use crate::{Error, Result};

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    /// `None` means no client-side timeout
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Value of the first header named `name`, case-insensitive.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the first header named `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// `"200 OK"`, or just the code when the reason is unknown.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }

    /// Status line, headers and body for display. JSON bodies are re-indented.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.status_line());
        for (name, value) in &self.headers {
            let _ = writeln!(out, "{}: {}", name, value);
        }
        out.push('\n');

        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(json) if !self.body.trim().is_empty() => {
                out.push_str(&serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.body.clone()));
            }
            _ => out.push_str(&self.body),
        }
        out
    }
}

/// Set `name` to `value`, replacing any header of the same name
/// (case-insensitive) in place.
pub fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    match headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
        Some(existing) => *existing = (name, value),
        None => headers.push((name, value)),
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Executes one HTTP request.
pub trait Transport {
    /// Send `request` and return whatever the server answered.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// network-level failures are `Error::Transport`.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Blocking transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("poodle/", env!("CARGO_PKG_VERSION")))
            .timeout(None)
            .build()
            .map_err(|e| Error::transport(None, e.to_string()))?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self
            .client
            .request(to_reqwest(request.method), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .map_err(|e| Error::transport(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .map_err(|e| Error::transport(Some(status.as_u16()), e.to_string()))?;

        tracing::debug!(status = status.as_u16(), "Received response");

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut headers = vec![("Accept".to_string(), "text/plain".to_string())];
        set_header(&mut headers, "accept".into(), "application/json".into());
        set_header(&mut headers, "X-Trace".into(), "1".into());
        assert_eq!(
            headers,
            vec![
                ("accept".to_string(), "application/json".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_pretty_reindents_json() {
        let mut response = HttpResponse::new(200, r#"{"origin":"1.2.3.4"}"#)
            .with_header("Content-Type", "application/json");
        response.reason = "OK".into();

        let pretty = response.pretty();
        assert!(pretty.starts_with("200 OK\nContent-Type: application/json\n\n"));
        assert!(pretty.contains("{\n  \"origin\": \"1.2.3.4\"\n}"));
    }

    #[test]
    fn test_pretty_keeps_plain_text() {
        let response = HttpResponse::new(404, "not here");
        assert_eq!(response.pretty(), "404\n\nnot here");
    }

    #[test]
    fn test_response_header_lookup() {
        let response = HttpResponse::new(200, "").with_header("X-OAuth-Scopes", "gist, repo");
        assert_eq!(response.header("x-oauth-scopes"), Some("gist, repo"));
        assert_eq!(response.header("missing"), None);
    }
}
