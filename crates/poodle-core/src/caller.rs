//! Building and dispatching endpoint requests
//!
//! Header precedence, lowest to highest:
//!
//! 1. service-level `headers`
//! 2. the security scheme header
//! 3. endpoint-level `headers`
//!
//! Same-named headers are replaced case-insensitively.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use poodle_meta::{Endpoint, Security, Service};

use crate::http::{HttpRequest, HttpResponse, Transport, set_header};
use crate::template::{Fields, extract_fields, merge_fields, resolve_template};
use crate::{Error, Result};

/// Literal replaced by the encoded credentials in a basic auth header.
pub const BASIC_CREDENTIALS: &str = "base64(username:password)";

/// Builds requests for the endpoints of a service and sends them.
pub struct Caller<T> {
    transport: T,
}

impl<T: Transport> Caller<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Every field the endpoint addressed by `key` needs, including the
    /// ones referenced by the service's security scheme.
    pub fn fields(&self, service: &Service, key: &str) -> Result<Fields> {
        let endpoint = find_endpoint(service, key)?;
        let mut fields = Fields::new();

        let security = security_pairs(&service.security);
        for (name, value) in service.main.headers.iter().chain(&security) {
            merge_fields(&mut fields, extract_fields(name));
            merge_fields(&mut fields, extract_fields(value));
        }
        if let Security::Basic {
            username, password, ..
        } = &service.security
        {
            merge_fields(&mut fields, extract_fields(username));
            merge_fields(&mut fields, extract_fields(password));
        }

        merge_fields(&mut fields, extract_fields(&endpoint.uri));
        for (name, value) in endpoint.headers.iter().chain(&endpoint.parameters) {
            merge_fields(&mut fields, extract_fields(name));
            merge_fields(&mut fields, extract_fields(value));
        }
        merge_fields(&mut fields, extract_fields(&endpoint.body));

        Ok(fields)
    }

    /// Assemble the request for `key` without sending it.
    pub fn build(&self, service: &Service, key: &str, fields: &Fields) -> Result<HttpRequest> {
        let endpoint = find_endpoint(service, key)?;
        let method = endpoint.http_method(&service.main.id)?;
        let timeout = service.main.timeout()?;

        let mut headers = Vec::new();
        for (name, value) in &service.main.headers {
            set_header(
                &mut headers,
                resolve_template(name, fields)?,
                resolve_template(value, fields)?,
            );
        }
        if let Some((name, value)) = security_header(&service.security, fields)? {
            set_header(&mut headers, name, value);
        }
        for (name, value) in &endpoint.headers {
            set_header(
                &mut headers,
                resolve_template(name, fields)?,
                resolve_template(value, fields)?,
            );
        }

        let query = endpoint
            .parameters
            .iter()
            .map(|(name, value)| Ok((resolve_template(name, fields)?, resolve_template(value, fields)?)))
            .collect::<Result<Vec<_>>>()?;

        let url = join_url(&service.main.service_url, &resolve_template(&endpoint.uri, fields)?);
        let body = resolve_template(&endpoint.body, fields)?;

        Ok(HttpRequest {
            method,
            url,
            headers,
            query,
            body: (!body.is_empty()).then_some(body),
            timeout: Some(timeout),
        })
    }

    /// Build the request for `key` and send it once.
    ///
    /// Nothing is sent when the endpoint is unknown or a field fails to
    /// resolve.
    pub fn call(&self, service: &Service, key: &str, fields: &Fields) -> Result<HttpResponse> {
        let request = self.build(service, key, fields)?;
        tracing::info!(method = %request.method, url = %request.url, "Calling endpoint");
        self.transport.send(&request)
    }
}

fn find_endpoint<'a>(service: &'a Service, key: &str) -> Result<&'a Endpoint> {
    service.find_endpoint(key).ok_or_else(|| Error::EndpointNotFound {
        key: key.to_string(),
    })
}

fn security_pairs(security: &Security) -> Vec<(String, String)> {
    match security {
        Security::None => Vec::new(),
        Security::Basic { header, .. } | Security::ApiKey { header } | Security::Bearer { header } => {
            vec![(header.name.clone(), header.value.clone())]
        }
    }
}

/// Resolve the header a security scheme contributes, if any.
pub fn security_header(security: &Security, fields: &Fields) -> Result<Option<(String, String)>> {
    match security {
        Security::None => Ok(None),
        Security::Basic {
            username,
            password,
            header,
        } => {
            let credentials = format!(
                "{}:{}",
                resolve_template(username, fields)?,
                resolve_template(password, fields)?
            );
            let encoded = STANDARD.encode(credentials);
            let value = resolve_template(&header.value.replace(BASIC_CREDENTIALS, &encoded), fields)?;
            Ok(Some((resolve_template(&header.name, fields)?, value)))
        }
        Security::ApiKey { header } | Security::Bearer { header } => Ok(Some((
            resolve_template(&header.name, fields)?,
            resolve_template(&header.value, fields)?,
        ))),
    }
}

/// Join a base URL and a URI with exactly one `/` between them.
pub fn join_url(base: &str, uri: &str) -> String {
    if uri.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        uri.trim_start_matches('/')
    )
}
