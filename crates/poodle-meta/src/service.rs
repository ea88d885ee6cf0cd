//! Service definition files
//!
//! One TOML file per service:
//!
//! ```toml
//! [Main]
//! id = "httpbin"
//! service_url = "https://httpbin.org"
//! timeout = "30s"
//!
//! [Security]
//! scheme = "bearer"
//! [Security.Bearer]
//! header = ["Authorization", "Bearer {$token}"]
//!
//! [[Endpoint]]
//! id = "get_ip"
//! method = "get"
//! uri = "/ip"
//! ```
//!
//! The security section keeps a string `scheme` tag on disk but is decoded
//! into the [`Security`] variant, so a service can never carry credentials
//! for a scheme it does not use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::method::HttpMethod;
use crate::{Error, Result};

/// Build the global addressing key of an endpoint.
pub fn endpoint_key(service_id: &str, endpoint_id: &str) -> String {
    format!("{} - {}", service_id, endpoint_id)
}

/// A named API surface: base URL, auth scheme and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "Main")]
    pub main: Main,

    #[serde(rename = "Security", default)]
    pub security: Security,

    #[serde(rename = "Endpoint", default)]
    pub endpoints: Vec<Endpoint>,
}

/// The `[Main]` section of a service definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Main {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_timeout")]
    pub timeout: String,
    #[serde(default)]
    pub service_url: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

fn default_timeout() -> String {
    "30s".to_string()
}

impl Main {
    /// Parse the `"<integer>s"` timeout.
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout(&self.timeout)
    }
}

/// Parse a timeout of the form `"<integer>s"`.
pub fn parse_timeout(value: &str) -> Result<Duration> {
    let invalid = || Error::InvalidTimeout {
        value: value.to_string(),
    };

    let seconds = value.trim().strip_suffix('s').ok_or_else(invalid)?;
    let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
    Ok(Duration::from_secs(seconds))
}

/// One templated HTTP operation within a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub method: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub parameters: Vec<(String, String)>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub body: String,
}

impl Endpoint {
    /// The declared method, checked against the supported set.
    pub fn http_method(&self, service_id: &str) -> Result<HttpMethod> {
        self.method
            .parse()
            .map_err(|_| Error::UnsupportedMethod {
                service: service_id.to_string(),
                endpoint: self.id.clone(),
                method: self.method.clone(),
            })
    }
}

/// A header whose name and value may both contain placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    pub name: String,
    pub value: String,
}

impl HeaderTemplate {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    fn from_pair(scheme: &str, pair: Vec<String>) -> Result<Self> {
        match <[String; 2]>::try_from(pair) {
            Ok([name, value]) => Ok(Self { name, value }),
            Err(pair) => Err(Error::InvalidSecurity {
                message: format!(
                    "{} header must be [name, value], got {} item(s)",
                    scheme,
                    pair.len()
                ),
            }),
        }
    }

    fn to_pair(&self) -> Vec<String> {
        vec![self.name.clone(), self.value.clone()]
    }
}

/// Authentication scheme of a service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SecurityFile", into = "SecurityFile")]
pub enum Security {
    #[default]
    None,
    /// `header.value` contains the literal `base64(username:password)`,
    /// replaced by the encoded credentials at call time.
    Basic {
        username: String,
        password: String,
        header: HeaderTemplate,
    },
    ApiKey {
        header: HeaderTemplate,
    },
    Bearer {
        header: HeaderTemplate,
    },
}

impl Security {
    pub fn scheme(&self) -> &'static str {
        match self {
            Security::None => "none",
            Security::Basic { .. } => "basic",
            Security::ApiKey { .. } => "api_key",
            Security::Bearer { .. } => "bearer",
        }
    }
}

/// On-disk shape of the `[Security]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SecurityFile {
    #[serde(default)]
    scheme: String,
    #[serde(rename = "Basic", default, skip_serializing_if = "Option::is_none")]
    basic: Option<BasicFile>,
    #[serde(rename = "ApiKey", default, skip_serializing_if = "Option::is_none")]
    api_key: Option<HeaderFile>,
    #[serde(rename = "Bearer", default, skip_serializing_if = "Option::is_none")]
    bearer: Option<HeaderFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BasicFile {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    header: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HeaderFile {
    #[serde(default)]
    header: Vec<String>,
}

impl TryFrom<SecurityFile> for Security {
    type Error = Error;

    fn try_from(file: SecurityFile) -> Result<Self> {
        let missing = |table: &str| Error::InvalidSecurity {
            message: format!("scheme '{}' requires a [Security.{}] table", file.scheme, table),
        };

        match file.scheme.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Security::None),
            "basic" => {
                let basic = file.basic.clone().ok_or_else(|| missing("Basic"))?;
                Ok(Security::Basic {
                    username: basic.username,
                    password: basic.password,
                    header: HeaderTemplate::from_pair("Basic", basic.header)?,
                })
            }
            "api_key" | "api-key" | "apikey" => {
                let api_key = file.api_key.clone().ok_or_else(|| missing("ApiKey"))?;
                Ok(Security::ApiKey {
                    header: HeaderTemplate::from_pair("ApiKey", api_key.header)?,
                })
            }
            "bearer" => {
                let bearer = file.bearer.clone().ok_or_else(|| missing("Bearer"))?;
                Ok(Security::Bearer {
                    header: HeaderTemplate::from_pair("Bearer", bearer.header)?,
                })
            }
            other => Err(Error::InvalidSecurity {
                message: format!("unknown scheme '{}'", other),
            }),
        }
    }
}

impl From<Security> for SecurityFile {
    fn from(security: Security) -> Self {
        let scheme = security.scheme().to_string();
        match security {
            Security::None => SecurityFile {
                scheme,
                ..Default::default()
            },
            Security::Basic {
                username,
                password,
                header,
            } => SecurityFile {
                scheme,
                basic: Some(BasicFile {
                    username,
                    password,
                    header: header.to_pair(),
                }),
                ..Default::default()
            },
            Security::ApiKey { header } => SecurityFile {
                scheme,
                api_key: Some(HeaderFile {
                    header: header.to_pair(),
                }),
                ..Default::default()
            },
            Security::Bearer { header } => SecurityFile {
                scheme,
                bearer: Some(HeaderFile {
                    header: header.to_pair(),
                }),
                ..Default::default()
            },
        }
    }
}

impl Service {
    /// Starter definition written by `poodle new`.
    ///
    /// Targets httpbin so the freshly created service can be called right
    /// away; it exercises required fields, optional fields with defaults and
    /// basic auth.
    pub fn template(id: &str) -> Self {
        Service {
            main: Main {
                id: id.to_string(),
                name: id.to_string(),
                description: format!("{} service", id),
                timeout: default_timeout(),
                service_url: "https://httpbin.org".to_string(),
                headers: vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("Accept".to_string(), "application/json".to_string()),
                ],
            },
            security: Security::Basic {
                username: "{$auth_username:admin}".to_string(),
                password: "{$auth_password:secret}".to_string(),
                header: HeaderTemplate::new("Authorization", "Basic base64(username:password)"),
            },
            endpoints: vec![
                Endpoint {
                    id: "post_anything".to_string(),
                    name: "Post Anything".to_string(),
                    description: "Echo a JSON body back".to_string(),
                    method: "post".to_string(),
                    headers: vec![("X-Request-Type".to_string(), "{$type:default}".to_string())],
                    parameters: vec![("verbose".to_string(), "{$verbose:false}".to_string())],
                    uri: "/anything/{$id}".to_string(),
                    body: r#"{"name": "{$name}"}"#.to_string(),
                },
                Endpoint {
                    id: "get_ip".to_string(),
                    name: "Get IP".to_string(),
                    description: "Return the caller's origin IP".to_string(),
                    method: "get".to_string(),
                    headers: Vec::new(),
                    parameters: Vec::new(),
                    uri: "/ip".to_string(),
                    body: String::new(),
                },
            ],
        }
    }

    /// Addressing key of one of this service's endpoints.
    pub fn endpoint_key(&self, endpoint: &Endpoint) -> String {
        endpoint_key(&self.main.id, &endpoint.id)
    }

    /// Find the endpoint addressed by `"<Service.ID> - <Endpoint.ID>"`.
    pub fn find_endpoint(&self, key: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| self.endpoint_key(e) == key)
    }
}
