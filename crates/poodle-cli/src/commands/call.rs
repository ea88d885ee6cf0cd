//! The call command

use std::path::Path;

use colored::Colorize;
use poodle_core::{Caller, HttpRequest, HttpResponse, ReqwestTransport};
use poodle_fs::NormalizedPath;
use poodle_meta::{Catalog, Configs, Security};

use crate::context::Context;
use crate::error::Result;
use crate::interactive;

/// The catalog to call from and the configs used for picking.
///
/// An existing `from` file wins over the services directory, and then the
/// config file is optional.
pub(crate) fn load_catalog(ctx: &Context, from: &Path) -> Result<(Catalog, Configs)> {
    let from = NormalizedPath::new(from);
    if from.is_file() {
        tracing::debug!(path = %from, "Calling from a single definition file");
        let configs = Configs::load_or_default(&ctx.config_path)?;
        return Ok((Catalog::load_file(&from)?, configs));
    }

    let configs = ctx.configs()?;
    let catalog = Catalog::load_dir(&configs.services_dir(), configs.general.sortby)?;
    Ok((catalog, configs))
}

const MASK: &str = "********";

/// Headers that carry credentials: the standard auth headers and the one
/// the service's security scheme sets.
fn is_credential_header(name: &str, security: &Security) -> bool {
    let scheme_header = match security {
        Security::None => None,
        Security::Basic { header, .. } | Security::ApiKey { header } | Security::Bearer { header } => {
            Some(header.name.as_str())
        }
    };
    name.eq_ignore_ascii_case("authorization")
        || name.eq_ignore_ascii_case("proxy-authorization")
        || scheme_header.is_some_and(|h| name.eq_ignore_ascii_case(h))
}

/// Request summary for `--verbose`, with credential values masked.
pub(crate) fn format_request(request: &HttpRequest, security: &Security) -> String {
    let mut lines = vec![format!("{} {}", request.method.as_str().green().bold(), request.url)];
    for (name, value) in &request.query {
        lines.push(format!("   {} {}={}", "?".dimmed(), name, value));
    }
    for (name, value) in &request.headers {
        let value = if is_credential_header(name, security) {
            MASK
        } else {
            value.as_str()
        };
        lines.push(format!("   {}: {}", name.dimmed(), value));
    }
    lines.join("\n")
}

fn print_response(response: &HttpResponse) {
    let pretty = response.pretty();
    let (status, rest) = pretty.split_once('\n').unwrap_or((pretty.as_str(), ""));
    if response.is_success() {
        println!("{}", status.green().bold());
    } else {
        println!("{}", status.red().bold());
    }
    println!("{}", rest);
}

/// Run the call command
pub fn run_call(ctx: &Context, endpoint: Option<String>, from: &Path) -> Result<()> {
    let (catalog, configs) = load_catalog(ctx, from)?;

    let key = match endpoint {
        Some(key) => key,
        None => interactive::pick("Select an endpoint", &catalog.keys(), &configs.general.selectcmd)?,
    };
    let service = catalog
        .service_for(&key)
        .ok_or_else(|| poodle_core::Error::EndpointNotFound { key: key.clone() })?;

    let caller = Caller::new(ReqwestTransport::new()?);
    let fields = interactive::prompt_fields(caller.fields(service, &key)?)?;

    if ctx.verbose {
        let request = caller.build(service, &key, &fields)?;
        println!("{}\n", format_request(&request, &service.security));
    }

    let response = caller.call(service, &key, &fields)?;
    print_response(&response);
    Ok(())
}
