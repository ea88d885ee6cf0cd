//! Command implementations for poodle-cli

pub mod call;
pub mod configure;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod sync;

pub use call::run_call;
pub use configure::run_configure;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::run_list;
pub use new::run_new;
pub use sync::{run_sync, run_sync_status};

use poodle_fs::{NormalizedPath, list_files};
use poodle_meta::Configs;

use crate::error::{CliError, Result};
use crate::interactive;

/// Ids of all service definition files, derived from their paths.
///
/// Files are listed without decoding them so that a broken definition can
/// still be edited or deleted.
pub(crate) fn service_ids(configs: &Configs) -> Result<Vec<String>> {
    let files = list_files(&configs.services_dir(), Some("toml"))?;
    Ok(files
        .into_iter()
        .map(|f| f.relative.without_extension().as_str().to_string())
        .collect())
}

/// Resolve the service id given on the command line, or pick one.
pub(crate) fn choose_service(configs: &Configs, id: Option<String>) -> Result<(String, NormalizedPath)> {
    let id = match id {
        Some(id) => id,
        None => interactive::pick(
            "Select a service",
            &service_ids(configs)?,
            &configs.general.selectcmd,
        )?,
    };

    let path = configs.service_path(&id);
    if !path.is_file() {
        return Err(CliError::user(format!(
            "Service '{}' not found at {}",
            id, path
        )));
    }
    Ok((id, path))
}

/// Key of a service file inside the synchronized replica.
pub(crate) fn replica_key(configs: &Configs, path: &NormalizedPath) -> Option<String> {
    path.strip_prefix(&configs.services_dir())
        .map(|p| p.as_str().to_string())
}
