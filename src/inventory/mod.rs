//! Inventory of installed QGIS instances.
//!
//! Three sources are consulted, each through a function returning its own
//! records:
//!
//! - `well_known` - distribution layouts at fixed roots (`C:\OSGeo4W64`, ...)
//! - `uninstall` - the `Uninstall` registry key across three scopes
//! - `installer_folders` - install paths joined onto uninstall records by
//!   path suffix
//!
//! [`discover`] concatenates them in that order.

mod installer_folders;
mod instance;
mod uninstall;
mod well_known;

use anyhow::Result;
use log::info;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::registry::Registry;
use crate::runtime::Runtime;

pub use installer_folders::{
    INSTALLER_FOLDERS_SCOPE, installer_folder_names, match_install_path, resolve_install_paths,
};
pub use instance::{ApplicationInstance, InstallLocation, path_suffix_key};
pub use uninstall::{UNINSTALL_SCOPES, scan_uninstall, scan_uninstall_scope};
pub use well_known::scan_well_known_dirs;

pub const PRODUCT_NAME: &str = "QGIS";
pub const DISTRIBUTION_NAME: &str = "OSGeo4W";
pub const LAUNCHER_FILE_NAME: &str = "OSGeo4W.bat";
pub const EXECUTABLE_PATTERN: &str = "qgis*.exe";
pub const WELL_KNOWN_ROOTS: [&str; 2] = [r"C:\OSGeo4W64", r"C:\OSGeo4W"];

/// What to look for, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Token that names and publishers must contain.
    pub product: String,
    /// Publisher given to records found at well-known roots.
    pub distribution: String,
    /// File that must exist at a well-known root.
    pub launcher: String,
    /// Glob matched against file names in `<root>\bin`.
    pub executable_pattern: String,
    pub well_known_roots: Vec<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            product: PRODUCT_NAME.to_string(),
            distribution: DISTRIBUTION_NAME.to_string(),
            launcher: LAUNCHER_FILE_NAME.to_string(),
            executable_pattern: EXECUTABLE_PATTERN.to_string(),
            well_known_roots: WELL_KNOWN_ROOTS.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Build the inventory: well-known roots first, then uninstall records in
/// scope order with their Installer Folders paths resolved.
///
/// Finding nothing is not an error. Failing to open one of the registry
/// keys is.
#[tracing::instrument(skip(runtime, registry))]
pub fn discover<R: Runtime, G: Registry>(
    runtime: &R,
    registry: &G,
    config: &DiscoveryConfig,
) -> Result<Vec<ApplicationInstance>> {
    let mut instances = scan_well_known_dirs(runtime, config)?;
    info!("Found {} instance(s) at well-known roots", instances.len());

    let registered = scan_uninstall(registry, &config.product)?;
    let folder_names = installer_folder_names(registry, &config.product)?;
    instances.extend(resolve_install_paths(registered, &folder_names));

    info!("Discovered {} instance(s)", instances.len());
    Ok(instances)
}

/// Drop records identical to an earlier one in name, version, publisher and
/// install path, keeping the first occurrence.
pub fn dedup(instances: Vec<ApplicationInstance>) -> Vec<ApplicationInstance> {
    let mut seen = HashSet::new();
    instances
        .into_iter()
        .filter(|instance| {
            seen.insert((
                instance.display_name().to_string(),
                instance.version().map(str::to_string),
                instance.publisher().map(str::to_string),
                instance.install_path().map(|p| p.to_path_buf()),
            ))
        })
        .collect()
}
