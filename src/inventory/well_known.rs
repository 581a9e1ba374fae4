use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use log::debug;
use std::path::Path;

use super::{ApplicationInstance, DiscoveryConfig};
use crate::runtime::Runtime;

/// Look for distribution layouts at the configured well-known roots.
///
/// A root qualifies when it holds the launcher file and a `bin` directory
/// containing at least one file matching the executable pattern. Each
/// qualifying root yields exactly one instance.
#[tracing::instrument(skip(runtime, config))]
pub fn scan_well_known_dirs<R: Runtime>(
    runtime: &R,
    config: &DiscoveryConfig,
) -> Result<Vec<ApplicationInstance>> {
    let pattern = Pattern::new(&config.executable_pattern)
        .with_context(|| format!("Invalid executable pattern {:?}", config.executable_pattern))?;

    let instances = config
        .well_known_roots
        .iter()
        .filter(|root| has_application(runtime, root, &config.launcher, &pattern))
        .map(|root| {
            ApplicationInstance::direct(&config.product, &config.distribution, root.clone())
        })
        .collect();

    Ok(instances)
}

fn has_application<R: Runtime>(runtime: &R, root: &Path, launcher: &str, pattern: &Pattern) -> bool {
    if !runtime.exists(&root.join(launcher)) {
        debug!("No {} in {:?}", launcher, root);
        return false;
    }

    let bin_dir = root.join("bin");
    if !runtime.is_dir(&bin_dir) {
        debug!("No bin directory in {:?}", root);
        return false;
    }

    let entries = match runtime.read_dir(&bin_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Failed to list {:?}: {}", bin_dir, e);
            return false;
        }
    };

    // Windows file names are case-insensitive
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let found = entries.iter().find(|entry| {
        entry
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches_with(name, options))
    });

    match found {
        Some(executable) => {
            debug!("Found {:?}", executable);
            true
        }
        None => false,
    }
}
