use anyhow::Result;
use std::io::Write;

use super::config::Config;
use super::install::UNSUPPORTED_PLATFORM;
use crate::{inventory, registry::Registry, runtime::Runtime};

/// Print the discovered installations, one summary line each or as JSON.
#[tracing::instrument(skip(config, out))]
pub fn list<R: Runtime, G: Registry, W: Write>(
    config: &Config<R, G>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    if !config.runtime.is_windows() {
        writeln!(out, "{}", UNSUPPORTED_PLATFORM)?;
        return Ok(());
    }

    let mut instances = inventory::discover(&config.runtime, &config.registry, &config.discovery)?;
    if config.dedup {
        instances = inventory::dedup(instances);
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&instances)?)?;
        return Ok(());
    }

    if instances.is_empty() {
        writeln!(out, "No QGIS installation found.")?;
        return Ok(());
    }

    for instance in &instances {
        writeln!(out, "{}", instance.summary())?;
    }
    Ok(())
}
