//! Installation driver.
//!
//! Stages a requirements file and a generated batch script in a temporary
//! directory, then hands the script to the installation's `OSGeo4W.bat`
//! shell wrapper, which runs it with the bundled Python interpreter.

pub mod template;

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::inventory::{ApplicationInstance, LAUNCHER_FILE_NAME};
use crate::runtime::{CurrentDirGuard, Runtime};

pub const REQUIREMENTS_FILE_NAME: &str = "requirements.txt";
pub const INSTALL_SCRIPT_FILE_NAME: &str = "pip-install.bat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Wrapper script, relative to the installation root.
    pub shell_wrapper: String,
    /// Requirements file to stage instead of the bundled one.
    pub requirements: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            shell_wrapper: LAUNCHER_FILE_NAME.to_string(),
            requirements: None,
        }
    }
}

/// What happened when the shell wrapper ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub install_path: PathBuf,
    /// `None` when the process ended without an exit code.
    pub exit_code: Option<i32>,
}

impl InstallReport {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Install the configured packages into `instance`.
///
/// Files are staged relative to the caller's working directory. The process
/// working directory is then switched to the installation root while the
/// wrapper runs, and restored on every path out of it. The wrapper's exit
/// code is reported, never turned into an error.
#[tracing::instrument(skip(runtime, instance), fields(instance = %instance))]
pub fn install<R: Runtime>(
    runtime: &R,
    instance: &ApplicationInstance,
    config: &DriverConfig,
) -> Result<InstallReport> {
    let install_path = instance
        .install_path()
        .ok_or_else(|| {
            anyhow!(
                "No installation path known for {}",
                instance.display_name()
            )
        })?
        .to_path_buf();

    let staging = tempfile::Builder::new()
        .prefix("qgis-pip-")
        .tempdir()
        .context("Failed to create staging directory")?;
    debug!("Staging in {:?}", staging.path());

    let requirements = stage_requirements(runtime, staging.path(), config)?;
    let script = staging.path().join(INSTALL_SCRIPT_FILE_NAME);
    let content = template::render_install_script(&requirements)?;
    runtime.write(&script, content.as_bytes())?;

    let cwd = CurrentDirGuard::enter(runtime, &install_path)?;
    let wrapper = install_path.join(&config.shell_wrapper);
    info!("Running {:?} {:?}", wrapper, script);
    let exit_code = runtime.run(&wrapper, &script, &install_path)?;

    match exit_code {
        Some(0) => info!("{} finished successfully", config.shell_wrapper),
        Some(code) => warn!("{} exited with code {}", config.shell_wrapper, code),
        None => warn!("{} was terminated without an exit code", config.shell_wrapper),
    }

    drop(cwd);
    if let Err(e) = staging.close() {
        warn!("Failed to remove staging directory: {}", e);
    }

    Ok(InstallReport {
        install_path,
        exit_code,
    })
}

fn stage_requirements<R: Runtime>(runtime: &R, staging: &Path, config: &DriverConfig) -> Result<PathBuf> {
    let target = staging.join(REQUIREMENTS_FILE_NAME);
    match &config.requirements {
        Some(source) => {
            runtime
                .copy(source, &target)
                .with_context(|| format!("Failed to stage requirements from {:?}", source))?;
        }
        None => runtime.write(&target, template::BUNDLED_REQUIREMENTS.as_bytes())?,
    }
    Ok(target)
}
