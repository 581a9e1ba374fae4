use anyhow::{Result, bail};
use log::debug;
use std::io::Write;

use super::config::Config;
use super::select::{Selection, is_affirmative, parse_selection};
use crate::{
    driver::{self, InstallReport},
    inventory::{self, ApplicationInstance},
    registry::Registry,
    runtime::Runtime,
};

pub(crate) const UNSUPPORTED_PLATFORM: &str =
    "This program only works on Windows.\nYou do not seem to be using Windows.";

const NOTHING_FOUND: &str = "No QGIS installation was found on this computer.
The Python packages cannot be installed automatically.
Please contact an administrator who can install them manually.";

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed(InstallReport),
    NothingFound,
    Cancelled,
    UnsupportedPlatform,
}

/// Discover QGIS installations, let the operator pick one and install the
/// Python packages into it. Messages for the operator go to `out`.
#[tracing::instrument(skip(config, out))]
pub fn install<R: Runtime, G: Registry, W: Write>(
    config: &Config<R, G>,
    out: &mut W,
) -> Result<Outcome> {
    let runtime = &config.runtime;

    if !runtime.is_windows() {
        writeln!(out, "{}", UNSUPPORTED_PLATFORM)?;
        return Ok(Outcome::UnsupportedPlatform);
    }

    if let Some(path) = &config.driver.requirements {
        if !runtime.exists(path) {
            bail!("Requirements file {:?} does not exist", path);
        }
        debug!("Using requirements from {:?}", path);
    }

    if !config.assume_yes && !is_affirmative(&runtime.prompt("Do you want to continue?")?) {
        debug!("Operator declined to continue");
        return Ok(Outcome::Cancelled);
    }

    let mut instances = inventory::discover(runtime, &config.registry, &config.discovery)?;
    if config.dedup {
        instances = inventory::dedup(instances);
    }

    let Some(instance) = choose(runtime, &instances, out)? else {
        return Ok(if instances.is_empty() {
            Outcome::NothingFound
        } else {
            Outcome::Cancelled
        });
    };

    let report = driver::install(runtime, instance, &config.driver)?;
    Ok(Outcome::Installed(report))
}

/// Pick the instance to work on. A single instance is chosen without asking.
fn choose<'a, R: Runtime, W: Write>(
    runtime: &R,
    instances: &'a [ApplicationInstance],
    out: &mut W,
) -> Result<Option<&'a ApplicationInstance>> {
    match instances {
        [] => {
            writeln!(out, "{}", NOTHING_FOUND)?;
            Ok(None)
        }
        [only] => {
            writeln!(out, "One QGIS installation was found on this computer:")?;
            writeln!(out, "{}", only)?;
            Ok(Some(only))
        }
        _ => {
            writeln!(out, "QGIS installations found on this computer:")?;
            for (index, instance) in instances.iter().enumerate() {
                writeln!(out, "{} - {}", index + 1, instance)?;
            }
            out.flush()?;

            let answer =
                runtime.prompt("Which QGIS installation should receive the Python packages?")?;
            match parse_selection(&answer, instances.len()) {
                Selection::Index(index) => {
                    let instance = &instances[index];
                    writeln!(out, "You chose {}:", instance)?;
                    Ok(Some(instance))
                }
                Selection::Cancelled => {
                    debug!("Invalid or cancelled selection {:?}", answer);
                    Ok(None)
                }
            }
        }
    }
}

pub fn print_banner() {
    println!("Python package installer for QGIS");
    println!();
    println!("Installs the Python modules required by the Gecosat QGIS plugins.");
    println!();
}

/// Print what happened. Errors end up here too, as a short message.
pub fn report(outcome: &Result<Outcome>) {
    match outcome {
        Ok(Outcome::Installed(report)) if report.succeeded() => {
            println!("Python packages installed in {}", report.install_path.display())
        }
        Ok(Outcome::Installed(report)) => match report.exit_code {
            Some(code) => println!(
                "The OSGeo4W shell exited with code {} for {}",
                code,
                report.install_path.display()
            ),
            None => println!("The OSGeo4W shell was interrupted"),
        },
        Ok(_) => {}
        Err(e) => eprintln!("Error: {:#}", e),
    }
}

/// Closing message, optionally waiting for Enter so a console window
/// opened by double-click stays readable.
pub fn finish<R: Runtime>(runtime: &R, pause: bool) {
    println!();
    println!("End of program");
    if pause {
        let _ = runtime.prompt("Press Enter to quit...");
    }
}
