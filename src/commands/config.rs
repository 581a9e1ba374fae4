use anyhow::Result;
use std::path::PathBuf;

use crate::{
    driver::DriverConfig,
    inventory::DiscoveryConfig,
    registry::{Registry, SystemRegistry},
    runtime::Runtime,
};

/// Options gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub requirements: Option<PathBuf>,
    pub assume_yes: bool,
    pub dedup: bool,
}

pub struct Config<R: Runtime, G: Registry> {
    pub runtime: R,
    pub registry: G,
    pub discovery: DiscoveryConfig,
    pub driver: DriverConfig,
    pub assume_yes: bool,
    pub dedup: bool,
}

impl<R: Runtime> Config<R, SystemRegistry> {
    pub fn new(runtime: R, options: Options) -> Result<Self> {
        Self::with_registry(runtime, SystemRegistry::new(), options)
    }
}

impl<R: Runtime, G: Registry> Config<R, G> {
    /// The requirements file is only checked by the commands that use it.
    pub fn with_registry(runtime: R, registry: G, options: Options) -> Result<Self> {
        Ok(Self {
            runtime,
            registry,
            discovery: DiscoveryConfig::default(),
            driver: DriverConfig {
                requirements: options.requirements,
                ..DriverConfig::default()
            },
            assume_yes: options.assume_yes,
            dedup: options.dedup,
        })
    }
}
