use anyhow::{Context, Result};
use log::debug;
use std::io;
use winreg::RegKey;
use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY};

use super::{Hive, Registry, Scope, View};

/// Registry backed by the Win32 API through `winreg`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRegistry;

impl SystemRegistry {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, scope: Scope, path: &str) -> Result<RegKey> {
        let hive = match scope.hive {
            Hive::LocalMachine => HKEY_LOCAL_MACHINE,
            Hive::CurrentUser => HKEY_CURRENT_USER,
        };
        let view = match scope.view {
            View::Default => 0,
            View::Registry32 => KEY_WOW64_32KEY,
            View::Registry64 => KEY_WOW64_64KEY,
        };
        RegKey::predef(hive)
            .open_subkey_with_flags(path, KEY_READ | view)
            .with_context(|| format!("Failed to open registry key {}\\{}", scope, path))
    }
}

impl Registry for SystemRegistry {
    #[tracing::instrument(skip(self))]
    fn subkey_names(&self, scope: Scope, path: &str) -> Result<Vec<String>> {
        let key = self.open(scope, path)?;
        let names = key
            .enum_keys()
            .filter_map(|name| match name {
                Ok(name) => Some(name),
                Err(e) => {
                    debug!("Skipping unreadable subkey of {}\\{}: {}", scope, path, e);
                    None
                }
            })
            .collect();
        Ok(names)
    }

    #[tracing::instrument(skip(self))]
    fn string_value(&self, scope: Scope, path: &str, name: &str) -> Result<Option<String>> {
        let key = self.open(scope, path)?;
        match key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read {} from {}\\{}", name, scope, path)),
        }
    }

    #[tracing::instrument(skip(self))]
    fn value_names(&self, scope: Scope, path: &str) -> Result<Vec<String>> {
        let key = self.open(scope, path)?;
        let mut names = Vec::new();
        // The iterator ends on ERROR_NO_MORE_ITEMS
        for value in key.enum_values() {
            match value {
                Ok((name, _)) => names.push(name),
                Err(e) => {
                    debug!("Stopped reading values of {}\\{}: {}", scope, path, e);
                    break;
                }
            }
        }
        Ok(names)
    }
}
