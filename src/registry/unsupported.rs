use anyhow::{Result, bail};

use super::{Registry, Scope};

/// Stand-in used on hosts without a Windows registry. Every query fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRegistry;

impl SystemRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Registry for SystemRegistry {
    fn subkey_names(&self, scope: Scope, path: &str) -> Result<Vec<String>> {
        bail!("Cannot open {}\\{}: no Windows registry on this platform", scope, path)
    }

    fn string_value(&self, scope: Scope, path: &str, _name: &str) -> Result<Option<String>> {
        bail!("Cannot open {}\\{}: no Windows registry on this platform", scope, path)
    }

    fn value_names(&self, scope: Scope, path: &str) -> Result<Vec<String>> {
        bail!("Cannot open {}\\{}: no Windows registry on this platform", scope, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Hive, UNINSTALL_KEY, View};

    #[test]
    fn test_every_query_fails() {
        let registry = SystemRegistry::new();
        let scope = Scope::new(Hive::LocalMachine, View::Registry64);

        assert!(registry.subkey_names(scope, UNINSTALL_KEY).is_err());
        assert!(registry.string_value(scope, UNINSTALL_KEY, "DisplayName").is_err());
        assert!(registry.value_names(scope, UNINSTALL_KEY).is_err());
    }
}
