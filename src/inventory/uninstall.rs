use anyhow::Result;
use log::{debug, info};

use super::ApplicationInstance;
use crate::registry::{Hive, Registry, Scope, UNINSTALL_KEY, View};

/// Scopes whose uninstall keys are scanned, in result order.
pub const UNINSTALL_SCOPES: [Scope; 3] = [
    Scope::new(Hive::LocalMachine, View::Registry32),
    Scope::new(Hive::LocalMachine, View::Registry64),
    Scope::new(Hive::CurrentUser, View::Default),
];

/// Scan every uninstall scope and concatenate the results. Entries reported
/// by several scopes are kept once per scope.
#[tracing::instrument(skip(registry))]
pub fn scan_uninstall<G: Registry>(registry: &G, product: &str) -> Result<Vec<ApplicationInstance>> {
    let mut instances = Vec::new();
    for scope in UNINSTALL_SCOPES {
        let found = scan_uninstall_scope(registry, scope, product)?;
        info!("Found {} {} record(s) in {}", found.len(), product, scope);
        instances.extend(found);
    }
    Ok(instances)
}

/// Scan the uninstall key of a single scope.
///
/// Failing to open the key is an error. Entries without a readable
/// `DisplayName`, or not belonging to `product`, are skipped.
#[tracing::instrument(skip(registry))]
pub fn scan_uninstall_scope<G: Registry>(
    registry: &G,
    scope: Scope,
    product: &str,
) -> Result<Vec<ApplicationInstance>> {
    let subkeys = registry.subkey_names(scope, UNINSTALL_KEY)?;
    debug!("{} has {} uninstall entries", scope, subkeys.len());

    let instances = subkeys
        .iter()
        .filter_map(|subkey| read_entry(registry, scope, subkey, product))
        .collect();
    Ok(instances)
}

fn read_entry<G: Registry>(
    registry: &G,
    scope: Scope,
    subkey: &str,
    product: &str,
) -> Option<ApplicationInstance> {
    let path = format!("{}\\{}", UNINSTALL_KEY, subkey);

    let display_name = match registry.string_value(scope, &path, "DisplayName") {
        Ok(Some(name)) => name,
        Ok(None) => return None,
        Err(e) => {
            debug!("Skipping {}\\{}: {}", scope, path, e);
            return None;
        }
    };

    let version = optional_value(registry, scope, &path, "DisplayVersion");
    let publisher = optional_value(registry, scope, &path, "Publisher");

    ApplicationInstance::from_uninstall_entry(product, display_name, version, publisher)
}

fn optional_value<G: Registry>(registry: &G, scope: Scope, path: &str, name: &str) -> Option<String> {
    registry
        .string_value(scope, path, name)
        .unwrap_or_else(|e| {
            debug!("Ignoring {} of {}\\{}: {}", name, scope, path, e);
            None
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MockRegistry;
    use crate::test_utils::{UninstallEntry, mock_registry};

    const HKLM32: Scope = UNINSTALL_SCOPES[0];
    const HKLM64: Scope = UNINSTALL_SCOPES[1];
    const HKCU: Scope = UNINSTALL_SCOPES[2];

    #[test]
    fn test_scope_order() {
        assert_eq!(HKLM32, Scope::new(Hive::LocalMachine, View::Registry32));
        assert_eq!(HKLM64, Scope::new(Hive::LocalMachine, View::Registry64));
        assert_eq!(HKCU, Scope::new(Hive::CurrentUser, View::Default));
    }

    #[test]
    fn test_excludes_entries_not_matching_product() {
        let registry = mock_registry(
            vec![
                UninstallEntry::new(HKLM64, "{A}", "QGIS 3.28 Firenze", Some("3.28.4"), Some("QGIS.org")),
                UninstallEntry::new(HKLM64, "{B}", "Notepad++", Some("8.6"), Some("Notepad++ Team")),
                UninstallEntry::new(HKLM64, "{C}", "QGIS Companion 1.0", None, Some("Acme")),
                UninstallEntry::new(HKLM64, "{D}", "Acme Tool", None, Some("QGIS.org")),
                UninstallEntry::new(HKLM64, "{E}", "QGIS 3.22", None, None),
            ],
            vec![],
        );

        let instances = scan_uninstall(&registry, "QGIS").unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].display_name(), "QGIS 3.28 Firenze");
        assert_eq!(instances[0].version(), Some("3.28.4"));
    }

    #[test]
    fn test_no_deduplication_across_scopes() {
        let registry = mock_registry(
            vec![
                UninstallEntry::new(HKLM32, "{Q}", "QGIS 3.28", None, Some("QGIS.org")),
                UninstallEntry::new(HKLM64, "{Q}", "QGIS 3.28", None, Some("QGIS.org")),
                UninstallEntry::new(HKCU, "{Q}", "QGIS 3.28", None, Some("QGIS.org")),
            ],
            vec![],
        );

        let instances = scan_uninstall(&registry, "QGIS").unwrap();

        assert_eq!(instances.len(), 3);
        assert!(instances.iter().all(|i| i.display_name() == "QGIS 3.28"));
    }

    #[test]
    fn test_results_follow_scope_order() {
        let registry = mock_registry(
            vec![
                UninstallEntry::new(HKCU, "user", "QGIS 3.34 Prizren", None, Some("QGIS.org")),
                UninstallEntry::new(HKLM64, "x64", "QGIS 3.28 Firenze", None, Some("QGIS.org")),
                UninstallEntry::new(HKLM32, "x86", "QGIS 2.18 Las Palmas", None, Some("QGIS.org")),
            ],
            vec![],
        );

        let versions: Vec<_> = scan_uninstall(&registry, "QGIS")
            .unwrap()
            .iter()
            .map(|i| i.version().unwrap().to_string())
            .collect();

        assert_eq!(versions, vec!["2.18", "3.28", "3.34"]);
    }

    #[test]
    fn test_unreadable_display_name_skips_only_that_entry() {
        let mut registry = MockRegistry::new();
        registry
            .expect_subkey_names()
            .returning(|_, _| Ok(vec!["broken".to_string(), "good".to_string()]));
        registry.expect_string_value().returning(|_, path, name| {
            if path.ends_with("broken") {
                return Err(anyhow::anyhow!("access denied"));
            }
            Ok(match name {
                "DisplayName" => Some("QGIS 3.28".to_string()),
                "Publisher" => Some("QGIS.org".to_string()),
                _ => None,
            })
        });

        let instances = scan_uninstall_scope(&registry, HKLM64, "QGIS").unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].version(), Some("3.28"));
    }

    #[test]
    fn test_unreadable_optional_value_becomes_none() {
        let mut registry = MockRegistry::new();
        registry
            .expect_subkey_names()
            .returning(|_, _| Ok(vec!["qgis".to_string()]));
        registry.expect_string_value().returning(|_, _, name| match name {
            "DisplayName" => Ok(Some("QGIS 3.28 Firenze".to_string())),
            "DisplayVersion" => Err(anyhow::anyhow!("value is not a string")),
            _ => Ok(Some("QGIS.org".to_string())),
        });

        let instances = scan_uninstall_scope(&registry, HKLM64, "QGIS").unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].version(), Some("3.28"));
    }

    #[test]
    fn test_unopenable_scope_propagates() {
        let mut registry = MockRegistry::new();
        registry
            .expect_subkey_names()
            .returning(|_, _| Err(anyhow::anyhow!("key not found")));

        assert!(scan_uninstall(&registry, "QGIS").is_err());
    }

    #[test]
    fn test_subkey_values_read_under_uninstall_key() {
        let mut registry = MockRegistry::new();
        registry
            .expect_subkey_names()
            .withf(|_, path| path == UNINSTALL_KEY)
            .returning(|_, _| Ok(vec!["QGIS 3.28".to_string()]));
        registry
            .expect_string_value()
            .withf(|_, path, _| path == format!("{}\\QGIS 3.28", UNINSTALL_KEY))
            .returning(|_, _, _| Ok(None));

        let instances = scan_uninstall_scope(&registry, HKCU, "QGIS").unwrap();
        assert!(instances.is_empty());
    }
}
