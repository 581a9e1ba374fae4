use anyhow::Result;
use log::{debug, info};

use super::ApplicationInstance;
use crate::registry::{Hive, INSTALLER_FOLDERS_KEY, Registry, Scope, View};

pub const INSTALLER_FOLDERS_SCOPE: Scope = Scope::new(Hive::LocalMachine, View::Registry64);

/// Installer Folders value names that mention `product` (case-sensitive).
#[tracing::instrument(skip(registry))]
pub fn installer_folder_names<G: Registry>(registry: &G, product: &str) -> Result<Vec<String>> {
    let names: Vec<String> = registry
        .value_names(INSTALLER_FOLDERS_SCOPE, INSTALLER_FOLDERS_KEY)?
        .into_iter()
        .filter(|name| name.contains(product))
        .collect();
    info!("Found {} {} installer folder(s)", names.len(), product);
    Ok(names)
}

/// Find the folder whose name ends with `key`. When several do, the last
/// one in registry order wins.
pub fn match_install_path<'a>(key: Option<&str>, folder_names: &'a [String]) -> Option<&'a str> {
    let key = key?;
    folder_names
        .iter()
        .rev()
        .find(|name| name.ends_with(key))
        .map(String::as_str)
}

/// Resolve the install location of every record still waiting for one.
pub fn resolve_install_paths(
    instances: Vec<ApplicationInstance>,
    folder_names: &[String],
) -> Vec<ApplicationInstance> {
    instances
        .into_iter()
        .map(|instance| {
            let found = match_install_path(instance.path_suffix_key(), folder_names);
            if found.is_none() {
                debug!("No installer folder for {:?}", instance.display_name());
            }
            instance.resolved(found)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InstallLocation;
    use crate::registry::MockRegistry;
    use mockall::predicate::eq;
    use std::path::{Path, PathBuf};

    fn registered(name: &str) -> ApplicationInstance {
        ApplicationInstance::from_uninstall_entry("QGIS", name.to_string(), None, Some("QGIS.org".to_string()))
            .unwrap()
    }

    fn folders(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_match_requires_suffix() {
        let names = folders(&[r"C:\Install\QGIS 3.28\", r"C:\Install\QGIS 3.28\apps\"]);

        assert_eq!(
            match_install_path(Some("QGIS 3.28\\"), &names),
            Some(r"C:\Install\QGIS 3.28\")
        );
        assert_eq!(match_install_path(Some("QGIS 3.34\\"), &names), None);
        assert_eq!(match_install_path(None, &names), None);
    }

    #[test]
    fn test_last_match_wins() {
        let names = folders(&[r"C:\Old\QGIS 3.28\", r"D:\New\QGIS 3.28\"]);
        assert_eq!(
            match_install_path(Some("QGIS 3.28\\"), &names),
            Some(r"D:\New\QGIS 3.28\")
        );
    }

    #[test]
    fn test_resolve_updates_only_matching_record() {
        let instances = vec![registered("QGIS 3.28 Firenze"), registered("QGIS 3.34 Prizren")];
        let names = folders(&[r"C:\Install\QGIS 3.28\"]);

        let resolved = resolve_install_paths(instances, &names);

        assert_eq!(
            resolved[0].install_path(),
            Some(Path::new(r"C:\Install\QGIS 3.28\"))
        );
        assert_eq!(resolved[1].location(), &InstallLocation::NoMatch);
    }

    #[test]
    fn test_one_folder_can_satisfy_several_records() {
        let instances = vec![registered("QGIS 3.28"), registered("QGIS 3.28 Firenze")];
        let names = folders(&[r"C:\Program Files\QGIS 3.28\"]);

        let resolved = resolve_install_paths(instances, &names);

        assert!(
            resolved
                .iter()
                .all(|i| i.install_path() == Some(Path::new(r"C:\Program Files\QGIS 3.28\")))
        );
    }

    #[test]
    fn test_record_without_key_is_no_match() {
        let resolved = resolve_install_paths(vec![registered("QGIS")], &folders(&[r"C:\QGIS\"]));
        assert_eq!(resolved[0].location(), &InstallLocation::NoMatch);
    }

    #[test]
    fn test_direct_record_untouched() {
        let direct = ApplicationInstance::direct("QGIS", "OSGeo4W", PathBuf::from(r"C:\OSGeo4W64"));
        let resolved = resolve_install_paths(vec![direct.clone()], &folders(&[r"C:\QGIS 3.28\"]));
        assert_eq!(resolved, vec![direct]);
    }

    #[test]
    fn test_folder_names_filtered_by_product() {
        let mut registry = MockRegistry::new();
        registry
            .expect_value_names()
            .with(eq(INSTALLER_FOLDERS_SCOPE), eq(INSTALLER_FOLDERS_KEY))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    r"C:\Program Files\QGIS 3.28\".to_string(),
                    r"C:\Program Files\Git\".to_string(),
                    r"C:\Program Files\qgis 3.10\".to_string(),
                ])
            });

        let names = installer_folder_names(&registry, "QGIS").unwrap();
        assert_eq!(names, vec![r"C:\Program Files\QGIS 3.28\".to_string()]);
    }

    #[test]
    fn test_folder_key_failure_propagates() {
        let mut registry = MockRegistry::new();
        registry
            .expect_value_names()
            .returning(|_, _| Err(anyhow::anyhow!("access denied")));

        assert!(installer_folder_names(&registry, "QGIS").is_err());
    }
}
