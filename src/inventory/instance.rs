use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where an instance's installation root came from, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum InstallLocation {
    /// Not looked up yet.
    Unresolved,
    /// Known from the source that created the record.
    Direct(PathBuf),
    /// Found by matching the path suffix key against an Installer Folders entry.
    InstallerFolders(PathBuf),
    /// Looked up, nothing matched.
    NoMatch,
}

impl InstallLocation {
    pub fn path(&self) -> Option<&Path> {
        match self {
            InstallLocation::Direct(path) | InstallLocation::InstallerFolders(path) => Some(path),
            InstallLocation::Unresolved | InstallLocation::NoMatch => None,
        }
    }
}

/// One discovered installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationInstance {
    display_name: String,
    short_name: Option<String>,
    nickname: Option<String>,
    version: Option<String>,
    publisher: Option<String>,
    location: InstallLocation,
    path_suffix_key: Option<String>,
}

impl ApplicationInstance {
    /// Record whose installation root is already known. It carries no path
    /// suffix key and never takes part in the Installer Folders join.
    pub fn direct(display_name: &str, publisher: &str, install_path: PathBuf) -> Self {
        Self {
            display_name: display_name.to_string(),
            short_name: None,
            nickname: None,
            version: None,
            publisher: Some(publisher.to_string()),
            location: InstallLocation::Direct(install_path),
            path_suffix_key: None,
        }
    }

    /// Build a record from the fields of an uninstall registry entry.
    ///
    /// Returns `None` unless both the display name and the publisher contain
    /// `product` (case-insensitive). A missing publisher never matches.
    pub fn from_uninstall_entry(
        product: &str,
        display_name: String,
        version: Option<String>,
        publisher: Option<String>,
    ) -> Option<Self> {
        let publisher = publisher?;
        if !mentions(&display_name, product) || !mentions(&publisher, product) {
            return None;
        }

        let tokens: Vec<&str> = display_name.split_whitespace().collect();
        let token = |i: usize| tokens.get(i).map(|t| t.to_string());

        let short_name = token(0);
        let version = version.filter(|v| !v.is_empty()).or_else(|| token(1));
        let nickname = token(2);
        let path_suffix_key = version.as_deref().map(|v| path_suffix_key(product, v));

        Some(Self {
            display_name,
            short_name,
            nickname,
            version,
            publisher: Some(publisher),
            location: InstallLocation::Unresolved,
            path_suffix_key,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn location(&self) -> &InstallLocation {
        &self.location
    }

    pub fn install_path(&self) -> Option<&Path> {
        self.location.path()
    }

    pub fn path_suffix_key(&self) -> Option<&str> {
        self.path_suffix_key.as_deref()
    }

    /// Apply the result of the Installer Folders lookup. Records that were
    /// not waiting for one are returned unchanged.
    pub(crate) fn resolved(mut self, found: Option<&str>) -> Self {
        if self.location == InstallLocation::Unresolved {
            self.location = match found {
                Some(path) => InstallLocation::InstallerFolders(PathBuf::from(path)),
                None => InstallLocation::NoMatch,
            };
        }
        self
    }

    /// One-line summary: `Name=…, Version=…, Nickname=…, Path=…`.
    pub fn summary(&self) -> String {
        format!(
            "Name={}, Version={}, Nickname={}, Path={}",
            or_dash(self.short_name()),
            or_dash(self.version()),
            or_dash(self.nickname()),
            self.install_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}

impl fmt::Display for ApplicationInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - ", self.display_name, or_dash(self.publisher()))?;
        match self.install_path() {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "-"),
        }
    }
}

/// Join key matched against Installer Folders value names: `"<product> <version>\"`.
pub fn path_suffix_key(product: &str, version: &str) -> String {
    format!("{} {}\\", product, version)
}

fn mentions(haystack: &str, product: &str) -> bool {
    haystack.to_lowercase().contains(&product.to_lowercase())
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
