//! Read-only access to the Windows registry.
//!
//! Only the handful of primitives the inventory needs are exposed, behind the
//! [`Registry`] trait so discovery can be exercised without a real registry.
//! [`SystemRegistry`] is backed by `winreg` on Windows and refuses every
//! query elsewhere.

use anyhow::Result;
use serde::Serialize;
use std::fmt;

#[cfg(not(windows))]
mod unsupported;
#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
pub use unsupported::SystemRegistry;
#[cfg(windows)]
pub use windows::SystemRegistry;

/// Standard "installed applications" key, relative to a hive.
pub const UNINSTALL_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// Windows Installer table of install folders, relative to a hive.
pub const INSTALLER_FOLDERS_KEY: &str =
    r"SOFTWARE\Microsoft\Windows\CurrentVersion\Installer\Folders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hive {
    LocalMachine,
    CurrentUser,
}

/// Registry view requested when opening a key (WOW64 redirection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Default,
    Registry32,
    Registry64,
}

/// One (hive, view) combination, queried independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Scope {
    pub hive: Hive,
    pub view: View,
}

impl Scope {
    pub const fn new(hive: Hive, view: View) -> Self {
        Self { hive, view }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hive = match self.hive {
            Hive::LocalMachine => "HKLM",
            Hive::CurrentUser => "HKCU",
        };
        match self.view {
            View::Default => write!(f, "{}", hive),
            View::Registry32 => write!(f, "{} (32-bit)", hive),
            View::Registry64 => write!(f, "{} (64-bit)", hive),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Registry {
    /// Names of the subkeys directly under `path`.
    ///
    /// Fails when `path` itself cannot be opened. Individual subkeys whose
    /// name cannot be read are left out.
    fn subkey_names(&self, scope: Scope, path: &str) -> Result<Vec<String>>;

    /// Read the string value `name` stored under `path`.
    ///
    /// Returns `Ok(None)` when the value does not exist; errors are reserved
    /// for keys that cannot be opened and values that cannot be read as text.
    fn string_value(&self, scope: Scope, path: &str, name: &str) -> Result<Option<String>>;

    /// Names of the values stored under `path`, in registry order.
    ///
    /// Enumeration stops at the first entry that cannot be read.
    fn value_names(&self, scope: Scope, path: &str) -> Result<Vec<String>>;
}
