use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use super::Runtime;

/// RAII guard that switches the process working directory and restores the
/// previous one when dropped, on success and error paths alike.
pub struct CurrentDirGuard<'a, R: Runtime> {
    runtime: &'a R,
    previous: PathBuf,
}

impl<'a, R: Runtime> CurrentDirGuard<'a, R> {
    /// Remember the current directory, then change into `dir`.
    pub fn enter(runtime: &'a R, dir: &Path) -> Result<Self> {
        let previous = runtime.current_dir()?;
        runtime.set_current_dir(dir)?;
        debug!("Entered {:?} (was {:?})", dir, previous);
        Ok(Self { runtime, previous })
    }
}

impl<R: Runtime> Drop for CurrentDirGuard<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.runtime.set_current_dir(&self.previous) {
            warn!("Failed to restore working directory {:?}: {}", self.previous, e);
        }
    }
}
