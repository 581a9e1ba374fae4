//! Blocking subprocess execution.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_impl(&self, program: &Path, arg: &Path, cwd: &Path) -> Result<Option<i32>> {
        debug!("Running {:?} {:?} in {:?}", program, arg, cwd);
        let status = Command::new(program)
            .arg(arg)
            .current_dir(cwd)
            .status()
            .with_context(|| format!("Failed to run {:?}", program))?;
        Ok(status.code())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_run_reports_exit_code() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let script = dir.path().join("exit.sh");
        std::fs::write(&script, "exit 3\n").unwrap();

        let code = runtime.run(Path::new("sh"), &script, dir.path()).unwrap();
        assert_eq!(code, Some(3));
    }

    #[test]
    fn test_real_runtime_run_uses_given_cwd() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let script = dir.path().join("touch.sh");
        std::fs::write(&script, "touch marker\n").unwrap();

        let code = runtime.run(Path::new("sh"), &script, dir.path()).unwrap();
        assert_eq!(code, Some(0));
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn test_real_runtime_run_missing_program() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let result = runtime.run(
            Path::new("/nonexistent/OSGeo4W.bat"),
            &dir.path().join("pip-install.bat"),
            dir.path(),
        );
        assert!(result.is_err());
    }
}
