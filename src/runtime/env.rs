//! Host information.

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn is_windows_impl(&self) -> bool {
        cfg!(windows)
    }
}
