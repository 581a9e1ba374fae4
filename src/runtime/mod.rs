//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Host information
//! - `fs` - File system and working directory operations
//! - `cwd` - Scoped working directory guard
//! - `process` - Blocking subprocess execution
//! - `user` - User interaction (prompts)

mod cwd;
mod env;
mod fs;
mod process;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use cwd::CurrentDirGuard;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn is_windows(&self) -> bool;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn copy(&self, from: &Path, to: &Path) -> Result<u64>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    // Working directory
    fn current_dir(&self) -> Result<PathBuf>;
    fn set_current_dir(&self, path: &Path) -> Result<()>;

    // Process
    /// Run `program` with a single argument inside `cwd` and block until it exits.
    /// Returns the exit code, or `None` when the process was terminated without one.
    fn run(&self, program: &Path, arg: &Path, cwd: &Path) -> Result<Option<i32>>;

    // User interaction
    /// Print `prompt` and return the trimmed line typed by the user.
    fn prompt(&self, prompt: &str) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn is_windows(&self) -> bool {
        self.is_windows_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<u64> {
        self.copy_impl(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn set_current_dir(&self, path: &Path) -> Result<()> {
        self.set_current_dir_impl(path)
    }

    fn run(&self, program: &Path, arg: &Path, cwd: &Path) -> Result<Option<i32>> {
        self.run_impl(program, arg, cwd)
    }

    fn prompt(&self, prompt: &str) -> Result<String> {
        self.prompt_impl(prompt)
    }
}
