//! Runtime abstraction for system operations.
//!
//! Everything the installer and the editor do to the host (environment,
//! files, permissions, privilege escalation) goes through the [`Runtime`]
//! trait so that it can be replaced with a mock in tests.
//!
//! # Structure
//!
//! - `env` - Environment variables and system information
//! - `fs` - File system operations (read, write, copy, permissions)
//! - `process` - Elevated commands (`sudo`)
//! - `user` - User interaction (line prompts)

mod env;
mod fs;
mod process;
mod user;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

pub use user::prompt_number_with_io;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn copy(&self, from: &Path, to: &Path) -> Result<u64>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Permission bits of an existing file. `None` on Windows or when the
    /// file cannot be inspected.
    fn file_mode(&self, path: &Path) -> Option<u32>;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;
    fn temp_dir(&self) -> PathBuf;

    // Privilege
    fn is_privileged(&self) -> bool;

    /// Copy `from` to `to` with elevated privileges and set `mode` on the copy.
    /// Fails when no elevation tool is installed, when the user rejects the
    /// elevation prompt, or when either command fails.
    fn elevated_copy(&self, from: &Path, to: &Path, mode: u32) -> Result<()>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<u64> {
        self.copy_impl(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.canonicalize_impl(path)
    }

    fn file_mode(&self, path: &Path) -> Option<u32> {
        self.file_mode_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir_impl()
    }

    fn is_privileged(&self) -> bool {
        self.is_privileged_impl()
    }

    fn elevated_copy(&self, from: &Path, to: &Path, mode: u32) -> Result<()> {
        self.elevated_copy_impl(from, to, mode)
    }
}
