//! Privilege-aware placement of the downloaded binary.
//!
//! The binary goes to the system-wide directory when that works, otherwise
//! to a per-user directory. The user is told once if the per-user directory
//! is not on `PATH`.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// File name of the installed binary.
pub const BINARY_NAME: &str = "lab-editor";

/// Mode applied to both the temporary download and the installed copy.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Candidate install directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// System-wide binary directory. Never created by the installer.
    pub system_dir: PathBuf,
    /// Per-user binary directory, `None` when the home directory is unknown.
    pub user_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    System,
    User,
}

/// Where the binary ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub path: PathBuf,
    pub scope: Scope,
    /// Whether the PATH advisory was printed.
    pub advised: bool,
}

/// Install `source` into the system directory, falling back to the user directory.
#[tracing::instrument(skip(runtime))]
pub fn place_binary<R: Runtime>(
    runtime: &R,
    source: &Path,
    target: &InstallTarget,
    elevate: bool,
) -> Result<Placement> {
    let system_path = target.system_dir.join(BINARY_NAME);

    match install_system(runtime, source, &system_path, elevate) {
        Ok(()) => {
            info!("Installed to {:?}", system_path);
            return Ok(Placement {
                path: system_path,
                scope: Scope::System,
                advised: false,
            });
        }
        Err(e) => {
            warn!("System-wide install to {:?} failed: {:#}", system_path, e);
            println!(
                "Could not install to {}, installing for the current user instead.",
                target.system_dir.display()
            );
        }
    }

    let user_dir = target
        .user_dir
        .as_deref()
        .context("Could not find home directory for a per-user install")?;
    let user_path = install_user(runtime, source, user_dir)?;

    let advised = if dir_on_path(runtime, user_dir) {
        false
    } else {
        eprintln!("{}", path_advisory(user_dir));
        true
    };

    Ok(Placement {
        path: user_path,
        scope: Scope::User,
        advised,
    })
}

fn install_system<R: Runtime>(
    runtime: &R,
    source: &Path,
    dest: &Path,
    elevate: bool,
) -> Result<()> {
    if runtime.is_privileged() || !elevate {
        debug!("Copying {:?} to {:?} without elevation", source, dest);
        runtime.copy(source, dest)?;
        runtime.set_permissions(dest, EXECUTABLE_MODE)?;
        Ok(())
    } else {
        println!("Installing to {} (you may be asked for your password)", dest.display());
        runtime.elevated_copy(source, dest, EXECUTABLE_MODE)
    }
}

fn install_user<R: Runtime>(runtime: &R, source: &Path, user_dir: &Path) -> Result<PathBuf> {
    runtime
        .create_dir_all(user_dir)
        .with_context(|| format!("Failed to create directory {:?}", user_dir))?;

    let dest = user_dir.join(BINARY_NAME);
    runtime
        .copy(source, &dest)
        .with_context(|| format!("Failed to copy binary to {:?}", dest))?;
    runtime
        .set_permissions(&dest, EXECUTABLE_MODE)
        .with_context(|| format!("Failed to mark {:?} executable", dest))?;

    info!("Installed to {:?}", dest);
    Ok(dest)
}

/// Whether `dir` is one of the entries of `PATH`.
pub fn dir_on_path<R: Runtime>(runtime: &R, dir: &Path) -> bool {
    match runtime.env_var("PATH") {
        Ok(path) => std::env::split_paths(&path).any(|entry| entry.as_path() == dir),
        Err(_) => false,
    }
}

pub fn path_advisory(dir: &Path) -> String {
    format!(
        "Note: {dir} is not in your PATH.\n\
         Add this line to your shell profile (~/.zshrc, ~/.bashrc):\n  \
         export PATH=\"{dir}:$PATH\"",
        dir = dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn target() -> InstallTarget {
        InstallTarget {
            system_dir: PathBuf::from("/usr/local/bin"),
            user_dir: Some(PathBuf::from("/home/user/.local/bin")),
        }
    }

    fn source() -> PathBuf {
        PathBuf::from("/tmp/lab-editor-install.1.2")
    }

    #[test]
    fn test_privileged_install_goes_to_system_dir() {
        let mut runtime = MockRuntime::new();

        // --- Setup ---
        runtime.expect_is_privileged().returning(|| true);
        runtime
            .expect_copy()
            .with(eq(source()), eq(PathBuf::from("/usr/local/bin/lab-editor")))
            .times(1)
            .returning(|_, _| Ok(1024));
        runtime
            .expect_set_permissions()
            .with(eq(PathBuf::from("/usr/local/bin/lab-editor")), eq(0o755))
            .times(1)
            .returning(|_, _| Ok(()));

        // --- Execute ---
        let placement = place_binary(&runtime, &source(), &target(), true).unwrap();

        // --- Verify ---
        assert_eq!(placement.scope, Scope::System);
        assert_eq!(placement.path, PathBuf::from("/usr/local/bin/lab-editor"));
        assert!(!placement.advised);
    }

    #[test]
    fn test_unprivileged_install_uses_elevated_copy() {
        let mut runtime = MockRuntime::new();

        runtime.expect_is_privileged().returning(|| false);
        runtime
            .expect_elevated_copy()
            .with(
                eq(source()),
                eq(PathBuf::from("/usr/local/bin/lab-editor")),
                eq(0o755),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));

        let placement = place_binary(&runtime, &source(), &target(), true).unwrap();

        assert_eq!(placement.scope, Scope::System);
        assert!(!placement.advised);
    }

    #[cfg(unix)]
    #[test]
    fn test_elevation_failure_falls_back_to_user_dir() {
        let mut runtime = MockRuntime::new();

        // --- Setup ---
        runtime.expect_is_privileged().returning(|| false);
        runtime
            .expect_elevated_copy()
            .returning(|_, _, _| Err(anyhow::anyhow!("sudo is not available")));

        // Fallback creates the user dir and installs there
        runtime
            .expect_create_dir_all()
            .with(eq(PathBuf::from("/home/user/.local/bin")))
            .times(1)
            .returning(|_| Ok(()));
        runtime
            .expect_copy()
            .with(eq(source()), eq(PathBuf::from("/home/user/.local/bin/lab-editor")))
            .times(1)
            .returning(|_, _| Ok(1024));
        runtime
            .expect_set_permissions()
            .with(eq(PathBuf::from("/home/user/.local/bin/lab-editor")), eq(0o755))
            .times(1)
            .returning(|_, _| Ok(()));

        // User dir already on PATH -> no advisory
        runtime
            .expect_env_var()
            .with(eq("PATH"))
            .returning(|_| Ok("/usr/bin:/home/user/.local/bin".to_string()));

        // --- Execute ---
        let placement = place_binary(&runtime, &source(), &target(), true).unwrap();

        // --- Verify ---
        assert_eq!(placement.scope, Scope::User);
        assert_eq!(
            placement.path,
            PathBuf::from("/home/user/.local/bin/lab-editor")
        );
        assert!(!placement.advised);
    }

    #[cfg(unix)]
    #[test]
    fn test_fallback_advises_when_user_dir_not_on_path() {
        let mut runtime = MockRuntime::new();

        // Elevation disabled: plain copy into the system dir fails
        runtime.expect_is_privileged().returning(|| false);
        runtime
            .expect_copy()
            .with(eq(source()), eq(PathBuf::from("/usr/local/bin/lab-editor")))
            .returning(|_, _| Err(anyhow::anyhow!("Permission denied")));
        runtime
            .expect_copy()
            .with(eq(source()), eq(PathBuf::from("/home/user/.local/bin/lab-editor")))
            .returning(|_, _| Ok(1024));
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime.expect_set_permissions().returning(|_, _| Ok(()));
        runtime
            .expect_env_var()
            .with(eq("PATH"))
            .returning(|_| Ok("/usr/bin:/bin".to_string()));

        let placement = place_binary(&runtime, &source(), &target(), false).unwrap();

        assert_eq!(placement.scope, Scope::User);
        assert!(placement.advised);
    }

    #[test]
    fn test_fallback_without_home_dir_fails() {
        let mut runtime = MockRuntime::new();

        runtime.expect_is_privileged().returning(|| true);
        runtime
            .expect_copy()
            .returning(|_, _| Err(anyhow::anyhow!("No such file or directory")));

        let target = InstallTarget {
            system_dir: PathBuf::from("/usr/local/bin"),
            user_dir: None,
        };

        let result = place_binary(&runtime, &source(), &target, true);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("home directory"));
    }

    #[test]
    fn test_fallback_copy_failure_is_fatal() {
        let mut runtime = MockRuntime::new();

        runtime.expect_is_privileged().returning(|| false);
        runtime
            .expect_elevated_copy()
            .returning(|_, _, _| Err(anyhow::anyhow!("rejected")));
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime
            .expect_copy()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));

        let result = place_binary(&runtime, &source(), &target(), true);
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Failed to copy binary"));
        assert!(err.contains("disk full"));
    }

    #[test]
    fn test_dir_on_path_without_path_variable() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("PATH"))
            .returning(|_| Err(std::env::VarError::NotPresent));

        assert!(!dir_on_path(&runtime, Path::new("/home/user/.local/bin")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_on_path_ignores_trailing_separator() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("PATH"))
            .returning(|_| Ok("/home/user/.local/bin/:/usr/bin".to_string()));

        assert!(dir_on_path(&runtime, Path::new("/home/user/.local/bin")));
        assert!(!dir_on_path(&runtime, Path::new("/home/user/bin")));
    }

    #[test]
    fn test_path_advisory_mentions_dir() {
        let text = path_advisory(Path::new("/home/user/.local/bin"));
        assert!(text.contains("/home/user/.local/bin is not in your PATH"));
        assert!(text.contains("export PATH=\"/home/user/.local/bin:$PATH\""));
    }
}
