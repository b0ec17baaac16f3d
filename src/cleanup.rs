use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Tracks paths that need cleanup on interruption
#[derive(Default)]
pub struct CleanupContext {
    paths: Vec<PathBuf>,
}

impl CleanupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to be cleaned up on interruption
    pub fn add(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Remove a path from cleanup list (e.g., when it was already removed)
    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Clean up all registered paths
    pub fn cleanup(&self) {
        for path in &self.paths {
            remove_path(path);
        }
    }
}

fn remove_path(path: &Path) {
    debug!("Cleaning up: {:?}", path);
    if path.is_dir() {
        let _ = std::fs::remove_dir_all(path);
    } else {
        let _ = std::fs::remove_file(path);
    }
}

/// Type alias for shared cleanup context
pub type SharedCleanupContext = Arc<Mutex<CleanupContext>>;

/// Create a new shared cleanup context
pub fn new_shared() -> SharedCleanupContext {
    Arc::new(Mutex::new(CleanupContext::new()))
}

/// Scoped temporary download location.
///
/// The path is registered with the cleanup context for the lifetime of the
/// guard, so an interrupt handler can remove it. Dropping the guard removes
/// the file (if it was ever created) on every exit path.
pub struct TempDownload {
    ctx: SharedCleanupContext,
    path: PathBuf,
}

impl TempDownload {
    /// Reserve a unique path under `dir` and register it for cleanup.
    pub fn new(ctx: SharedCleanupContext, dir: &Path) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or_default();
        let path = dir.join(format!(
            "lab-editor-install.{}.{}",
            std::process::id(),
            nanos
        ));

        if let Ok(mut guard) = ctx.lock() {
            guard.add(path.clone());
        }
        Self { ctx, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDownload {
    fn drop(&mut self) {
        remove_path(&self.path);
        if let Ok(mut guard) = self.ctx.lock() {
            guard.remove(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_context_add_remove() {
        let mut ctx = CleanupContext::new();
        let path = PathBuf::from("/tmp/test");

        ctx.add(path.clone());
        assert_eq!(ctx.paths().len(), 1);

        ctx.remove(&path);
        assert!(ctx.paths().is_empty());
    }

    #[test]
    fn test_cleanup_context_cleanup_files() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        fs::write(&file_path, "test").unwrap();

        let mut ctx = CleanupContext::new();
        ctx.add(file_path.clone());

        ctx.cleanup();
        assert!(!file_path.exists());
    }

    #[test]
    fn test_cleanup_context_cleanup_missing_path_is_ignored() {
        let dir = tempdir().unwrap();
        let mut ctx = CleanupContext::new();
        ctx.add(dir.path().join("never-created"));

        ctx.cleanup();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_temp_download_registers_and_removes_on_drop() {
        let dir = tempdir().unwrap();
        let ctx = new_shared();

        let path = {
            let temp = TempDownload::new(Arc::clone(&ctx), dir.path());
            assert!(temp.path().starts_with(dir.path()));
            assert_eq!(ctx.lock().unwrap().paths(), &[temp.path().to_path_buf()]);

            fs::write(temp.path(), "binary").unwrap();
            temp.path().to_path_buf()
        };

        assert!(!path.exists());
        assert!(ctx.lock().unwrap().paths().is_empty());
    }

    #[test]
    fn test_temp_download_drop_without_file() {
        let dir = tempdir().unwrap();
        let ctx = new_shared();

        {
            let _temp = TempDownload::new(Arc::clone(&ctx), dir.path());
        }

        assert!(ctx.lock().unwrap().paths().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_temp_download_removed_by_interrupt_cleanup() {
        let dir = tempdir().unwrap();
        let ctx = new_shared();
        let temp = TempDownload::new(Arc::clone(&ctx), dir.path());
        fs::write(temp.path(), "partial").unwrap();

        ctx.lock().unwrap().cleanup();
        assert!(!temp.path().exists());
    }

    #[test]
    fn test_temp_download_name() {
        let ctx = new_shared();
        let temp = TempDownload::new(ctx, Path::new("/tmp"));
        let name = temp.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&format!("lab-editor-install.{}.", std::process::id())));
    }
}
