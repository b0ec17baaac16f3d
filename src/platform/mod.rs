//! Operating system resolution.
//!
//! Maps an OS identifier (as printed by `uname -s`, or Rust's own
//! `std::env::consts::OS` names) to what the installer does on that system.

use std::fmt;

/// Name of the prebuilt macOS release asset.
pub const MACOS_ASSET: &str = "lab-editor-macos";

/// Target operating system as far as the installer is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Unsupported(String),
}

impl Platform {
    /// Map an OS identifier. Matching is case-insensitive.
    pub fn from_os_id(id: &str) -> Self {
        let lower = id.trim().to_ascii_lowercase();
        match lower.as_str() {
            "darwin" | "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" | "windows_nt" => Platform::Windows,
            s if s.starts_with("mingw") || s.starts_with("msys") || s.starts_with("cygwin") => {
                Platform::Windows
            }
            _ => Platform::Unsupported(id.to_string()),
        }
    }

    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_id(std::env::consts::OS)
    }

    /// Use `os_override` when present, otherwise the compile-time platform.
    pub fn resolve(os_override: Option<&str>) -> Self {
        match os_override {
            Some(id) => Self::from_os_id(id),
            None => Self::current(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux => write!(f, "Linux"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Unsupported(id) if id.is_empty() => write!(f, "(unknown)"),
            Platform::Unsupported(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_id_uname_values() {
        assert_eq!(Platform::from_os_id("Darwin"), Platform::MacOs);
        assert_eq!(Platform::from_os_id("Linux"), Platform::Linux);
        assert_eq!(Platform::from_os_id("MINGW64_NT-10.0-19045"), Platform::Windows);
        assert_eq!(Platform::from_os_id("MSYS_NT-10.0"), Platform::Windows);
        assert_eq!(Platform::from_os_id("CYGWIN_NT-10.0"), Platform::Windows);
        assert_eq!(Platform::from_os_id("Windows_NT"), Platform::Windows);
    }

    #[test]
    fn test_from_os_id_rust_values() {
        assert_eq!(Platform::from_os_id("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os_id("linux"), Platform::Linux);
        assert_eq!(Platform::from_os_id("windows"), Platform::Windows);
    }

    #[test]
    fn test_from_os_id_unsupported() {
        assert_eq!(
            Platform::from_os_id("FreeBSD"),
            Platform::Unsupported("FreeBSD".into())
        );
        assert_eq!(Platform::from_os_id(""), Platform::Unsupported(String::new()));
        assert_eq!(Platform::from_os_id("").to_string(), "(unknown)");
    }

    #[test]
    fn test_resolve_prefers_override() {
        assert_eq!(Platform::resolve(Some("Linux")), Platform::Linux);
        assert_eq!(Platform::resolve(None), Platform::current());

        #[cfg(target_os = "macos")]
        assert_eq!(Platform::current(), Platform::MacOs);

        #[cfg(target_os = "linux")]
        assert_eq!(Platform::current(), Platform::Linux);

        #[cfg(target_os = "windows")]
        assert_eq!(Platform::current(), Platform::Windows);
    }
}
