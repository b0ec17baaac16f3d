use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::{
    download::{DEFAULT_BASE_URL, DEFAULT_REPO},
    http::HttpClient,
    platform::Platform,
    runtime::Runtime,
};

use super::placement::InstallTarget;

/// System-wide binary directory.
pub const DEFAULT_SYSTEM_DIR: &str = "/usr/local/bin";

/// Per-user binary directory, relative to the home directory.
pub const USER_BIN_DIR: &str = ".local/bin";

/// Overrides collected from the command line and environment.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub os: Option<String>,
    pub base_url: Option<String>,
    pub repo: Option<String>,
    pub system_dir: Option<PathBuf>,
    pub no_sudo: bool,
}

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub http: HttpClient,
    pub platform: Platform,
    pub base_url: String,
    pub repo: String,
    pub target: InstallTarget,
    pub elevate: bool,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, options: InstallOptions) -> Result<Self> {
        let platform = Platform::resolve(options.os.as_deref());
        debug!("Resolved platform: {:?}", platform);

        let target = InstallTarget {
            system_dir: options
                .system_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_DIR)),
            user_dir: runtime.home_dir().map(|home| home.join(USER_BIN_DIR)),
        };
        debug!("Install target: {:?}", target);

        Ok(Self {
            runtime,
            http: HttpClient::with_defaults()?,
            platform,
            base_url: options
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            repo: options.repo.unwrap_or_else(|| DEFAULT_REPO.to_string()),
            target,
            elevate: !options.no_sudo,
        })
    }
}
