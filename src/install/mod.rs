use anyhow::{Result, bail};
use log::{debug, info};
use std::sync::Arc;

use crate::{
    cleanup::{SharedCleanupContext, TempDownload, new_shared},
    download::{asset_url, download_file},
    platform::{MACOS_ASSET, Platform},
    runtime::Runtime,
};

pub mod config;
mod placement;
mod signal;

pub use config::{Config, InstallOptions};
pub use placement::{
    BINARY_NAME, EXECUTABLE_MODE, InstallTarget, Placement, Scope, dir_on_path, path_advisory,
    place_binary,
};
use signal::ExitSignals;

/// Result of a completed installer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The binary was downloaded and placed.
    Installed(Placement),
    /// No prebuilt binary for this platform; instructions were printed.
    Redirected(Platform),
}

#[tracing::instrument(skip(runtime))]
pub async fn install<R: Runtime + 'static>(
    runtime: R,
    options: InstallOptions,
) -> Result<InstallOutcome> {
    let config = Config::new(runtime, options)?;
    Installer::new(config).run().await
}

pub struct Installer<R: Runtime> {
    config: Config<R>,
}

impl<R: Runtime> Installer<R> {
    pub fn new(config: Config<R>) -> Self {
        Self { config }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<InstallOutcome> {
        let platform = &self.config.platform;
        let asset = match platform {
            Platform::MacOs => MACOS_ASSET,
            Platform::Linux | Platform::Windows => {
                println!("{}", redirect_message(platform, &self.config.repo));
                return Ok(InstallOutcome::Redirected(platform.clone()));
            }
            Platform::Unsupported(_) => {
                bail!("Unsupported operating system: {}", platform);
            }
        };

        let url = asset_url(&self.config.base_url, &self.config.repo, asset);
        info!("Installing {} for {}", asset, platform);

        // Remove the partial download if a signal ends the run early
        let cleanup_ctx = new_shared();
        let cleanup_ctx_clone = Arc::clone(&cleanup_ctx);
        let mut signals = ExitSignals::register()?;

        let signal_handler = tokio::spawn(async move {
            let code = signals.recv().await;
            eprintln!("\nInterrupted, cleaning up...");
            if let Ok(ctx) = cleanup_ctx_clone.lock() {
                ctx.cleanup();
            }
            std::process::exit(code);
        });

        let result = self.fetch_and_place(&url, Arc::clone(&cleanup_ctx)).await;

        signal_handler.abort();

        let placement = result?;
        print_install_success(&placement);

        Ok(InstallOutcome::Installed(placement))
    }

    /// Download into a scoped temporary file and place it. The temporary
    /// file is removed when this returns, whatever the outcome.
    async fn fetch_and_place(&self, url: &str, cleanup_ctx: SharedCleanupContext) -> Result<Placement> {
        let runtime = &self.config.runtime;
        let temp = TempDownload::new(cleanup_ctx, &runtime.temp_dir());
        debug!("Downloading to temporary file {:?}", temp.path());

        println!("Downloading {}", url);
        download_file(runtime, url, temp.path(), &self.config.http).await?;
        runtime.set_permissions(temp.path(), EXECUTABLE_MODE)?;

        place_binary(
            runtime,
            temp.path(),
            &self.config.target,
            self.config.elevate,
        )
    }
}

fn redirect_message(platform: &Platform, repo: &str) -> String {
    format!(
        "No prebuilt {binary} binary is published for {platform}.\n\
         Build it from source with Rust (https://rustup.rs):\n  \
         cargo install --git https://github.com/{repo}",
        binary = BINARY_NAME,
    )
}

fn print_install_success(placement: &Placement) {
    println!("{} installed to {}", BINARY_NAME, placement.path.display());
    println!("Try: {} -a1 -c1 -l1", BINARY_NAME);
}
