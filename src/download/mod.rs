use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Repository the release assets are published from.
pub const DEFAULT_REPO: &str = "lab-editor/lab-editor";

/// Host serving the release downloads.
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// URL of `asset` in the latest release of `repo`.
pub fn asset_url(base_url: &str, repo: &str, asset: &str) -> String {
    format!(
        "{}/{}/releases/latest/download/{}",
        base_url.trim_end_matches('/'),
        repo,
        asset
    )
}

/// Downloads a file from a URL to a temporary path.
#[tracing::instrument(skip(runtime, temp_path, http_client))]
pub async fn download_file<R: Runtime>(
    runtime: &R,
    url: &str,
    temp_path: &Path,
    http_client: &HttpClient,
) -> Result<u64> {
    info!("Downloading file from {}...", url);

    let bytes = http_client
        .download_file(url, || {
            runtime
                .create_file(temp_path)
                .with_context(|| format!("Failed to create temporary file at {:?}", temp_path))
        })
        .await?;

    info!("Download complete ({} bytes).", bytes);
    Ok(bytes)
}
