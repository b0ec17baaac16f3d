//! HTTP client for one-shot asset downloads.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::io::Write;

use super::error::classify_error;

/// User agent sent with every request.
pub const USER_AGENT: &str = "lab-editor-install";

/// Thin wrapper over a reqwest [`Client`].
///
/// Downloads are attempted exactly once: any transport error, redirect
/// failure or non-success status is returned to the caller.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the default client used by the installer.
    pub fn with_defaults() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Downloads `url` into the writer returned by `create_writer`.
    ///
    /// The writer is only created once the response status is known to be
    /// a success, so a failed request never touches the destination.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to start download request for {}", url))?;

        let mut response = response.error_for_status().map_err(classify_error)?;

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            downloaded_bytes += chunk.len() as u64;
        }
        writer.flush().context("Failed to flush downloaded file")?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
