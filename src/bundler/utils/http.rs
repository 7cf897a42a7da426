//! HTTP utilities for downloading bundler tools.
//!
//! Used for the ASIO SDK archive and the portable Inno Setup toolset.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;

/// Downloads a file from a URL.
///
/// Redirects are followed and non-success statuses are errors.
/// Returns the response body.
pub async fn download(url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading {}", url);

    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    log::debug!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

/// Downloads `url` into `dest`, creating parent directories.
pub async fn download_to(url: &str, dest: &Path) -> Result<()> {
    let data = download(url).await?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating download directory", parent)?;
    }
    tokio::fs::write(dest, data)
        .await
        .fs_context("writing download", dest)?;

    Ok(())
}
