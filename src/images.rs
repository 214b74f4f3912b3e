//! Download of Contentful-hosted images referenced from MDX sources.
//!
//! Each image is stored under the images directory at its URL path, so
//! `https://images.ctfassets.net/space/asset/hash/name.png` lands at
//! `images/space/asset/hash/name.png`.

use crate::docs::markdown_files;
use crate::retry::{with_retry_if, RetryConfig};
use regex::Regex;
use reqwest::{StatusCode, Url};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

static IMAGE_URL_REGEX: OnceLock<Regex> = OnceLock::new();
static TRAILING_JUNK_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid image URL '{0}'")]
    InvalidUrl(String),
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// 429, 5xx and transport failures are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Status(status) => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::Request(_) => true,
            Self::InvalidUrl(_) | Self::Write { .. } => false,
        }
    }
}

/// Contentful image URLs in `text`, with trailing markup characters removed.
pub fn find_urls_in_text(text: &str) -> Vec<String> {
    let urls = IMAGE_URL_REGEX
        .get_or_init(|| Regex::new(r"https://images\.ctfassets\.net/[^)\s]*").unwrap());
    let trailing = TRAILING_JUNK_REGEX.get_or_init(|| Regex::new(r#"[)\]}>"\s]*$"#).unwrap());

    urls.find_iter(text)
        .map(|m| trailing.replace(m.as_str(), "").into_owned())
        .collect()
}

/// Unique image URLs across every `.mdx` file under `root`, sorted.
pub fn find_image_urls(root: &Path) -> Vec<String> {
    let mut urls = BTreeSet::new();

    for path in markdown_files(root) {
        if path.extension().and_then(|ext| ext.to_str()) != Some("mdx") {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => urls.extend(find_urls_in_text(&content)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    urls.into_iter().collect()
}

/// Local destination for `url` under `base_dir`, mirroring the URL path.
pub fn local_path(url: &str, base_dir: &Path) -> Result<PathBuf, DownloadError> {
    let parsed = Url::parse(url).map_err(|_| DownloadError::InvalidUrl(url.to_string()))?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if segments.is_empty() || segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(DownloadError::InvalidUrl(url.to_string()));
    }

    Ok(segments
        .iter()
        .fold(base_dir.to_path_buf(), |path, segment| path.join(segment)))
}

/// Fetch one image and write it to its mirrored path.
pub async fn download_image(
    client: &reqwest::Client,
    url: &str,
    base_dir: &Path,
) -> Result<PathBuf, DownloadError> {
    let destination = local_path(url, base_dir)?;

    let bytes = with_retry_if(
        &RetryConfig::image_download(),
        &format!("Download {}", url),
        || async {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(DownloadError::Status(status));
            }
            Ok(response.bytes().await?)
        },
        DownloadError::is_retryable,
    )
    .await?;

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| DownloadError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(&destination, &bytes)
        .await
        .map_err(|source| DownloadError::Write {
            path: destination.clone(),
            source,
        })?;

    Ok(destination)
}

/// Tally of a download run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub total: usize,
    pub downloaded: usize,
    pub failed: usize,
}

/// Download every URL in order; failures are logged and counted.
pub async fn download_all(
    client: &reqwest::Client,
    urls: &[String],
    base_dir: &Path,
) -> DownloadSummary {
    let mut summary = DownloadSummary {
        total: urls.len(),
        ..Default::default()
    };

    for (index, url) in urls.iter().enumerate() {
        info!("[{}/{}] Downloading: {}", index + 1, urls.len(), url);
        match download_image(client, url, base_dir).await {
            Ok(path) => {
                info!("✓ Downloaded: {} -> {}", url, path.display());
                summary.downloaded += 1;
            }
            Err(e) => {
                warn!("✗ Failed to download {}: {}", url, e);
                summary.failed += 1;
            }
        }
    }

    summary
}
