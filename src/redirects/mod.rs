//! Checks whether links previously reported as broken now redirect somewhere.
//!
//! For each reported link the checker loads the page that contained it, looks
//! for a matching anchor, and follows it. When no anchor is found the link is
//! requested directly. Either way the final URL after redirects is compared
//! with the URL that was requested.

mod report;

pub use report::{
    page_url, parse_broken_report, render_summary, report_timestamp, write_csv, write_reports,
    BrokenPage, ReportPaths,
};

use anyhow::{Context, Result};
use reqwest::Url;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome label for one checked link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    RedirectFound,
    NoRedirect,
    DirectRedirectFound,
    NoRedirectDirect,
    Timeout,
    HttpError,
    Error,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedirectFound => "redirect_found",
            Self::NoRedirect => "no_redirect",
            Self::DirectRedirectFound => "direct_redirect_found",
            Self::NoRedirectDirect => "no_redirect_direct",
            Self::Timeout => "timeout",
            Self::HttpError => "http_error",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one broken link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCheck {
    pub page_url: String,
    pub original_link: String,
    pub final_url: Option<String>,
    pub redirect_detected: bool,
    pub status: LinkStatus,
    pub error: Option<String>,
}

impl LinkCheck {
    fn new(page_url: &str, link: &str, status: LinkStatus) -> Self {
        Self {
            page_url: page_url.to_string(),
            original_link: link.to_string(),
            final_url: None,
            redirect_detected: false,
            status,
            error: None,
        }
    }

    fn failed(page_url: &str, link: &str, status: LinkStatus, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(page_url, link, status)
        }
    }

    /// Record where navigating to `requested` ended up.
    fn navigated(
        page_url: &str,
        link: &str,
        requested: &Url,
        landed: &Url,
        redirect: LinkStatus,
        same: LinkStatus,
    ) -> Self {
        if landed == requested {
            Self::new(page_url, link, same)
        } else {
            Self {
                final_url: Some(landed.to_string()),
                redirect_detected: true,
                ..Self::new(page_url, link, redirect)
            }
        }
    }
}

/// First anchor on the page matching `link` exactly, else one whose href
/// contains the link's last path segment.
fn find_anchor_href(html: &str, link: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let last_segment = link.rsplit('/').next().unwrap_or("");

    let mut selectors = vec![format!("a[href='{}']", link)];
    if !last_segment.is_empty() {
        selectors.push(format!("a[href*='{}']", last_segment));
    }

    selectors
        .iter()
        // Links with quotes or other selector syntax simply don't match.
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
                .map(str::to_string)
        })
}

pub struct RedirectChecker {
    client: reqwest::Client,
    base_url: String,
}

impl RedirectChecker {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a link that was not found on its page.
    fn direct_target(&self, page: &Url, link: &str) -> Result<Url> {
        let url = if link.starts_with('/') {
            Url::parse(&format!("{}{}", self.base_url, link))?
        } else if link.starts_with("http") {
            Url::parse(link)?
        } else {
            page.join(link)?
        };
        Ok(url)
    }

    /// GET `url`, following redirects, and return where it landed.
    async fn landing_url(&self, url: Url) -> reqwest::Result<Url> {
        let response = self.client.get(url).send().await?;
        Ok(response.url().clone())
    }

    /// Check one link. Failures are reported in the result, never returned.
    pub async fn check_link(&self, page_url: &str, link: &str) -> LinkCheck {
        info!("  Checking link: {}", link);

        let page = match self.client.get(page_url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return LinkCheck::failed(
                    page_url,
                    link,
                    LinkStatus::Timeout,
                    "Page load timeout".to_string(),
                )
            }
            Err(e) => {
                return LinkCheck::failed(
                    page_url,
                    link,
                    LinkStatus::HttpError,
                    format!("HTTP error: {}", e),
                )
            }
        };
        let page_location = page.url().clone();
        let body = match page.text().await {
            Ok(body) => body,
            Err(e) => {
                return LinkCheck::failed(
                    page_url,
                    link,
                    LinkStatus::Error,
                    format!("Unexpected error: {}", e),
                )
            }
        };

        if let Some(href) = find_anchor_href(&body, link) {
            debug!("  Found anchor with href {}", href);
            let mut target = match page_location.join(&href) {
                Ok(target) => target,
                Err(e) => {
                    return LinkCheck::failed(
                        page_url,
                        link,
                        LinkStatus::Error,
                        format!("Unexpected error: invalid href '{}': {}", href, e),
                    )
                }
            };
            target.set_fragment(None);
            return match self.landing_url(target.clone()).await {
                Ok(landed) => LinkCheck::navigated(
                    page_url,
                    link,
                    &target,
                    &landed,
                    LinkStatus::RedirectFound,
                    LinkStatus::NoRedirect,
                ),
                Err(e) => LinkCheck::failed(
                    page_url,
                    link,
                    LinkStatus::Error,
                    format!("Following link failed: {}", e),
                ),
            };
        }

        let direct = match self.direct_target(&page_location, link) {
            Ok(url) => match self.landing_url(url.clone()).await {
                Ok(landed) => Ok((url, landed)),
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(e.to_string()),
        };
        match direct {
            Ok((requested, landed)) => LinkCheck::navigated(
                page_url,
                link,
                &requested,
                &landed,
                LinkStatus::DirectRedirectFound,
                LinkStatus::NoRedirectDirect,
            ),
            Err(e) => LinkCheck::failed(
                page_url,
                link,
                LinkStatus::Error,
                format!("Direct navigation failed: {}", e),
            ),
        }
    }

    /// Check every link of every page, appending to `results` as it goes so
    /// an interrupted run keeps what was already checked.
    pub async fn check_pages(&self, pages: &[BrokenPage], results: &mut Vec<LinkCheck>) {
        for (i, page) in pages.iter().enumerate() {
            info!("[{}/{}] Processing: {}", i + 1, pages.len(), page.mdx_file);
            info!("  Found {} broken links", page.broken_links.len());

            let url = page_url(&self.base_url, &page.mdx_file);
            info!("  Page URL: {}", url);

            for link in &page.broken_links {
                let check = self.check_link(&url, link).await;
                match &check.final_url {
                    Some(final_url) if check.redirect_detected => {
                        info!("    ✓ Redirect found: {} -> {}", link, final_url)
                    }
                    _ => info!("    ✗ No redirect: {} ({})", link, check.status),
                }
                results.push(check);
            }
        }
    }
}
