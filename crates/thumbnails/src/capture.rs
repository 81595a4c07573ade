//! Screenshot capture
//!
//! Targets are processed one at a time. Each capture is bounded by the
//! configured timeout and is never retried; failures go into the report.

use async_trait::async_trait;
use datahub_common::{catalog::Project, config::ThumbnailConfig, metrics};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::errors::{Result, ThumbnailError};
use crate::report::BatchReport;

/// Something that can render a URL into raster image bytes
#[async_trait]
pub trait Screenshotter: Send + Sync {
    async fn capture(&self, url: &str) -> Result<Vec<u8>>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// One page to capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTarget<'a> {
    pub id: &'a str,
    pub url: &'a str,
}

impl<'a> From<&'a Project> for CaptureTarget<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            id: project.id,
            url: project.url,
        }
    }
}

/// Screenshot-service URL for a full viewport PNG of `url`
pub fn capture_url(config: &ThumbnailConfig, url: &str) -> String {
    format!(
        "{}/png/width/{}/crop/{}/viewportWidth/{}/{}",
        config.service_base.trim_end_matches('/'),
        config.viewport_width,
        config.viewport_height,
        config.viewport_width,
        url
    )
}

/// Captures through an HTTP screenshot service
pub struct HttpScreenshotter {
    client: reqwest::Client,
    config: ThumbnailConfig,
}

impl HttpScreenshotter {
    pub fn new(config: ThumbnailConfig) -> Result<Self> {
        // Per-target timeout is enforced by `generate`
        let client = reqwest::Client::builder()
            .timeout(config.capture_timeout() + Duration::from_secs(5))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Screenshotter for HttpScreenshotter {
    async fn capture(&self, url: &str) -> Result<Vec<u8>> {
        let request_url = capture_url(&self.config, url);
        debug!(url = %request_url, "Requesting screenshot");

        let response = self.client.get(&request_url).send().await?;
        if !response.status().is_success() {
            return Err(ThumbnailError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Capture every target into `{dir}/{id}.png`.
/// Only failing to create `dir` aborts; per-target errors are reported.
#[instrument(skip(shooter, targets), fields(screenshotter = shooter.name(), targets = targets.len()))]
pub async fn generate(
    shooter: &dyn Screenshotter,
    targets: &[CaptureTarget<'_>],
    dir: &Path,
    timeout: Duration,
) -> Result<BatchReport> {
    fs::create_dir_all(dir).await?;
    let mut report = BatchReport::default();

    for target in targets {
        match capture_one(shooter, target, dir, timeout).await {
            Ok(path) => {
                info!(id = target.id, path = %path.display(), "Captured screenshot");
                metrics::record_thumbnail("capture", true);
                report.record_success();
            }
            Err(e) => {
                warn!(id = target.id, url = target.url, error = %e, "Screenshot failed");
                metrics::record_thumbnail("capture", false);
                report.record_failure(target.id, e);
            }
        }
    }

    report.log_summary("capture");
    Ok(report)
}

async fn capture_one(
    shooter: &dyn Screenshotter,
    target: &CaptureTarget<'_>,
    dir: &Path,
    timeout: Duration,
) -> Result<PathBuf> {
    let bytes = tokio::time::timeout(timeout, shooter.capture(target.url))
        .await
        .map_err(|_| ThumbnailError::Timeout {
            seconds: timeout.as_secs(),
        })??;

    // Services sometimes answer 200 with an HTML error page
    image::guess_format(&bytes).map_err(|e| ThumbnailError::Decode {
        path: target.url.to_string(),
        message: e.to_string(),
    })?;

    let path = dir.join(format!("{}.png", target.id));
    fs::write(&path, bytes).await?;
    Ok(path)
}
