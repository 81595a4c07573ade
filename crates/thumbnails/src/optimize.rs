//! Thumbnail optimization
//!
//! Every `*.png` in the thumbnail directory is scaled down to the target
//! width (never up), re-encoded in the configured format, and replaces the
//! original file.

use datahub_common::{config::ThumbnailConfig, metrics};
use image::{
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    imageops::FilterType,
    DynamicImage,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::errors::{Result, ThumbnailError};
use crate::report::BatchReport;

/// Encoding for optimized thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, at the configured quality
    WebP,
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "webp" => Ok(OutputFormat::WebP),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            other => Err(ThumbnailError::Config(format!(
                "unsupported thumbnail extension: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizeSettings {
    pub target_width: u32,
    pub quality: u8,
    pub format: OutputFormat,
    pub extension: String,
}

impl OptimizeSettings {
    pub fn from_config(config: &ThumbnailConfig) -> Result<Self> {
        Ok(Self {
            target_width: config.target_width,
            quality: config.quality,
            format: OutputFormat::from_extension(&config.extension)?,
            extension: config.extension.to_ascii_lowercase(),
        })
    }
}

/// Size change of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSavings {
    pub output: PathBuf,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

/// Size totals across a batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeStats {
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

impl SizeStats {
    pub fn add(&mut self, savings: &FileSavings) {
        self.original_bytes += savings.original_bytes;
        self.optimized_bytes += savings.optimized_bytes;
    }

    /// Bytes saved; zero if the output grew
    pub fn saved_bytes(&self) -> u64 {
        self.original_bytes.saturating_sub(self.optimized_bytes)
    }

    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.optimized_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OptimizeOutcome {
    pub report: BatchReport,
    pub stats: SizeStats,
}

/// `*.png` files in `dir`, sorted by name. A missing directory is empty.
pub fn png_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output dimensions: `target_width` wide with the same aspect ratio,
/// or unchanged when already narrow enough.
pub fn scaled_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width <= target_width || width == 0 {
        return (width, height);
    }
    let scaled = (u64::from(height) * u64::from(target_width) / u64::from(width)).max(1);
    (target_width, scaled as u32)
}

fn encode_webp(image: &DynamicImage, quality: u8, path: &Path) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        .encode_simple(false, f32::from(quality))
        .map_err(|e| ThumbnailError::Encode {
            path: path.display().to_string(),
            message: format!("{:?}", e),
        })?;
    Ok(encoded.to_vec())
}

fn encode(image: &DynamicImage, settings: &OptimizeSettings, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let result = match settings.format {
        OutputFormat::WebP => return encode_webp(image, settings.quality, path),
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, settings.quality)),
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut bytes)),
    };

    result.map_err(|e| ThumbnailError::Encode {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(bytes)
}

/// Optimize one PNG. The original is removed once the output is written.
pub fn optimize_file(path: &Path, settings: &OptimizeSettings) -> Result<FileSavings> {
    let original_bytes = std::fs::metadata(path)?.len();

    let image = image::open(path).map_err(|e| ThumbnailError::Decode {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let (width, height) = scaled_dimensions(image.width(), image.height(), settings.target_width);
    let image = if width == image.width() {
        image
    } else {
        image.resize_exact(width, height, FilterType::Lanczos3)
    };

    let output = path.with_extension(&settings.extension);
    let bytes = encode(&image, settings, &output)?;
    std::fs::write(&output, &bytes)?;
    if output != path {
        std::fs::remove_file(path)?;
    }

    Ok(FileSavings {
        output,
        original_bytes,
        optimized_bytes: bytes.len() as u64,
    })
}

/// Optimize every PNG in `dir`, one file at a time on the blocking pool
#[instrument(skip(settings), fields(format = ?settings.format, target_width = settings.target_width))]
pub async fn optimize_dir(dir: &Path, settings: &OptimizeSettings) -> Result<OptimizeOutcome> {
    let files = png_files(dir)?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "No PNG files to optimize");
    }

    let mut outcome = OptimizeOutcome::default();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let job_settings = settings.clone();
        let job_path = path.clone();

        let result = tokio::task::spawn_blocking(move || optimize_file(&job_path, &job_settings))
            .await
            .unwrap_or_else(|e| Err(ThumbnailError::Io(std::io::Error::other(e))));

        match result {
            Ok(savings) => {
                info!(
                    file = %name,
                    output = %savings.output.display(),
                    original_bytes = savings.original_bytes,
                    optimized_bytes = savings.optimized_bytes,
                    "Optimized thumbnail"
                );
                metrics::record_thumbnail("optimize", true);
                metrics::record_bytes_saved(
                    savings.original_bytes.saturating_sub(savings.optimized_bytes),
                );
                outcome.stats.add(&savings);
                outcome.report.record_success();
            }
            Err(e) => {
                warn!(file = %name, error = %e, "Optimization failed");
                metrics::record_thumbnail("optimize", false);
                outcome.report.record_failure(name, e);
            }
        }
    }

    outcome.report.log_summary("optimize");
    info!(
        original_bytes = outcome.stats.original_bytes,
        optimized_bytes = outcome.stats.optimized_bytes,
        saved_bytes = outcome.stats.saved_bytes(),
        reduction_percent = %format!("{:.1}", outcome.stats.reduction_percent()),
        "Optimization totals"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::tests::png_bytes;

    fn settings(extension: &str) -> OptimizeSettings {
        let config = ThumbnailConfig {
            extension: extension.to_string(),
            ..ThumbnailConfig::default()
        };
        OptimizeSettings::from_config(&config).unwrap()
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(1280, 800, 400), (400, 250));
        assert_eq!(scaled_dimensions(300, 200, 400), (300, 200));
        assert_eq!(scaled_dimensions(400, 10, 400), (400, 10));
        assert_eq!(scaled_dimensions(4000, 1, 400), (400, 1));
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_extension("JPG").unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            OutputFormat::from_extension("gif"),
            Err(ThumbnailError::Config(_))
        ));
    }

    #[test]
    fn test_optimize_file_replaces_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        std::fs::write(&path, png_bytes(1280, 800)).unwrap();

        let savings = optimize_file(&path, &settings("webp")).unwrap();

        assert_eq!(savings.output, dir.path().join("x.webp"));
        assert!(!path.exists());
        let optimized = image::open(&savings.output).unwrap();
        assert_eq!((optimized.width(), optimized.height()), (400, 250));
        assert_eq!(
            savings.optimized_bytes,
            std::fs::metadata(&savings.output).unwrap().len()
        );
    }

    /// Gradient with per-pixel noise, so lossy quality has something to drop
    fn detailed_image() -> DynamicImage {
        let img = image::RgbImage::from_fn(400, 250, |x, y| {
            let noise = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) % 61;
            image::Rgb([(x % 256) as u8, (y % 256) as u8, (noise * 4) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_webp_quality_controls_size() {
        let path = Path::new("q.webp");
        let image = detailed_image();
        let low = OptimizeSettings {
            quality: 10,
            ..settings("webp")
        };
        let high = OptimizeSettings {
            quality: 90,
            ..settings("webp")
        };

        let low_bytes = encode(&image, &low, path).unwrap();
        let high_bytes = encode(&image, &high, path).unwrap();

        assert!(low_bytes.len() < high_bytes.len());
        assert_eq!(&low_bytes[..4], b"RIFF");
        assert_eq!(&low_bytes[8..12], b"WEBP");
        let decoded = image::load_from_memory(&high_bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 250));
    }

    #[test]
    fn test_small_image_not_enlarged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        std::fs::write(&path, png_bytes(120, 80)).unwrap();

        let savings = optimize_file(&path, &settings("jpg")).unwrap();
        let optimized = image::open(&savings.output).unwrap();
        assert_eq!((optimized.width(), optimized.height()), (120, 80));
    }

    #[test]
    fn test_png_output_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same.png");
        std::fs::write(&path, png_bytes(800, 400)).unwrap();

        let savings = optimize_file(&path, &settings("png")).unwrap();
        assert_eq!(savings.output, path);
        assert!(path.is_file());
        assert_eq!(image::open(&path).unwrap().width(), 400);
    }

    #[tokio::test]
    async fn test_optimize_dir_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), png_bytes(800, 600)).unwrap();
        std::fs::write(dir.path().join("a.png"), b"not really a png").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let outcome = optimize_dir(dir.path(), &settings("webp")).await.unwrap();

        assert_eq!(outcome.report.succeeded, 1);
        assert_eq!(outcome.report.failed, 1);
        assert_eq!(outcome.report.failures[0].0, "a.png");
        assert!(dir.path().join("b.webp").is_file());
        assert!(dir.path().join("a.png").is_file());
        assert!(dir.path().join("notes.txt").is_file());
        assert!(outcome.stats.original_bytes > 0);
    }

    #[test]
    fn test_png_files_sorted_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.png", "a.PNG", "b.webp"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let names: Vec<String> = png_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "c.png"]);

        assert!(png_files(&dir.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_size_stats() {
        let mut stats = SizeStats::default();
        assert_eq!(stats.reduction_percent(), 0.0);
        stats.add(&FileSavings {
            output: PathBuf::from("x.webp"),
            original_bytes: 1000,
            optimized_bytes: 250,
        });
        assert_eq!(stats.saved_bytes(), 750);
        assert!((stats.reduction_percent() - 75.0).abs() < f64::EPSILON);
    }
}
