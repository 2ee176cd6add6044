/// Optimize stage
///
/// Recompresses every project image to lossy WebP without resizing.
/// Reads the upscaled tree when it exists, otherwise the originals, so the
/// stage also runs on its own.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::raster::{Raster, WebpSettings};
use super::scan::{self, file_stem};
use super::StageReport;
use crate::config::OptimizeConfig;
use crate::error::PipelineError;

pub const OPTIMIZE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

impl From<&OptimizeConfig> for WebpSettings {
    fn from(config: &OptimizeConfig) -> Self {
        WebpSettings {
            quality: config.quality,
            effort: config.effort,
        }
    }
}

/// Prefer the upscaled tree, fall back to the originals
pub fn select_source(upscaled: &Path, originals: &Path) -> Result<PathBuf, PipelineError> {
    if upscaled.is_dir() {
        info!("🔍 Using upscaled images from {}", upscaled.display());
        Ok(upscaled.to_path_buf())
    } else if originals.is_dir() {
        info!("🔍 No upscaled tree, using originals from {}", originals.display());
        Ok(originals.to_path_buf())
    } else {
        Err(PipelineError::MissingSource(originals.to_path_buf()))
    }
}

/// Size reduction in percent (negative when the output grew)
pub fn reduction_percent(input_bytes: u64, output_bytes: u64) -> f64 {
    if input_bytes == 0 {
        return 0.0;
    }
    (1.0 - output_bytes as f64 / input_bytes as f64) * 100.0
}

pub fn run<R: Raster>(
    raster: &R,
    config: &OptimizeConfig,
    source_root: &Path,
    output_root: &Path,
) -> Result<StageReport, PipelineError> {
    if !source_root.is_dir() {
        return Err(PipelineError::MissingSource(source_root.to_path_buf()));
    }

    info!("🚀 Starting image optimization...");

    let settings = WebpSettings::from(config);
    let mut report = StageReport::default();

    for folder in scan::project_folders(source_root) {
        let source_dir = source_root.join(&folder);
        let files = scan::media_files(&source_dir, OPTIMIZE_EXTENSIONS);
        if files.is_empty() {
            continue;
        }

        let dest_dir = output_root.join(&folder);
        fs::create_dir_all(&dest_dir).map_err(|e| PipelineError::OutputDir {
            path: dest_dir.clone(),
            source: e,
        })?;

        info!("📁 Processing: {} ({} images)", folder, files.len());
        report.folders += 1;

        for file in &files {
            let input = source_dir.join(file);
            let output_name = format!("{}.webp", file_stem(file));
            let output = dest_dir.join(&output_name);

            match raster.encode_webp(&input, &output, &settings) {
                Ok(written) => {
                    report.processed += 1;
                    let input_bytes = fs::metadata(&input).map(|m| m.len()).unwrap_or(0);
                    info!(
                        "  ✅ {} → {} ({:.1}% reduction)",
                        file,
                        output_name,
                        reduction_percent(input_bytes, written)
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    error!("  ❌ {} - FAILED: {}", file, e);
                }
            }
        }
    }

    info!("✨ Optimization complete!");
    info!("📊 Total processed: {}", report.processed);
    info!("❌ Failed: {}", report.failed);
    info!("📂 Location: {}", output_root.display());

    Ok(report)
}
