/// Upscale stage
///
/// Brings every project image up to the resolution floor before it is
/// compressed. Images already inside the bounds are only denoised and
/// sharpened. Output is always a lossless PNG under the upscaled tree, one
/// file per input; inputs whose output already exists are skipped.

use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use super::raster::{Dimensions, EnhancePlan, Raster, ToneAdjust};
use super::scan::{self, file_stem};
use super::StageReport;
use crate::config::{ResolutionBounds, UpscaleConfig};
use crate::error::{MediaError, PipelineError};

/// Source formats the upscale stage reads
pub const UPSCALE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Scale factors an upscale may use
pub const SCALE_LADDER: [f32; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];

/// Pick the scale factor for an image of `width` x `height`.
///
/// Images at or above the ceiling, or already meeting the floor, get 1.
/// Otherwise the factor that reaches the floor is computed, capped so the
/// result stays within the ceiling, and snapped to [`SCALE_LADDER`] using
/// the midpoints between rungs.
pub fn plan_scale(width: u32, height: u32, bounds: &ResolutionBounds) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }

    if width >= bounds.max_width || height >= bounds.max_height {
        return 1.0;
    }

    if width >= bounds.min_width && height >= bounds.min_height {
        return 1.0;
    }

    let (w, h) = (width as f64, height as f64);
    let mut scale = (bounds.min_width as f64 / w).max(bounds.min_height as f64 / h);

    if w * scale > bounds.max_width as f64 || h * scale > bounds.max_height as f64 {
        scale = (bounds.max_width as f64 / w).min(bounds.max_height as f64 / h);
    }

    match scale {
        s if s <= 1.25 => 1.0,
        s if s <= 1.75 => 1.5,
        s if s <= 2.25 => 2.0,
        s if s <= 2.75 => 2.5,
        _ => 3.0,
    }
}

/// Output dimensions for a scale factor (rounded to whole pixels)
pub fn scaled_dimensions(source: Dimensions, scale: f32) -> Dimensions {
    Dimensions {
        width: (source.width as f64 * scale as f64).round() as u32,
        height: (source.height as f64 * scale as f64).round() as u32,
    }
}

/// Enhance plan for one image
pub fn enhance_plan(source: Dimensions, config: &UpscaleConfig) -> (f32, EnhancePlan) {
    let scale = plan_scale(source.width, source.height, &config.bounds);
    let upscaling = scale > 1.0;

    let plan = EnhancePlan {
        denoise_window: config.denoise_window,
        resize_to: upscaling.then(|| scaled_dimensions(source, scale)),
        sharpen_sigma: config.sharpen_sigma,
        sharpen_threshold: config.sharpen_threshold,
        tone: upscaling.then_some(ToneAdjust {
            contrast_gain: config.contrast_gain,
            contrast_offset: config.contrast_offset,
            normalize_low: config.normalize_low,
            normalize_high: config.normalize_high,
        }),
    };

    (scale, plan)
}

/// Result for one successfully written file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpscaleOutcome {
    pub source: Dimensions,
    pub output: Dimensions,
    pub scale: f32,
}

/// Upscale a single image into `output`
pub fn upscale_file<R: Raster>(
    raster: &R,
    input: &Path,
    output: &Path,
    config: &UpscaleConfig,
) -> Result<UpscaleOutcome, MediaError> {
    let source = raster.dimensions(input)?;
    let (scale, plan) = enhance_plan(source, config);

    if let Some(target) = plan.resize_to {
        info!("  🔼 Upscale x{}: {} → {}", scale, source, target);
    }

    raster.enhance(input, output, &plan)?;

    Ok(UpscaleOutcome {
        source,
        output: plan.resize_to.unwrap_or(source),
        scale,
    })
}

/// Run the stage over every project folder under `source_root`
pub fn run<R: Raster>(
    raster: &R,
    config: &UpscaleConfig,
    source_root: &Path,
    output_root: &Path,
) -> Result<StageReport, PipelineError> {
    if !source_root.is_dir() {
        return Err(PipelineError::MissingSource(source_root.to_path_buf()));
    }

    let folders = scan::project_folders(source_root);
    let mut report = StageReport::default();

    if folders.is_empty() {
        warn!("⚠️  No project folders found in {}", source_root.display());
        return Ok(report);
    }

    info!("📂 Found {} project folders", folders.len());

    for folder in &folders {
        let source_dir = source_root.join(folder);
        let files = scan::media_files(&source_dir, UPSCALE_EXTENSIONS);

        if files.is_empty() {
            warn!("⚠ {}: no images found", folder);
            continue;
        }

        let dest_dir = output_root.join(folder);
        fs::create_dir_all(&dest_dir).map_err(|e| PipelineError::OutputDir {
            path: dest_dir.clone(),
            source: e,
        })?;

        info!("📁 Processing folder: {} ({} images)", folder, files.len());
        report.folders += 1;
        let processed_before = report.processed;

        for file in &files {
            let input = source_dir.join(file);
            let output = dest_dir.join(format!("{}.png", file_stem(file)));

            if output.exists() {
                info!("  ⏭️  {} already exists (skipped)", file);
                report.skipped += 1;
                continue;
            }

            match upscale_file(raster, &input, &output, config) {
                Ok(outcome) => {
                    report.processed += 1;
                    info!("  ✅ {}: {} → {}", file, outcome.source, outcome.output);
                }
                Err(e) => {
                    report.failed += 1;
                    error!("  ❌ Error in {}: {}", file, e);
                }
            }
        }

        let done = report.processed - processed_before;
        if done > 0 {
            info!("✓ {}: {} images upscaled", folder, done);
        }
    }

    info!(
        "📊 Upscale summary: {} processed, {} skipped, {} failed, {} folders",
        report.processed, report.skipped, report.failed, report.folders
    );
    info!("💾 Upscaled images saved in: {}", output_root.display());

    Ok(report)
}
