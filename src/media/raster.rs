/// Raster backend used by the pipeline stages
///
/// `Raster` is the seam between stage logic (which files, which scale,
/// where to write) and pixel work. `ImageRaster` does the pixel work with
/// `image`, `imageproc` and `webp`; tests drive the stages with a fake.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::fs;
use std::path::{Path, PathBuf};

use super::tone;
use crate::error::MediaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Contrast and normalize settings applied after a resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneAdjust {
    pub contrast_gain: f32,
    pub contrast_offset: f32,
    pub normalize_low: f32,
    pub normalize_high: f32,
}

/// One enhance pass: denoise, optional resize + tone, sharpen, PNG encode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhancePlan {
    /// Median filter window; 0 or 1 disables it
    pub denoise_window: u32,
    /// Exact output dimensions (no aspect clamp), None to keep the size
    pub resize_to: Option<Dimensions>,
    pub sharpen_sigma: f32,
    pub sharpen_threshold: i32,
    pub tone: Option<ToneAdjust>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebpSettings {
    pub quality: f32,
    pub effort: i32,
}

pub trait Raster {
    /// Pixel dimensions of an image file
    fn dimensions(&self, path: &Path) -> Result<Dimensions, MediaError>;

    /// Run an enhance pass and write a lossless PNG to `output`
    fn enhance(&self, input: &Path, output: &Path, plan: &EnhancePlan) -> Result<(), MediaError>;

    /// Re-encode as lossy WebP at the same dimensions. Returns bytes written.
    fn encode_webp(
        &self,
        input: &Path,
        output: &Path,
        settings: &WebpSettings,
    ) -> Result<u64, MediaError>;
}

/// Sibling path a file is written to before it is renamed into place
pub fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    output.with_file_name(name)
}

/// `Raster` implementation on top of the `image` ecosystem
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRaster;

impl ImageRaster {
    fn open(path: &Path) -> Result<DynamicImage, MediaError> {
        let img = image::open(path)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(MediaError::EmptyImage);
        }
        Ok(img)
    }
}

impl Raster for ImageRaster {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, MediaError> {
        let (width, height) = image::image_dimensions(path)?;
        if width == 0 || height == 0 {
            return Err(MediaError::EmptyImage);
        }
        Ok(Dimensions { width, height })
    }

    fn enhance(&self, input: &Path, output: &Path, plan: &EnhancePlan) -> Result<(), MediaError> {
        let img = Self::open(input)?;
        let mut work = img.to_rgba8();

        // Step 1: median denoise on the original resolution
        let radius = plan.denoise_window / 2;
        if radius > 0 {
            work = imageproc::filter::median_filter(&work, radius, radius);
        }

        // Step 2: resample to the exact target size
        if let Some(target) = plan.resize_to {
            work = image::imageops::resize(&work, target.width, target.height, FilterType::Lanczos3);
        }

        // Step 3: sharpen to recover edges
        let mut work = DynamicImage::ImageRgba8(work)
            .unsharpen(plan.sharpen_sigma, plan.sharpen_threshold)
            .into_rgba8();

        // Step 4-5: mild contrast, then normalize
        if let Some(adjust) = plan.tone {
            tone::linear_contrast(&mut work, adjust.contrast_gain, adjust.contrast_offset);
            tone::normalize(&mut work, adjust.normalize_low, adjust.normalize_high);
        }

        let mut png = Vec::new();
        let encoder = PngEncoder::new_with_quality(
            &mut png,
            CompressionType::Default,
            PngFilter::Adaptive,
        );

        // Keep the alpha channel only when the source had one
        if img.color().has_alpha() {
            work.write_with_encoder(encoder)?;
        } else {
            DynamicImage::ImageRgba8(work).to_rgb8().write_with_encoder(encoder)?;
        }

        // `output` only ever appears complete; the upscale stage skips it once it exists
        let partial = partial_path(output);
        if let Err(e) = fs::write(&partial, &png) {
            let _ = fs::remove_file(&partial);
            return Err(MediaError::io(&partial, e));
        }
        fs::rename(&partial, output).map_err(|e| MediaError::io(output, e))
    }

    fn encode_webp(
        &self,
        input: &Path,
        output: &Path,
        settings: &WebpSettings,
    ) -> Result<u64, MediaError> {
        let img = Self::open(input)?;
        let (width, height) = img.dimensions();

        let mut config = webp::WebPConfig::new()
            .map_err(|_| MediaError::Webp("cannot initialise encoder config".to_string()))?;
        config.quality = settings.quality;
        config.method = settings.effort;

        let memory = if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), width, height)
                .encode_advanced(&config)
                .map_err(|e| MediaError::Webp(format!("{:?}", e)))?
        } else {
            let rgb = img.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height)
                .encode_advanced(&config)
                .map_err(|e| MediaError::Webp(format!("{:?}", e)))?
        };

        fs::write(output, &*memory).map_err(|e| MediaError::io(output, e))?;
        Ok(memory.len() as u64)
    }
}
