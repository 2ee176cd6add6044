/// Tone adjustments applied after an upscale
///
/// Both operations work in place on 8-bit RGBA buffers and leave the alpha
/// channel alone:
/// - linear contrast: `v * gain + offset`
/// - normalize: stretch a luminance percentile range to 0..=255

use image::RgbaImage;

/// Rec. 601 luma of an 8-bit pixel
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}

/// Apply `v * gain + offset` to the colour channels
pub fn linear_contrast(img: &mut RgbaImage, gain: f32, offset: f32) {
    let lut: [u8; 256] =
        std::array::from_fn(|v| (v as f32 * gain + offset).round().clamp(0.0, 255.0) as u8);

    for pixel in img.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = lut[*channel as usize];
        }
    }
}

/// 256-bin luminance histogram
pub fn luma_histogram(img: &RgbaImage) -> [u64; 256] {
    let mut bins = [0u64; 256];
    for pixel in img.pixels() {
        let [r, g, b, _] = pixel.0;
        bins[luma(r, g, b) as usize] += 1;
    }
    bins
}

/// Smallest luminance value whose cumulative count reaches `fraction`
fn percentile(bins: &[u64; 256], total: u64, fraction: f32) -> u8 {
    let target = (total as f64 * fraction.clamp(0.0, 1.0) as f64).ceil().max(1.0) as u64;
    let mut cumulative = 0;
    for (value, &count) in bins.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            return value as u8;
        }
    }
    255
}

/// Stretch the `[low, high]` luminance percentiles to the full range.
/// Flat images (no spread between the percentiles) are left untouched.
pub fn normalize(img: &mut RgbaImage, low: f32, high: f32) {
    let total = img.width() as u64 * img.height() as u64;
    if total == 0 {
        return;
    }

    let bins = luma_histogram(img);
    let lo = percentile(&bins, total, low);
    let hi = percentile(&bins, total, high);
    if hi <= lo {
        return;
    }

    let scale = 255.0 / (hi - lo) as f32;
    let lut: [u8; 256] = std::array::from_fn(|v| {
        ((v as f32 - lo as f32) * scale).round().clamp(0.0, 255.0) as u8
    });

    for pixel in img.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = lut[*channel as usize];
        }
    }
}
