use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::PipelineError;

/// Optional override file looked up in the site root
pub const CONFIG_FILE: &str = "obras.config.json";

/// Environment variable pointing at the site root
pub const SITE_ROOT_ENV: &str = "OBRAS_SITE_ROOT";

/// Where the site keeps its assets, relative to the site root
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    /// Root that manifest media paths are relative to
    pub images_root: PathBuf,
    /// Folder names under `images_root`
    pub originals: String,
    pub upscaled: String,
    pub optimized: String,
    pub manifest: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            images_root: PathBuf::from("assets/images"),
            originals: "obras".to_string(),
            upscaled: "obras-upscaled".to_string(),
            optimized: "obras-optimized".to_string(),
            manifest: PathBuf::from("assets/data/obras.json"),
        }
    }
}

/// Resolution floor and ceiling for the upscale stage
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ResolutionBounds {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ResolutionBounds {
    fn default() -> Self {
        Self {
            min_width: 2400,
            min_height: 1600,
            max_width: 4000,
            max_height: 3000,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct UpscaleConfig {
    pub bounds: ResolutionBounds,
    /// Median filter window (pixels, odd)
    pub denoise_window: u32,
    pub sharpen_sigma: f32,
    pub sharpen_threshold: i32,
    /// Linear contrast: v * gain + offset
    pub contrast_gain: f32,
    pub contrast_offset: f32,
    /// Luminance percentiles stretched to the full range by normalize
    pub normalize_low: f32,
    pub normalize_high: f32,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            bounds: ResolutionBounds::default(),
            denoise_window: 5,
            sharpen_sigma: 1.5,
            sharpen_threshold: 1,
            contrast_gain: 1.05,
            contrast_offset: -(128.0 * 0.05),
            normalize_low: 0.01,
            normalize_high: 0.99,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct OptimizeConfig {
    /// WebP quality (0-100)
    pub quality: f32,
    /// WebP method/effort (0-6)
    pub effort: i32,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            quality: 90.0,
            effort: 6,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Image carousel interval on hover
    pub carousel_interval_ms: u64,
    /// How long a hovered card shows its preview video before cycling
    pub video_hold_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            carousel_interval_ms: 1500,
            video_hold_ms: 6000,
        }
    }
}

impl ViewerConfig {
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms.max(1))
    }

    pub fn video_hold(&self) -> Duration {
        Duration::from_millis(self.video_hold_ms.max(1))
    }
}

/// Everything the stages and the viewer need. Every field has a default,
/// so a partial `obras.config.json` only overrides what it names.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub site_root: PathBuf,
    pub assets: AssetPaths,
    pub upscale: UpscaleConfig,
    pub optimize: OptimizeConfig,
    pub viewer: ViewerConfig,
    /// Extra or overriding project name -> folder slug entries
    pub folder_map: BTreeMap<String, String>,
}

impl Config {
    /// Resolve the site root and read the optional config file
    pub fn load() -> Result<Self, PipelineError> {
        Self::load_from(&Self::site_root_from_env())
    }

    /// `OBRAS_SITE_ROOT`, or the current directory
    pub fn site_root_from_env() -> PathBuf {
        std::env::var_os(SITE_ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Built-in settings anchored at `site_root`
    pub fn with_site_root(site_root: &Path) -> Self {
        Config {
            site_root: site_root.to_path_buf(),
            ..Config::default()
        }
    }

    pub fn load_from(site_root: &Path) -> Result<Self, PipelineError> {
        let path = site_root.join(CONFIG_FILE);

        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|e| PipelineError::Config {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let parsed: Config = serde_json::from_str(&text).map_err(|e| PipelineError::Config {
                path: path.clone(),
                message: e.to_string(),
            })?;
            info!("⚙️  Loaded configuration from {}", path.display());
            parsed
        } else {
            Config::default()
        };

        if config.upscale.denoise_window % 2 == 0 {
            warn!(
                "denoise window {} is even, using {}",
                config.upscale.denoise_window,
                config.upscale.denoise_window + 1
            );
            config.upscale.denoise_window += 1;
        }

        config.site_root = site_root.to_path_buf();
        Ok(config)
    }

    pub fn images_root(&self) -> PathBuf {
        self.site_root.join(&self.assets.images_root)
    }

    pub fn originals_dir(&self) -> PathBuf {
        self.images_root().join(&self.assets.originals)
    }

    pub fn upscaled_dir(&self) -> PathBuf {
        self.images_root().join(&self.assets.upscaled)
    }

    pub fn optimized_dir(&self) -> PathBuf {
        self.images_root().join(&self.assets.optimized)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.site_root.join(&self.assets.manifest)
    }
}
