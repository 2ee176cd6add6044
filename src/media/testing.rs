use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::raster::{Dimensions, EnhancePlan, Raster, WebpSettings};
use crate::error::MediaError;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Raster double keyed by file name. Unknown files fail to decode.
#[derive(Default)]
pub struct FakeRaster {
    sizes: HashMap<String, Dimensions>,
    failing_webp: Vec<String>,
    enhance_calls: RefCell<Vec<(PathBuf, EnhancePlan)>>,
    webp_calls: RefCell<Vec<WebpSettings>>,
}

impl FakeRaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, name: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(name.to_string(), Dimensions { width, height });
        self
    }

    pub fn failing_webp(mut self, name: &str) -> Self {
        self.failing_webp.push(name.to_string());
        self
    }

    pub fn enhance_calls(&self) -> Vec<(PathBuf, EnhancePlan)> {
        self.enhance_calls.borrow().clone()
    }

    pub fn webp_calls(&self) -> Vec<WebpSettings> {
        self.webp_calls.borrow().clone()
    }
}

impl Raster for FakeRaster {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, MediaError> {
        self.sizes
            .get(&file_name(path))
            .copied()
            .ok_or_else(|| MediaError::Webp(format!("cannot decode {}", path.display())))
    }

    fn enhance(&self, input: &Path, output: &Path, plan: &EnhancePlan) -> Result<(), MediaError> {
        self.dimensions(input)?;
        self.enhance_calls
            .borrow_mut()
            .push((input.to_path_buf(), *plan));
        fs::write(output, b"png").map_err(|e| MediaError::io(output, e))
    }

    fn encode_webp(
        &self,
        input: &Path,
        output: &Path,
        settings: &WebpSettings,
    ) -> Result<u64, MediaError> {
        self.webp_calls.borrow_mut().push(*settings);
        if self.failing_webp.contains(&file_name(input)) {
            return Err(MediaError::Webp("scripted failure".to_string()));
        }
        fs::write(output, b"webp").map_err(|e| MediaError::io(output, e))?;
        Ok(4)
    }
}
