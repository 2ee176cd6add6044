/// Media pipeline module
///
/// This module handles the offline processing of project media:
/// - Upscaling images below the resolution floor (upscale.rs)
/// - Recompressing to WebP (optimize.rs)
/// - Writing media paths into the manifest (manifest_gen.rs)
/// - Chaining the three stages as child processes (orchestrator.rs)

pub mod folders;
pub mod manifest_gen;
pub mod optimize;
pub mod orchestrator;
pub mod raster;
pub mod scan;
pub mod tone;
pub mod upscale;

#[cfg(test)]
pub(crate) mod testing;

/// Per-stage tally. Per-file failures are counted here, never propagated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub folders: usize,
}

impl StageReport {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}
