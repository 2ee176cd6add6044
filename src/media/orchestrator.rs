use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{error, info};

use crate::config::SITE_ROOT_ENV;
use crate::error::PipelineError;

/// The three pipeline stages, in the order they must run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upscale,
    Optimize,
    GenerateManifest,
}

impl Stage {
    pub const CHAIN: [Stage; 3] = [Stage::Upscale, Stage::Optimize, Stage::GenerateManifest];

    /// Executable that runs the stage
    pub fn binary_name(&self) -> &'static str {
        match self {
            Stage::Upscale => "obras-upscale",
            Stage::Optimize => "obras-optimize",
            Stage::GenerateManifest => "obras-manifest",
        }
    }
}

/// Exit of a finished stage process. `None` means it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageExit {
    pub code: Option<i32>,
}

impl StageExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs one stage to completion
pub trait StageRunner {
    fn run(&mut self, stage: Stage) -> Result<StageExit, PipelineError>;
}

/// Spawns each stage as a child process next to the current executable
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    bin_dir: PathBuf,
    site_root: PathBuf,
}

impl ProcessRunner {
    pub fn new(bin_dir: impl Into<PathBuf>, site_root: impl Into<PathBuf>) -> Self {
        ProcessRunner {
            bin_dir: bin_dir.into(),
            site_root: site_root.into(),
        }
    }

    /// Runner for the directory holding the running binary
    pub fn beside_current_exe(site_root: &Path) -> Result<Self, PipelineError> {
        let exe = std::env::current_exe().map_err(|e| PipelineError::Spawn {
            stage: "obras-pipeline".to_string(),
            source: e,
        })?;
        let bin_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(bin_dir, site_root))
    }

    pub fn executable(&self, stage: Stage) -> PathBuf {
        self.bin_dir
            .join(format!("{}{}", stage.binary_name(), std::env::consts::EXE_SUFFIX))
    }
}

impl StageRunner for ProcessRunner {
    fn run(&mut self, stage: Stage) -> Result<StageExit, PipelineError> {
        let status = Command::new(self.executable(stage))
            .env(SITE_ROOT_ENV, &self.site_root)
            .status()
            .map_err(|e| PipelineError::Spawn {
                stage: stage.binary_name().to_string(),
                source: e,
            })?;

        Ok(StageExit {
            code: status.code(),
        })
    }
}

/// Run `stages` in order, stopping at the first one that does not exit 0
pub fn run_chain<R: StageRunner>(runner: &mut R, stages: &[Stage]) -> Result<(), PipelineError> {
    info!("🚀 Starting full obras processing...");

    for &stage in stages {
        info!("📦 Running {}...", stage.binary_name());

        let exit = runner.run(stage)?;
        if !exit.success() {
            error!("❌ {} failed", stage.binary_name());
            return Err(PipelineError::StageFailed {
                stage: stage.binary_name().to_string(),
                code: exit.code,
            });
        }

        info!("✅ {} completed successfully", stage.binary_name());
    }

    info!("🎉 Full processing finished successfully!");
    Ok(())
}
