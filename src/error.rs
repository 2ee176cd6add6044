use std::path::PathBuf;
use thiserror::Error;

use crate::state::data::ProjectId;

/// Errors loading or saving the manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read or write manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid manifest: {0}")]
    Shape(String),

    #[error("manifest record {index} ({name}): {source}")]
    Record {
        index: usize,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate project id {0} in manifest")]
    DuplicateId(ProjectId),
}

/// Errors processing a single media file
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("WebP encoding failed: {0}")]
    Webp(String),

    #[error("image has zero width or height")]
    EmptyImage,
}

/// Stage-level errors: these abort a stage or the whole chain
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source directory does not exist: {0}")]
    MissingSource(PathBuf),

    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("failed to start stage {stage}: {source}")]
    Spawn {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stage {stage} exited with {}", describe_exit(.code))]
    StageFailed { stage: String, code: Option<i32> },

    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {}", c),
        None => "a signal".to_string(),
    }
}

impl MediaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MediaError::Io {
            path: path.into(),
            source,
        }
    }
}

impl ManifestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
        }
    }
}
