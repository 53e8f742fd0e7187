//! Error taxonomy for component generation

use crate::component::ComponentType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the generation pipeline.
///
/// Input errors (`Config*`, `UnknownComponentType`) and `Write` abort a run.
/// `TemplateRead` and `Manifest` are recoverable: the pipeline turns them into
/// warnings on the [`GenerationReport`](crate::generator::GenerationReport).
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config file {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("config file {} is missing required field '{field}'", path.display())]
    ConfigMissingField { path: PathBuf, field: &'static str },

    #[error("component type '{0}' requires a config file")]
    ConfigRequired(ComponentType),

    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("failed to read template '{template}': {reason}")]
    TemplateRead { template: String, reason: String },

    #[error("failed to write {artifact} to {}: {source}", path.display())]
    Write {
        artifact: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to update manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
