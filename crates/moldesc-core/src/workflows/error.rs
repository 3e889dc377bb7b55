use crate::core::io::sdf::SdfError;
use crate::descriptor::error::{DescriptorError, ResolveError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a workflow as a whole.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No descriptors requested; expected at least one descriptor or descriptor.value name")]
    NoDescriptors,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to open structure file '{}': {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: SdfError,
    },

    #[error("Failed to create output file '{}': {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Descriptor engine unavailable: {0}")]
    EngineUnavailable(#[source] DescriptorError),

    #[error("Failed to write catalog: {0}")]
    CatalogWrite(#[source] io::Error),

    #[error("Failed to serialize catalog entry '{identifier}': {source}")]
    CatalogSerialize {
        identifier: String,
        #[source]
        source: serde_yaml::Error,
    },
}
