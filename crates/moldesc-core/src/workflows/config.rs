use crate::core::chem::preprocess::PreprocessOptions;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub input_path: PathBuf,
    /// Descriptor and `descriptor.value` names, in invocation order.
    pub descriptors: Vec<String>,
    /// Overrides the engine's output suffix when set.
    pub output_suffix: Option<String>,
    pub preprocess: PreprocessOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Short descriptor names left out of the dump.
    pub exclude: Vec<String>,
}

#[derive(Default)]
pub struct BatchConfigBuilder {
    input_path: Option<PathBuf>,
    descriptors: Option<Vec<String>>,
    output_suffix: Option<String>,
    preprocess: Option<PreprocessOptions>,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn descriptors(mut self, names: Vec<String>) -> Self {
        self.descriptors = Some(names);
        self
    }

    pub fn output_suffix(mut self, suffix: Option<String>) -> Self {
        self.output_suffix = suffix;
        self
    }

    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = Some(options);
        self
    }

    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        Ok(BatchConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            descriptors: self
                .descriptors
                .ok_or(ConfigError::MissingParameter("descriptors"))?,
            output_suffix: self.output_suffix,
            preprocess: self.preprocess.unwrap_or_default(),
        })
    }
}

/// Appends `suffix` to the full input path, without a separator
/// (`data.sdf` + `cdk.yaml` -> `data.sdfcdk.yaml`).
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}
