use super::error::DescriptorError;

/// The values one descriptor produced for one molecule, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationResult {
    pub identifier: String,
    pub values: Vec<(String, f64)>,
}

impl ComputationResult {
    pub fn new(identifier: &str, values: Vec<(String, f64)>) -> Self {
        Self {
            identifier: identifier.to_string(),
            values,
        }
    }
}

/// Outcome of running one descriptor on one molecule.
pub type DescriptorOutcome = Result<ComputationResult, DescriptorError>;

/// The selected `Prefix.Descriptor.Value` fields of one molecule, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRecord {
    fields: Vec<(String, f64)>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String, value: f64) {
        self.fields.push((key, value));
    }

    pub fn fields(&self) -> &[(String, f64)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
