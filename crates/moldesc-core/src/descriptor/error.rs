use thiserror::Error;

/// Failure of one descriptor implementation on one molecule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("element '{0}' is not in the element table")]
    UnknownElement(String),
    #[error("atoms {0} and {1} occupy the same position")]
    CoincidentAtoms(usize, usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Unknown descriptor implementation: {0}")]
    UnknownIdentifier(String),

    #[error("Descriptor '{identifier}' failed: {source}")]
    Calculation {
        identifier: String,
        #[source]
        source: CalculationError,
    },

    #[error("Descriptor '{identifier}' produced {actual} values for {expected} names")]
    ValueCountMismatch {
        identifier: String,
        expected: usize,
        actual: usize,
    },

    #[error("Descriptor engine unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Descriptor names must not be empty")]
    EmptyName,

    #[error("Descriptor not found: {0}")]
    Unresolved(String),
}
