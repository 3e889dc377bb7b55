//! Element data and the opaque pre-processing transforms applied to each molecule
//! before descriptor computation.

pub mod elements;
pub mod preprocess;

pub use preprocess::{AtomTypeError, PreprocessOptions, PreprocessReport};
