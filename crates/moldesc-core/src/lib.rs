//! # moldesc Core Library
//!
//! Batch computation of named molecular descriptors over structure-data (SD) files,
//! with results serialized as one YAML list item per molecule.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless molecule models, the element table, the
//!   SD file reader, the output record writer, and the opaque pre-processing
//!   transforms (hydrogen removal, atom typing, aromaticity flags).
//!
//! - **[`descriptor`]: The Naming and Engine Layer.** Resolves short, human-supplied
//!   descriptor names to engine implementation identifiers, classifies requested
//!   names, and defines the [`descriptor::engine::DescriptorEngine`] capability trait
//!   together with the two bundled engines.
//!
//! - **[`workflows`]: The Public API.** The single-pass batch pipeline and the
//!   catalog dumper, tying an engine, a structure file, and an output sink together.

pub mod core;
pub mod descriptor;
pub mod workflows;
