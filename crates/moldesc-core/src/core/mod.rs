//! # Core Module
//!
//! Fundamental building blocks shared by every engine and workflow.
//!
//! - **Molecule Representation** ([`models`]) - Atoms, bonds, and the molecule container
//! - **Chemistry Primitives** ([`chem`]) - Element data and the pre-processing transforms
//! - **File I/O** ([`io`]) - Structure-file reading and output record serialization
//!
//! Nothing in this module knows about descriptor names or engines.

pub mod chem;
pub mod io;
pub mod models;
