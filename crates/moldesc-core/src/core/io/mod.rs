//! Provides input/output functionality for structure files and descriptor output.
//!
//! Structure files are read forward-only, one record at a time, through the
//! [`traits::StructureFile`] interface. Computed values are written through
//! [`records::RecordWriter`], which flushes each molecule's record as soon as it
//! is complete.

pub mod records;
pub mod sdf;
pub mod traits;
