//! Data structures for molecules read from structure files.

pub mod atom;
pub mod bond;
pub mod molecule;
