//! # Workflows Module
//!
//! The top-level entry points of the library.
//!
//! - **Batch** ([`batch`]) - one forward pass over a structure file, computing the
//!   requested descriptors for every molecule and writing one output record each.
//!   Configuration problems stop the batch before any output exists; problems with
//!   a single molecule only empty that molecule's record.
//! - **Catalog** ([`catalog`]) - enumerates an engine's descriptors with their
//!   documentation and value names.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
