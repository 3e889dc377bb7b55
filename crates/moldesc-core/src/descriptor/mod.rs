//! The naming and engine layer.
//!
//! Human-supplied descriptor names rarely match an engine's implementation
//! identifiers verbatim. [`naming`] resolves them by trial insertion of the
//! `Descriptor` token, [`request`] turns raw arguments into the set of
//! implementations to run and the values to keep, and [`engine`] defines the
//! capability interface the batch pipeline drives. Two engines are bundled in
//! [`engines`].

pub mod engine;
pub mod engines;
pub mod error;
pub mod naming;
pub mod progress;
pub mod registry;
pub mod request;
pub mod result;
