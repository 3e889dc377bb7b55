//! Bundled descriptor engines.
//!
//! Both engines share the [`DescriptorRegistry`] machinery and differ in their
//! naming conventions and pre-processing, which is all the batch pipeline sees
//! through [`DescriptorEngine`].

pub mod cdk;
pub mod joelib;

use super::engine::DescriptorEngine;
use super::error::CalculationError;
use super::registry::DescriptorRegistry;
use crate::core::chem::elements::{self, HYDROGEN_MASS};
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use std::fmt;

pub use cdk::CdkEngine;
pub use joelib::JoelibEngine;

/// Selects one of the bundled engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Cdk,
    Joelib,
}

impl Backend {
    pub fn engine(self) -> Box<dyn DescriptorEngine> {
        match self {
            Backend::Cdk => Box::new(CdkEngine::new()),
            Backend::Joelib => Box::new(JoelibEngine::new()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cdk => write!(f, "cdk"),
            Backend::Joelib => write!(f, "joelib"),
        }
    }
}

/// Mass of the atom's element, without implicit hydrogens.
pub(crate) fn element_mass(atom: &Atom) -> Result<f64, CalculationError> {
    elements::mass_of(&atom.symbol)
        .ok_or_else(|| CalculationError::UnknownElement(atom.symbol.clone()))
}

/// Sum of atomic masses, counting implicit hydrogens.
pub(crate) fn molecular_weight(molecule: &Molecule) -> Result<f64, CalculationError> {
    molecule.atoms().iter().try_fold(0.0, |total, atom| {
        Ok(total + element_mass(atom)? + f64::from(atom.implicit_hydrogens) * HYDROGEN_MASS)
    })
}

pub(crate) fn compute_all(
    registry: &DescriptorRegistry,
    molecule: &Molecule,
    identifiers: &[String],
) -> Vec<super::result::DescriptorOutcome> {
    identifiers
        .iter()
        .map(|identifier| registry.compute(molecule, identifier))
        .collect()
}
