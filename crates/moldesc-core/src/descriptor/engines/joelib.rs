use super::{compute_all, molecular_weight};
use crate::core::chem::preprocess::{PreprocessOptions, PreprocessReport};
use crate::core::models::molecule::Molecule;
use crate::descriptor::engine::{DescriptorEngine, DescriptorInfo};
use crate::descriptor::error::{CalculationError, DescriptorError, ResolveError};
use crate::descriptor::registry::{DescriptorRegistry, MolecularDescriptor};
use crate::descriptor::result::DescriptorOutcome;

pub const JOELIB_NAMESPACE: &str = "joelib2.feature.types.";

/// Engine following the JOELib convention: feature names are used verbatim
/// under the namespace, and molecules are computed on as read.
pub struct JoelibEngine {
    registry: DescriptorRegistry,
}

impl JoelibEngine {
    pub fn new() -> Self {
        let mut registry = DescriptorRegistry::new(JOELIB_NAMESPACE);
        registry.register(NumberOfAtoms);
        registry.register(NumberOfBonds);
        registry.register(MolecularWeight);
        registry.register(HeavyAtoms);
        Self { registry }
    }
}

impl Default for JoelibEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorEngine for JoelibEngine {
    fn name(&self) -> &'static str {
        "JOELib"
    }

    fn namespace(&self) -> &str {
        self.registry.namespace()
    }

    fn catalog_prefix(&self) -> &str {
        "Joelib"
    }

    fn output_suffix(&self) -> &str {
        "joelib.yaml"
    }

    fn contains(&self, identifier: &str) -> bool {
        self.registry.contains(identifier)
    }

    fn catalog(&self) -> Result<Vec<DescriptorInfo>, DescriptorError> {
        Ok(self.registry.infos())
    }

    fn compute(
        &self,
        molecule: &Molecule,
        identifiers: &[String],
    ) -> Result<Vec<DescriptorOutcome>, DescriptorError> {
        Ok(compute_all(&self.registry, molecule, identifiers))
    }

    fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        if name.trim().is_empty() {
            return Err(ResolveError::EmptyName);
        }
        let identifier = format!("{}{}", self.namespace(), name);
        if self.contains(&identifier) {
            Ok(identifier)
        } else {
            Err(ResolveError::Unresolved(name.to_string()))
        }
    }

    fn short_name(&self, identifier: &str) -> String {
        identifier
            .strip_prefix(self.namespace())
            .unwrap_or(identifier)
            .to_string()
    }

    fn preprocess(
        &self,
        _molecule: &mut Molecule,
        _options: &PreprocessOptions,
    ) -> Result<PreprocessReport, DescriptorError> {
        Ok(PreprocessReport::default())
    }
}

struct NumberOfAtoms;

impl MolecularDescriptor for NumberOfAtoms {
    fn class_name(&self) -> &'static str {
        "NumberOfAtoms"
    }
    fn description(&self) -> &'static str {
        "Number of atoms."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["atoms"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        Ok(vec![molecule.atom_count() as f64])
    }
}

struct NumberOfBonds;

impl MolecularDescriptor for NumberOfBonds {
    fn class_name(&self) -> &'static str {
        "NumberOfBonds"
    }
    fn description(&self) -> &'static str {
        "Number of bonds."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["bonds"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        Ok(vec![molecule.bond_count() as f64])
    }
}

struct MolecularWeight;

impl MolecularDescriptor for MolecularWeight {
    fn class_name(&self) -> &'static str {
        "MolecularWeight"
    }
    fn description(&self) -> &'static str {
        "Molecular weight."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["MW"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        Ok(vec![molecular_weight(molecule)?])
    }
}

struct HeavyAtoms;

impl MolecularDescriptor for HeavyAtoms {
    fn class_name(&self) -> &'static str {
        "HeavyAtoms"
    }
    fn description(&self) -> &'static str {
        "Number of non-hydrogen atoms."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["heavy"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        let heavy = molecule.atoms().iter().filter(|a| !a.is_hydrogen()).count();
        Ok(vec![heavy as f64])
    }
}
