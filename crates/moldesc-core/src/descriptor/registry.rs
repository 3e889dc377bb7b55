use super::engine::DescriptorInfo;
use super::error::{CalculationError, DescriptorError};
use super::result::{ComputationResult, DescriptorOutcome};
use crate::core::models::molecule::Molecule;
use std::collections::BTreeMap;

/// A descriptor implementation bundled with an engine.
pub trait MolecularDescriptor: Send + Sync {
    /// Class name within the engine's namespace, e.g. `WeightDescriptor`.
    fn class_name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Names of the values returned by [`Self::calculate`], in the same order.
    fn value_names(&self) -> &'static [&'static str];

    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError>;
}

/// Descriptor implementations keyed by fully qualified identifier.
pub struct DescriptorRegistry {
    namespace: String,
    descriptors: BTreeMap<String, Box<dyn MolecularDescriptor>>,
}

impl DescriptorRegistry {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            descriptors: BTreeMap::new(),
        }
    }

    pub fn register<D: MolecularDescriptor + 'static>(&mut self, descriptor: D) {
        let identifier = format!("{}{}", self.namespace, descriptor.class_name());
        self.descriptors.insert(identifier, Box::new(descriptor));
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.descriptors.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Catalog metadata for every registered descriptor, ordered by identifier.
    pub fn infos(&self) -> Vec<DescriptorInfo> {
        self.descriptors
            .iter()
            .map(|(identifier, descriptor)| DescriptorInfo {
                identifier: identifier.clone(),
                description: descriptor.description().to_string(),
                value_names: descriptor
                    .value_names()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            })
            .collect()
    }

    /// Runs one descriptor and pairs its values with their names.
    pub fn compute(&self, molecule: &Molecule, identifier: &str) -> DescriptorOutcome {
        let descriptor = self
            .descriptors
            .get(identifier)
            .ok_or_else(|| DescriptorError::UnknownIdentifier(identifier.to_string()))?;

        let values = descriptor
            .calculate(molecule)
            .map_err(|source| DescriptorError::Calculation {
                identifier: identifier.to_string(),
                source,
            })?;

        let names = descriptor.value_names();
        if values.len() != names.len() {
            return Err(DescriptorError::ValueCountMismatch {
                identifier: identifier.to_string(),
                expected: names.len(),
                actual: values.len(),
            });
        }

        Ok(ComputationResult::new(
            identifier,
            names
                .iter()
                .zip(values)
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    struct Fixed(&'static str, Vec<f64>);

    impl MolecularDescriptor for Fixed {
        fn class_name(&self) -> &'static str {
            self.0
        }
        fn description(&self) -> &'static str {
            "fixed values"
        }
        fn value_names(&self) -> &'static [&'static str] {
            &["a", "b"]
        }
        fn calculate(&self, _: &Molecule) -> Result<Vec<f64>, CalculationError> {
            Ok(self.1.clone())
        }
    }

    struct Failing;

    impl MolecularDescriptor for Failing {
        fn class_name(&self) -> &'static str {
            "FailingDescriptor"
        }
        fn description(&self) -> &'static str {
            "always fails"
        }
        fn value_names(&self) -> &'static [&'static str] {
            &["x"]
        }
        fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
            Err(CalculationError::UnknownElement(
                molecule.atoms()[0].symbol.clone(),
            ))
        }
    }

    fn registry() -> DescriptorRegistry {
        let mut registry = DescriptorRegistry::new("ns.");
        registry.register(Fixed("PairDescriptor", vec![1.0, 2.0]));
        registry.register(Fixed("ShortDescriptor", vec![1.0]));
        registry.register(Failing);
        registry
    }

    fn molecule() -> Molecule {
        let mut mol = Molecule::new("m");
        mol.add_atom(Atom::new("Xx", Point3::origin()));
        mol
    }

    #[test]
    fn compute_pairs_values_with_declared_names() {
        let result = registry().compute(&molecule(), "ns.PairDescriptor").unwrap();
        assert_eq!(
            result.values,
            vec![("a".to_string(), 1.0), ("b".to_string(), 2.0)]
        );
        assert_eq!(result.identifier, "ns.PairDescriptor");
    }

    #[test]
    fn compute_reports_unknown_identifiers_and_failures() {
        let registry = registry();
        assert_eq!(
            registry.compute(&molecule(), "ns.Missing"),
            Err(DescriptorError::UnknownIdentifier("ns.Missing".to_string()))
        );
        assert!(matches!(
            registry.compute(&molecule(), "ns.FailingDescriptor"),
            Err(DescriptorError::Calculation { .. })
        ));
        assert!(matches!(
            registry.compute(&molecule(), "ns.ShortDescriptor"),
            Err(DescriptorError::ValueCountMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn infos_are_sorted_by_identifier() {
        let identifiers: Vec<_> = registry()
            .infos()
            .into_iter()
            .map(|info| info.identifier)
            .collect();
        assert_eq!(
            identifiers,
            vec!["ns.FailingDescriptor", "ns.PairDescriptor", "ns.ShortDescriptor"]
        );
    }
}
