use super::{compute_all, element_mass, molecular_weight};
use crate::core::chem::elements;
use crate::core::models::molecule::{Molecule, neighborhood};
use crate::descriptor::engine::{DescriptorEngine, DescriptorInfo};
use crate::descriptor::error::{CalculationError, DescriptorError};
use crate::descriptor::registry::{DescriptorRegistry, MolecularDescriptor};
use crate::descriptor::result::DescriptorOutcome;

pub const CDK_NAMESPACE: &str = "org.openscience.cdk.qsar.descriptors.molecular.";

/// Engine following the CDK naming convention, where the `Descriptor` token may
/// sit anywhere in a class name and names are resolved by trial insertion.
pub struct CdkEngine {
    registry: DescriptorRegistry,
}

impl CdkEngine {
    pub fn new() -> Self {
        let mut registry = DescriptorRegistry::new(CDK_NAMESPACE);
        registry.register(AtomCount);
        registry.register(BondCount);
        registry.register(Weight);
        registry.register(AromaticAtomsCount);
        registry.register(HBondDonorCount);
        registry.register(AutocorrelationMass);
        registry.register(GravitationalIndex);
        Self { registry }
    }
}

impl Default for CdkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorEngine for CdkEngine {
    fn name(&self) -> &'static str {
        "CDK"
    }

    fn namespace(&self) -> &str {
        self.registry.namespace()
    }

    fn catalog_prefix(&self) -> &str {
        "Cdk"
    }

    fn output_suffix(&self) -> &str {
        "cdk.yaml"
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
}

struct AtomCount;

impl MolecularDescriptor for AtomCount {
    fn class_name(&self) -> &'static str {
        "AtomCountDescriptor"
    }
    fn description(&self) -> &'static str {
        "Number of atoms, including hydrogens folded into heavy atoms."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["nAtom"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        let implicit: usize = molecule
            .atoms()
            .iter()
            .map(|a| usize::from(a.implicit_hydrogens))
            .sum();
        Ok(vec![(molecule.atom_count() + implicit) as f64])
    }
}

struct BondCount;

impl MolecularDescriptor for BondCount {
    fn class_name(&self) -> &'static str {
        "BondCountDescriptor"
    }
    fn description(&self) -> &'static str {
        "Number of bonds between explicit atoms."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["nB"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        Ok(vec![molecule.bond_count() as f64])
    }
}

struct Weight;

impl MolecularDescriptor for Weight {
    fn class_name(&self) -> &'static str {
        "WeightDescriptor"
    }
    fn description(&self) -> &'static str {
        "Molecular weight: the sum of
         standard atomic weights, implicit hydrogens included."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["MW"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        Ok(vec![molecular_weight(molecule)?])
    }
}

struct AromaticAtomsCount;

impl MolecularDescriptor for AromaticAtomsCount {
    fn class_name(&self) -> &'static str {
        "AromaticAtomsCountDescriptor"
    }
    fn description(&self) -> &'static str {
        "Number of atoms flagged aromatic."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["naAromAtom"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        let count = molecule.atoms().iter().filter(|a| a.is_aromatic).count();
        Ok(vec![count as f64])
    }
}

struct HBondDonorCount;

impl MolecularDescriptor for HBondDonorCount {
    fn class_name(&self) -> &'static str {
        "HBondDonorCountDescriptor"
    }
    fn description(&self) -> &'static str {
        "Number of hydrogen bond donors: oxygen and nitrogen atoms carrying at least one hydrogen."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["nHBDon"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        let donors = (0..molecule.atom_count())
            .filter(|&i| {
                let atom = &molecule.atoms()[i];
                matches!(atom.symbol.as_str(), "O" | "N")
                    && (atom.implicit_hydrogens > 0
                        || molecule
                            .neighbors(i)
                            .any(|n| molecule.atoms()[n].is_hydrogen()))
            })
            .count();
        Ok(vec![donors as f64])
    }
}

const AUTOCORRELATION_LAGS: usize = 5;

/// Moreau-Broto autocorrelation of carbon-scaled atomic masses over topological
/// distance. `ATSm<k>` sums `w_i * w_j` over atom pairs `k - 1` bonds apart; `ATSm1`
/// is the sum of squared weights.
struct AutocorrelationMass;

impl MolecularDescriptor for AutocorrelationMass {
    fn class_name(&self) -> &'static str {
        "AutocorrelationDescriptorMass"
    }
    fn description(&self) -> &'static str {
        "Moreau-Broto autocorrelation descriptor using
         atomic masses scaled by the mass of carbon."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["ATSm1", "ATSm2", "ATSm3", "ATSm4", "ATSm5"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        let carbon = elements::mass_of("C").unwrap_or(12.011);
        let weights = molecule
            .atoms()
            .iter()
            .map(|a| element_mass(a).map(|m| m / carbon))
            .collect::<Result<Vec<_>, _>>()?;

        let adjacency = molecule.adjacency();
        let mut sums = vec![0.0; AUTOCORRELATION_LAGS];
        for (i, weight) in weights.iter().enumerate() {
            for (j, distance) in neighborhood(&adjacency, i, AUTOCORRELATION_LAGS - 1) {
                if j >= i {
                    sums[distance] += weight * weights[j];
                }
            }
        }
        Ok(sums)
    }
}

/// Mass-weighted inverse square distances between heavy atoms: `GRAV-1` over
/// bonded pairs, `GRAV-2` over all pairs. Explicit hydrogens are ignored.
struct GravitationalIndex;

impl MolecularDescriptor for GravitationalIndex {
    fn class_name(&self) -> &'static str {
        "GravitationalIndexDescriptor"
    }
    fn description(&self) -> &'static str {
        "Gravitational index of heavy atoms computed from 3D coordinates."
    }
    fn value_names(&self) -> &'static [&'static str] {
        &["GRAV-1", "GRAV-2"]
    }
    fn calculate(&self, molecule: &Molecule) -> Result<Vec<f64>, CalculationError> {
        let atoms = molecule.atoms();
        let heavy: Vec<usize> = (0..atoms.len()).filter(|&i| !atoms[i].is_hydrogen()).collect();
        let mut masses = vec![0.0; atoms.len()];
        for &i in &heavy {
            masses[i] = element_mass(&atoms[i])?;
        }

        let term = |i: usize, j: usize| -> Result<f64, CalculationError> {
            let r2 = (atoms[i].position - atoms[j].position).norm_squared();
            if r2 == 0.0 {
                return Err(CalculationError::CoincidentAtoms(i, j));
            }
            Ok(masses[i] * masses[j] / r2)
        };

        let mut bonded = 0.0;
        for bond in molecule.bonds() {
            if !atoms[bond.atom1].is_hydrogen() && !atoms[bond.atom2].is_hydrogen() {
                bonded += term(bond.atom1, bond.atom2)?;
            }
        }
        let mut all_pairs = 0.0;
        for (k, &i) in heavy.iter().enumerate() {
            for &j in &heavy[k + 1..] {
                all_pairs += term(i, j)?;
            }
        }
        Ok(vec![bonded, all_pairs])
    }
}
