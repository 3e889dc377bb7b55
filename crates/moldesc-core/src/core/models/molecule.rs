use super::atom::Atom;
use super::bond::{Bond, BondOrder};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("Bond references atom {atom}, but the molecule has {atom_count} atoms")]
    AtomOutOfRange { atom: usize, atom_count: usize },
    #[error("Atom {0} cannot be bonded to itself")]
    SelfBond(usize),
}

/// A single molecule: atoms, bonds, and the named data items that accompanied it
/// in the structure file.
///
/// Molecules are owned by the batch pipeline for exactly one iteration and carry
/// no state across molecules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    properties: BTreeMap<String, String>,
}

impl Molecule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Appends a bond between two existing atoms and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AtomOutOfRange`] if either endpoint does not exist and
    /// [`MoleculeError::SelfBond`] if both endpoints are the same atom.
    pub fn add_bond(
        &mut self,
        atom1: usize,
        atom2: usize,
        order: BondOrder,
    ) -> Result<usize, MoleculeError> {
        for atom in [atom1, atom2] {
            if atom >= self.atoms.len() {
                return Err(MoleculeError::AtomOutOfRange {
                    atom,
                    atom_count: self.atoms.len(),
                });
            }
        }
        if atom1 == atom2 {
            return Err(MoleculeError::SelfBond(atom1));
        }
        self.bonds.push(Bond::new(atom1, atom2, order));
        Ok(self.bonds.len() - 1)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bonds_mut(&mut self) -> &mut [Bond] {
        &mut self.bonds
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterates over the bonds incident to `atom`.
    pub fn bonds_of(&self, atom: usize) -> impl Iterator<Item = &Bond> + '_ {
        self.bonds.iter().filter(move |b| b.contains(atom))
    }

    /// Iterates over the indices of atoms bonded to `atom`.
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds.iter().filter_map(move |b| b.partner(atom))
    }

    pub fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Replaces the atom and bond lists wholesale.
    ///
    /// Used by transforms that delete atoms and must remap bond endpoints. The
    /// caller guarantees every bond endpoint indexes into `atoms`.
    pub(crate) fn replace_graph(&mut self, atoms: Vec<Atom>, bonds: Vec<Bond>) {
        debug_assert!(
            bonds
                .iter()
                .all(|b| b.atom1 < atoms.len() && b.atom2 < atoms.len())
        );
        self.atoms = atoms;
        self.bonds = bonds;
    }

    /// Builds the neighbour list of every atom.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.atoms.len()];
        for bond in &self.bonds {
            adjacency[bond.atom1].push(bond.atom2);
            adjacency[bond.atom2].push(bond.atom1);
        }
        adjacency
    }
}

/// Lists every atom at most `max_depth` bonds from `source`, with its topological
/// distance. `source` itself comes first, at distance 0.
///
/// The search stops at `max_depth`, so its cost depends on the size of the
/// neighbourhood rather than of the molecule.
pub fn neighborhood(
    adjacency: &[Vec<usize>],
    source: usize,
    max_depth: usize,
) -> Vec<(usize, usize)> {
    let mut found = vec![(source, 0)];
    let mut seen = HashSet::from([source]);
    let mut frontier = vec![source];

    for depth in 1..=max_depth {
        let mut next = Vec::new();
        for &atom in &frontier {
            for &neighbor in &adjacency[atom] {
                if seen.insert(neighbor) {
                    next.push(neighbor);
                    found.push((neighbor, depth));
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn propane() -> Molecule {
        let mut mol = Molecule::new("propane");
        let c1 = mol.add_atom(Atom::new("C", Point3::new(0.0, 0.0, 0.0)));
        let c2 = mol.add_atom(Atom::new("C", Point3::new(1.5, 0.0, 0.0)));
        let c3 = mol.add_atom(Atom::new("C", Point3::new(3.0, 0.0, 0.0)));
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        mol.add_bond(c2, c3, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn add_bond_rejects_unknown_atoms_and_self_bonds() {
        let mut mol = propane();
        assert_eq!(
            mol.add_bond(0, 7, BondOrder::Single),
            Err(MoleculeError::AtomOutOfRange {
                atom: 7,
                atom_count: 3
            })
        );
        assert_eq!(
            mol.add_bond(1, 1, BondOrder::Single),
            Err(MoleculeError::SelfBond(1))
        );
        assert_eq!(mol.bond_count(), 2);
    }

    #[test]
    fn neighbors_follow_bonds_in_both_directions() {
        let mol = propane();
        let mut middle: Vec<_> = mol.neighbors(1).collect();
        middle.sort_unstable();
        assert_eq!(middle, vec![0, 2]);
        assert_eq!(mol.neighbors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(mol.bonds_of(2).count(), 1);
    }

    fn sorted(mut found: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
        found.sort_unstable();
        found
    }

    #[test]
    fn neighborhood_counts_bonds_and_skips_disconnected_atoms() {
        let mut mol = propane();
        mol.add_atom(Atom::new("O", Point3::new(9.0, 9.0, 9.0)));
        let adjacency = mol.adjacency();

        assert_eq!(
            sorted(neighborhood(&adjacency, 0, 4)),
            vec![(0, 0), (1, 1), (2, 2)]
        );
        assert_eq!(
            sorted(neighborhood(&adjacency, 2, 4)),
            vec![(0, 2), (1, 1), (2, 0)]
        );
        assert_eq!(neighborhood(&adjacency, 3, 4), vec![(3, 0)]);
    }

    #[test]
    fn neighborhood_stops_at_max_depth() {
        let mut mol = Molecule::new("chain");
        let mut previous = mol.add_atom(Atom::new("C", Point3::origin()));
        for i in 1..500 {
            let next = mol.add_atom(Atom::new("C", Point3::new(i as f64 * 1.5, 0.0, 0.0)));
            mol.add_bond(previous, next, BondOrder::Single).unwrap();
            previous = next;
        }
        let adjacency = mol.adjacency();

        assert_eq!(
            sorted(neighborhood(&adjacency, 0, 1)),
            vec![(0, 0), (1, 1)]
        );
        let around_middle = neighborhood(&adjacency, 250, 4);
        assert_eq!(around_middle.len(), 9);
        assert!(around_middle.iter().all(|&(_, d)| d <= 4));
    }

    #[test]
    fn properties_are_stored_by_key() {
        let mut mol = Molecule::new("m");
        mol.set_property("ID", "42");
        assert_eq!(mol.property("ID"), Some("42"));
        assert_eq!(mol.property("missing"), None);
        assert_eq!(mol.properties().len(), 1);
    }
}
