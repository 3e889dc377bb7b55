use super::elements;
use crate::core::models::bond::{Bond, BondOrder};
use crate::core::models::molecule::Molecule;
use thiserror::Error;

/// Selects which pre-processing transforms run before descriptor computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    pub remove_hydrogens: bool,
    pub perceive_atom_types: bool,
    pub detect_aromaticity: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            remove_hydrogens: true,
            perceive_atom_types: true,
            detect_aromaticity: true,
        }
    }
}

impl PreprocessOptions {
    pub fn none() -> Self {
        Self {
            remove_hydrogens: false,
            perceive_atom_types: false,
            detect_aromaticity: false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("No atom type matches atom {index} ('{symbol}')")]
pub struct AtomTypeError {
    pub index: usize,
    pub symbol: String,
}

/// What the transforms did to one molecule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessReport {
    pub hydrogens_removed: usize,
    pub typing_failures: Vec<AtomTypeError>,
    pub aromatic_atoms: usize,
}

/// Runs the enabled transforms in their fixed order: hydrogen removal, atom typing,
/// aromaticity detection.
///
/// Every stage runs regardless of earlier outcomes; atoms that fail typing are left
/// untyped and reported in [`PreprocessReport::typing_failures`].
pub fn apply(molecule: &mut Molecule, options: &PreprocessOptions) -> PreprocessReport {
    let mut report = PreprocessReport::default();
    if options.remove_hydrogens {
        report.hydrogens_removed = remove_hydrogens(molecule);
    }
    if options.perceive_atom_types {
        report.typing_failures = perceive_atom_types(molecule);
    }
    if options.detect_aromaticity {
        report.aromatic_atoms = detect_aromaticity(molecule);
    }
    report
}

/// Removes explicit hydrogens bonded to exactly one heavy atom, folding each into
/// that atom's implicit hydrogen count. Returns the number of atoms removed.
///
/// Isolated hydrogens and hydrogens bonded to other hydrogens (or to several atoms)
/// are kept, so H2 and bridging hydrogens survive.
pub fn remove_hydrogens(molecule: &mut Molecule) -> usize {
    let atoms = molecule.atoms();
    let removable: Vec<bool> = (0..atoms.len())
        .map(|i| {
            if !atoms[i].is_hydrogen() {
                return false;
            }
            let mut partners = molecule.neighbors(i);
            match (partners.next(), partners.next()) {
                (Some(partner), None) => !atoms[partner].is_hydrogen(),
                _ => false,
            }
        })
        .collect();

    let removed = removable.iter().filter(|&&r| r).count();
    if removed == 0 {
        return 0;
    }

    let mut new_index = vec![None; atoms.len()];
    let mut kept_atoms = Vec::with_capacity(atoms.len() - removed);
    for (i, atom) in atoms.iter().enumerate() {
        if !removable[i] {
            new_index[i] = Some(kept_atoms.len());
            kept_atoms.push(atom.clone());
        }
    }

    let mut kept_bonds = Vec::with_capacity(molecule.bond_count());
    for bond in molecule.bonds() {
        match (new_index[bond.atom1], new_index[bond.atom2]) {
            (Some(atom1), Some(atom2)) => kept_bonds.push(Bond {
                atom1,
                atom2,
                ..*bond
            }),
            (Some(heavy), None) | (None, Some(heavy)) => {
                let atom = &mut kept_atoms[heavy];
                atom.implicit_hydrogens = atom.implicit_hydrogens.saturating_add(1);
            }
            (None, None) => {}
        }
    }

    molecule.replace_graph(kept_atoms, kept_bonds);
    removed
}

/// Assigns `<Symbol>.<hybridization>` labels derived from bond orders.
///
/// Atoms whose element is unknown stay untyped; one [`AtomTypeError`] is returned
/// for each of them.
pub fn perceive_atom_types(molecule: &mut Molecule) -> Vec<AtomTypeError> {
    let labels: Vec<_> = (0..molecule.atom_count())
        .map(|i| type_label(molecule, i))
        .collect();

    let mut failures = Vec::new();
    for (atom, label) in molecule.atoms_mut().iter_mut().zip(labels) {
        match label {
            Ok(label) => atom.atom_type = Some(label),
            Err(e) => {
                atom.atom_type = None;
                failures.push(e);
            }
        }
    }
    failures
}

fn type_label(molecule: &Molecule, index: usize) -> Result<String, AtomTypeError> {
    let atom = &molecule.atoms()[index];
    if elements::lookup(&atom.symbol).is_none() {
        return Err(AtomTypeError {
            index,
            symbol: atom.symbol.clone(),
        });
    }

    let (mut doubles, mut triples, mut aromatic) = (0, 0, false);
    for bond in molecule.bonds_of(index) {
        match bond.order {
            BondOrder::Double => doubles += 1,
            BondOrder::Triple => triples += 1,
            BondOrder::Aromatic => aromatic = true,
            BondOrder::Single => {}
        }
    }

    let hybridization = if aromatic {
        "ar"
    } else if triples > 0 || doubles > 1 {
        "sp"
    } else if doubles == 1 {
        "sp2"
    } else {
        "sp3"
    };
    Ok(format!("{}.{}", atom.symbol, hybridization))
}

/// Flags atoms and bonds as aromatic where the input declared an aromatic bond.
/// Returns the number of aromatic atoms.
pub fn detect_aromaticity(molecule: &mut Molecule) -> usize {
    let mut flagged = vec![false; molecule.atom_count()];
    for bond in molecule.bonds_mut() {
        bond.is_aromatic = bond.order == BondOrder::Aromatic;
        if bond.is_aromatic {
            flagged[bond.atom1] = true;
            flagged[bond.atom2] = true;
        }
    }
    for (atom, aromatic) in molecule.atoms_mut().iter_mut().zip(&flagged) {
        atom.is_aromatic = *aromatic;
    }
    flagged.iter().filter(|&&f| f).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn methanol_with_explicit_hydrogens() -> Molecule {
        let mut mol = Molecule::new("methanol");
        let c = mol.add_atom(Atom::new("C", Point3::origin()));
        let o = mol.add_atom(Atom::new("O", Point3::new(1.4, 0.0, 0.0)));
        mol.add_bond(c, o, BondOrder::Single).unwrap();
        for i in 0..3 {
            let h = mol.add_atom(Atom::new("H", Point3::new(-0.5, i as f64, 0.0)));
            mol.add_bond(c, h, BondOrder::Single).unwrap();
        }
        let h = mol.add_atom(Atom::new("H", Point3::new(2.0, 0.5, 0.0)));
        mol.add_bond(o, h, BondOrder::Single).unwrap();
        mol
    }

    fn aromatic_ring() -> Molecule {
        let mut mol = Molecule::new("ring");
        for i in 0..6 {
            mol.add_atom(Atom::new("C", Point3::new(i as f64, 0.0, 0.0)));
        }
        for i in 0..6 {
            mol.add_bond(i, (i + 1) % 6, BondOrder::Aromatic).unwrap();
        }
        let cl = mol.add_atom(Atom::new("Cl", Point3::new(0.0, 2.0, 0.0)));
        mol.add_bond(0, cl, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn remove_hydrogens_folds_them_into_heavy_atoms() {
        let mut mol = methanol_with_explicit_hydrogens();
        let removed = remove_hydrogens(&mut mol);

        assert_eq!(removed, 4);
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.atoms()[0].symbol, "C");
        assert_eq!(mol.atoms()[0].implicit_hydrogens, 3);
        assert_eq!(mol.atoms()[1].symbol, "O");
        assert_eq!(mol.atoms()[1].implicit_hydrogens, 1);
        assert_eq!((mol.bonds()[0].atom1, mol.bonds()[0].atom2), (0, 1));
    }

    #[test]
    fn remove_hydrogens_keeps_molecular_hydrogen_and_isolated_protons() {
        let mut mol = Molecule::new("h2");
        let h1 = mol.add_atom(Atom::new("H", Point3::origin()));
        let h2 = mol.add_atom(Atom::new("H", Point3::new(0.74, 0.0, 0.0)));
        mol.add_bond(h1, h2, BondOrder::Single).unwrap();
        mol.add_atom(Atom::new("H", Point3::new(5.0, 0.0, 0.0)).with_charge(1));

        assert_eq!(remove_hydrogens(&mut mol), 0);
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 1);
    }

    #[test]
    fn remove_hydrogens_remaps_bonds_after_interleaved_hydrogens() {
        let mut mol = Molecule::new("ethane-fragment");
        let c1 = mol.add_atom(Atom::new("C", Point3::origin()));
        let h = mol.add_atom(Atom::new("H", Point3::new(0.0, 1.0, 0.0)));
        let c2 = mol.add_atom(Atom::new("C", Point3::new(1.5, 0.0, 0.0)));
        mol.add_bond(c1, h, BondOrder::Single).unwrap();
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();

        remove_hydrogens(&mut mol);

        assert_eq!(mol.atom_count(), 2);
        assert_eq!((mol.bonds()[0].atom1, mol.bonds()[0].atom2), (0, 1));
    }

    #[test]
    fn perceive_atom_types_labels_hybridization() {
        let mut mol = Molecule::new("mixed");
        let c1 = mol.add_atom(Atom::new("C", Point3::origin()));
        let c2 = mol.add_atom(Atom::new("C", Point3::origin()));
        let n = mol.add_atom(Atom::new("N", Point3::origin()));
        let o = mol.add_atom(Atom::new("O", Point3::origin()));
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        mol.add_bond(c2, n, BondOrder::Triple).unwrap();
        mol.add_bond(c1, o, BondOrder::Double).unwrap();

        let failures = perceive_atom_types(&mut mol);

        assert!(failures.is_empty());
        let types: Vec<_> = mol
            .atoms()
            .iter()
            .map(|a| a.atom_type.as_deref().unwrap())
            .collect();
        assert_eq!(types, vec!["C.sp2", "C.sp", "N.sp", "O.sp2"]);
    }

    #[test]
    fn perceive_atom_types_reports_unknown_elements_without_stopping() {
        let mut mol = Molecule::new("pseudo");
        mol.add_atom(Atom::new("C", Point3::origin()));
        mol.add_atom(Atom::new("R#", Point3::origin()));
        mol.add_atom(Atom::new("O", Point3::origin()));

        let failures = perceive_atom_types(&mut mol);

        assert_eq!(
            failures,
            vec![AtomTypeError {
                index: 1,
                symbol: "R#".to_string()
            }]
        );
        assert_eq!(mol.atoms()[0].atom_type.as_deref(), Some("C.sp3"));
        assert!(mol.atoms()[1].atom_type.is_none());
        assert_eq!(mol.atoms()[2].atom_type.as_deref(), Some("O.sp3"));
    }

    #[test]
    fn detect_aromaticity_flags_aromatic_bonds_and_their_atoms() {
        let mut mol = aromatic_ring();
        let count = detect_aromaticity(&mut mol);

        assert_eq!(count, 6);
        assert!(mol.atoms()[..6].iter().all(|a| a.is_aromatic));
        assert!(!mol.atoms()[6].is_aromatic);
        assert_eq!(mol.bonds().iter().filter(|b| b.is_aromatic).count(), 6);
    }

    #[test]
    fn apply_runs_every_enabled_stage_even_after_typing_failures() {
        let mut mol = aromatic_ring();
        mol.add_atom(Atom::new("Q", Point3::origin()));

        let report = apply(&mut mol, &PreprocessOptions::default());

        assert_eq!(report.hydrogens_removed, 0);
        assert_eq!(report.typing_failures.len(), 1);
        assert_eq!(report.aromatic_atoms, 6);
        assert_eq!(mol.atoms()[0].atom_type.as_deref(), Some("C.ar"));
    }

    #[test]
    fn apply_with_no_stages_leaves_molecule_untouched() {
        let original = methanol_with_explicit_hydrogens();
        let mut mol = original.clone();

        let report = apply(&mut mol, &PreprocessOptions::none());

        assert_eq!(report, PreprocessReport::default());
        assert_eq!(mol, original);
    }
}
