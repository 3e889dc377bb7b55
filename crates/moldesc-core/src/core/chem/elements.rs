use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub atomic_number: u8,
    /// Standard atomic weight in g/mol.
    pub mass: f64,
}

const fn element(atomic_number: u8, mass: f64) -> ElementData {
    ElementData {
        atomic_number,
        mass,
    }
}

#[rustfmt::skip]
static ELEMENTS: Map<&'static str, ElementData> = phf_map! {
    "H"  => element(1, 1.008),   "D"  => element(1, 2.014),   "T"  => element(1, 3.016),
    "He" => element(2, 4.003),
    "Li" => element(3, 6.94),    "Be" => element(4, 9.012),   "B"  => element(5, 10.81),
    "C"  => element(6, 12.011),  "N"  => element(7, 14.007),  "O"  => element(8, 15.999),
    "F"  => element(9, 18.998),  "Ne" => element(10, 20.180),
    "Na" => element(11, 22.990), "Mg" => element(12, 24.305), "Al" => element(13, 26.982),
    "Si" => element(14, 28.085), "P"  => element(15, 30.974), "S"  => element(16, 32.06),
    "Cl" => element(17, 35.45),  "Ar" => element(18, 39.948),
    "K"  => element(19, 39.098), "Ca" => element(20, 40.078),
    "Mn" => element(25, 54.938), "Fe" => element(26, 55.845), "Co" => element(27, 58.933),
    "Ni" => element(28, 58.693), "Cu" => element(29, 63.546), "Zn" => element(30, 65.38),
    "Ga" => element(31, 69.723), "Ge" => element(32, 72.630), "As" => element(33, 74.922),
    "Se" => element(34, 78.971), "Br" => element(35, 79.904), "Kr" => element(36, 83.798),
    "Sn" => element(50, 118.71), "Sb" => element(51, 121.76), "Te" => element(52, 127.60),
    "I"  => element(53, 126.90), "Xe" => element(54, 131.29),
    "Pt" => element(78, 195.08), "Au" => element(79, 196.97), "Hg" => element(80, 200.59),
    "Pb" => element(82, 207.2),
};

/// Looks up an element by its symbol. Symbols are case-sensitive ("Cl", not "CL").
pub fn lookup(symbol: &str) -> Option<&'static ElementData> {
    ELEMENTS.get(symbol.trim())
}

pub fn mass_of(symbol: &str) -> Option<f64> {
    lookup(symbol).map(|e| e.mass)
}

/// Mass of the hydrogen atom, used for hydrogens folded into heavy atoms.
pub const HYDROGEN_MASS: f64 = 1.008;
