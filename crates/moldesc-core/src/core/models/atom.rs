use nalgebra::Point3;

/// Represents an atom of a molecule read from a structure file.
///
/// Besides its identity and coordinates, an atom carries the annotations written
/// by the pre-processing transforms: the number of hydrogens folded into it, the
/// perceived atom type, and the aromaticity flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol as written in the input (e.g., "C", "Cl").
    pub symbol: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Hydrogens attached to this atom that are not stored as explicit atoms.
    pub implicit_hydrogens: u8,
    /// The perceived atom type (e.g., "C.sp3"), if typing succeeded.
    pub atom_type: Option<String>,
    /// Whether the atom takes part in an aromatic bond.
    pub is_aromatic: bool,
}

impl Atom {
    /// Creates a new `Atom` with neutral charge and no annotations.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(symbol: &str, position: Point3<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
            formal_charge: 0,
            implicit_hydrogens: 0,
            atom_type: None,
            is_aromatic: false,
        }
    }

    /// Sets the formal charge, returning the modified atom.
    pub fn with_charge(mut self, formal_charge: i8) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    /// Returns `true` for hydrogen and its isotopes (H, D, T).
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.symbol.as_str(), "H" | "D" | "T")
    }
}
