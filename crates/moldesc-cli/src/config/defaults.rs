/// Built-in values used when neither the config file nor the command line sets one.
pub struct DefaultsConfig {
    pub remove_hydrogens: bool,
    pub perceive_atom_types: bool,
    pub detect_aromaticity: bool,
    pub catalog_exclude: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            remove_hydrogens: true,
            perceive_atom_types: true,
            detect_aromaticity: true,
            catalog_exclude: Vec::new(),
        }
    }
}
