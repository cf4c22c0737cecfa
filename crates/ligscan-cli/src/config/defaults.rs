use ligscan::engine::config::{DEFAULT_CUTOFF_ANGSTROMS, DEFAULT_LIGAND_NAME};

/// Values used when neither the command line nor the config file sets a key.
pub struct DefaultsConfig {
    pub ligand_name: String,
    pub cutoff: f64,
    pub include_waters: bool,
    pub strict_amino_acids: bool,
    pub ignore_hydrogens: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ligand_name: DEFAULT_LIGAND_NAME.to_string(),
            cutoff: DEFAULT_CUTOFF_ANGSTROMS,
            include_waters: false,
            strict_amino_acids: false,
            ignore_hydrogens: false,
        }
    }
}
