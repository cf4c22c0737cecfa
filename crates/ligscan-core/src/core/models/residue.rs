use super::ids::{AtomId, ChainId};
use crate::core::utils::identifiers;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS
    Glutamine,  // GLN
    Serine,     // SER
    Threonine,  // THR
    Methionine, // MET

    // --- Charged ---
    Arginine,     // ARG
    Lysine,       // LYS
    AsparticAcid, // ASP
    GlutamicAcid, // GLU
    Histidine,    // HIS
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a standard amino acid residue name")]
pub struct ParseResidueTypeError(pub String);

impl FromStr for ResidueType {
    type Err = ParseResidueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALA" => Ok(ResidueType::Alanine),
            "GLY" => Ok(ResidueType::Glycine),
            "ILE" => Ok(ResidueType::Isoleucine),
            "LEU" => Ok(ResidueType::Leucine),
            "PRO" => Ok(ResidueType::Proline),
            "VAL" => Ok(ResidueType::Valine),
            "PHE" => Ok(ResidueType::Phenylalanine),
            "TRP" => Ok(ResidueType::Tryptophan),
            "TYR" => Ok(ResidueType::Tyrosine),
            "ASN" => Ok(ResidueType::Asparagine),
            "CYS" => Ok(ResidueType::Cysteine),
            "GLN" => Ok(ResidueType::Glutamine),
            "SER" => Ok(ResidueType::Serine),
            "THR" => Ok(ResidueType::Threonine),
            "MET" => Ok(ResidueType::Methionine),
            "ARG" => Ok(ResidueType::Arginine),
            "LYS" => Ok(ResidueType::Lysine),
            "ASP" => Ok(ResidueType::AsparticAcid),
            "GLU" => Ok(ResidueType::GlutamicAcid),
            "HIS" => Ok(ResidueType::Histidine),
            _ => Err(ParseResidueTypeError(s.to_string())),
        }
    }
}

/// Stable identity of a residue used for aggregation and reporting.
///
/// Two residues with equal keys are the same biological residue. Within a single
/// model of a structure the key is unique among the residues that take part in a
/// contact analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub residue_name: String,
    pub chain_id: String,
    pub residue_number: isize,
    pub insertion_code: Option<char>,
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Chain {} {}",
            self.residue_name, self.chain_id, self.residue_number
        )?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub residue_number: isize,              // Sequence number from the source file
    pub insertion_code: Option<char>,       // PDB insertion code, if any
    pub name: String,                       // Name of the residue (e.g., "ALA", "GSH")
    pub residue_type: Option<ResidueType>,  // Set for the twenty standard amino acids
    pub is_hetero: bool,                    // Read from HETATM records
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue, in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
        chain_id: ChainId,
    ) -> Self {
        let name = name.trim();
        Self {
            residue_number,
            insertion_code,
            name: name.to_string(),
            residue_type: ResidueType::from_str(name).ok(),
            is_hetero,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// Returns `true` if this residue is an amino acid under the given strictness.
    pub fn is_amino_acid(&self, standard_only: bool) -> bool {
        if standard_only {
            self.residue_type.is_some()
        } else {
            identifiers::is_amino_acid(&self.name, false)
        }
    }

    pub fn is_water(&self) -> bool {
        identifiers::is_water(&self.name)
    }
}
