use phf::{Set, phf_set};

static STANDARD_AMINO_ACID_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
};

// Polypeptide building blocks from the PDB Chemical Component Dictionary whose
// parent is one of the canonical residues (modified, D-form and non-canonical),
// plus ambiguity codes.
static EXTENDED_AMINO_ACID_NAMES: Set<&'static str> = phf_set! {
    "2AS", "3AH", "5HP", "5OW", "ABA", "ACL", "AGM", "AIB", "ALM", "ALO",
    "ALY", "APP", "AR0", "ARM", "ASA", "ASB", "ASK", "ASL", "ASQ", "ASX",
    "AYA", "BCS", "BHD", "BMT", "BNN", "BUC", "BUG", "C5C", "C6C", "CAS",
    "CCS", "CEA", "CGU", "CHG", "CLE", "CME", "CMT", "CSD", "CSO", "CSP",
    "CSS", "CSW", "CSX", "CXM", "CY1", "CY3", "CYG", "CYQ", "DAB", "DAH",
    "DAL", "DAR", "DAS", "DCY", "DGL", "DGN", "DHA", "DHI", "DIL", "DIV",
    "DLE", "DLY", "DNP", "DPN", "DPR", "DSG", "DSN", "DSP", "DTH", "DTR",
    "DTY", "DVA", "EFC", "FLA", "FME", "GGL", "GHP", "GL3", "GLP", "GLX",
    "GLZ", "GMA", "GSC", "HAC", "HAR", "HIC", "HMR", "HPQ", "HTR", "HYP",
    "IAS", "IIL", "IML", "IYR", "KCX", "KPI", "LLP", "LLY", "LTR", "LYM",
    "LYZ", "M3L", "MAA", "MEA", "MED", "MEN", "MHO", "MHS", "MIS", "MK8",
    "MLE", "MLY", "MLZ", "MPQ", "MSA", "MSE", "MVA", "NEM", "NEP", "NIY",
    "NLE", "NLN", "NLP", "NMC", "NVA", "OAS", "OCS", "OMT", "ORN", "PAQ",
    "PCA", "PEC", "PFF", "PHD", "PHI", "PHL", "PR3", "PRR", "PTR", "PYL",
    "PYX", "SAC", "SAR", "SCH", "SCS", "SCY", "SEC", "SEL", "SEP", "SET",
    "SHC", "SHR", "SMC", "SME", "SNC", "SOC", "STY", "SVA", "TIH", "TPL",
    "TPO", "TPQ", "TRG", "TRO", "TYB", "TYI", "TYQ", "TYS", "TYY", "YCM",
    // Force-field protonation and disulfide states.
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "CYX", "CYM", "ASH", "GLH",
    "LYN",
};

static WATER_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "DOD", "H2O", "TIP", "TIP3", "SOL",
};

/// Returns `true` if `residue_name` is one of the twenty canonical amino acids.
pub fn is_standard_amino_acid(residue_name: &str) -> bool {
    STANDARD_AMINO_ACID_NAMES.contains(residue_name.trim())
}

/// Returns `true` if `residue_name` names an amino acid.
///
/// With `standard_only` set, only the twenty canonical residues qualify; otherwise
/// modified and non-canonical residues found in polypeptide chains qualify as well.
/// Matching is case-insensitive.
pub fn is_amino_acid(residue_name: &str, standard_only: bool) -> bool {
    let name = residue_name.trim().to_ascii_uppercase();
    if is_standard_amino_acid(&name) {
        return true;
    }
    !standard_only && EXTENDED_AMINO_ACID_NAMES.contains(name.as_str())
}

pub fn is_water(residue_name: &str) -> bool {
    WATER_NAMES.contains(residue_name.trim().to_ascii_uppercase().as_str())
}

pub fn is_hydrogen_name(atom_name: &str) -> bool {
    let first_char = atom_name
        .trim()
        .chars()
        .find(|c| !c.is_ascii_digit())
        .map(|c| c.to_ascii_uppercase());
    matches!(first_char, Some('H') | Some('D'))
}
