use thiserror::Error;

pub const DEFAULT_LIGAND_NAME: &str = "GSH";
pub const DEFAULT_CUTOFF_ANGSTROMS: f64 = 4.5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Parameters of a ligand contact analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    /// Residue name identifying ligand instances, compared after trimming.
    pub ligand_name: String,
    /// Inclusive distance cutoff in Ångströms.
    pub cutoff: f64,
    /// Adds water atoms to the candidate set.
    pub include_waters: bool,
    /// Restricts candidates to the twenty standard amino acids.
    pub strict_amino_acids: bool,
    /// Drops hydrogen and deuterium atoms from both sides of the search.
    pub ignore_hydrogens: bool,
}

impl Default for ContactConfig {
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

impl ContactConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ligand_name.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "ligand_name",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.cutoff.is_finite() || self.cutoff <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "cutoff",
                reason: format!("must be a finite positive distance, got {}", self.cutoff),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    ligand_name: Option<String>,
    cutoff: Option<f64>,
    include_waters: Option<bool>,
    strict_amino_acids: Option<bool>,
    ignore_hydrogens: Option<bool>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ligand_name(mut self, name: impl Into<String>) -> Self {
        self.ligand_name = Some(name.into());
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn include_waters(mut self, include: bool) -> Self {
        self.include_waters = Some(include);
        self
    }
    pub fn strict_amino_acids(mut self, strict: bool) -> Self {
        self.strict_amino_acids = Some(strict);
        self
    }
    pub fn ignore_hydrogens(mut self, ignore: bool) -> Self {
        self.ignore_hydrogens = Some(ignore);
        self
    }

    /// Builds the configuration. The ligand name and cutoff are required; the
    /// boolean switches fall back to their defaults.
    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let config = ContactConfig {
            ligand_name: self
                .ligand_name
                .map(|name| name.trim().to_string())
                .ok_or(ConfigError::MissingParameter("ligand_name"))?,
            cutoff: self
                .cutoff
                .ok_or(ConfigError::MissingParameter("cutoff"))?,
            include_waters: self.include_waters.unwrap_or(false),
            strict_amino_acids: self.strict_amino_acids.unwrap_or(false),
            ignore_hydrogens: self.ignore_hydrogens.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}
