pub mod defaults;

use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use ligscan::engine::config::{ContactConfig, ContactConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLigandConfig {
    name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialContactsConfig {
    cutoff: Option<f64>,
    #[serde(rename = "include-waters")]
    include_waters: Option<bool>,
    #[serde(rename = "strict-amino-acids")]
    strict_amino_acids: Option<bool>,
    #[serde(rename = "ignore-hydrogens")]
    ignore_hydrogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    csv: Option<PathBuf>,
}

/// Settings read from a TOML file, every key optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialScanConfig {
    ligand: Option<PartialLigandConfig>,
    contacts: Option<PartialContactsConfig>,
    output: Option<PartialOutputConfig>,
}

/// Fully resolved settings of one `scan` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub contacts: ContactConfig,
    pub csv: Option<PathBuf>,
}

impl PartialScanConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final settings. Command-line flags win over `--set` values,
    /// which win over the file, which wins over the built-in defaults.
    pub fn merge_with_cli(mut self, args: &ScanArgs) -> Result<ScanSettings> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let ligand = self.ligand.take().unwrap_or_default();
        let contacts = self.contacts.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let ligand_name = args
            .ligand
            .clone()
            .or(ligand.name)
            .unwrap_or(defaults.ligand_name)
            .trim()
            .to_uppercase();

        let include_waters = if args.include_waters {
            true
        } else {
            contacts.include_waters.unwrap_or(defaults.include_waters)
        };
        let ignore_hydrogens = if args.ignore_hydrogens {
            true
        } else {
            contacts
                .ignore_hydrogens
                .unwrap_or(defaults.ignore_hydrogens)
        };
        let strict_amino_acids = args
            .amino_acids
            .requested()
            .or(contacts.strict_amino_acids)
            .unwrap_or(defaults.strict_amino_acids);

        let config = ContactConfigBuilder::new()
            .ligand_name(ligand_name)
            .cutoff(args.cutoff.or(contacts.cutoff).unwrap_or(defaults.cutoff))
            .include_waters(include_waters)
            .strict_amino_acids(strict_amino_acids)
            .ignore_hydrogens(ignore_hydrogens)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(ScanSettings {
            contacts: config,
            csv: args.csv.clone().or(output.csv),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "ligand.name" => {
                    self.ligand.get_or_insert_with(Default::default).name =
                        Some(value_str.to_string());
                }
                "contacts.cutoff" => {
                    self.contacts.get_or_insert_with(Default::default).cutoff =
                        Some(parse_value(key, value_str, "float")?);
                }
                "contacts.include-waters" => {
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .include_waters = Some(parse_value(key, value_str, "boolean")?);
                }
                "contacts.strict-amino-acids" => {
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .strict_amino_acids = Some(parse_value(key, value_str, "boolean")?);
                }
                "contacts.ignore-hydrogens" => {
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .ignore_hydrogens = Some(parse_value(key, value_str, "boolean")?);
                }
                "output.csv" => {
                    self.output.get_or_insert_with(Default::default).csv =
                        Some(PathBuf::from(value_str));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}
