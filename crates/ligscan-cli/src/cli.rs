use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "LigScan Developers",
    version,
    about = "LigScan - find the residues surrounding a ligand in a macromolecular structure.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the residues within a distance cutoff of every instance of a ligand.
    Scan(ScanArgs),
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the input structure in PDBx/mmCIF format.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Residue name of the ligand (case-insensitive). Defaults to GSH.
    #[arg(short, long, value_name = "CODE")]
    pub ligand: Option<String>,

    /// Distance cutoff in Ångströms. Defaults to 4.5.
    #[arg(short = 'r', long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Report water molecules as contacts.
    #[arg(long)]
    pub include_waters: bool,

    /// Choose which residue names count as amino acids.
    #[command(flatten)]
    pub amino_acids: AminoAcidMode,

    /// Skip hydrogen and deuterium atoms on both the ligand and the polymer.
    #[arg(long)]
    pub ignore_hydrogens: bool,

    /// Write all reports to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.cutoff=5.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive switches for the amino-acid name table.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct AminoAcidMode {
    /// Only the twenty standard amino acids are candidates.
    #[arg(long = "strict-aa")]
    pub strict: bool,
    /// Modified and non-standard amino acids (MSE, SEP, ...) are candidates too.
    #[arg(long = "permissive-aa")]
    pub permissive: bool,
}

impl AminoAcidMode {
    /// The strictness requested on the command line, if any.
    pub fn requested(self) -> Option<bool> {
        if self.strict {
            Some(true)
        } else if self.permissive {
            Some(false)
        } else {
            None
        }
    }
}
