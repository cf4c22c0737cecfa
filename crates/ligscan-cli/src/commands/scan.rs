use crate::cli::ScanArgs;
use crate::config::{PartialScanConfig, ScanSettings};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ligscan::{
    core::io::{export, mmcif::CifFile, traits::MolecularFile},
    engine::progress::ProgressReporter,
    workflows::{self, contacts::ContactAnalysis},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: ScanArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialScanConfig::from_file(path)?,
        None => PartialScanConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args.input, &settings, &reporter, &mut out)
}

/// Reads the structure, runs the analysis and writes the text summary to `out`
/// and, when requested, the CSV file.
pub fn execute<W: Write>(
    input: &Path,
    settings: &ScanSettings,
    reporter: &ProgressReporter,
    out: &mut W,
) -> Result<()> {
    info!("Loading input structure from {:?}", input);
    let (system, metadata) = CifFile::read_from_path(input).map_err(|e| CliError::FileParsing {
        path: input.to_path_buf(),
        source: e.into(),
    })?;
    info!(
        data_block = metadata.data_block.as_deref().unwrap_or("?"),
        rows = metadata.atom_site_rows,
        "Structure loaded."
    );

    info!("Invoking the contact analysis workflow...");
    let analysis = workflows::contacts::run(&system, &settings.contacts, reporter)?;

    for issue in &analysis.data_issues {
        warn!("{}", issue);
    }

    write_summary(&analysis, out)?;

    if analysis.condition.is_some() {
        return Ok(());
    }

    if let Some(csv_path) = &settings.csv {
        write_csv_file(&analysis, csv_path)?;
        writeln!(out, "\nCSV written to: {}", csv_path.display())?;
    }

    Ok(())
}

fn write_summary<W: Write>(analysis: &ContactAnalysis, out: &mut W) -> Result<()> {
    if let Some(condition) = &analysis.condition {
        writeln!(out, "{}", condition)?;
        return Ok(());
    }
    export::write_text(&analysis.reports, out).map_err(|e| CliError::Export {
        path: "<stdout>".into(),
        source: e,
    })
}

fn write_csv_file(analysis: &ContactAnalysis, path: &Path) -> Result<()> {
    info!(
        "Writing {} contact(s) to {:?}",
        analysis.total_contacts(),
        path
    );
    let file = File::create(path)?;
    export::write_csv(&analysis.reports, BufWriter::new(file)).map_err(|e| CliError::Export {
        path: path.to_path_buf(),
        source: e,
    })
}
