//! Human-readable and tabular exporters for contact reports.
//!
//! Distances are rounded to three decimal places here and nowhere else.

use crate::engine::report::Report;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Number of decimal places kept for distances in exported output.
pub const DISTANCE_DECIMALS: i32 = 3;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the flattened CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRow {
    pub ligand: String,
    pub resname: String,
    pub chain: String,
    pub resnum: isize,
    pub icode: String,
    pub min_distance: f64,
}

pub fn round_distance(distance: f64) -> f64 {
    let factor = 10f64.powi(DISTANCE_DECIMALS);
    (distance * factor).round() / factor
}

/// Flattens reports into CSV rows, one per contact record, in report order.
pub fn to_rows(reports: &[Report]) -> Vec<ContactRow> {
    reports
        .iter()
        .flat_map(|report| {
            report.contacts.iter().map(move |record| ContactRow {
                ligand: report.ligand.clone(),
                resname: record.residue.residue_name.clone(),
                chain: record.residue.chain_id.clone(),
                resnum: record.residue.residue_number,
                icode: record
                    .residue
                    .insertion_code
                    .map(String::from)
                    .unwrap_or_default(),
                min_distance: round_distance(record.min_distance),
            })
        })
        .collect()
}

/// Writes all reports as one CSV table with the header
/// `ligand,resname,chain,resnum,icode,min_distance`.
pub fn write_csv<W: Write>(reports: &[Report], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = to_rows(reports);
    if rows.is_empty() {
        csv_writer.write_record([
            "ligand",
            "resname",
            "chain",
            "resnum",
            "icode",
            "min_distance",
        ])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads rows previously written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ContactRow>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<ContactRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Writes the human-readable summary: one block per report, a line per contact,
/// `(none)` for reports without contacts and a trailing total.
pub fn write_text<W: Write>(reports: &[Report], writer: &mut W) -> Result<(), ExportError> {
    for report in reports {
        writeln!(writer)?;
        writeln!(
            writer,
            "Residues within {:?} Å of {}:",
            report.cutoff, report.ligand
        )?;
        if report.contacts.is_empty() {
            writeln!(writer, "  (none)")?;
            continue;
        }
        for record in &report.contacts {
            let icode = record
                .residue
                .insertion_code
                .map(String::from)
                .unwrap_or_default();
            writeln!(
                writer,
                "  {:>3}  Chain {}  {}{:1}   min d = {:.3} Å",
                record.residue.residue_name,
                record.residue.chain_id,
                record.residue.residue_number,
                icode,
                record.min_distance
            )?;
        }
        writeln!(writer, "Total: {}", report.contacts.len())?;
    }
    Ok(())
}
