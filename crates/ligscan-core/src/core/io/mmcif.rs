use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CifMetadata {
    /// Name of the `data_` block the atoms were read from (e.g., "1ABC").
    pub data_block: Option<String>,
    /// Number of `_atom_site` rows read, before alternate locations are collapsed.
    pub atom_site_rows: usize,
}

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: CifParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CifParseErrorKind {
    #[error("_atom_site loop has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("Required value in column '{column}' is missing")]
    MissingValue { column: &'static str },
    #[error("Invalid integer in column '{column}' (value: '{value}')")]
    InvalidInt { column: &'static str, value: String },
    #[error("Invalid float in column '{column}' (value: '{value}')")]
    InvalidFloat { column: &'static str, value: String },
    #[error("Unterminated quoted value")]
    UnterminatedQuote,
    #[error("_atom_site row ended after {found} of {expected} values")]
    IncompleteRow { expected: usize, found: usize },
}

fn parse_error(line: usize, kind: CifParseErrorKind) -> CifError {
    CifError::Parse { line, kind }
}

/// Column positions of the `_atom_site` fields this reader understands.
///
/// Author-assigned (`auth_*`) columns take precedence over the `label_*` columns, as
/// they carry the chain identifiers and numbering used in the literature.
#[derive(Debug, Clone, Copy)]
struct AtomSiteColumns {
    group_pdb: Option<usize>,
    atom_name: usize,
    alt_id: Option<usize>,
    residue_name: usize,
    chain_id: usize,
    seq_id: usize,
    fallback_seq_id: Option<usize>,
    insertion_code: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
    occupancy: Option<usize>,
    type_symbol: Option<usize>,
    model_num: Option<usize>,
    width: usize,
}

impl AtomSiteColumns {
    fn from_headers(headers: &[String], line: usize) -> Result<Self, CifError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(&format!("_atom_site.{name}")))
        };
        let require = |primary: &str, fallback: &str, column: &'static str| {
            find(primary)
                .or_else(|| find(fallback))
                .ok_or_else(|| parse_error(line, CifParseErrorKind::MissingColumn(column)))
        };
        let require_one = |name: &'static str| {
            find(name).ok_or_else(|| parse_error(line, CifParseErrorKind::MissingColumn(name)))
        };

        let seq_id = require("auth_seq_id", "label_seq_id", "auth_seq_id")?;
        let fallback_seq_id = find("label_seq_id").filter(|&idx| idx != seq_id);

        Ok(Self {
            group_pdb: find("group_PDB"),
            atom_name: require("auth_atom_id", "label_atom_id", "auth_atom_id")?,
            alt_id: find("label_alt_id"),
            residue_name: require("auth_comp_id", "label_comp_id", "auth_comp_id")?,
            chain_id: require("auth_asym_id", "label_asym_id", "auth_asym_id")?,
            seq_id,
            fallback_seq_id,
            insertion_code: find("pdbx_PDB_ins_code"),
            x: require_one("Cartn_x")?,
            y: require_one("Cartn_y")?,
            z: require_one("Cartn_z")?,
            occupancy: find("occupancy"),
            type_symbol: find("type_symbol"),
            model_num: find("pdbx_PDB_model_num"),
            width: headers.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResidueSlot {
    model: usize,
    chain: String,
    seq: isize,
    insertion_code: Option<char>,
}

#[derive(Debug)]
struct PendingAtom {
    name: String,
    element: String,
    position: Point3<f64>,
    occupancy: f64,
}

#[derive(Debug)]
struct PendingResidue {
    name: String,
    is_hetero: bool,
    atoms: Vec<PendingAtom>,
    atom_index: HashMap<String, usize>,
}

impl PendingResidue {
    /// Keeps one copy per atom name: the alternate location with the highest
    /// occupancy, or the first one seen on ties.
    fn push(&mut self, atom: PendingAtom) {
        match self.atom_index.get(&atom.name) {
            Some(&idx) => {
                if atom.occupancy > self.atoms[idx].occupancy {
                    self.atoms[idx] = atom;
                }
            }
            None => {
                self.atom_index.insert(atom.name.clone(), self.atoms.len());
                self.atoms.push(atom);
            }
        }
    }
}

#[derive(Debug, Default)]
struct PendingStructure {
    order: Vec<ResidueSlot>,
    residues: HashMap<ResidueSlot, PendingResidue>,
    rows: usize,
}

impl PendingStructure {
    fn build(self) -> MolecularSystem {
        let mut system = MolecularSystem::new();
        let mut residues = self.residues;
        for slot in self.order {
            let Some(pending) = residues.remove(&slot) else {
                continue;
            };
            let model_id = system.add_model(slot.model);
            let Some(chain_id) = system.add_chain(model_id, &slot.chain) else {
                continue;
            };
            let Some(residue_id) = system.add_residue(
                chain_id,
                slot.seq,
                slot.insertion_code,
                &pending.name,
                pending.is_hetero,
            ) else {
                continue;
            };
            for atom in pending.atoms {
                let atom = Atom::new(&atom.name, ResidueId::default(), atom.position)
                    .with_element(&atom.element)
                    .with_occupancy(atom.occupancy);
                system.add_atom_to_residue(residue_id, atom);
            }
        }
        system
    }
}

enum ParserState {
    Base,
    InLoopHeader,
    InAtomSiteLoop,
    InOtherLoop,
}

/// Fails if the `_atom_site` loop ended while a row was still being collected.
fn ensure_row_complete(
    row_buffer: &[String],
    columns: Option<&AtomSiteColumns>,
    line: usize,
) -> Result<(), CifError> {
    match columns {
        Some(columns) if !row_buffer.is_empty() => Err(parse_error(
            line,
            CifParseErrorKind::IncompleteRow {
                expected: columns.width,
                found: row_buffer.len(),
            },
        )),
        _ => Ok(()),
    }
}

fn is_null(value: &str) -> bool {
    matches!(value, "." | "?")
}

/// Splits one mmCIF line into value tokens.
///
/// A quote opens a quoted value only at the start of a token and closes it only
/// when followed by whitespace or the end of the line, so primes inside names such
/// as `"O5'"` survive.
fn tokenize(line: &str, line_num: usize) -> Result<Vec<String>, CifError> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        if chars[i] == '#' {
            break;
        }
        if chars[i] == '\'' || chars[i] == '"' {
            let quote = chars[i];
            let start = i + 1;
            let mut end = None;
            let mut j = start;
            while j < chars.len() {
                if chars[j] == quote && chars.get(j + 1).is_none_or(|c| c.is_whitespace()) {
                    end = Some(j);
                    break;
                }
                j += 1;
            }
            let end =
                end.ok_or_else(|| parse_error(line_num, CifParseErrorKind::UnterminatedQuote))?;
            tokens.push(chars[start..end].iter().collect());
            i = end + 1;
        } else {
            let start = i;
            while i < chars.len() && !chars[i].is_whitespace() {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        }
    }
    Ok(tokens)
}

fn parse_coordinate(value: &str, column: &'static str, line: usize) -> Result<f64, CifError> {
    if is_null(value) {
        // Kept as NaN so the data-quality check can report the residue.
        return Ok(f64::NAN);
    }
    value.parse::<f64>().map_err(|_| {
        parse_error(
            line,
            CifParseErrorKind::InvalidFloat {
                column,
                value: value.to_string(),
            },
        )
    })
}

fn process_row(
    row: &[String],
    columns: &AtomSiteColumns,
    line: usize,
    pending: &mut PendingStructure,
) -> Result<(), CifError> {
    let get = |idx: usize| row[idx].as_str();
    let get_opt = |idx: Option<usize>| idx.map(|i| row[i].as_str()).filter(|v| !is_null(v));

    let is_hetero = get_opt(columns.group_pdb).is_some_and(|v| v.eq_ignore_ascii_case("HETATM"));

    let atom_name = get(columns.atom_name);
    if is_null(atom_name) {
        return Err(parse_error(
            line,
            CifParseErrorKind::MissingValue {
                column: "auth_atom_id",
            },
        ));
    }
    let residue_name = get(columns.residue_name);
    if is_null(residue_name) {
        return Err(parse_error(
            line,
            CifParseErrorKind::MissingValue {
                column: "auth_comp_id",
            },
        ));
    }
    let chain = match get(columns.chain_id) {
        v if is_null(v) => String::new(),
        v => v.to_string(),
    };

    let seq_str = Some(get(columns.seq_id))
        .filter(|v| !is_null(v))
        .or_else(|| get_opt(columns.fallback_seq_id))
        .ok_or_else(|| {
            parse_error(
                line,
                CifParseErrorKind::MissingValue {
                    column: "auth_seq_id",
                },
            )
        })?;
    let seq: isize = seq_str.parse().map_err(|_| {
        parse_error(
            line,
            CifParseErrorKind::InvalidInt {
                column: "auth_seq_id",
                value: seq_str.to_string(),
            },
        )
    })?;

    let insertion_code = get_opt(columns.insertion_code).and_then(|v| v.chars().next());

    let model = match get_opt(columns.model_num) {
        Some(v) => v.parse::<usize>().map_err(|_| {
            parse_error(
                line,
                CifParseErrorKind::InvalidInt {
                    column: "pdbx_PDB_model_num",
                    value: v.to_string(),
                },
            )
        })?,
        None => 1,
    };

    let x = parse_coordinate(get(columns.x), "Cartn_x", line)?;
    let y = parse_coordinate(get(columns.y), "Cartn_y", line)?;
    let z = parse_coordinate(get(columns.z), "Cartn_z", line)?;

    let occupancy = get_opt(columns.occupancy)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(1.0);
    let element = get_opt(columns.type_symbol).unwrap_or("").to_string();

    if let Some(alt) = get_opt(columns.alt_id) {
        trace!(line, atom = atom_name, alt, "Alternate location record");
    }

    let slot = ResidueSlot {
        model,
        chain,
        seq,
        insertion_code,
    };
    let residue = pending.residues.entry(slot.clone()).or_insert_with(|| {
        pending.order.push(slot);
        PendingResidue {
            name: residue_name.to_string(),
            is_hetero,
            atoms: Vec::new(),
            atom_index: HashMap::new(),
        }
    });
    residue.push(PendingAtom {
        name: atom_name.to_string(),
        element,
        position: Point3::new(x, y, z),
        occupancy,
    });
    pending.rows += 1;
    Ok(())
}

/// Reader for the PDBx/mmCIF format.
///
/// Only the `_atom_site` category is interpreted; every other category is skipped.
/// The first `data_` block that contains atoms is read.
pub struct CifFile;

impl MolecularFile for CifFile {
    type Metadata = CifMetadata;
    type Error = CifError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut metadata = CifMetadata::default();
        let mut pending = PendingStructure::default();

        let mut state = ParserState::Base;
        let mut headers: Vec<String> = Vec::new();
        let mut columns: Option<AtomSiteColumns> = None;
        let mut row_buffer: Vec<String> = Vec::new();
        let mut in_text_field = false;
        let mut last_line = 0;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            last_line = line_num;

            // Semicolon-delimited text fields never belong to _atom_site.
            if line.starts_with(';') {
                in_text_field = !in_text_field;
                continue;
            }
            if in_text_field {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(name) = trimmed.strip_prefix("data_") {
                ensure_row_complete(&row_buffer, columns.as_ref(), line_num)?;
                if pending.rows > 0 {
                    break;
                }
                metadata.data_block = Some(name.to_string());
                state = ParserState::Base;
                continue;
            }

            if trimmed.eq_ignore_ascii_case("loop_") {
                ensure_row_complete(&row_buffer, columns.as_ref(), line_num)?;
                state = ParserState::InLoopHeader;
                headers.clear();
                continue;
            }

            match state {
                ParserState::Base | ParserState::InOtherLoop => {
                    if matches!(state, ParserState::InOtherLoop) && trimmed.starts_with('_') {
                        state = ParserState::Base;
                    }
                }
                ParserState::InLoopHeader => {
                    if trimmed.starts_with('_') {
                        if let Some(header) = trimmed.split_whitespace().next() {
                            headers.push(header.to_string());
                        }
                        continue;
                    }
                    if headers.iter().any(|h| h.starts_with("_atom_site.")) {
                        let cols = AtomSiteColumns::from_headers(&headers, line_num)?;
                        debug!(columns = cols.width, "Entering _atom_site loop");
                        columns = Some(cols);
                        state = ParserState::InAtomSiteLoop;
                    } else {
                        state = ParserState::InOtherLoop;
                        continue;
                    }
                    Self::consume_row_tokens(
                        trimmed,
                        line_num,
                        columns.as_ref(),
                        &mut row_buffer,
                        &mut pending,
                    )?;
                }
                ParserState::InAtomSiteLoop => {
                    if trimmed.starts_with('_') {
                        ensure_row_complete(&row_buffer, columns.as_ref(), line_num)?;
                        state = ParserState::Base;
                        continue;
                    }
                    Self::consume_row_tokens(
                        trimmed,
                        line_num,
                        columns.as_ref(),
                        &mut row_buffer,
                        &mut pending,
                    )?;
                }
            }
        }

        ensure_row_complete(&row_buffer, columns.as_ref(), last_line)?;

        if pending.rows == 0 {
            return Err(CifError::MissingRecord("_atom_site rows".into()));
        }

        metadata.atom_site_rows = pending.rows;
        debug!(
            rows = pending.rows,
            residues = pending.order.len(),
            "Finished reading _atom_site"
        );
        Ok((pending.build(), metadata))
    }
}

impl CifFile {
    fn consume_row_tokens(
        line: &str,
        line_num: usize,
        columns: Option<&AtomSiteColumns>,
        row_buffer: &mut Vec<String>,
        pending: &mut PendingStructure,
    ) -> Result<(), CifError> {
        let Some(columns) = columns else {
            return Ok(());
        };
        row_buffer.extend(tokenize(line, line_num)?);
        while row_buffer.len() >= columns.width {
            let row: Vec<String> = row_buffer.drain(..columns.width).collect();
            process_row(&row, columns, line_num, pending)?;
        }
        Ok(())
    }
}
