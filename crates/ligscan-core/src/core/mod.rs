//! # Core Module
//!
//! Stateless building blocks shared by the contact engine: the structure model,
//! residue-name tables, and file I/O.
//!
//! - **Molecular Representation** ([`models`]) - Models, chains, residues and atoms
//! - **File I/O** ([`io`]) - The mmCIF reader and the report exporters
//! - **Identifiers** ([`utils`]) - Amino-acid, water and hydrogen name tables

pub mod io;
pub mod models;
pub mod utils;
