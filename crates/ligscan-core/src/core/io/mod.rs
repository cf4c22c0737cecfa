//! Provides input/output functionality for structures and contact reports.
//!
//! Structures are read through the [`traits::MolecularFile`] interface; the only
//! implemented format is PDBx/mmCIF ([`mmcif`]). Finished reports are written by the
//! [`export`] module as text or CSV.

pub mod export;
pub mod mmcif;
pub mod traits;
