//! # Core Models Module
//!
//! In-memory representation of a parsed macromolecular structure.
//!
//! The hierarchy is `MolecularSystem → Model → Chain → Residue → Atom`. Every entity
//! is stored in a slot-map arena owned by the [`system::MolecularSystem`]; child
//! entities reference their parent through the keys defined in [`ids`], so the
//! back references (atom → residue, residue → chain, chain → model) are lookups only
//! and never own anything.
//!
//! - [`atom`] - Atom name, element, position and occupancy
//! - [`residue`] - Residue identity, amino-acid typing and the stable [`residue::ResidueKey`]
//! - [`chain`] - Ordered residues of one chain within one model
//! - [`system`] - The arena-backed container and its builders
//! - [`ids`] - Arena key types
//!
//! ## Usage
//!
//! ```
//! use ligscan::core::models::{atom::Atom, system::MolecularSystem};
//! use nalgebra::Point3;
//!
//! let mut system = MolecularSystem::new();
//! let model_id = system.add_model(1);
//! let chain_id = system.add_chain(model_id, "A").unwrap();
//! let residue_id = system.add_residue(chain_id, 1, None, "ALA", false).unwrap();
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom).unwrap();
//! assert_eq!(system.residue_key(residue_id).unwrap().to_string(), "ALA Chain A 1");
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
