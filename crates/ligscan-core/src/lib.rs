//! # LigScan Core Library
//!
//! Finds the polymer residues in contact with a small-molecule ligand in a
//! macromolecular structure and reports the closest approach per residue.
//!
//! ## Architecture
//!
//! The library is split into three layers:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), residue
//!   name tables and I/O: the mmCIF reader and the text/CSV exporters.
//!
//! - **[`engine`]: The Logic Core.** Residue classification, the k-d tree spatial
//!   index, contact detection and the deterministic report aggregation, together with
//!   configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** [`workflows::contacts::run`] ties the layers
//!   together into a single call.
//!
//! ## Example
//!
//! ```
//! use ligscan::core::models::atom::Atom;
//! use ligscan::core::models::system::MolecularSystem;
//! use ligscan::engine::config::ContactConfig;
//! use ligscan::engine::progress::ProgressReporter;
//! use ligscan::workflows::contacts;
//! use nalgebra::Point3;
//!
//! let mut system = MolecularSystem::new();
//! let model = system.add_model(1);
//! let chain_a = system.add_chain(model, "A").unwrap();
//! let chain_c = system.add_chain(model, "C").unwrap();
//!
//! let tyr = system.add_residue(chain_a, 7, None, "TYR", false).unwrap();
//! system.add_atom_to_residue(tyr, Atom::new("OH", tyr, Point3::new(2.5, 0.0, 0.0)));
//! let gsh = system.add_residue(chain_c, 1, None, "GSH", true).unwrap();
//! system.add_atom_to_residue(gsh, Atom::new("SG2", gsh, Point3::origin()));
//!
//! let analysis = contacts::run(&system, &ContactConfig::default(), &ProgressReporter::new())?;
//! assert_eq!(analysis.reports[0].ligand, "GSH Chain C 1");
//! assert_eq!(analysis.reports[0].contacts[0].min_distance, 2.5);
//! # Ok::<(), ligscan::engine::error::EngineError>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
