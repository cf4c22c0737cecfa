//! # Engine Module
//!
//! Algorithms of the ligand contact analysis, from residue classification down to
//! the per-residue reports.
//!
//! ## Pipeline
//!
//! - **Classification** ([`classifier`]) splits a structure into ligand instances and
//!   candidate atoms, per model.
//! - **Spatial Index** ([`spatial`]) answers radius queries over the candidates of one model.
//! - **Contact Detection** ([`tasks::contact_detection`]) reduces the hits of one ligand
//!   instance to minimum distances per residue.
//! - **Reports** ([`report`]) sorts those distances into a deterministic [`report::Report`].
//!
//! Parameters live in [`config`], failures in [`error`], and long-running steps
//! announce themselves through [`progress`].

pub mod classifier;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod spatial;
pub mod tasks;
