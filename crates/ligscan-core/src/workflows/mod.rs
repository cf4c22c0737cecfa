//! # Workflows Module
//!
//! End-to-end entry points of the library. A workflow validates its configuration,
//! drives the engine phases in order and reports progress along the way.
//!
//! - **Contacts Workflow** ([`contacts`]) finds the residues surrounding every
//!   instance of a ligand and returns one sorted report per instance.

pub mod contacts;
