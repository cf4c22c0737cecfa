//! Computational units invoked by the workflows.
//!
//! Each task works on one ligand instance and borrows everything else read-only.

pub mod contact_detection;
