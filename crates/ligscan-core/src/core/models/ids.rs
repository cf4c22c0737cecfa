//! Stable arena keys for the entities of a [`MolecularSystem`](super::system::MolecularSystem).
//!
//! Child entities refer to their parents through these keys only, so ownership
//! always flows top-down from the system.

use slotmap::new_key_type;

new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
    pub struct ModelId;
}
