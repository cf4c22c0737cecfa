use super::ids::{ModelId, ResidueId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,                      // Author chain identifier (e.g., "A", "AA")
    pub model_id: ModelId,               // Model this chain belongs to
    pub(crate) residues: Vec<ResidueId>, // Ordered list of residue IDs belonging to this chain
}

impl Chain {
    pub(crate) fn new(id: &str, model_id: ModelId) -> Self {
        Self {
            id: id.to_string(),
            model_id,
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }
}
