use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ModelId, ResidueId};
use super::residue::{Residue, ResidueKey};
use slotmap::SlotMap;
use std::collections::HashMap;

/// One coordinate model of a structure (e.g., a single NMR conformer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Model number as given by the input file, `1` when the file has no model column.
    pub number: usize,
    pub(crate) chains: Vec<ChainId>,
}

impl Model {
    fn new(number: usize) -> Self {
        Self {
            number,
            chains: Vec::new(),
        }
    }

    pub fn chains(&self) -> &[ChainId] {
        &self.chains
    }
}

/// Represents a complete parsed structure: models, chains, residues and atoms.
///
/// All entities live in slot-map arenas owned by the system; children refer back to
/// their parents through arena keys only. The system is populated once by a reader
/// and consumed read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Primary storage for models.
    models: SlotMap<ModelId, Model>,
    /// Models in the order they were first encountered.
    model_order: Vec<ModelId>,
    /// Lookup map for finding models by their number.
    model_number_map: HashMap<usize, ModelId>,
    /// Lookup map for finding chains by model and identifier.
    chain_id_map: HashMap<(ModelId, String), ChainId>,
    /// Lookup map for finding residues by chain, sequence number and insertion code.
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    /// Iterates over models in file order.
    pub fn models_iter(&self) -> impl Iterator<Item = (ModelId, &Model)> {
        self.model_order
            .iter()
            .filter_map(|&id| self.models.get(id).map(|model| (id, model)))
    }

    pub fn model_count(&self) -> usize {
        self.model_order.len()
    }

    /// Iterates over the residues of one model in traversal order: chains in file
    /// order, then residues in file order within each chain.
    pub fn residues_in_model(
        &self,
        model_id: ModelId,
    ) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.models
            .get(model_id)
            .into_iter()
            .flat_map(|model| model.chains.iter())
            .filter_map(|&chain_id| self.chains.get(chain_id))
            .flat_map(|chain| chain.residues.iter())
            .filter_map(|&residue_id| {
                self.residues
                    .get(residue_id)
                    .map(|residue| (residue_id, residue))
            })
    }

    pub fn find_chain_by_id(&self, model_id: ModelId, id: &str) -> Option<ChainId> {
        self.chain_id_map.get(&(model_id, id.to_string())).copied()
    }

    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number, insertion_code))
            .copied()
    }

    /// Builds the stable [`ResidueKey`] of a residue.
    ///
    /// Returns `None` if the residue or its parent chain does not exist.
    pub fn residue_key(&self, residue_id: ResidueId) -> Option<ResidueKey> {
        let residue = self.residues.get(residue_id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some(ResidueKey {
            residue_name: residue.name.clone(),
            chain_id: chain.id.clone(),
            residue_number: residue.residue_number,
            insertion_code: residue.insertion_code,
        })
    }

    /// Adds a model with the given number, or returns the existing one.
    pub fn add_model(&mut self, number: usize) -> ModelId {
        *self.model_number_map.entry(number).or_insert_with(|| {
            let id = self.models.insert(Model::new(number));
            self.model_order.push(id);
            id
        })
    }

    /// Adds a chain to a model, or returns the existing chain with the same identifier.
    ///
    /// Returns `None` if the model does not exist.
    pub fn add_chain(&mut self, model_id: ModelId, id: &str) -> Option<ChainId> {
        let model = self.models.get_mut(model_id)?;
        let chain_id = *self
            .chain_id_map
            .entry((model_id, id.to_string()))
            .or_insert_with(|| {
                let chain_id = self.chains.insert(Chain::new(id, model_id));
                model.chains.push(chain_id);
                chain_id
            });
        Some(chain_id)
    }

    /// Adds a residue to a chain, or returns the existing residue with the same
    /// sequence number and insertion code.
    ///
    /// Returns `None` if the chain does not exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(residue_number, insertion_code, name, is_hetero, chain_id);
            let residue_id = self.residues.insert(residue);
            chain.residues.push(residue_id);
            residue_id
        });

        Some(residue_id)
    }

    /// Adds an atom to an existing residue.
    ///
    /// The atom's `residue_id` is overwritten with `residue_id` so the back reference
    /// always points at the owning residue. Returns `None` if the residue does not exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);

        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);
        Some(atom_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    struct TestRefs {
        model_id: ModelId,
        chain_a_id: ChainId,
        gly_id: ResidueId,
        gly_n_id: AtomId,
        ala_id: ResidueId,
    }

    fn create_standard_test_system() -> (MolecularSystem, TestRefs) {
        let mut system = MolecularSystem::new();
        let model_id = system.add_model(1);
        let chain_a_id = system.add_chain(model_id, "A").unwrap();

        let gly_id = system
            .add_residue(chain_a_id, 1, None, "GLY", false)
            .unwrap();
        let gly_n_id = system
            .add_atom_to_residue(gly_id, Atom::new("N", gly_id, Point3::new(0.0, 0.0, 0.0)))
            .unwrap();
        system
            .add_atom_to_residue(gly_id, Atom::new("CA", gly_id, Point3::new(1.4, 0.0, 0.0)))
            .unwrap();

        let ala_id = system
            .add_residue(chain_a_id, 2, None, "ALA", false)
            .unwrap();
        system
            .add_atom_to_residue(ala_id, Atom::new("CA", ala_id, Point3::new(2.0, 1.0, 0.0)))
            .unwrap();

        let refs = TestRefs {
            model_id,
            chain_a_id,
            gly_id,
            gly_n_id,
            ala_id,
        };
        (system, refs)
    }

    #[test]
    fn system_creation_and_access() {
        let (system, refs) = create_standard_test_system();

        assert_eq!(system.atoms_iter().count(), 3);
        assert_eq!(system.residues_iter().count(), 2);
        assert_eq!(system.chains_iter().count(), 1);
        assert_eq!(system.model_count(), 1);
        assert!(system.find_chain_by_id(refs.model_id, "B").is_none());

        assert_eq!(
            system.find_residue_by_id(refs.chain_a_id, 1, None),
            Some(refs.gly_id)
        );
        assert_eq!(
            system.find_residue_by_id(refs.chain_a_id, 2, None),
            Some(refs.ala_id)
        );
        assert!(system.find_residue_by_id(refs.chain_a_id, 2, Some('A')).is_none());

        assert_eq!(system.residue(refs.gly_id).unwrap().name, "GLY");
        assert_eq!(system.atom(refs.gly_n_id).unwrap().name, "N");
        assert_eq!(system.atom(refs.gly_n_id).unwrap().residue_id, refs.gly_id);
    }

    #[test]
    fn add_model_and_chain_are_idempotent() {
        let (mut system, refs) = create_standard_test_system();
        assert_eq!(system.add_model(1), refs.model_id);
        assert_eq!(system.add_chain(refs.model_id, "A"), Some(refs.chain_a_id));
        assert_eq!(system.model_count(), 1);
        assert_eq!(system.chains_iter().count(), 1);
    }

    #[test]
    fn add_residue_distinguishes_insertion_codes() {
        let (mut system, refs) = create_standard_test_system();
        let inserted = system
            .add_residue(refs.chain_a_id, 2, Some('A'), "SER", false)
            .unwrap();
        assert_ne!(inserted, refs.ala_id);
        assert_eq!(
            system.add_residue(refs.chain_a_id, 2, Some('A'), "SER", false),
            Some(inserted)
        );
        assert_eq!(system.chain(refs.chain_a_id).unwrap().residues().len(), 3);
    }

    #[test]
    fn add_residue_and_atom_fail_for_unknown_parents() {
        let (mut system, _) = create_standard_test_system();
        assert!(
            system
                .add_residue(ChainId::default(), 1, None, "GLY", false)
                .is_none()
        );
        assert!(system.add_chain(ModelId::default(), "Z").is_none());
        let orphan = Atom::new("CA", ResidueId::default(), Point3::origin());
        assert!(
            system
                .add_atom_to_residue(ResidueId::default(), orphan)
                .is_none()
        );
    }

    #[test]
    fn add_atom_rewrites_back_reference() {
        let (mut system, refs) = create_standard_test_system();
        let atom = Atom::new("CB", refs.gly_id, Point3::origin());
        let atom_id = system.add_atom_to_residue(refs.ala_id, atom).unwrap();
        assert_eq!(system.atom(atom_id).unwrap().residue_id, refs.ala_id);
        assert_eq!(
            system.residue(refs.ala_id).unwrap().get_atom_id_by_name("CB"),
            Some(atom_id)
        );
    }

    #[test]
    fn residue_key_includes_chain_identifier() {
        let (system, refs) = create_standard_test_system();
        let key = system.residue_key(refs.ala_id).unwrap();
        assert_eq!(key.residue_name, "ALA");
        assert_eq!(key.chain_id, "A");
        assert_eq!(key.residue_number, 2);
        assert_eq!(key.insertion_code, None);
    }

    #[test]
    fn residues_in_model_follow_chain_then_residue_order() {
        let mut system = MolecularSystem::new();
        let model_1 = system.add_model(1);
        let model_2 = system.add_model(2);
        let chain_b = system.add_chain(model_1, "B").unwrap();
        let chain_a = system.add_chain(model_1, "A").unwrap();
        system.add_residue(chain_b, 5, None, "LYS", false).unwrap();
        system.add_residue(chain_a, 9, None, "GLU", false).unwrap();
        system.add_residue(chain_b, 6, None, "ARG", false).unwrap();
        let chain_a2 = system.add_chain(model_2, "A").unwrap();
        system.add_residue(chain_a2, 1, None, "MET", false).unwrap();

        let names: Vec<_> = system
            .residues_in_model(model_1)
            .map(|(_, residue)| residue.name.as_str())
            .collect();
        assert_eq!(names, vec!["LYS", "ARG", "GLU"]);

        let numbers: Vec<_> = system.models_iter().map(|(_, m)| m.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(system.residues_in_model(model_2).count(), 1);
    }
}
