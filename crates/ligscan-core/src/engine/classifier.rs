//! Partitions a structure into ligand instances and candidate atoms.

use super::config::ContactConfig;
use crate::core::models::ids::{AtomId, ModelId, ResidueId};
use crate::core::models::residue::{Residue, ResidueKey};
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Role a residue plays in a contact analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueRole {
    Ligand,
    Water,
    AminoAcid,
    Other,
}

/// Determines the role of a residue. The ligand check wins over the water check,
/// which wins over the amino-acid check.
pub fn residue_role(residue: &Residue, config: &ContactConfig) -> ResidueRole {
    if residue.name.trim() == config.ligand_name {
        ResidueRole::Ligand
    } else if residue.is_water() {
        ResidueRole::Water
    } else if residue.is_amino_acid(config.strict_amino_acids) {
        ResidueRole::AminoAcid
    } else {
        ResidueRole::Other
    }
}

/// Returns `true` if atoms of this residue may be reported as contacts.
pub fn is_candidate_residue(residue: &Residue, config: &ContactConfig) -> bool {
    match residue_role(residue, config) {
        ResidueRole::AminoAcid => true,
        ResidueRole::Water => config.include_waters,
        ResidueRole::Ligand | ResidueRole::Other => false,
    }
}

/// One residue matching the target ligand name.
#[derive(Debug, Clone, PartialEq)]
pub struct LigandInstance {
    pub residue_id: ResidueId,
    pub model_id: ModelId,
    /// Display label such as `GSH Chain C 1` or `GSH Chain C 1 (model 2)`.
    pub label: String,
    /// Ligand atoms taking part in the search, in file order.
    pub atoms: Vec<AtomId>,
}

/// An atom eligible to be reported as a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateAtom {
    pub atom_id: AtomId,
    pub residue_id: ResidueId,
    pub position: Point3<f64>,
}

/// The candidate atoms of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCandidates {
    pub model_id: ModelId,
    pub atoms: Vec<CandidateAtom>,
}

/// A residue that was dropped because one of its atoms has no usable coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQualityIssue {
    pub residue: ResidueKey,
    pub model_number: usize,
    pub atom_name: String,
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "residue {} (model {}) skipped: atom '{}' has non-finite coordinates",
            self.residue, self.model_number, self.atom_name
        )
    }
}

/// Non-fatal outcomes that end an analysis without reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundCondition {
    LigandNotFound { ligand_name: String },
    NoPolymerAtoms,
}

impl fmt::Display for NotFoundCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LigandNotFound { ligand_name } => {
                write!(f, "Ligand '{}' not found in structure.", ligand_name)
            }
            Self::NoPolymerAtoms => write!(f, "No polymer atoms found in structure."),
        }
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Ligand instances in discovery order (model, chain, residue).
    pub ligands: Vec<LigandInstance>,
    /// Candidate atoms grouped by model, in model order.
    pub candidates: Vec<ModelCandidates>,
    pub data_issues: Vec<DataQualityIssue>,
}

impl Classification {
    pub fn candidate_count(&self) -> usize {
        self.candidates.iter().map(|group| group.atoms.len()).sum()
    }

    pub fn candidates_for(&self, model_id: ModelId) -> Option<&ModelCandidates> {
        self.candidates
            .iter()
            .find(|group| group.model_id == model_id)
    }

    /// The condition that prevents any report from being produced, if any.
    pub fn condition(&self, config: &ContactConfig) -> Option<NotFoundCondition> {
        if self.ligands.is_empty() {
            Some(NotFoundCondition::LigandNotFound {
                ligand_name: config.ligand_name.clone(),
            })
        } else if self.candidate_count() == 0 {
            Some(NotFoundCondition::NoPolymerAtoms)
        } else {
            None
        }
    }
}

/// Classifies every residue of every model of `system`.
///
/// Residues with a non-finite coordinate among the atoms that would be used are
/// left out entirely and recorded as [`DataQualityIssue`]s.
#[instrument(skip_all, name = "classification")]
pub fn classify(system: &MolecularSystem, config: &ContactConfig) -> Classification {
    let multi_model = system.model_count() > 1;
    let mut classification = Classification::default();

    for (model_id, model) in system.models_iter() {
        let mut candidates = Vec::new();

        for (residue_id, residue) in system.residues_in_model(model_id) {
            let role = residue_role(residue, config);
            if role != ResidueRole::Ligand && !is_candidate_residue(residue, config) {
                continue;
            }

            let atoms: Vec<AtomId> = residue
                .atoms()
                .iter()
                .copied()
                .filter(|&atom_id| {
                    system
                        .atom(atom_id)
                        .is_some_and(|atom| !(config.ignore_hydrogens && atom.is_hydrogen()))
                })
                .collect();

            let bad_atom = atoms
                .iter()
                .filter_map(|&atom_id| system.atom(atom_id))
                .find(|atom| !atom.has_finite_position());
            if let Some(atom) = bad_atom {
                if let Some(key) = system.residue_key(residue_id) {
                    let issue = DataQualityIssue {
                        residue: key,
                        model_number: model.number,
                        atom_name: atom.name.clone(),
                    };
                    warn!("Skipping {}", issue);
                    classification.data_issues.push(issue);
                }
                continue;
            }

            if role == ResidueRole::Ligand {
                let Some(key) = system.residue_key(residue_id) else {
                    continue;
                };
                let label = if multi_model {
                    format!("{} (model {})", key, model.number)
                } else {
                    key.to_string()
                };
                classification.ligands.push(LigandInstance {
                    residue_id,
                    model_id,
                    label,
                    atoms,
                });
            } else {
                candidates.extend(atoms.iter().filter_map(|&atom_id| {
                    system.atom(atom_id).map(|atom| CandidateAtom {
                        atom_id,
                        residue_id,
                        position: atom.position,
                    })
                }));
            }
        }

        debug!(
            model = model.number,
            candidates = candidates.len(),
            "Classified model."
        );
        classification.candidates.push(ModelCandidates {
            model_id,
            atoms: candidates,
        });
    }

    debug!(
        ligands = classification.ligands.len(),
        candidates = classification.candidate_count(),
        issues = classification.data_issues.len(),
        "Classification complete."
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::ids::ChainId;

    struct TestSetup {
        system: MolecularSystem,
        chain_a: ChainId,
        chain_c: ChainId,
    }

    fn setup() -> TestSetup {
        let mut system = MolecularSystem::new();
        let model = system.add_model(1);
        let chain_a = system.add_chain(model, "A").unwrap();
        let chain_c = system.add_chain(model, "C").unwrap();
        TestSetup {
            system,
            chain_a,
            chain_c,
        }
    }

    fn add_residue(
        system: &mut MolecularSystem,
        chain: ChainId,
        number: isize,
        name: &str,
        atoms: &[(&str, &str, [f64; 3])],
    ) -> ResidueId {
        let residue_id = system
            .add_residue(chain, number, None, name, false)
            .unwrap();
        for &(atom_name, element, [x, y, z]) in atoms {
            let atom = Atom::new(atom_name, residue_id, Point3::new(x, y, z)).with_element(element);
            system.add_atom_to_residue(residue_id, atom).unwrap();
        }
        residue_id
    }

    fn config() -> ContactConfig {
        ContactConfig::default()
    }

    #[test]
    fn ligand_and_polymer_atoms_are_partitioned() {
        let TestSetup {
            mut system,
            chain_a,
            chain_c,
        } = setup();
        add_residue(&mut system, chain_a, 1, "ALA", &[("CA", "C", [1.0, 0.0, 0.0])]);
        add_residue(&mut system, chain_a, 2, "HOH", &[("O", "O", [2.0, 0.0, 0.0])]);
        add_residue(&mut system, chain_a, 3, "NAG", &[("C1", "C", [3.0, 0.0, 0.0])]);
        let gsh = add_residue(&mut system, chain_c, 1, "GSH", &[("N1", "N", [0.0, 0.0, 0.0])]);

        let result = classify(&system, &config());
        assert_eq!(result.ligands.len(), 1);
        assert_eq!(result.ligands[0].residue_id, gsh);
        assert_eq!(result.ligands[0].label, "GSH Chain C 1");
        assert_eq!(result.candidate_count(), 1);
        assert!(result.condition(&config()).is_none());
    }

    #[test]
    fn waters_are_candidates_only_when_requested() {
        let TestSetup {
            mut system,
            chain_a,
            chain_c,
        } = setup();
        add_residue(&mut system, chain_a, 1, "ALA", &[("CA", "C", [1.0, 0.0, 0.0])]);
        let water = add_residue(&mut system, chain_a, 2, "HOH", &[("O", "O", [2.0, 0.0, 0.0])]);
        add_residue(&mut system, chain_c, 1, "GSH", &[("N1", "N", [0.0, 0.0, 0.0])]);

        let with_waters = ContactConfig {
            include_waters: true,
            ..config()
        };
        let result = classify(&system, &with_waters);
        assert_eq!(result.candidate_count(), 2);
        assert!(
            result.candidates[0]
                .atoms
                .iter()
                .any(|candidate| candidate.residue_id == water)
        );
    }

    #[test]
    fn strict_mode_excludes_modified_amino_acids() {
        let TestSetup {
            mut system,
            chain_a,
            chain_c,
        } = setup();
        add_residue(&mut system, chain_a, 1, "MSE", &[("SE", "SE", [1.0, 0.0, 0.0])]);
        add_residue(&mut system, chain_c, 1, "GSH", &[("N1", "N", [0.0, 0.0, 0.0])]);

        assert_eq!(classify(&system, &config()).candidate_count(), 1);

        let strict = ContactConfig {
            strict_amino_acids: true,
            ..config()
        };
        let result = classify(&system, &strict);
        assert_eq!(result.candidate_count(), 0);
        assert_eq!(
            result.condition(&strict),
            Some(NotFoundCondition::NoPolymerAtoms)
        );
    }

    #[test]
    fn ligand_name_takes_precedence_over_amino_acid_tables() {
        let TestSetup {
            mut system,
            chain_a,
            ..
        } = setup();
        add_residue(&mut system, chain_a, 1, "CYS", &[("SG", "S", [0.0, 0.0, 0.0])]);
        add_residue(&mut system, chain_a, 2, "ALA", &[("CA", "C", [1.0, 0.0, 0.0])]);

        let cys_as_ligand = ContactConfig {
            ligand_name: "CYS".to_string(),
            ..config()
        };
        let result = classify(&system, &cys_as_ligand);
        assert_eq!(result.ligands.len(), 1);
        assert_eq!(result.candidate_count(), 1);
    }

    #[test]
    fn missing_ligand_is_signaled() {
        let TestSetup {
            mut system,
            chain_a,
            ..
        } = setup();
        add_residue(&mut system, chain_a, 1, "ALA", &[("CA", "C", [1.0, 0.0, 0.0])]);

        let result = classify(&system, &config());
        assert_eq!(
            result.condition(&config()),
            Some(NotFoundCondition::LigandNotFound {
                ligand_name: "GSH".to_string()
            })
        );
        assert_eq!(
            result.condition(&config()).unwrap().to_string(),
            "Ligand 'GSH' not found in structure."
        );
    }

    #[test]
    fn residues_with_non_finite_coordinates_are_skipped_and_recorded() {
        let TestSetup {
            mut system,
            chain_a,
            chain_c,
        } = setup();
        add_residue(
            &mut system,
            chain_a,
            1,
            "ALA",
            &[("CA", "C", [1.0, 0.0, 0.0]), ("CB", "C", [f64::NAN, 0.0, 0.0])],
        );
        add_residue(&mut system, chain_a, 2, "GLY", &[("CA", "C", [2.0, 0.0, 0.0])]);
        add_residue(&mut system, chain_c, 1, "GSH", &[("N1", "N", [0.0, 0.0, 0.0])]);

        let result = classify(&system, &config());
        assert_eq!(result.candidate_count(), 1);
        assert_eq!(result.data_issues.len(), 1);
        assert_eq!(result.data_issues[0].residue.residue_name, "ALA");
        assert_eq!(result.data_issues[0].atom_name, "CB");
    }

    #[test]
    fn hydrogens_are_dropped_on_request() {
        let TestSetup {
            mut system,
            chain_a,
            chain_c,
        } = setup();
        add_residue(
            &mut system,
            chain_a,
            1,
            "ALA",
            &[("CA", "C", [1.0, 0.0, 0.0]), ("HA", "H", [1.5, 0.0, 0.0])],
        );
        add_residue(
            &mut system,
            chain_c,
            1,
            "GSH",
            &[("N1", "N", [0.0, 0.0, 0.0]), ("H1", "", [0.5, 0.0, 0.0])],
        );

        assert_eq!(classify(&system, &config()).candidate_count(), 2);

        let no_h = ContactConfig {
            ignore_hydrogens: true,
            ..config()
        };
        let result = classify(&system, &no_h);
        assert_eq!(result.candidate_count(), 1);
        assert_eq!(result.ligands[0].atoms.len(), 1);
    }

    #[test]
    fn labels_carry_model_numbers_for_multi_model_structures() {
        let mut system = MolecularSystem::new();
        for number in [1, 2] {
            let model = system.add_model(number);
            let chain = system.add_chain(model, "C").unwrap();
            add_residue(&mut system, chain, 1, "GSH", &[("N1", "N", [0.0, 0.0, 0.0])]);
            let chain_a = system.add_chain(model, "A").unwrap();
            add_residue(&mut system, chain_a, 5, "ALA", &[("CA", "C", [1.0, 0.0, 0.0])]);
        }

        let result = classify(&system, &config());
        let labels: Vec<&str> = result
            .ligands
            .iter()
            .map(|ligand| ligand.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["GSH Chain C 1 (model 1)", "GSH Chain C 1 (model 2)"]
        );
        assert_eq!(result.candidates.len(), 2);
        assert!(
            result
                .candidates
                .iter()
                .all(|group| group.atoms.len() == 1)
        );
    }
}
