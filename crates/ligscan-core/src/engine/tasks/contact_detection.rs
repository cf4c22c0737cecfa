use crate::core::models::system::MolecularSystem;
use crate::engine::classifier::{LigandInstance, is_candidate_residue};
use crate::engine::config::ContactConfig;
use crate::engine::report::MinDistanceMap;
use crate::engine::spatial::SpatialIndex;
use tracing::{instrument, trace};

/// Collects the minimum distance from `ligand` to every eligible residue within
/// the configured cutoff.
///
/// Each hit returned by the index is re-checked: the owning residue must still be
/// a candidate and must not be the ligand itself, and the exact distance must not
/// exceed the cutoff.
#[instrument(skip_all, name = "contact_detection_task", fields(ligand = %ligand.label))]
pub fn run(
    system: &MolecularSystem,
    index: &SpatialIndex<'_>,
    ligand: &LigandInstance,
    config: &ContactConfig,
) -> MinDistanceMap {
    let mut distances = MinDistanceMap::new();
    let cutoff = config.cutoff;

    for ligand_atom in ligand.atoms.iter().filter_map(|&id| system.atom(id)) {
        for candidate in index.query(&ligand_atom.position, cutoff) {
            if candidate.residue_id == ligand.residue_id {
                continue;
            }
            let Some(residue) = system.residue(candidate.residue_id) else {
                continue;
            };
            if !is_candidate_residue(residue, config) {
                continue;
            }

            let distance = nalgebra::distance(&ligand_atom.position, &candidate.position);
            if distance > cutoff {
                continue;
            }
            if let Some(key) = system.residue_key(candidate.residue_id) {
                distances.insert_or_keep_min(key, distance);
            }
        }
    }

    trace!(residues = distances.len(), "Contact detection finished.");
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::ids::{ChainId, ResidueId};
    use crate::core::models::residue::ResidueKey;
    use crate::engine::classifier::classify;
    use nalgebra::Point3;

    struct TestSetup {
        system: MolecularSystem,
        chain_a: ChainId,
        ligand: ResidueId,
    }

    fn setup() -> TestSetup {
        let mut system = MolecularSystem::new();
        let model = system.add_model(1);
        let chain_a = system.add_chain(model, "A").unwrap();
        let chain_c = system.add_chain(model, "C").unwrap();
        let ligand = add_residue(&mut system, chain_c, 1, "GSH", &[[0.0, 0.0, 0.0]]);
        TestSetup {
            system,
            chain_a,
            ligand,
        }
    }

    fn add_residue(
        system: &mut MolecularSystem,
        chain: ChainId,
        number: isize,
        name: &str,
        positions: &[[f64; 3]],
    ) -> ResidueId {
        let residue_id = system
            .add_residue(chain, number, None, name, false)
            .unwrap();
        for (i, &[x, y, z]) in positions.iter().enumerate() {
            let atom = Atom::new(&format!("X{}", i), residue_id, Point3::new(x, y, z));
            system.add_atom_to_residue(residue_id, atom).unwrap();
        }
        residue_id
    }

    fn detect(system: &MolecularSystem, config: &ContactConfig) -> MinDistanceMap {
        let classification = classify(system, config);
        let ligand = &classification.ligands[0];
        let candidates = classification.candidates_for(ligand.model_id).unwrap();
        let index = SpatialIndex::build(&candidates.atoms).unwrap();
        run(system, &index, ligand, config)
    }

    fn key(name: &str, number: isize) -> ResidueKey {
        ResidueKey {
            residue_name: name.to_string(),
            chain_id: "A".to_string(),
            residue_number: number,
            insertion_code: None,
        }
    }

    #[test]
    fn keeps_the_closest_atom_of_each_residue() {
        let TestSetup {
            mut system,
            chain_a,
            ..
        } = setup();
        add_residue(&mut system, chain_a, 1, "ALA", &[[2.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        add_residue(&mut system, chain_a, 2, "GLY", &[[10.0, 0.0, 0.0]]);

        let map = detect(&system, &ContactConfig::default());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&key("ALA", 1)), Some(1.0));
        assert_eq!(map.get(&key("GLY", 2)), None);
    }

    #[test]
    fn minimum_over_several_atoms_is_reported() {
        let TestSetup {
            mut system,
            chain_a,
            ..
        } = setup();
        add_residue(
            &mut system,
            chain_a,
            7,
            "TYR",
            &[[5.2, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.1]],
        );

        let config = ContactConfig {
            cutoff: 6.0,
            ..ContactConfig::default()
        };
        let map = detect(&system, &config);
        assert_eq!(map.get(&key("TYR", 7)), Some(2.0));
    }

    #[test]
    fn waters_are_reported_only_when_included() {
        let TestSetup {
            mut system,
            chain_a,
            ..
        } = setup();
        add_residue(&mut system, chain_a, 1, "ALA", &[[3.0, 0.0, 0.0]]);
        add_residue(&mut system, chain_a, 301, "HOH", &[[0.0, 2.5, 0.0]]);

        let default_map = detect(&system, &ContactConfig::default());
        assert_eq!(default_map.len(), 1);

        let config = ContactConfig {
            include_waters: true,
            ..ContactConfig::default()
        };
        let map = detect(&system, &config);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&key("HOH", 301)), Some(2.5));
    }

    #[test]
    fn ligand_never_reports_itself() {
        let TestSetup {
            system, ligand, ..
        } = setup();
        let config = ContactConfig::default();
        let classification = classify(&system, &config);
        assert_eq!(classification.ligands[0].residue_id, ligand);
        let index = SpatialIndex::build(&[]).unwrap();
        assert!(run(&system, &index, &classification.ligands[0], &config).is_empty());
    }

    #[test]
    fn cutoff_is_inclusive() {
        let TestSetup {
            mut system,
            chain_a,
            ..
        } = setup();
        add_residue(&mut system, chain_a, 3, "SER", &[[4.5, 0.0, 0.0]]);
        let map = detect(&system, &ContactConfig::default());
        assert_eq!(map.get(&key("SER", 3)), Some(4.5));
    }
}
