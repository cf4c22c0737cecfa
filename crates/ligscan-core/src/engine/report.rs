//! Residue-level reduction of atom-pair hits into sorted contact reports.

use crate::core::models::residue::ResidueKey;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Minimum distance observed between a ligand instance and one residue.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub residue: ResidueKey,
    pub min_distance: f64,
}

/// Contacts of one ligand instance, sorted for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Display label of the ligand instance, e.g. `GSH Chain C 1`.
    pub ligand: String,
    pub cutoff: f64,
    pub contacts: Vec<ContactRecord>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Per-instance accumulator of minimum distances keyed by residue.
///
/// Created fresh for every ligand instance and consumed by [`aggregate`].
#[derive(Debug, Clone, Default)]
pub struct MinDistanceMap {
    distances: HashMap<ResidueKey, f64>,
}

impl MinDistanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `distance` for `key`, keeping the smaller of the stored and new values.
    pub fn insert_or_keep_min(&mut self, key: ResidueKey, distance: f64) {
        self.distances
            .entry(key)
            .and_modify(|current| {
                if distance < *current {
                    *current = distance;
                }
            })
            .or_insert(distance);
    }

    pub fn get(&self, key: &ResidueKey) -> Option<f64> {
        self.distances.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Ordering of contact records: chain, sequence number, minimum distance, then
/// insertion code (absent first) and residue name.
pub fn compare_records(a: &ContactRecord, b: &ContactRecord) -> Ordering {
    a.residue
        .chain_id
        .cmp(&b.residue.chain_id)
        .then(a.residue.residue_number.cmp(&b.residue.residue_number))
        .then(a.min_distance.total_cmp(&b.min_distance))
        .then(a.residue.insertion_code.cmp(&b.residue.insertion_code))
        .then(a.residue.residue_name.cmp(&b.residue.residue_name))
}

/// Turns an accumulated distance map into a sorted [`Report`].
///
/// Distances are carried at full precision.
pub fn aggregate(label: impl Into<String>, cutoff: f64, map: MinDistanceMap) -> Report {
    let mut contacts: Vec<ContactRecord> = map
        .distances
        .into_iter()
        .map(|(residue, min_distance)| ContactRecord {
            residue,
            min_distance,
        })
        .collect();
    contacts.sort_by(compare_records);

    Report {
        ligand: label.into(),
        cutoff,
        contacts,
    }
}
