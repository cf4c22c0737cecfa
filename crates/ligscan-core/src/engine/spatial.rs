use super::classifier::CandidateAtom;
use super::error::EngineError;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use nalgebra::Point3;

// Relative slack added to the squared radius handed to the tree; hits are
// re-checked exactly afterwards so the boundary stays inclusive.
const RADIUS_SLACK: f64 = 1e-9;

/// Read-only k-d tree over the candidate atoms of one model.
///
/// The index borrows the candidate slice it was built from and is never mutated
/// after construction, so it can be queried from several threads at once.
pub struct SpatialIndex<'a> {
    atoms: &'a [CandidateAtom],
    tree: Option<ImmutableKdTree<f64, 3>>,
}

impl<'a> SpatialIndex<'a> {
    /// Builds the index. Fails if any candidate has a non-finite coordinate.
    pub fn build(atoms: &'a [CandidateAtom]) -> Result<Self, EngineError> {
        let mut points: Vec<[f64; 3]> = Vec::with_capacity(atoms.len());
        for candidate in atoms {
            let p = candidate.position;
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                return Err(EngineError::DataQuality(format!(
                    "candidate atom {:?} has non-finite coordinates ({}, {}, {})",
                    candidate.atom_id, p.x, p.y, p.z
                )));
            }
            points.push([p.x, p.y, p.z]);
        }

        // The immutable tree copes with many atoms sharing one coordinate on a
        // split axis, which planar or axis-aligned models produce.
        let tree = if points.is_empty() {
            None
        } else {
            Some(ImmutableKdTree::new_from_slice(&points))
        };

        Ok(Self { atoms, tree })
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns every indexed atom whose distance to `center` is at most `radius`.
    ///
    /// The order of the returned atoms is unspecified.
    pub fn query(&self, center: &Point3<f64>, radius: f64) -> Vec<&'a CandidateAtom> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }

        let radius_sq = radius * radius;
        let query = [center.x, center.y, center.z];
        let atoms = self.atoms;
        tree.within_unsorted::<SquaredEuclidean>(&query, radius_sq * (1.0 + RADIUS_SLACK))
            .into_iter()
            .filter_map(|neighbour| atoms.get(neighbour.item as usize))
            .filter(|candidate| (candidate.position - *center).norm_squared() <= radius_sq)
            .collect()
    }
}
