use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents a single atom of a parsed structure.
///
/// Atoms are created by the structure reader and are treated as immutable once the
/// owning [`MolecularSystem`](super::system::MolecularSystem) has been built. The
/// parent residue is referenced through its arena key and is never owned by the atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O1").
    pub name: String,
    /// The element symbol as given by the input file; empty when unknown.
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy of this atom site, in the range `0.0..=1.0` for well-formed input.
    pub occupancy: f64,
}

impl Atom {
    /// Creates a new `Atom` with an unknown element and full occupancy.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: String::new(),
            residue_id,
            position,
            occupancy: 1.0,
        }
    }

    /// Sets the element symbol, returning the modified atom.
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.trim().to_string();
        self
    }

    /// Sets the occupancy, returning the modified atom.
    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Returns `true` when all three coordinates are finite numbers.
    pub fn has_finite_position(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite())
    }

    /// Returns `true` for hydrogen and deuterium atoms.
    ///
    /// The element symbol is authoritative when present; otherwise the first
    /// letter of the atom name decides.
    pub fn is_hydrogen(&self) -> bool {
        if !self.element.is_empty() {
            return matches!(self.element.to_ascii_uppercase().as_str(), "H" | "D");
        }
        crate::core::utils::identifiers::is_hydrogen_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.element, "");
        assert_eq!(atom.occupancy, 1.0);
    }

    #[test]
    fn builder_methods_set_element_and_occupancy() {
        let atom = Atom::new("SG", ResidueId::default(), Point3::origin())
            .with_element(" S ")
            .with_occupancy(0.4);
        assert_eq!(atom.element, "S");
        assert_eq!(atom.occupancy, 0.4);
    }

    #[test]
    fn has_finite_position_detects_nan_and_infinity() {
        let residue_id = ResidueId::default();
        assert!(Atom::new("C1", residue_id, Point3::new(0.0, 1.0, 2.0)).has_finite_position());
        assert!(!Atom::new("C1", residue_id, Point3::new(f64::NAN, 1.0, 2.0)).has_finite_position());
        assert!(
            !Atom::new("C1", residue_id, Point3::new(0.0, f64::INFINITY, 2.0)).has_finite_position()
        );
    }

    #[test]
    fn is_hydrogen_prefers_element_symbol() {
        let residue_id = ResidueId::default();
        let hg = Atom::new("HG", residue_id, Point3::origin()).with_element("Hg");
        assert!(!hg.is_hydrogen());

        let h = Atom::new("HA", residue_id, Point3::origin()).with_element("H");
        assert!(h.is_hydrogen());
    }

    #[test]
    fn is_hydrogen_falls_back_to_atom_name() {
        let residue_id = ResidueId::default();
        assert!(Atom::new("HB2", residue_id, Point3::origin()).is_hydrogen());
        assert!(Atom::new("D1", residue_id, Point3::origin()).is_hydrogen());
        assert!(!Atom::new("CB", residue_id, Point3::origin()).is_hydrogen());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", ResidueId::default(), Point3::new(0.0, 0.0, 0.0));
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
