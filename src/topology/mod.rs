pub mod coedge;
pub mod complex;
pub mod edge;
pub mod edge_loop;
pub mod face;
pub mod shell;

pub use coedge::{CoedgeData, CoedgeId};
pub use complex::{ComplexData, ComplexId, ShellClassification};
pub use edge::{EdgeData, EdgeId};
pub use edge_loop::{LoopData, LoopId};
pub use face::{FaceData, FaceId};
pub use shell::{ShellData, ShellId};

use slotmap::SlotMap;

use crate::error::BuildError;

/// Central arena that owns all topological entities of one build.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation. IDs
/// from different categories are distinct types and cannot be confused.
#[derive(Debug, Default, Clone)]
pub struct TopologyStore {
    edges: SlotMap<EdgeId, EdgeData>,
    coedges: SlotMap<CoedgeId, CoedgeData>,
    loops: SlotMap<LoopId, LoopData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    complexes: SlotMap<ComplexId, ComplexData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, BuildError> {
        self.edges
            .get(id)
            .ok_or(BuildError::UnknownHandle { category: "edge" })
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, BuildError> {
        self.edges
            .get_mut(id)
            .ok_or(BuildError::UnknownHandle { category: "edge" })
    }

    /// Returns whether the edge ID is known to this store.
    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    // --- Coedge operations ---

    /// Inserts a coedge and returns its ID.
    pub fn add_coedge(&mut self, data: CoedgeData) -> CoedgeId {
        self.coedges.insert(data)
    }

    /// Returns a reference to the coedge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn coedge(&self, id: CoedgeId) -> Result<&CoedgeData, BuildError> {
        self.coedges
            .get(id)
            .ok_or(BuildError::UnknownHandle { category: "coedge" })
    }

    // --- Loop operations ---

    /// Inserts a loop and returns its ID.
    pub fn add_loop(&mut self, data: LoopData) -> LoopId {
        self.loops.insert(data)
    }

    /// Returns a reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_loop(&self, id: LoopId) -> Result<&LoopData, BuildError> {
        self.loops
            .get(id)
            .ok_or(BuildError::UnknownHandle { category: "loop" })
    }

    /// Returns a mutable reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_loop_mut(&mut self, id: LoopId) -> Result<&mut LoopData, BuildError> {
        self.loops
            .get_mut(id)
            .ok_or(BuildError::UnknownHandle { category: "loop" })
    }

    /// Returns whether the loop ID is known to this store.
    #[must_use]
    pub fn contains_loop(&self, id: LoopId) -> bool {
        self.loops.contains_key(id)
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, BuildError> {
        self.faces
            .get(id)
            .ok_or(BuildError::UnknownHandle { category: "face" })
    }

    /// Returns a mutable reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, BuildError> {
        self.faces
            .get_mut(id)
            .ok_or(BuildError::UnknownHandle { category: "face" })
    }

    /// Returns whether the face ID is known to this store.
    #[must_use]
    pub fn contains_face(&self, id: FaceId) -> bool {
        self.faces.contains_key(id)
    }

    // --- Shell operations ---

    /// Inserts a shell and returns its ID.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Returns a reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, BuildError> {
        self.shells
            .get(id)
            .ok_or(BuildError::UnknownHandle { category: "shell" })
    }

    /// Returns a mutable reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell_mut(&mut self, id: ShellId) -> Result<&mut ShellData, BuildError> {
        self.shells
            .get_mut(id)
            .ok_or(BuildError::UnknownHandle { category: "shell" })
    }

    /// Returns whether the shell ID is known to this store.
    #[must_use]
    pub fn contains_shell(&self, id: ShellId) -> bool {
        self.shells.contains_key(id)
    }

    // --- Complex operations ---

    /// Inserts a complex and returns its ID.
    pub fn add_complex(&mut self, data: ComplexData) -> ComplexId {
        self.complexes.insert(data)
    }

    /// Returns a reference to the complex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn complex(&self, id: ComplexId) -> Result<&ComplexData, BuildError> {
        self.complexes
            .get(id)
            .ok_or(BuildError::UnknownHandle { category: "complex" })
    }

    /// Returns a mutable reference to the complex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn complex_mut(&mut self, id: ComplexId) -> Result<&mut ComplexData, BuildError> {
        self.complexes
            .get_mut(id)
            .ok_or(BuildError::UnknownHandle { category: "complex" })
    }

    /// Returns whether the complex ID is known to this store.
    #[must_use]
    pub fn contains_complex(&self, id: ComplexId) -> bool {
        self.complexes.contains_key(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Curve3, Segment};
    use crate::math::Point3;

    fn segment_edge() -> EdgeData {
        EdgeData::new(Curve3::Segment(
            Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
        ))
    }

    #[test]
    fn edge_ids_are_unique() {
        let mut store = TopologyStore::new();
        let a = store.add_edge(segment_edge());
        let b = store.add_edge(segment_edge());
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_edge_is_an_error() {
        let mut store = TopologyStore::new();
        let id = store.add_edge(segment_edge());
        let other = TopologyStore::new();
        assert!(other.edge(id).is_err());
    }

    #[test]
    fn loop_roundtrip() {
        let mut store = TopologyStore::new();
        let id = store.add_loop(LoopData::new());
        assert!(store.edge_loop(id).unwrap().coedges.is_empty());
        assert!(!store.edge_loop(id).unwrap().complete);
    }
}
