use crate::attributes::Color;
use crate::geometry::Curve3;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// Data associated with a topological edge.
///
/// One edge carries one 3-D curve and is shared by every coedge that
/// traverses it, in either direction.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The geometric curve defining this edge's shape.
    pub curve: Curve3,
    /// Optional per-edge color override.
    pub color: Option<Color>,
}

impl EdgeData {
    /// Creates edge data for a curve, with no color override.
    #[must_use]
    pub fn new(curve: Curve3) -> Self {
        Self { curve, color: None }
    }
}
