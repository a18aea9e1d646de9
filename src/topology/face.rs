use crate::attributes::{Color, MaterialId};
use crate::geometry::Surface;
use crate::math::Matrix4;

use super::edge_loop::LoopId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a topological face.
///
/// A face is a trimmed region of a surface, bounded by one or more loops.
/// The first loop is the outer boundary; additional loops are holes.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The surface on which this face lies.
    pub surface: Surface,
    /// If `true`, the face normal agrees with the surface's natural normal.
    pub same_sense: bool,
    /// Bounding loops, outer first.
    pub loops: Vec<LoopId>,
    /// Optional per-face color override.
    pub color: Option<Color>,
    /// Optional material reference.
    pub material: Option<MaterialId>,
    /// Optional material-mapping transform.
    pub material_mapping: Option<Matrix4>,
    /// Set once the face has been finished; finished faces are immutable.
    pub complete: bool,
}

impl FaceData {
    /// Creates an open face on a surface, with no loops or attributes yet.
    #[must_use]
    pub fn new(surface: Surface, same_sense: bool) -> Self {
        Self {
            surface,
            same_sense,
            loops: Vec::new(),
            color: None,
            material: None,
            material_mapping: None,
            complete: false,
        }
    }
}
