//! The back-end-neutral snapshot of an entire B-Rep.
//!
//! A snapshot is produced in one shot by the extraction pipeline and
//! never mutated afterwards; the replay pipeline reads it, possibly many
//! times and from many threads at once. Coedges reference edges by index
//! into the snapshot's deduplicated edge array, so edge sharing survives
//! the trip between kernels, which is what makes a replayed solid
//! topologically faithful rather than merely geometrically similar.

use serde::{Deserialize, Serialize};

use crate::attributes::{Color, FaceMaterial};
use crate::error::Result;
use crate::geometry::{Curve2, Curve3, Surface};

/// One edge of the snapshot, referenced by index from coedges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    /// The edge's 3-D curve.
    pub curve: Curve3,
    /// Optional per-edge color override.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<Color>,
}

/// One directed use of an edge around a face boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotCoedge {
    /// Index into [`TopologySnapshot::edges`].
    pub edge: usize,
    /// Traversal direction relative to the edge's curve.
    pub forward: bool,
    /// Optional image of the edge in the face's (u, v) space.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub param_curve: Option<Curve2>,
}

/// An ordered, closed cycle of coedges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotLoop {
    pub coedges: Vec<SnapshotCoedge>,
}

/// A trimmed region of a surface, with its boundary loops and attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFace {
    /// The surface the face lies on.
    pub surface: Surface,
    /// Whether the face normal agrees with the surface's natural normal.
    pub same_sense: bool,
    /// Bounding loops, outer first.
    pub loops: Vec<SnapshotLoop>,
    /// Optional per-face color override.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<Color>,
    /// Optional material reference with mapping.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material: Option<FaceMaterial>,
}

/// A connected set of faces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotShell {
    pub faces: Vec<SnapshotFace>,
}

/// A top-level topological unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotComplex {
    pub shells: Vec<SnapshotShell>,
}

/// A self-contained, immutable copy of an entire B-Rep: topology,
/// geometry carriers and visual attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologySnapshot {
    /// Deduplicated edge array; each shared edge appears exactly once.
    pub edges: Vec<SnapshotEdge>,
    /// The complex trees, in extraction order.
    pub complexes: Vec<SnapshotComplex>,
}

impl TopologySnapshot {
    /// Number of complexes.
    #[must_use]
    pub fn complex_count(&self) -> usize {
        self.complexes.len()
    }

    /// Number of shells across all complexes.
    #[must_use]
    pub fn shell_count(&self) -> usize {
        self.complexes.iter().map(|c| c.shells.len()).sum()
    }

    /// Number of faces across all shells.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.complexes
            .iter()
            .flat_map(|c| &c.shells)
            .map(|s| s.faces.len())
            .sum()
    }

    /// Number of loops across all faces.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.complexes
            .iter()
            .flat_map(|c| &c.shells)
            .flat_map(|s| &s.faces)
            .map(|f| f.loops.len())
            .sum()
    }

    /// Number of coedges across all loops.
    #[must_use]
    pub fn coedge_count(&self) -> usize {
        self.complexes
            .iter()
            .flat_map(|c| &c.shells)
            .flat_map(|s| &s.faces)
            .flat_map(|f| &f.loops)
            .map(|l| l.coedges.len())
            .sum()
    }

    /// The edge index of every coedge, in traversal order
    /// (complex → shell → face → loop → coedge).
    ///
    /// Two snapshots of equivalent solids have the same sharing pattern:
    /// coedges at the same positions reference equal indices, up to a
    /// consistent renumbering of the edge array.
    #[must_use]
    pub fn coedge_edge_indices(&self) -> Vec<usize> {
        self.complexes
            .iter()
            .flat_map(|c| &c.shells)
            .flat_map(|s| &s.faces)
            .flat_map(|f| &f.loops)
            .flat_map(|l| &l.coedges)
            .map(|ce| ce.edge)
            .collect()
    }

    /// Serializes the snapshot to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid snapshot document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Snapshot fixtures shared by the pipeline tests.

    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::geometry::{Plane, Segment};
    use crate::math::{Point3, Vector3};

    const CUBE_VERTS: [[f64; 3]; 8] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];

    const CUBE_EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    const CUBE_FACES: [([(usize, bool); 4], usize, [f64; 3], [f64; 3]); 6] = [
        ([(3, false), (2, false), (1, false), (0, false)], 0, [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
        ([(4, true), (5, true), (6, true), (7, true)], 4, [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([(0, true), (9, true), (4, false), (8, false)], 0, [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([(1, true), (10, true), (5, false), (9, false)], 1, [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([(2, true), (11, true), (6, false), (10, false)], 2, [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([(3, true), (8, true), (7, false), (11, false)], 0, [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ];

    fn vert(i: usize) -> Point3 {
        Point3::new(CUBE_VERTS[i][0], CUBE_VERTS[i][1], CUBE_VERTS[i][2])
    }

    /// A unit cube: 1 complex, 1 shell, 6 planar faces, 24 coedges over
    /// 12 shared edges, each edge used twice with opposite orientation.
    pub(crate) fn unit_cube() -> TopologySnapshot {
        let edges = CUBE_EDGES
            .iter()
            .map(|&(s, e)| SnapshotEdge {
                curve: Curve3::Segment(Segment::new(vert(s), vert(e)).unwrap()),
                color: None,
            })
            .collect();

        let faces = CUBE_FACES
            .iter()
            .map(|&(coedges, origin, u, v)| SnapshotFace {
                surface: Surface::Plane(
                    Plane::new(
                        vert(origin),
                        Vector3::new(u[0], u[1], u[2]),
                        Vector3::new(v[0], v[1], v[2]),
                    )
                    .unwrap(),
                ),
                same_sense: true,
                loops: vec![SnapshotLoop {
                    coedges: coedges
                        .iter()
                        .map(|&(edge, forward)| SnapshotCoedge {
                            edge,
                            forward,
                            param_curve: None,
                        })
                        .collect(),
                }],
                color: None,
                material: None,
            })
            .collect();

        TopologySnapshot {
            edges,
            complexes: vec![SnapshotComplex {
                shells: vec![SnapshotShell { faces }],
            }],
        }
    }
}
