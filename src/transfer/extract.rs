use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{RejectError, Result, SolidportError};
use crate::snapshot::{
    SnapshotCoedge, SnapshotComplex, SnapshotEdge, SnapshotFace, SnapshotLoop, SnapshotShell,
    TopologySnapshot,
};

use super::source::{NativeBrep, VisualAttributeProvider};

/// Controls what extraction captures and what it tolerates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractPolicy {
    /// Drop faces that have no surface instead of failing their shell.
    pub skip_null_surface: bool,
    /// Leave coedge parameter-space curves out of the snapshot. Smaller
    /// and faster, but backends that require explicit face-local
    /// parametrization will have to reconstruct them.
    pub skip_coedge_2d_curve: bool,
}

/// A shell subtree that could not be captured.
#[derive(Debug)]
pub struct ShellFailure {
    /// Index of the complex in traversal order.
    pub complex: usize,
    /// Index of the shell within its complex.
    pub shell: usize,
    /// What went wrong.
    pub error: SolidportError,
}

/// The result of an extraction: the snapshot plus per-shell failures.
///
/// Extraction is best-effort at shell granularity. A failed shell is
/// omitted from the snapshot and reported here; sibling shells that were
/// captured stay valid and usable.
#[derive(Debug)]
pub struct ExtractOutcome {
    pub snapshot: TopologySnapshot,
    pub failures: Vec<ShellFailure>,
}

impl ExtractOutcome {
    /// Returns whether every shell of the source was captured.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Deduplicating edge table keyed by native edge identity.
///
/// Edges staged by a shell that subsequently fails are rolled back, so a
/// failed subtree leaves no trace in the snapshot.
struct EdgeTable<B: NativeBrep> {
    edges: Vec<SnapshotEdge>,
    index: HashMap<B::EdgeRef, usize>,
}

impl<B: NativeBrep> EdgeTable<B> {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn checkpoint(&self) -> usize {
        self.edges.len()
    }

    fn rollback(&mut self, checkpoint: usize) {
        self.index.retain(|_, i| *i < checkpoint);
        self.edges.truncate(checkpoint);
    }

    /// Resolves a native edge to its snapshot index, inserting it on
    /// first sight.
    fn resolve<P>(&mut self, brep: &B, provider: Option<&P>, edge: B::EdgeRef) -> Result<usize>
    where
        P: VisualAttributeProvider<B>,
    {
        if let Some(&i) = self.index.get(&edge) {
            return Ok(i);
        }
        let curve = brep.edge_curve(edge)?;
        let color = provider.and_then(|p| p.edge_color(brep, edge));
        let i = self.edges.len();
        self.edges.push(SnapshotEdge { curve, color });
        self.index.insert(edge, i);
        Ok(i)
    }
}

/// Walks a native B-Rep and captures it into a back-end-neutral snapshot.
///
/// Passing `None` as the provider is legal and yields a snapshot without
/// visual attributes.
pub fn extract<B, P>(brep: &B, provider: Option<&P>, policy: &ExtractPolicy) -> ExtractOutcome
where
    B: NativeBrep,
    P: VisualAttributeProvider<B>,
{
    let mut table = EdgeTable::<B>::new();
    let mut failures = Vec::new();
    let mut complexes = Vec::new();

    for (ci, &complex) in brep.complexes().iter().enumerate() {
        let mut shells = Vec::new();
        for (si, &shell) in brep.shells(complex).iter().enumerate() {
            let checkpoint = table.checkpoint();
            match capture_shell(brep, provider, policy, shell, &mut table) {
                Ok(captured) => shells.push(captured),
                Err(error) => {
                    table.rollback(checkpoint);
                    warn!(
                        complex = ci,
                        shell = si,
                        %error,
                        "shell capture failed; sibling shells kept"
                    );
                    failures.push(ShellFailure {
                        complex: ci,
                        shell: si,
                        error,
                    });
                }
            }
        }
        complexes.push(SnapshotComplex { shells });
    }

    debug!(
        edges = table.edges.len(),
        complexes = complexes.len(),
        failures = failures.len(),
        "extraction finished"
    );
    ExtractOutcome {
        snapshot: TopologySnapshot {
            edges: table.edges,
            complexes,
        },
        failures,
    }
}

fn capture_shell<B, P>(
    brep: &B,
    provider: Option<&P>,
    policy: &ExtractPolicy,
    shell: B::ShellRef,
    table: &mut EdgeTable<B>,
) -> Result<SnapshotShell>
where
    B: NativeBrep,
    P: VisualAttributeProvider<B>,
{
    let mut faces = Vec::new();

    for &face in &brep.faces(shell) {
        let Some(surface) = brep.face_surface(face)? else {
            if policy.skip_null_surface {
                debug!("dropping face with no surface");
                continue;
            }
            return Err(RejectError::NullSurface.into());
        };

        let mut loops = Vec::new();
        for &lp in &brep.loops(face) {
            let mut coedges = Vec::new();
            for &coedge in &brep.coedges(lp) {
                let edge = table.resolve(brep, provider, brep.coedge_edge(coedge)?)?;
                let forward = brep.coedge_forward(coedge)?;
                let param_curve = if policy.skip_coedge_2d_curve {
                    None
                } else {
                    brep.coedge_param_curve(coedge)?
                };
                coedges.push(SnapshotCoedge {
                    edge,
                    forward,
                    param_curve,
                });
            }
            loops.push(SnapshotLoop { coedges });
        }

        faces.push(SnapshotFace {
            surface,
            same_sense: brep.face_same_sense(face)?,
            loops,
            color: provider.and_then(|p| p.face_color(brep, face)),
            material: provider.and_then(|p| p.face_material(brep, face)),
        });
    }

    Ok(SnapshotShell { faces })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Curve2, Curve3, Plane, Segment2, Surface};
    use crate::math::{Point2, Point3, Vector3};
    use crate::transfer::source::NoAttributes;

    /// Minimal hand-rolled native B-Rep: one complex, one shell, each face
    /// one loop. Lets the tests stage shapes no real kernel would emit.
    struct MockBrep {
        edges: Vec<Curve3>,
        faces: Vec<MockFace>,
    }

    struct MockFace {
        surface: Option<Surface>,
        coedges: Vec<(usize, bool, Option<Curve2>)>,
    }

    impl NativeBrep for MockBrep {
        type ComplexRef = usize;
        type ShellRef = usize;
        type FaceRef = usize;
        type LoopRef = usize;
        type CoedgeRef = (usize, usize);
        type EdgeRef = usize;

        fn complexes(&self) -> Vec<usize> {
            vec![0]
        }

        fn shells(&self, _complex: usize) -> Vec<usize> {
            vec![0]
        }

        fn faces(&self, _shell: usize) -> Vec<usize> {
            (0..self.faces.len()).collect()
        }

        fn loops(&self, face: usize) -> Vec<usize> {
            vec![face]
        }

        fn coedges(&self, lp: usize) -> Vec<(usize, usize)> {
            (0..self.faces[lp].coedges.len()).map(|i| (lp, i)).collect()
        }

        fn face_surface(&self, face: usize) -> Result<Option<Surface>> {
            Ok(self.faces[face].surface.clone())
        }

        fn face_same_sense(&self, _face: usize) -> Result<bool> {
            Ok(true)
        }

        fn coedge_edge(&self, (face, i): (usize, usize)) -> Result<usize> {
            Ok(self.faces[face].coedges[i].0)
        }

        fn coedge_forward(&self, (face, i): (usize, usize)) -> Result<bool> {
            Ok(self.faces[face].coedges[i].1)
        }

        fn coedge_param_curve(&self, (face, i): (usize, usize)) -> Result<Option<Curve2>> {
            Ok(self.faces[face].coedges[i].2.clone())
        }

        fn edge_curve(&self, edge: usize) -> Result<Curve3> {
            Ok(self.edges[edge].clone())
        }
    }

    fn xy_plane() -> Surface {
        Surface::Plane(Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap())
    }

    fn circle_edge() -> Curve3 {
        Curve3::Circle(Circle::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap())
    }

    fn uv_segment() -> Curve2 {
        Curve2::Segment(Segment2::new(Point2::origin(), Point2::new(1.0, 0.0)).unwrap())
    }

    #[test]
    fn shared_edge_is_deduplicated() {
        // Two faces both bounded by the same circle edge, opposite senses
        let brep = MockBrep {
            edges: vec![circle_edge()],
            faces: vec![
                MockFace {
                    surface: Some(xy_plane()),
                    coedges: vec![(0, true, None)],
                },
                MockFace {
                    surface: Some(xy_plane()),
                    coedges: vec![(0, false, None)],
                },
            ],
        };

        let outcome = extract(&brep, None::<&NoAttributes>, &ExtractPolicy::default());
        assert!(outcome.is_complete());
        assert_eq!(outcome.snapshot.edges.len(), 1);
        assert_eq!(outcome.snapshot.coedge_count(), 2);
        assert_eq!(outcome.snapshot.coedge_edge_indices(), vec![0, 0]);
    }

    #[test]
    fn null_surface_fails_shell_by_default() {
        let brep = MockBrep {
            edges: vec![circle_edge()],
            faces: vec![
                MockFace {
                    surface: Some(xy_plane()),
                    coedges: vec![(0, true, None)],
                },
                MockFace {
                    surface: None,
                    coedges: vec![(0, false, None)],
                },
            ],
        };

        let outcome = extract(&brep, None::<&NoAttributes>, &ExtractPolicy::default());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].complex, 0);
        assert_eq!(outcome.failures[0].shell, 0);
        // The failed shell is gone, and its staged edges with it
        assert_eq!(outcome.snapshot.shell_count(), 0);
        assert!(outcome.snapshot.edges.is_empty());
        // The complex itself is still present so indices stay stable
        assert_eq!(outcome.snapshot.complex_count(), 1);
    }

    #[test]
    fn null_surface_policy_drops_only_the_face() {
        let brep = MockBrep {
            edges: vec![circle_edge()],
            faces: vec![
                MockFace {
                    surface: Some(xy_plane()),
                    coedges: vec![(0, true, None)],
                },
                MockFace {
                    surface: None,
                    coedges: vec![(0, false, None)],
                },
            ],
        };

        let policy = ExtractPolicy {
            skip_null_surface: true,
            ..ExtractPolicy::default()
        };
        let outcome = extract(&brep, None::<&NoAttributes>, &policy);
        assert!(outcome.is_complete());
        assert_eq!(outcome.snapshot.face_count(), 1);
        assert_eq!(outcome.snapshot.edges.len(), 1);
    }

    #[test]
    fn param_curves_captured_unless_skipped() {
        let brep = MockBrep {
            edges: vec![circle_edge()],
            faces: vec![MockFace {
                surface: Some(xy_plane()),
                coedges: vec![(0, true, Some(uv_segment()))],
            }],
        };

        let outcome = extract(&brep, None::<&NoAttributes>, &ExtractPolicy::default());
        let face = &outcome.snapshot.complexes[0].shells[0].faces[0];
        assert!(face.loops[0].coedges[0].param_curve.is_some());

        let policy = ExtractPolicy {
            skip_coedge_2d_curve: true,
            ..ExtractPolicy::default()
        };
        let outcome = extract(&brep, None::<&NoAttributes>, &policy);
        let face = &outcome.snapshot.complexes[0].shells[0].faces[0];
        assert!(face.loops[0].coedges[0].param_curve.is_none());
    }
}
