//! The crate's own native back-end: an arena-backed kernel that freezes
//! the assembled topology as its B-Rep.
//!
//! Besides serving as the default target for transfers, its B-Rep
//! implements the extraction traversal contract, so a solid built here can
//! be extracted and replayed into any other kernel (and round-tripped in
//! tests).

use std::collections::HashMap;

use tracing::debug;

use crate::attributes::{Color, FaceMaterial};
use crate::error::{KernelError, Result};
use crate::geometry::{Curve2, Curve2Kind, Curve3, CurveKind, Surface, SurfaceKind};
use crate::topology::{
    CoedgeId, ComplexId, EdgeId, FaceId, LoopId, ShellClassification, ShellId, TopologyStore,
};
use crate::transfer::{NativeBrep, VisualAttributeProvider};

use super::kernel::{BuildOptions, KernelBuild, ModelingKernel};

/// Tolerance for matching coedge endpoints when checking that a loop's
/// boundary chains end-to-start. Looser than the global comparison
/// tolerance: chained geometry accumulates rounding from upstream kernels.
const CHAIN_TOLERANCE: f64 = 1e-6;

/// An arena-backed modeling kernel.
///
/// Supports every carrier kind and every visual attribute by default;
/// both can be narrowed to model (or test against) kernels with a smaller
/// vocabulary.
#[derive(Debug, Clone)]
pub struct ArenaKernel {
    curves: Vec<CurveKind>,
    param_curves: Vec<Curve2Kind>,
    surfaces: Vec<SurfaceKind>,
    visual_attributes: bool,
}

impl Default for ArenaKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaKernel {
    /// Creates a kernel supporting all carrier kinds and attributes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            curves: vec![
                CurveKind::Segment,
                CurveKind::Arc,
                CurveKind::Circle,
                CurveKind::Ellipse,
                CurveKind::Nurbs,
            ],
            param_curves: vec![Curve2Kind::Segment, Curve2Kind::Arc, Curve2Kind::Nurbs],
            surfaces: vec![
                SurfaceKind::Plane,
                SurfaceKind::Cylinder,
                SurfaceKind::Cone,
                SurfaceKind::Sphere,
                SurfaceKind::Torus,
                SurfaceKind::Nurbs,
            ],
            visual_attributes: true,
        }
    }

    /// Creates a kernel restricted to the given carrier kinds.
    #[must_use]
    pub fn restricted(
        curves: Vec<CurveKind>,
        param_curves: Vec<Curve2Kind>,
        surfaces: Vec<SurfaceKind>,
    ) -> Self {
        Self {
            curves,
            param_curves,
            surfaces,
            visual_attributes: true,
        }
    }

    /// Drops support for per-entity colors and materials.
    #[must_use]
    pub fn without_visual_attributes(mut self) -> Self {
        self.visual_attributes = false;
        self
    }

    /// Checks that every loop of the face forms a connected, closed chain
    /// of coedge endpoints.
    fn face_is_valid(store: &TopologyStore, face: FaceId) -> Result<bool> {
        for &lid in &store.face(face)?.loops {
            let lp = store.edge_loop(lid)?;
            if lp.coedges.is_empty() {
                return Ok(false);
            }

            let mut points = Vec::with_capacity(lp.coedges.len());
            for &ceid in &lp.coedges {
                let coedge = store.coedge(ceid)?;
                let curve = &store.edge(coedge.edge)?.curve;
                let (start, end) = if coedge.forward {
                    (curve.start_point(), curve.end_point())
                } else {
                    (curve.end_point(), curve.start_point())
                };
                points.push((start, end));
            }
            for i in 0..points.len() {
                let end = points[i].1;
                let next_start = points[(i + 1) % points.len()].0;
                if (next_start - end).norm() > CHAIN_TOLERANCE {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Whether every edge of the shell is used exactly twice, once in
    /// each direction.
    fn shell_is_closed(store: &TopologyStore, shell: ShellId) -> Result<bool> {
        let mut usage: HashMap<EdgeId, (u32, u32)> = HashMap::new();
        for &fid in &store.shell(shell)?.faces {
            for &lid in &store.face(fid)?.loops {
                for &ceid in &store.edge_loop(lid)?.coedges {
                    let coedge = store.coedge(ceid)?;
                    let entry = usage.entry(coedge.edge).or_insert((0, 0));
                    if coedge.forward {
                        entry.0 += 1;
                    } else {
                        entry.1 += 1;
                    }
                }
            }
        }
        Ok(usage.values().all(|&(fwd, rev)| fwd == 1 && rev == 1))
    }
}

impl ModelingKernel for ArenaKernel {
    type Brep = ArenaBrep;

    fn supports_curve(&self, kind: CurveKind) -> bool {
        self.curves.contains(&kind)
    }

    fn supports_param_curve(&self, kind: Curve2Kind) -> bool {
        self.param_curves.contains(&kind)
    }

    fn supports_surface(&self, kind: SurfaceKind) -> bool {
        self.surfaces.contains(&kind)
    }

    fn supports_face_color(&self) -> bool {
        self.visual_attributes
    }

    fn supports_edge_color(&self) -> bool {
        self.visual_attributes
    }

    fn supports_material(&self) -> bool {
        self.visual_attributes
    }

    fn build(
        &mut self,
        store: &TopologyStore,
        complexes: &[ComplexId],
        requested: ShellClassification,
        options: &BuildOptions,
    ) -> Result<KernelBuild<Self::Brep>> {
        let mut store = store.clone();
        let mut removed_faces = Vec::new();

        for &cid in complexes {
            let shells = store.complex(cid)?.shells.clone();
            for sid in shells {
                let faces = store.shell(sid)?.faces.clone();
                let mut kept = Vec::with_capacity(faces.len());
                for fid in faces {
                    if Self::face_is_valid(&store, fid)? {
                        kept.push(fid);
                    } else if options.allow_face_removal {
                        debug!(?fid, "dropping face with disconnected boundary");
                        removed_faces.push(fid);
                    } else {
                        return Err(KernelError::InvalidFace(
                            "loop boundary does not form a closed chain".into(),
                        )
                        .into());
                    }
                }
                store.shell_mut(sid)?.faces = kept;
            }
        }

        let mut classification = requested;
        if requested.requires_closed_shells() {
            for &cid in complexes {
                for &sid in &store.complex(cid)?.shells {
                    if !Self::shell_is_closed(&store, sid)? {
                        classification = ShellClassification::OpenShell;
                    }
                }
            }
        }

        Ok(KernelBuild {
            brep: ArenaBrep {
                store,
                complexes: complexes.to_vec(),
                classification,
            },
            classification,
            removed_faces,
        })
    }
}

/// The frozen B-Rep produced by [`ArenaKernel`].
#[derive(Debug, Clone)]
pub struct ArenaBrep {
    store: TopologyStore,
    complexes: Vec<ComplexId>,
    classification: ShellClassification,
}

impl ArenaBrep {
    /// Returns the classification achieved by the build.
    #[must_use]
    pub fn classification(&self) -> ShellClassification {
        self.classification
    }

    /// Read access to the frozen topology.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }
}

impl NativeBrep for ArenaBrep {
    type ComplexRef = ComplexId;
    type ShellRef = ShellId;
    type FaceRef = FaceId;
    type LoopRef = LoopId;
    type CoedgeRef = CoedgeId;
    type EdgeRef = EdgeId;

    fn complexes(&self) -> Vec<ComplexId> {
        self.complexes.clone()
    }

    fn shells(&self, complex: ComplexId) -> Vec<ShellId> {
        self.store
            .complex(complex)
            .map(|c| c.shells.clone())
            .unwrap_or_default()
    }

    fn faces(&self, shell: ShellId) -> Vec<FaceId> {
        self.store
            .shell(shell)
            .map(|s| s.faces.clone())
            .unwrap_or_default()
    }

    fn loops(&self, face: FaceId) -> Vec<LoopId> {
        self.store
            .face(face)
            .map(|f| f.loops.clone())
            .unwrap_or_default()
    }

    fn coedges(&self, lp: LoopId) -> Vec<CoedgeId> {
        self.store
            .edge_loop(lp)
            .map(|l| l.coedges.clone())
            .unwrap_or_default()
    }

    fn face_surface(&self, face: FaceId) -> Result<Option<Surface>> {
        Ok(Some(self.store.face(face)?.surface.clone()))
    }

    fn face_same_sense(&self, face: FaceId) -> Result<bool> {
        Ok(self.store.face(face)?.same_sense)
    }

    fn coedge_edge(&self, coedge: CoedgeId) -> Result<EdgeId> {
        Ok(self.store.coedge(coedge)?.edge)
    }

    fn coedge_forward(&self, coedge: CoedgeId) -> Result<bool> {
        Ok(self.store.coedge(coedge)?.forward)
    }

    fn coedge_param_curve(&self, coedge: CoedgeId) -> Result<Option<Curve2>> {
        Ok(self.store.coedge(coedge)?.param_curve.clone())
    }

    fn edge_curve(&self, edge: EdgeId) -> Result<Curve3> {
        Ok(self.store.edge(edge)?.curve.clone())
    }
}

/// Attribute provider over an [`ArenaBrep`], serving the colors and
/// materials recorded during its build.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArenaAttributes;

impl VisualAttributeProvider<ArenaBrep> for ArenaAttributes {
    fn face_color(&self, brep: &ArenaBrep, face: FaceId) -> Option<Color> {
        brep.store.face(face).ok().and_then(|f| f.color)
    }

    fn face_material(&self, brep: &ArenaBrep, face: FaceId) -> Option<FaceMaterial> {
        let data = brep.store.face(face).ok()?;
        data.material.map(|id| FaceMaterial {
            id,
            mapping: data.material_mapping,
        })
    }

    fn edge_color(&self, brep: &ArenaBrep, edge: EdgeId) -> Option<Color> {
        brep.store.edge(edge).ok().and_then(|e| e.color)
    }
}
