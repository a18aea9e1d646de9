use tracing::debug;

use crate::builder::{ModelingKernel, TopologyBuilder};
use crate::error::{BuildError, RejectError, Result, SolidportError};
use crate::geometry::{Curve2, Curve3, Surface};
use crate::snapshot::{SnapshotFace, SnapshotLoop, TopologySnapshot};
use crate::topology::EdgeId;

/// An edge of the snapshot either got a builder handle or was rejected;
/// the rejection is kept so loops over it can report why they were skipped.
type EdgeSlot = std::result::Result<EdgeId, RejectError>;

/// What a replay produced, besides the topology now held by the builder.
///
/// The three geometry arrays are the curve and surface objects handed to
/// the builder, in creation order. **Keep them alive at least as long as
/// the builder and the result of its `finish()` are in use**: native
/// backends are free to keep non-owning references into caller-supplied
/// geometry rather than copying it, so dropping these early is a
/// use-after-free on such backends. This is part of the contract, not an
/// implementation detail.
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    /// 3-D curves created for edges, in snapshot edge order (rejected
    /// edges leave no entry).
    pub edge_curves: Vec<Curve3>,
    /// Parameter-space curves created for coedges, in creation order.
    pub coedge_curves: Vec<Curve2>,
    /// Surfaces created for faces, in creation order.
    pub surfaces: Vec<Surface>,
    /// Edges the target kernel rejected (unsupported kind or too short).
    pub skipped_edges: usize,
    /// Faces skipped because the target kernel rejected their surface or
    /// no boundary loop of theirs was usable.
    pub skipped_faces: usize,
    /// Loops skipped on otherwise-usable faces.
    pub skipped_loops: usize,
}

impl ReplayOutcome {
    /// Returns whether every entity of the snapshot was replayed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_edges == 0 && self.skipped_faces == 0 && self.skipped_loops == 0
    }
}

/// Reconstructs a snapshot into a builder, in one deterministic pass.
///
/// Edges are created first, in snapshot array order, because coedges
/// reference them by index. Every other entity is created strictly
/// parent-before-child and finished innermost-first. Per-entity
/// rejections by the target kernel (unsupported surface or curve kind,
/// short edge) skip the affected face or loop and continue with its
/// siblings; only caller errors abort the replay.
///
/// `finish()` is *not* called: the caller decides leniency and validation
/// options before completing the build.
///
/// # Errors
///
/// Returns an error if the snapshot is malformed (out-of-range edge
/// index, face without loops) or the builder reports a non-recoverable
/// failure.
pub fn replay<K: ModelingKernel>(
    builder: &mut TopologyBuilder<K>,
    snapshot: &TopologySnapshot,
) -> Result<ReplayOutcome> {
    let mut outcome = ReplayOutcome::default();

    // Edges first: everything below references them by array index.
    let mut edge_slots: Vec<EdgeSlot> = Vec::with_capacity(snapshot.edges.len());
    for snapshot_edge in &snapshot.edges {
        match builder.add_edge(snapshot_edge.curve.clone()) {
            Ok(id) => {
                if let Some(color) = snapshot_edge.color {
                    builder.set_edge_color(id, color)?;
                }
                outcome.edge_curves.push(snapshot_edge.curve.clone());
                edge_slots.push(Ok(id));
            }
            Err(SolidportError::Reject(reject)) => {
                debug!(%reject, "edge rejected by target kernel");
                outcome.skipped_edges += 1;
                edge_slots.push(Err(reject));
            }
            Err(e) => return Err(e),
        }
    }

    for complex in &snapshot.complexes {
        let complex_id = builder.add_complex()?;
        for shell in &complex.shells {
            let shell_id = builder.add_shell(complex_id)?;
            for face in &shell.faces {
                match replay_face(builder, face, &edge_slots, &mut outcome) {
                    Ok(()) => {}
                    Err(SolidportError::Reject(reject)) => {
                        debug!(%reject, "face skipped during replay");
                        outcome.skipped_faces += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
            builder.finish_shell(shell_id)?;
        }
        builder.finish_complex(complex_id)?;
    }

    debug!(
        edges = outcome.edge_curves.len(),
        surfaces = outcome.surfaces.len(),
        skipped_edges = outcome.skipped_edges,
        skipped_faces = outcome.skipped_faces,
        skipped_loops = outcome.skipped_loops,
        "replay finished"
    );
    Ok(outcome)
}

/// Replays one face into the builder's current default shell.
///
/// Loops are checked *before* anything is created, so a rejected coedge
/// never leaves a half-built loop behind: either the loop is replayed
/// whole, or it is skipped whole.
fn replay_face<K: ModelingKernel>(
    builder: &mut TopologyBuilder<K>,
    face: &SnapshotFace,
    edge_slots: &[EdgeSlot],
    outcome: &mut ReplayOutcome,
) -> Result<()> {
    if !builder.supports_surface(face.surface.kind()) {
        return Err(RejectError::UnsupportedSurface(face.surface.kind()).into());
    }
    if face.loops.is_empty() {
        return Err(BuildError::FaceWithoutLoops.into());
    }

    let mut viable: Vec<&SnapshotLoop> = Vec::with_capacity(face.loops.len());
    let mut first_reject: Option<RejectError> = None;
    for lp in &face.loops {
        match check_loop(builder, lp, edge_slots) {
            Ok(()) => viable.push(lp),
            Err(SolidportError::Reject(reject)) => {
                if first_reject.is_none() {
                    first_reject = Some(reject);
                }
            }
            Err(e) => return Err(e),
        }
    }

    // A face without a single usable boundary is skipped as a whole.
    if viable.is_empty() {
        if let Some(reject) = first_reject {
            return Err(reject.into());
        }
        return Err(BuildError::FaceWithoutLoops.into());
    }
    outcome.skipped_loops += face.loops.len() - viable.len();

    let face_id = builder.add_face(face.surface.clone(), face.same_sense, None)?;
    outcome.surfaces.push(face.surface.clone());

    if let Some(color) = face.color {
        builder.set_face_color(face_id, color)?;
    }
    if let Some(material) = &face.material {
        builder.set_face_material(face_id, material.id)?;
        if let Some(mapping) = material.mapping {
            builder.set_face_material_mapping(face_id, mapping)?;
        }
    }

    for lp in viable {
        let loop_id = builder.add_loop(face_id)?;
        for coedge in &lp.coedges {
            let edge_id = match edge_slots.get(coedge.edge) {
                Some(Ok(id)) => *id,
                _ => return Err(BuildError::UnknownHandle { category: "edge" }.into()),
            };
            builder.add_coedge(loop_id, edge_id, coedge.forward, coedge.param_curve.clone())?;
            if let Some(pc) = &coedge.param_curve {
                outcome.coedge_curves.push(pc.clone());
            }
        }
        builder.finish_loop(loop_id)?;
    }
    builder.finish_face(face_id)?;
    Ok(())
}

/// Decides whether a loop can be replayed at all against this builder.
fn check_loop<K: ModelingKernel>(
    builder: &TopologyBuilder<K>,
    lp: &SnapshotLoop,
    edge_slots: &[EdgeSlot],
) -> Result<()> {
    if lp.coedges.is_empty() {
        return Err(BuildError::EmptyLoop.into());
    }
    for coedge in &lp.coedges {
        match edge_slots.get(coedge.edge) {
            None => return Err(BuildError::UnknownHandle { category: "edge" }.into()),
            Some(Err(reject)) => return Err(reject.clone().into()),
            Some(Ok(_)) => {}
        }
        if let Some(pc) = &coedge.param_curve {
            if !builder.supports_param_curve(pc.kind()) {
                return Err(RejectError::UnsupportedParamCurve(pc.kind()).into());
            }
        }
    }
    Ok(())
}
