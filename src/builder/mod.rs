pub mod arena;
pub mod kernel;

pub use arena::{ArenaAttributes, ArenaBrep, ArenaKernel};
pub use kernel::{BuildOptions, KernelBuild, ModelingKernel};

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::attributes::{AttributeStatus, Color, MaterialId};
use crate::error::{BuildError, RejectError, Result};
use crate::geometry::{Curve2, Curve2Kind, Curve3, CurveKind, Surface, SurfaceKind};
use crate::math::{Matrix4, MIN_EDGE_LENGTH};
use crate::topology::{
    CoedgeData, CoedgeId, ComplexData, ComplexId, EdgeData, EdgeId, FaceData, FaceId, LoopData,
    LoopId, ShellClassification, ShellData, ShellId, TopologyStore,
};

/// Lifecycle of a builder instance.
///
/// There is no transition out of either finished state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    Accepting,
    FinishedAvailable,
    FinishedFailed,
}

/// The finished product of a build.
#[derive(Debug)]
pub struct BuildResult<B> {
    /// The native solid produced by the kernel.
    pub brep: B,
    /// Whether the result is an open shell, a solid, or a void.
    pub classification: ShellClassification,
}

/// Append-only, checked protocol for assembling B-Rep topology.
///
/// The builder validates handles and completion ordering, records the
/// assembly in its own arena, and defers geometric interpretation to the
/// kernel backend `K` at [`TopologyBuilder::finish`]. One builder produces
/// one result; afterwards the instance accepts no further geometry.
///
/// A builder is single-threaded by design: it owns mutable open-entity
/// state with no internal locking. Independent builders are fully isolated
/// and may run on separate threads.
pub struct TopologyBuilder<K: ModelingKernel> {
    kernel: K,
    requested: ShellClassification,
    store: TopologyStore,
    complexes: Vec<ComplexId>,
    current_shell: Option<ShellId>,
    min_edge_length: f64,
    allow_short_edges: bool,
    allow_face_removal: bool,
    validator_enabled: bool,
    removed_some_faces: bool,
    state: BuilderState,
    result: Option<BuildResult<K::Brep>>,
}

impl<K: ModelingKernel> TopologyBuilder<K> {
    /// Creates a builder backed by `kernel`, requesting the given
    /// classification for the result.
    pub fn new(kernel: K, requested: ShellClassification) -> Self {
        Self {
            kernel,
            requested,
            store: TopologyStore::new(),
            complexes: Vec::new(),
            current_shell: None,
            min_edge_length: MIN_EDGE_LENGTH,
            allow_short_edges: false,
            allow_face_removal: false,
            validator_enabled: true,
            removed_some_faces: false,
            state: BuilderState::Accepting,
            result: None,
        }
    }

    // --- Assembly operations ---

    /// Adds a new top-level complex.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry.
    pub fn add_complex(&mut self) -> Result<ComplexId> {
        self.ensure_accepting()?;
        let id = self.store.add_complex(ComplexData::new());
        self.complexes.push(id);
        Ok(id)
    }

    /// Adds a shell to an open complex. The new shell becomes the default
    /// shell for subsequent [`TopologyBuilder::add_face`] calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry, the
    /// complex handle is unknown, or the complex has been finished.
    pub fn add_shell(&mut self, complex: ComplexId) -> Result<ShellId> {
        self.ensure_accepting()?;
        let data = self.store.complex(complex)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "complex" }.into());
        }
        let id = self.store.add_shell(ShellData::new());
        self.store.complex_mut(complex)?.shells.push(id);
        self.current_shell = Some(id);
        Ok(id)
    }

    /// Adds a face over `surface` to a shell, or to the default shell
    /// (the most recently added open shell) when `shell` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a recoverable rejection if the kernel does not support the
    /// surface's kind; callers are expected to fall back to a non-B-Rep
    /// representation in that case. Returns a hard error if the builder no
    /// longer accepts geometry, the shell handle is unknown, there is no
    /// open default shell, or the shell has been finished.
    pub fn add_face(
        &mut self,
        surface: Surface,
        same_sense: bool,
        shell: Option<ShellId>,
    ) -> Result<FaceId> {
        self.ensure_accepting()?;
        let shell = match shell {
            Some(id) => id,
            None => self.current_shell.ok_or(BuildError::NoOpenShell)?,
        };
        let data = self.store.shell(shell)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "shell" }.into());
        }
        if !self.kernel.supports_surface(surface.kind()) {
            return Err(RejectError::UnsupportedSurface(surface.kind()).into());
        }
        let id = self.store.add_face(FaceData::new(surface, same_sense));
        self.store.shell_mut(shell)?.faces.push(id);
        Ok(id)
    }

    /// Adds a loop to an open face. The first loop of a face is its outer
    /// boundary; further loops are holes.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry, the
    /// face handle is unknown, or the face has been finished.
    pub fn add_loop(&mut self, face: FaceId) -> Result<LoopId> {
        self.ensure_accepting()?;
        let data = self.store.face(face)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "face" }.into());
        }
        let id = self.store.add_loop(LoopData::new());
        self.store.face_mut(face)?.loops.push(id);
        Ok(id)
    }

    /// Adds a coedge over `edge` to an open loop.
    ///
    /// # Errors
    ///
    /// Returns a recoverable rejection if the kernel does not support the
    /// parameter curve's kind. Returns a hard error if the builder no
    /// longer accepts geometry, the loop or edge handle is unknown, or the
    /// loop has been finished.
    pub fn add_coedge(
        &mut self,
        lp: LoopId,
        edge: EdgeId,
        forward: bool,
        param_curve: Option<Curve2>,
    ) -> Result<CoedgeId> {
        self.ensure_accepting()?;
        let data = self.store.edge_loop(lp)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "loop" }.into());
        }
        self.store.edge(edge)?;
        if let Some(pc) = &param_curve {
            if !self.kernel.supports_param_curve(pc.kind()) {
                return Err(RejectError::UnsupportedParamCurve(pc.kind()).into());
            }
        }
        let id = self.store.add_coedge(CoedgeData::new(edge, forward, param_curve));
        self.store.edge_loop_mut(lp)?.coedges.push(id);
        Ok(id)
    }

    /// Adds an edge over a 3-D curve.
    ///
    /// # Errors
    ///
    /// Returns a recoverable rejection if the kernel does not support the
    /// curve's kind, or if the curve is certainly shorter than the minimum
    /// edge length and short edges have not been allowed. Returns a hard
    /// error if the builder no longer accepts geometry.
    pub fn add_edge(&mut self, curve: Curve3) -> Result<EdgeId> {
        self.ensure_accepting()?;
        if !self.kernel.supports_curve(curve.kind()) {
            return Err(RejectError::UnsupportedCurve(curve.kind()).into());
        }
        let bound = curve.length_upper_bound();
        if !self.allow_short_edges && bound < self.min_edge_length {
            return Err(RejectError::ShortEdge { length_bound: bound }.into());
        }
        Ok(self.store.add_edge(EdgeData::new(curve)))
    }

    // --- Completion operations ---

    /// Marks a loop complete. Must be called exactly once per loop, before
    /// its owning face is finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is unknown, already finished, or
    /// still empty.
    pub fn finish_loop(&mut self, lp: LoopId) -> Result<()> {
        self.ensure_accepting()?;
        let data = self.store.edge_loop(lp)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "loop" }.into());
        }
        if data.coedges.is_empty() {
            return Err(BuildError::EmptyLoop.into());
        }
        self.store.edge_loop_mut(lp)?.complete = true;
        Ok(())
    }

    /// Marks a face complete. All of its loops must be complete first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is unknown, already finished, has no
    /// loops, or still has an open loop.
    pub fn finish_face(&mut self, face: FaceId) -> Result<()> {
        self.ensure_accepting()?;
        let data = self.store.face(face)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "face" }.into());
        }
        if data.loops.is_empty() {
            return Err(BuildError::FaceWithoutLoops.into());
        }
        for &lp in &data.loops {
            if !self.store.edge_loop(lp)?.complete {
                return Err(BuildError::OpenChild {
                    category: "face",
                    child: "loop",
                }
                .into());
            }
        }
        self.store.face_mut(face)?.complete = true;
        Ok(())
    }

    /// Marks a shell complete. All of its faces must be complete first.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell is unknown, already finished, or
    /// still has an open face.
    pub fn finish_shell(&mut self, shell: ShellId) -> Result<()> {
        self.ensure_accepting()?;
        let data = self.store.shell(shell)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "shell" }.into());
        }
        for &face in &data.faces {
            if !self.store.face(face)?.complete {
                return Err(BuildError::OpenChild {
                    category: "shell",
                    child: "face",
                }
                .into());
            }
        }
        self.store.shell_mut(shell)?.complete = true;
        if self.current_shell == Some(shell) {
            self.current_shell = None;
        }
        Ok(())
    }

    /// Marks a complex complete. All of its shells must be complete first.
    ///
    /// # Errors
    ///
    /// Returns an error if the complex is unknown, already finished, or
    /// still has an open shell.
    pub fn finish_complex(&mut self, complex: ComplexId) -> Result<()> {
        self.ensure_accepting()?;
        let data = self.store.complex(complex)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "complex" }.into());
        }
        for &shell in &data.shells {
            if !self.store.shell(shell)?.complete {
                return Err(BuildError::OpenChild {
                    category: "complex",
                    child: "shell",
                }
                .into());
            }
        }
        self.store.complex_mut(complex)?.complete = true;
        Ok(())
    }

    // --- Attribute operations ---

    /// Records a color override on an open face.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry, the
    /// face is unknown, or the face has been finished.
    pub fn set_face_color(&mut self, face: FaceId, color: Color) -> Result<AttributeStatus> {
        self.ensure_accepting()?;
        let data = self.store.face(face)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "face" }.into());
        }
        if !self.kernel.supports_face_color() {
            return Ok(AttributeStatus::NotApplicable);
        }
        self.store.face_mut(face)?.color = Some(color);
        Ok(AttributeStatus::Applied)
    }

    /// Records a color override on an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry or the
    /// edge is unknown.
    pub fn set_edge_color(&mut self, edge: EdgeId, color: Color) -> Result<AttributeStatus> {
        self.ensure_accepting()?;
        self.store.edge(edge)?;
        if !self.kernel.supports_edge_color() {
            return Ok(AttributeStatus::NotApplicable);
        }
        self.store.edge_mut(edge)?.color = Some(color);
        Ok(AttributeStatus::Applied)
    }

    /// Records a material reference on an open face.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry, the
    /// face is unknown, or the face has been finished.
    pub fn set_face_material(
        &mut self,
        face: FaceId,
        material: MaterialId,
    ) -> Result<AttributeStatus> {
        self.ensure_accepting()?;
        let data = self.store.face(face)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "face" }.into());
        }
        if !self.kernel.supports_material() {
            return Ok(AttributeStatus::NotApplicable);
        }
        self.store.face_mut(face)?.material = Some(material);
        Ok(AttributeStatus::Applied)
    }

    /// Records a material-mapping transform on an open face.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder no longer accepts geometry, the
    /// face is unknown, or the face has been finished.
    pub fn set_face_material_mapping(
        &mut self,
        face: FaceId,
        mapping: Matrix4,
    ) -> Result<AttributeStatus> {
        self.ensure_accepting()?;
        let data = self.store.face(face)?;
        if data.complete {
            return Err(BuildError::EntityComplete { category: "face" }.into());
        }
        if !self.kernel.supports_material() {
            return Ok(AttributeStatus::NotApplicable);
        }
        self.store.face_mut(face)?.material_mapping = Some(mapping);
        Ok(AttributeStatus::Applied)
    }

    // --- Policy toggles ---

    /// Permits the kernel to silently drop faces whose geometry fails its
    /// internal validation, instead of failing the whole build. If any
    /// face is dropped the result is downgraded to an open shell and
    /// [`TopologyBuilder::removed_some_faces`] reports `true`.
    pub fn allow_removal_of_problematic_faces(&mut self) {
        self.allow_face_removal = true;
    }

    /// Relaxes the minimum-edge-length rejection for this builder.
    pub fn set_allow_short_edges(&mut self) {
        self.allow_short_edges = true;
    }

    /// Overrides the minimum edge length for this builder.
    pub fn set_min_edge_length(&mut self, length: f64) {
        self.min_edge_length = length;
    }

    /// Toggles full topological validation at finish time. Enabled by
    /// default; disabling trades safety for speed.
    pub fn enable_validator(&mut self, enabled: bool) {
        self.validator_enabled = enabled;
    }

    // --- State queries ---

    /// Returns whether the builder still accepts geometry.
    #[must_use]
    pub fn can_add_geometry(&self) -> bool {
        self.state == BuilderState::Accepting
    }

    /// Returns whether a finished result is waiting to be retrieved.
    #[must_use]
    pub fn is_result_available(&self) -> bool {
        self.state == BuilderState::FinishedAvailable && self.result.is_some()
    }

    /// Returns whether the kernel dropped any face during the build.
    #[must_use]
    pub fn removed_some_faces(&self) -> bool {
        self.removed_some_faces
    }

    /// Returns whether the handle refers to an edge of this builder.
    #[must_use]
    pub fn is_valid_edge_id(&self, id: EdgeId) -> bool {
        self.store.contains_edge(id)
    }

    /// Returns whether the handle refers to a loop of this builder.
    #[must_use]
    pub fn is_valid_loop_id(&self, id: LoopId) -> bool {
        self.store.contains_loop(id)
    }

    /// Returns whether the handle refers to a face of this builder.
    #[must_use]
    pub fn is_valid_face_id(&self, id: FaceId) -> bool {
        self.store.contains_face(id)
    }

    /// Returns whether the handle refers to a shell of this builder.
    #[must_use]
    pub fn is_valid_shell_id(&self, id: ShellId) -> bool {
        self.store.contains_shell(id)
    }

    /// Returns whether the handle refers to a complex of this builder.
    #[must_use]
    pub fn is_valid_complex_id(&self, id: ComplexId) -> bool {
        self.store.contains_complex(id)
    }

    /// Whether the backing kernel accepts edges over this curve kind.
    #[must_use]
    pub fn supports_curve(&self, kind: CurveKind) -> bool {
        self.kernel.supports_curve(kind)
    }

    /// Whether the backing kernel accepts this parameter-space curve kind.
    #[must_use]
    pub fn supports_param_curve(&self, kind: Curve2Kind) -> bool {
        self.kernel.supports_param_curve(kind)
    }

    /// Whether the backing kernel accepts faces over this surface kind.
    #[must_use]
    pub fn supports_surface(&self, kind: SurfaceKind) -> bool {
        self.kernel.supports_surface(kind)
    }

    // --- Finish ---

    /// Completes the build, handing the assembly to the kernel.
    ///
    /// On success the result becomes retrievable exactly once via
    /// [`TopologyBuilder::get_result`]; either way the builder accepts no
    /// further geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder was already finished, if validation
    /// fails, or if the kernel cannot realize the assembly.
    pub fn finish(&mut self) -> Result<()> {
        if self.state != BuilderState::Accepting {
            return Err(BuildError::NotAccepting.into());
        }
        match self.run_finish() {
            Ok(()) => {
                self.state = BuilderState::FinishedAvailable;
                Ok(())
            }
            Err(e) => {
                self.state = BuilderState::FinishedFailed;
                Err(e)
            }
        }
    }

    /// Retrieves the finished result. May be called exactly once, after a
    /// successful [`TopologyBuilder::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if no result is available or it was already taken.
    pub fn get_result(&mut self) -> Result<BuildResult<K::Brep>> {
        if self.state != BuilderState::FinishedAvailable {
            return Err(BuildError::ResultNotAvailable.into());
        }
        self.result
            .take()
            .ok_or_else(|| BuildError::ResultAlreadyTaken.into())
    }

    fn ensure_accepting(&self) -> Result<()> {
        if self.state == BuilderState::Accepting {
            Ok(())
        } else {
            Err(BuildError::NotAccepting.into())
        }
    }

    fn run_finish(&mut self) -> Result<()> {
        if self.validator_enabled {
            self.validate()?;
        }
        let options = BuildOptions {
            allow_face_removal: self.allow_face_removal,
        };
        let built = self
            .kernel
            .build(&self.store, &self.complexes, self.requested, &options)?;

        let mut classification = built.classification;
        if !built.removed_faces.is_empty() {
            self.removed_some_faces = true;
            classification = ShellClassification::OpenShell;
            warn!(
                removed = built.removed_faces.len(),
                "kernel removed problematic faces; result downgraded to open shell"
            );
        }
        debug!(
            complexes = self.complexes.len(),
            ?classification,
            "build finished"
        );
        self.result = Some(BuildResult {
            brep: built.brep,
            classification,
        });
        Ok(())
    }

    /// Full topological validation of the assembly.
    fn validate(&self) -> Result<()> {
        for &cid in &self.complexes {
            let complex = self.store.complex(cid)?;
            if !complex.complete {
                return Err(BuildError::Validation("complex left open".into()).into());
            }
            for &sid in &complex.shells {
                let shell = self.store.shell(sid)?;
                if !shell.complete {
                    return Err(BuildError::Validation("shell left open".into()).into());
                }
                self.validate_shell(sid)?;
            }
        }
        Ok(())
    }

    fn validate_shell(&self, sid: ShellId) -> Result<()> {
        // (forward uses, reversed uses) per edge across the whole shell
        let mut usage: HashMap<EdgeId, (u32, u32)> = HashMap::new();

        let shell = self.store.shell(sid)?;
        for &fid in &shell.faces {
            let face = self.store.face(fid)?;
            if !face.complete {
                return Err(BuildError::Validation("face left open".into()).into());
            }
            for &lid in &face.loops {
                let lp = self.store.edge_loop(lid)?;
                if !lp.complete {
                    return Err(BuildError::Validation("loop left open".into()).into());
                }
                if lp.coedges.is_empty() {
                    return Err(BuildError::Validation("loop has no coedges".into()).into());
                }
                for &ceid in &lp.coedges {
                    let coedge = self.store.coedge(ceid)?;
                    self.store.edge(coedge.edge)?;
                    let entry = usage.entry(coedge.edge).or_insert((0, 0));
                    if coedge.forward {
                        entry.0 += 1;
                    } else {
                        entry.1 += 1;
                    }
                }
            }
        }

        if self.requested.requires_closed_shells() {
            for (fwd, rev) in usage.values() {
                if *fwd != 1 || *rev != 1 {
                    return Err(BuildError::Validation(
                        "shell is not closed: every edge must be used exactly twice, \
                         once in each direction"
                            .into(),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Plane, Segment, Sphere};
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

    // Per face: four (edge index, forward) pairs chaining end-to-start,
    // plus the plane frame (origin vertex, u_dir, v_dir) with outward normal.
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

    fn solid_builder() -> TopologyBuilder<ArenaKernel> {
        TopologyBuilder::new(ArenaKernel::new(), ShellClassification::Solid)
    }

    /// Assembles a unit cube; returns nothing, panics on any rejection.
    fn build_cube(builder: &mut TopologyBuilder<ArenaKernel>) {
        let complex = builder.add_complex().unwrap();
        let shell = builder.add_shell(complex).unwrap();

        let edges: Vec<EdgeId> = CUBE_EDGES
            .iter()
            .map(|&(s, e)| {
                builder
                    .add_edge(Curve3::Segment(Segment::new(vert(s), vert(e)).unwrap()))
                    .unwrap()
            })
            .collect();

        for &(coedges, origin, u, v) in &CUBE_FACES {
            let plane = Plane::new(
                vert(origin),
                Vector3::new(u[0], u[1], u[2]),
                Vector3::new(v[0], v[1], v[2]),
            )
            .unwrap();
            let face = builder
                .add_face(Surface::Plane(plane), true, Some(shell))
                .unwrap();
            let lp = builder.add_loop(face).unwrap();
            for &(ei, forward) in &coedges {
                builder.add_coedge(lp, edges[ei], forward, None).unwrap();
            }
            builder.finish_loop(lp).unwrap();
            builder.finish_face(face).unwrap();
        }

        builder.finish_shell(shell).unwrap();
        builder.finish_complex(complex).unwrap();
    }

    #[test]
    fn cube_builds_as_solid() {
        let mut builder = solid_builder();
        build_cube(&mut builder);
        builder.finish().unwrap();
        assert!(builder.is_result_available());
        assert!(!builder.can_add_geometry());
        assert!(!builder.removed_some_faces());

        let result = builder.get_result().unwrap();
        assert_eq!(result.classification, ShellClassification::Solid);
    }

    #[test]
    fn result_can_be_taken_only_once() {
        let mut builder = solid_builder();
        build_cube(&mut builder);
        builder.finish().unwrap();
        builder.get_result().unwrap();
        assert!(matches!(
            builder.get_result(),
            Err(crate::SolidportError::Build(BuildError::ResultAlreadyTaken))
        ));
    }

    #[test]
    fn result_before_finish_is_a_hard_error() {
        let mut builder = solid_builder();
        assert!(matches!(
            builder.get_result(),
            Err(crate::SolidportError::Build(BuildError::ResultNotAvailable))
        ));
    }

    #[test]
    fn no_geometry_after_finish() {
        let mut builder = solid_builder();
        build_cube(&mut builder);
        builder.finish().unwrap();
        assert!(builder.add_complex().is_err());
        assert!(builder.finish().is_err());
    }

    #[test]
    fn handles_are_unique_within_category() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        let shell = builder.add_shell(complex).unwrap();

        let mut edge_ids = Vec::new();
        for &(s, e) in &CUBE_EDGES {
            edge_ids.push(
                builder
                    .add_edge(Curve3::Segment(Segment::new(vert(s), vert(e)).unwrap()))
                    .unwrap(),
            );
        }
        for i in 0..edge_ids.len() {
            for j in (i + 1)..edge_ids.len() {
                assert_ne!(edge_ids[i], edge_ids[j]);
            }
        }

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let f1 = builder
            .add_face(Surface::Plane(plane.clone()), true, Some(shell))
            .unwrap();
        let f2 = builder
            .add_face(Surface::Plane(plane), true, Some(shell))
            .unwrap();
        assert_ne!(f1, f2);
    }

    #[test]
    fn finish_face_with_open_loop_fails() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        let edge = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ))
            .unwrap();
        builder.add_coedge(lp, edge, true, None).unwrap();

        // Loop is still open
        assert!(builder.finish_face(face).is_err());
        builder.finish_loop(lp).unwrap();
        assert!(builder.finish_face(face).is_ok());
    }

    #[test]
    fn add_loop_to_finished_face_fails() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        let edge = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ))
            .unwrap();
        builder.add_coedge(lp, edge, true, None).unwrap();
        builder.finish_loop(lp).unwrap();
        builder.finish_face(face).unwrap();

        assert!(matches!(
            builder.add_loop(face),
            Err(crate::SolidportError::Build(BuildError::EntityComplete { .. }))
        ));
    }

    #[test]
    fn empty_loop_cannot_be_finished() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        assert!(matches!(
            builder.finish_loop(lp),
            Err(crate::SolidportError::Build(BuildError::EmptyLoop))
        ));
    }

    #[test]
    fn short_edge_rejected_until_allowed() {
        let mut builder = solid_builder();
        let tiny = Curve3::Segment(
            Segment::new(Point3::origin(), Point3::new(1e-8, 0.0, 0.0)).unwrap(),
        );

        let err = builder.add_edge(tiny.clone()).unwrap_err();
        assert!(err.is_recoverable());

        builder.set_allow_short_edges();
        assert!(builder.add_edge(tiny).is_ok());
    }

    #[test]
    fn unsupported_surface_is_recoverable() {
        let kernel = ArenaKernel::restricted(
            vec![CurveKind::Segment],
            vec![Curve2Kind::Segment],
            vec![SurfaceKind::Plane],
        );
        let mut builder = TopologyBuilder::new(kernel, ShellClassification::Solid);
        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();

        let sphere = Sphere::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let err = builder
            .add_face(Surface::Sphere(sphere), true, None)
            .unwrap_err();
        assert!(err.is_recoverable());
        // The builder is still usable for supported surfaces
        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        assert!(builder.add_face(Surface::Plane(plane), true, None).is_ok());
    }

    #[test]
    fn default_shell_is_last_open_shell() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        let shell = builder.add_shell(complex).unwrap();

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder
            .add_face(Surface::Plane(plane.clone()), true, None)
            .unwrap();
        assert!(builder.is_valid_face_id(face));

        // Once the default shell is finished there is no fallback target
        let lp = builder.add_loop(face).unwrap();
        let edge = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ))
            .unwrap();
        builder.add_coedge(lp, edge, true, None).unwrap();
        builder.finish_loop(lp).unwrap();
        builder.finish_face(face).unwrap();
        builder.finish_shell(shell).unwrap();

        assert!(matches!(
            builder.add_face(Surface::Plane(plane), true, None),
            Err(crate::SolidportError::Build(BuildError::NoOpenShell))
        ));
    }

    #[test]
    fn unknown_handles_are_hard_errors() {
        let mut builder = solid_builder();
        let mut other = solid_builder();
        let foreign_complex = other.add_complex().unwrap();

        let err = builder.add_shell(foreign_complex).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(!builder.is_valid_complex_id(foreign_complex));
    }

    #[test]
    fn open_solid_fails_validation() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        let shell = builder.add_shell(complex).unwrap();

        // A single square face is not a closed solid boundary
        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        for i in 0..4 {
            let edge = builder
                .add_edge(Curve3::Segment(
                    Segment::new(corners[i], corners[(i + 1) % 4]).unwrap(),
                ))
                .unwrap();
            builder.add_coedge(lp, edge, true, None).unwrap();
        }
        builder.finish_loop(lp).unwrap();
        builder.finish_face(face).unwrap();
        builder.finish_shell(shell).unwrap();
        builder.finish_complex(complex).unwrap();

        assert!(builder.finish().is_err());
        assert!(!builder.is_result_available());
        assert!(!builder.can_add_geometry());
    }

    #[test]
    fn open_shell_request_accepts_single_face() {
        let mut builder =
            TopologyBuilder::new(ArenaKernel::new(), ShellClassification::OpenShell);
        let complex = builder.add_complex().unwrap();
        let shell = builder.add_shell(complex).unwrap();

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        for i in 0..4 {
            let edge = builder
                .add_edge(Curve3::Segment(
                    Segment::new(corners[i], corners[(i + 1) % 4]).unwrap(),
                ))
                .unwrap();
            builder.add_coedge(lp, edge, true, None).unwrap();
        }
        builder.finish_loop(lp).unwrap();
        builder.finish_face(face).unwrap();
        builder.finish_shell(shell).unwrap();
        builder.finish_complex(complex).unwrap();

        builder.finish().unwrap();
        let result = builder.get_result().unwrap();
        assert_eq!(result.classification, ShellClassification::OpenShell);
    }

    #[test]
    fn face_color_applies_on_supporting_kernel() {
        let mut builder = solid_builder();
        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();
        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();

        let status = builder
            .set_face_color(face, Color::new(200, 10, 10))
            .unwrap();
        assert_eq!(status, AttributeStatus::Applied);
    }

    #[test]
    fn attributes_not_applicable_without_backend_support() {
        let kernel = ArenaKernel::new().without_visual_attributes();
        let mut builder = TopologyBuilder::new(kernel, ShellClassification::Solid);
        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();
        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();

        let status = builder.set_face_color(face, Color::new(1, 2, 3)).unwrap();
        assert_eq!(status, AttributeStatus::NotApplicable);
        let status = builder.set_face_material(face, MaterialId(7)).unwrap();
        assert_eq!(status, AttributeStatus::NotApplicable);
    }

    #[test]
    fn lenient_mode_downgrades_classification() {
        let mut builder = solid_builder();
        builder.allow_removal_of_problematic_faces();
        // Skip closed-shell validation so the broken face reaches the kernel
        builder.enable_validator(false);

        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();

        // One face whose boundary does not chain: two disconnected segments
        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        let e1 = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ))
            .unwrap();
        let e2 = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 5.0, 5.0)).unwrap(),
            ))
            .unwrap();
        builder.add_coedge(lp, e1, true, None).unwrap();
        builder.add_coedge(lp, e2, true, None).unwrap();
        builder.finish_loop(lp).unwrap();
        builder.finish_face(face).unwrap();

        builder.finish().unwrap();
        assert!(builder.removed_some_faces());
        let result = builder.get_result().unwrap();
        assert_ne!(result.classification, ShellClassification::Solid);
        assert_ne!(result.classification, ShellClassification::Void);
    }

    #[test]
    fn strict_mode_fails_on_problematic_face() {
        let mut builder = solid_builder();
        builder.enable_validator(false);

        let complex = builder.add_complex().unwrap();
        builder.add_shell(complex).unwrap();

        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let face = builder.add_face(Surface::Plane(plane), true, None).unwrap();
        let lp = builder.add_loop(face).unwrap();
        let e1 = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ))
            .unwrap();
        let e2 = builder
            .add_edge(Curve3::Segment(
                Segment::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 5.0, 5.0)).unwrap(),
            ))
            .unwrap();
        builder.add_coedge(lp, e1, true, None).unwrap();
        builder.add_coedge(lp, e2, true, None).unwrap();
        builder.finish_loop(lp).unwrap();
        builder.finish_face(face).unwrap();

        assert!(builder.finish().is_err());
        assert!(!builder.is_result_available());
    }
}
