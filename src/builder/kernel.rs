use crate::error::Result;
use crate::geometry::{Curve2Kind, CurveKind, SurfaceKind};
use crate::topology::{ComplexId, FaceId, ShellClassification, TopologyStore};

/// Options resolved by the builder and handed to the kernel at build time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Permit the kernel to drop faces that fail its internal geometric
    /// validation instead of failing the whole build.
    pub allow_face_removal: bool,
}

/// What a kernel produced from one build.
#[derive(Debug)]
pub struct KernelBuild<B> {
    /// The native result.
    pub brep: B,
    /// The classification the kernel could actually achieve.
    pub classification: ShellClassification,
    /// Faces dropped under `allow_face_removal`; empty in strict mode.
    pub removed_faces: Vec<FaceId>,
}

/// A pluggable native modeling back-end.
///
/// The builder owns the assembly protocol, handle bookkeeping and
/// topological validation; the kernel owns geometric interpretation. The
/// capability queries are consulted on every `add_*` call so unsupported
/// carriers are rejected before they enter the assembly.
pub trait ModelingKernel {
    /// The native B-Rep type produced by [`ModelingKernel::build`].
    type Brep;

    /// Whether this kernel accepts edges over the given 3-D curve kind.
    fn supports_curve(&self, kind: CurveKind) -> bool;

    /// Whether this kernel accepts coedges carrying the given
    /// parameter-space curve kind.
    fn supports_param_curve(&self, kind: Curve2Kind) -> bool;

    /// Whether this kernel accepts faces over the given surface kind.
    fn supports_surface(&self, kind: SurfaceKind) -> bool;

    /// Whether this kernel can carry a per-face color override.
    fn supports_face_color(&self) -> bool;

    /// Whether this kernel can carry a per-edge color override.
    fn supports_edge_color(&self) -> bool;

    /// Whether this kernel can carry face materials and material mappings.
    fn supports_material(&self) -> bool;

    /// Builds the native result from an assembled topology.
    ///
    /// Called exactly once per builder lifetime, after the builder has run
    /// its own validation. `complexes` lists the root entities in creation
    /// order; everything they reference lives in `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the assembly cannot be realized; in strict mode
    /// a single geometrically invalid face is such an error.
    fn build(
        &mut self,
        store: &TopologyStore,
        complexes: &[ComplexId],
        requested: ShellClassification,
        options: &BuildOptions,
    ) -> Result<KernelBuild<Self::Brep>>;
}
