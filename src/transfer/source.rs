use std::hash::Hash;

use crate::attributes::{Color, FaceMaterial};
use crate::error::Result;
use crate::geometry::{Curve2, Curve3, Surface};

/// Traversal contract over a native kernel's finished B-Rep.
///
/// The extraction pipeline depends only on this trait, never on a concrete
/// kernel, which is what makes cross-kernel transfer possible. Reference
/// types are whatever the native kernel uses to identify entities; the only
/// requirement is that `EdgeRef` has a usable identity, so shared edges can
/// be recognized and deduplicated.
pub trait NativeBrep {
    type ComplexRef: Copy;
    type ShellRef: Copy;
    type FaceRef: Copy;
    type LoopRef: Copy;
    type CoedgeRef: Copy;
    type EdgeRef: Copy + Eq + Hash;

    /// Lists the top-level complexes.
    fn complexes(&self) -> Vec<Self::ComplexRef>;

    /// Lists the shells of a complex, in order.
    fn shells(&self, complex: Self::ComplexRef) -> Vec<Self::ShellRef>;

    /// Lists the faces of a shell, in order.
    fn faces(&self, shell: Self::ShellRef) -> Vec<Self::FaceRef>;

    /// Lists the loops of a face, outer boundary first.
    fn loops(&self, face: Self::FaceRef) -> Vec<Self::LoopRef>;

    /// Lists the coedges of a loop, in cycle order.
    fn coedges(&self, lp: Self::LoopRef) -> Vec<Self::CoedgeRef>;

    /// Returns the surface of a face, or `None` if the native face
    /// carries no surface at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the face reference cannot be resolved or its
    /// surface cannot be expressed as a carrier.
    fn face_surface(&self, face: Self::FaceRef) -> Result<Option<Surface>>;

    /// Returns whether the face normal agrees with its surface's natural normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the face reference cannot be resolved.
    fn face_same_sense(&self, face: Self::FaceRef) -> Result<bool>;

    /// Returns the edge traversed by a coedge.
    ///
    /// # Errors
    ///
    /// Returns an error if the coedge reference cannot be resolved.
    fn coedge_edge(&self, coedge: Self::CoedgeRef) -> Result<Self::EdgeRef>;

    /// Returns the traversal direction of a coedge relative to its edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the coedge reference cannot be resolved.
    fn coedge_forward(&self, coedge: Self::CoedgeRef) -> Result<bool>;

    /// Returns the coedge's curve in the owning face's parameter space,
    /// if the native kernel stores one.
    ///
    /// # Errors
    ///
    /// Returns an error if the coedge reference cannot be resolved or the
    /// parameter curve cannot be expressed as a carrier.
    fn coedge_param_curve(&self, coedge: Self::CoedgeRef) -> Result<Option<Curve2>>;

    /// Returns the 3-D curve of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge reference cannot be resolved or its
    /// curve cannot be expressed as a carrier.
    fn edge_curve(&self, edge: Self::EdgeRef) -> Result<Curve3>;
}

/// Supplies per-face and per-edge visual attributes during extraction.
///
/// Implementations typically consult the source document's symbology
/// tables. Passing no provider to `extract` is legal and simply yields a
/// snapshot without visual attributes; returning `None` from any method is
/// a valid answer (most faces have no override).
pub trait VisualAttributeProvider<B: NativeBrep> {
    /// Color override for a face, if any.
    fn face_color(&self, brep: &B, face: B::FaceRef) -> Option<Color>;

    /// Material reference (and optional mapping transform) for a face, if any.
    fn face_material(&self, brep: &B, face: B::FaceRef) -> Option<FaceMaterial>;

    /// Color override for an edge, if any.
    fn edge_color(&self, brep: &B, edge: B::EdgeRef) -> Option<Color>;
}

/// A provider that reports no attributes for anything.
///
/// Stands in for callers that have no symbology source, and makes the
/// turbofish for a provider-less `extract` call readable:
/// `extract(&brep, None::<&NoAttributes>, &policy)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl<B: NativeBrep> VisualAttributeProvider<B> for NoAttributes {
    fn face_color(&self, _brep: &B, _face: B::FaceRef) -> Option<Color> {
        None
    }

    fn face_material(&self, _brep: &B, _face: B::FaceRef) -> Option<FaceMaterial> {
        None
    }

    fn edge_color(&self, _brep: &B, _edge: B::EdgeRef) -> Option<Color> {
        None
    }
}
