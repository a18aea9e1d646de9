use thiserror::Error;

use crate::geometry::{Curve2Kind, CurveKind, SurfaceKind};

/// Top-level error type for the solidport transfer pipeline.
#[derive(Debug, Error)]
pub enum SolidportError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Reject(#[from] RejectError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SolidportError {
    /// Returns `true` if this is a recoverable per-entity rejection.
    ///
    /// Recoverable rejections never corrupt sibling entities; the affected
    /// face, loop or edge can be dropped and construction continued. Anything
    /// else is fatal to the current build.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Reject(_))
    }
}

/// Errors raised when constructing geometry carriers.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("malformed nurbs data: {0}")]
    MalformedNurbs(String),
}

/// Caller errors against the builder protocol.
///
/// These are programming errors, fatal to the current build. They are
/// surfaced immediately and never retried.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown {category} handle")]
    UnknownHandle { category: &'static str },

    #[error("{category} has already been finished")]
    EntityComplete { category: &'static str },

    #[error("cannot finish a {category} while it still has an open {child}")]
    OpenChild {
        category: &'static str,
        child: &'static str,
    },

    #[error("loop must contain at least one coedge")]
    EmptyLoop,

    #[error("face must contain at least one loop")]
    FaceWithoutLoops,

    #[error("no open shell available as default")]
    NoOpenShell,

    #[error("builder is finished and no longer accepts geometry")]
    NotAccepting,

    #[error("build result is not available")]
    ResultNotAvailable,

    #[error("build result has already been retrieved")]
    ResultAlreadyTaken,

    #[error("topology validation failed: {0}")]
    Validation(String),
}

/// Recoverable per-entity rejections.
///
/// Reported to the immediate caller of the `add_*` call so that pipelines
/// can skip the affected entity and continue with its siblings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectError {
    #[error("curve type {0:?} is not supported by the active kernel")]
    UnsupportedCurve(CurveKind),

    #[error("parameter-space curve type {0:?} is not supported by the active kernel")]
    UnsupportedParamCurve(Curve2Kind),

    #[error("surface type {0:?} is not supported by the active kernel")]
    UnsupportedSurface(SurfaceKind),

    #[error("edge curve length bound {length_bound} is below the minimum edge length")]
    ShortEdge { length_bound: f64 },

    #[error("native face has no surface")]
    NullSurface,
}

/// Failures reported by a native modeling back-end.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("face failed geometric validation: {0}")]
    InvalidFace(String),

    #[error("kernel build failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`SolidportError`].
pub type Result<T> = std::result::Result<T, SolidportError>;
