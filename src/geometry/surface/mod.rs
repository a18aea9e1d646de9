mod cone;
mod cylinder;
mod nurbs;
mod plane;
mod sphere;
mod torus;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use nurbs::NurbsSurface;
pub use plane::Plane;
pub use sphere::Sphere;
pub use torus::Torus;

use serde::{Deserialize, Serialize};

/// Discriminant for the closed set of surface carriers.
///
/// Kernel implementations declare which of these kinds they accept;
/// the builder checks the kind of every incoming carrier against that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Plane,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    Nurbs,
}

/// A surface carrier, as referenced by a face.
///
/// Like the curve carriers, surfaces are supplied by the caller and
/// copied through the pipelines unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    Plane(Plane),
    Cylinder(Cylinder),
    Cone(Cone),
    Sphere(Sphere),
    Torus(Torus),
    Nurbs(NurbsSurface),
}

impl Surface {
    /// Returns the kind discriminant of this carrier.
    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Self::Plane(_) => SurfaceKind::Plane,
            Self::Cylinder(_) => SurfaceKind::Cylinder,
            Self::Cone(_) => SurfaceKind::Cone,
            Self::Sphere(_) => SurfaceKind::Sphere,
            Self::Torus(_) => SurfaceKind::Torus,
            Self::Nurbs(_) => SurfaceKind::Nurbs,
        }
    }
}
