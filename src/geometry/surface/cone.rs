use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A conical surface in 3D space.
///
/// Defined by an apex point, an axis direction, a half-angle, and a
/// reference direction for u=0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    apex: Point3,
    axis: Vector3,
    half_angle: f64,
    ref_dir: Vector3,
}

impl Cone {
    /// Creates a new cone.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-angle is outside `(0, pi/2)`, the axis is
    /// zero-length, or the reference direction is not perpendicular to the axis.
    pub fn new(apex: Point3, axis: Vector3, half_angle: f64, ref_dir: Vector3) -> Result<Self> {
        if half_angle <= TOLERANCE || half_angle >= std::f64::consts::FRAC_PI_2 - TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cone half-angle must be in (0, pi/2)".into(),
            )
            .into());
        }

        let axis_len = axis.norm();
        if axis_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis / axis_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if axis.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to axis".into(),
            )
            .into());
        }

        Ok(Self {
            apex,
            axis,
            half_angle,
            ref_dir,
        })
    }

    /// Returns the apex point.
    #[must_use]
    pub fn apex(&self) -> &Point3 {
        &self.apex
    }

    /// Returns the axis direction (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the half-angle in radians.
    #[must_use]
    pub fn half_angle(&self) -> f64 {
        self.half_angle
    }

    /// Returns the reference direction (u=0).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }
}
