use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A toroidal surface in 3D space.
///
/// Defined by a center, major radius (center to tube center), minor radius
/// (tube radius), axis of symmetry, and a reference direction for u=0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    center: Point3,
    major_radius: f64,
    minor_radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Torus {
    /// Creates a new torus.
    ///
    /// # Errors
    ///
    /// Returns an error if either radius is non-positive, the minor radius is
    /// not less than the major radius, the axis is zero-length, or the
    /// reference direction is not perpendicular to the axis.
    pub fn new(
        center: Point3,
        major_radius: f64,
        minor_radius: f64,
        axis: Vector3,
        ref_dir: Vector3,
    ) -> Result<Self> {
        if major_radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("torus major radius must be positive".into()).into(),
            );
        }
        if minor_radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("torus minor radius must be positive".into()).into(),
            );
        }
        if minor_radius >= major_radius {
            return Err(GeometryError::Degenerate(
                "torus minor radius must be less than major radius".into(),
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
            center,
            major_radius,
            minor_radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the center of the torus.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the major radius.
    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Returns the minor radius.
    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Returns the symmetry axis direction (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the reference direction (u=0).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn minor_must_be_less_than_major() {
        let r = Torus::new(Point3::origin(), 1.0, 1.0, Vector3::z(), Vector3::x());
        assert!(r.is_err());
    }

    #[test]
    fn valid_torus() {
        let t = Torus::new(Point3::origin(), 2.0, 0.5, Vector3::z(), Vector3::x());
        assert!(t.is_ok());
    }
}
