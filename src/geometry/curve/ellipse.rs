use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An ellipse (or elliptical arc) in 3D space.
///
/// Defined by a center, semi-major and semi-minor axes, a normal,
/// a major axis direction, and an angular range.
///
/// `P(t) = center + a * cos(t) * major_dir + b * sin(t) * minor_dir`
/// where `minor_dir = normal x major_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    center: Point3,
    semi_major: f64,
    semi_minor: f64,
    normal: Vector3,
    major_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the ellipse
    /// * `semi_major` - Semi-major axis length (must be positive)
    /// * `semi_minor` - Semi-minor axis length (must be positive)
    /// * `normal` - Normal vector defining the ellipse plane
    /// * `major_dir` - Major axis direction (must be perpendicular to normal)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians
    ///
    /// # Errors
    ///
    /// Returns an error if either axis length is non-positive, the normal is
    /// zero-length, or the major direction is not perpendicular to the normal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point3,
        semi_major: f64,
        semi_minor: f64,
        normal: Vector3,
        major_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if semi_major < TOLERANCE {
            return Err(
                GeometryError::Degenerate("semi-major axis must be positive".into()).into(),
            );
        }
        if semi_minor < TOLERANCE {
            return Err(
                GeometryError::Degenerate("semi-minor axis must be positive".into()).into(),
            );
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let major_len = major_dir.norm();
        if major_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let major_dir = major_dir / major_len;

        if normal.dot(&major_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "major direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            semi_major,
            semi_minor,
            normal,
            major_dir,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the semi-major axis length.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Returns the semi-minor axis length.
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Returns the start angle.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Evaluates the ellipse at the given angle.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point3 {
        let minor = self.normal.cross(&self.major_dir);
        let x = self.semi_major * angle.cos();
        let y = self.semi_minor * angle.sin();
        self.center + self.major_dir * x + minor * y
    }

    /// Returns whether the angular range covers the full ellipse.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        ((self.end_angle - self.start_angle).abs() - std::f64::consts::TAU).abs() < TOLERANCE
    }

    /// Upper bound on the arc length of the swept range.
    ///
    /// Uses Ramanujan's approximation for the full perimeter, scaled by the
    /// swept fraction. Good to a few parts per million for any eccentricity,
    /// which is far tighter than the short-edge policy needs.
    #[must_use]
    pub fn length_bound(&self) -> f64 {
        let a = self.semi_major;
        let b = self.semi_minor;
        let h = ((a - b) / (a + b)).powi(2);
        let perimeter =
            std::f64::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
        let fraction = (self.end_angle - self.start_angle).abs() / std::f64::consts::TAU;
        perimeter * fraction.min(1.0)
    }
}
