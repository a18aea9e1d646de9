mod arc;
mod circle;
mod ellipse;
mod nurbs;
mod segment;

pub use arc::Arc;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use nurbs::NurbsCurve3;
pub use segment::Segment;

pub(crate) use nurbs::validate_basis;

use serde::{Deserialize, Serialize};

use crate::math::Point3;

/// Discriminant for the closed set of 3-D curve carriers.
///
/// Kernel implementations declare which of these kinds they accept;
/// the builder checks the kind of every incoming carrier against that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    Segment,
    Arc,
    Circle,
    Ellipse,
    Nurbs,
}

/// A bounded 3-D curve carrier, as referenced by an edge.
///
/// The builder and the transfer pipelines never construct these on their
/// own; callers supply them, and the pipelines copy them through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve3 {
    Segment(Segment),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Nurbs(NurbsCurve3),
}

impl Curve3 {
    /// Returns the kind discriminant of this carrier.
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        match self {
            Self::Segment(_) => CurveKind::Segment,
            Self::Arc(_) => CurveKind::Arc,
            Self::Circle(_) => CurveKind::Circle,
            Self::Ellipse(_) => CurveKind::Ellipse,
            Self::Nurbs(_) => CurveKind::Nurbs,
        }
    }

    /// Returns the start point of the bounded carrier.
    ///
    /// Closed curves report their seam point.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        match self {
            Self::Segment(s) => *s.start(),
            Self::Arc(a) => a.point_at(a.start_angle()),
            Self::Circle(c) => c.seam_point(),
            Self::Ellipse(e) => e.point_at(e.start_angle()),
            Self::Nurbs(n) => n.start_point(),
        }
    }

    /// Returns the end point of the bounded carrier.
    ///
    /// Closed curves report their seam point.
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        match self {
            Self::Segment(s) => *s.end(),
            Self::Arc(a) => a.point_at(a.end_angle()),
            Self::Circle(c) => c.seam_point(),
            Self::Ellipse(e) => e.point_at(e.end_angle()),
            Self::Nurbs(n) => n.end_point(),
        }
    }

    /// Returns whether the carrier starts and ends at the same point.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Segment(_) => false,
            Self::Arc(a) => a.is_closed(),
            Self::Circle(_) => true,
            Self::Ellipse(e) => e.is_closed(),
            Self::Nurbs(n) => n.is_closed(),
        }
    }

    /// Upper bound on the curve length.
    ///
    /// Exact for segments, arcs and circles; a tight approximation for
    /// ellipses; the control polygon length for NURBS. If this bound is
    /// below the minimum edge length, the true curve certainly is too,
    /// which is all the short-edge policy needs.
    #[must_use]
    pub fn length_upper_bound(&self) -> f64 {
        match self {
            Self::Segment(s) => s.length(),
            Self::Arc(a) => a.length(),
            Self::Circle(c) => c.length(),
            Self::Ellipse(e) => e.length_bound(),
            Self::Nurbs(n) => n.control_polygon_length(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    #[test]
    fn segment_endpoints() {
        let c = Curve3::Segment(
            Segment::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0)).unwrap(),
        );
        assert_eq!(c.kind(), CurveKind::Segment);
        assert!((c.end_point() - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
        assert!(!c.is_closed());
    }

    #[test]
    fn circle_is_closed_at_seam() {
        let c = Curve3::Circle(
            Circle::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap(),
        );
        assert!(c.is_closed());
        assert!((c.start_point() - c.end_point()).norm() < 1e-12);
    }

    #[test]
    fn length_bound_of_arc() {
        let a = Arc::new(
            Point3::origin(),
            2.0,
            Vector3::z(),
            Vector3::x(),
            0.0,
            std::f64::consts::PI,
        )
        .unwrap();
        let c = Curve3::Arc(a);
        assert!((c.length_upper_bound() - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
