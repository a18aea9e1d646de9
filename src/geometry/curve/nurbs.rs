use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

/// A NURBS curve carrier.
///
/// The carrier is not evaluated by this crate; it is validated on
/// construction and handed through to the native kernel unchanged. The
/// knot vector must be clamped (first and last knots repeated
/// `degree + 1` times), so the curve interpolates its end control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsCurve3 {
    degree: usize,
    control_points: Vec<Point3>,
    weights: Option<Vec<f64>>,
    knots: Vec<f64>,
}

impl NurbsCurve3 {
    /// Creates a new NURBS curve carrier.
    ///
    /// # Errors
    ///
    /// Returns an error if the degree is zero, there are too few control
    /// points for the degree, the knot vector has the wrong length, is not
    /// non-decreasing or is not clamped, or the weights (when present) do
    /// not match the control points or are non-positive.
    pub fn new(
        degree: usize,
        control_points: Vec<Point3>,
        weights: Option<Vec<f64>>,
        knots: Vec<f64>,
    ) -> Result<Self> {
        validate_basis(degree, control_points.len(), &knots)?;

        if let Some(w) = &weights {
            if w.len() != control_points.len() {
                return Err(GeometryError::MalformedNurbs(
                    "weight count does not match control point count".into(),
                )
                .into());
            }
            if w.iter().any(|&wi| wi <= TOLERANCE) {
                return Err(
                    GeometryError::MalformedNurbs("weights must be positive".into()).into(),
                );
            }
        }

        Ok(Self {
            degree,
            control_points,
            weights,
            knots,
        })
    }

    /// Returns the curve degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the weights, if the curve is rational.
    #[must_use]
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the start point (first control point, by clamping).
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        self.control_points[0]
    }

    /// Returns the end point (last control point, by clamping).
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        self.control_points[self.control_points.len() - 1]
    }

    /// Returns whether the curve starts and ends at the same point.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        (self.end_point() - self.start_point()).norm() < TOLERANCE
    }

    /// Length of the control polygon.
    ///
    /// By the variation-diminishing property this is an upper bound on the
    /// true curve length: a control polygon shorter than some tolerance
    /// guarantees the curve is shorter too.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        self.control_points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }
}

/// Shared validation for NURBS basis data (also used by 2-D curves and surfaces).
pub(crate) fn validate_basis(degree: usize, control_count: usize, knots: &[f64]) -> Result<()> {
    if degree == 0 {
        return Err(GeometryError::MalformedNurbs("degree must be at least 1".into()).into());
    }
    if control_count <= degree {
        return Err(GeometryError::MalformedNurbs(format!(
            "need more than {degree} control points for degree {degree}"
        ))
        .into());
    }
    if knots.len() != control_count + degree + 1 {
        return Err(GeometryError::MalformedNurbs(format!(
            "expected {} knots, got {}",
            control_count + degree + 1,
            knots.len()
        ))
        .into());
    }
    if knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(
            GeometryError::MalformedNurbs("knot vector must be non-decreasing".into()).into(),
        );
    }
    let clamped_start = knots[..=degree]
        .iter()
        .all(|&k| (k - knots[0]).abs() < TOLERANCE);
    let clamped_end = knots[knots.len() - degree - 1..]
        .iter()
        .all(|&k| (k - knots[knots.len() - 1]).abs() < TOLERANCE);
    if !clamped_start || !clamped_end {
        return Err(GeometryError::MalformedNurbs("knot vector must be clamped".into()).into());
    }
    Ok(())
}
