//! Curves in the parameter space of a surface.
//!
//! A coedge may carry one of these to describe its edge's image in the
//! owning face's (u, v) space. Backends that require explicit face-local
//! parametrization consume them; others ignore them.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};

use super::curve::validate_basis;

/// Discriminant for the closed set of parameter-space curve carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve2Kind {
    Segment,
    Arc,
    Nurbs,
}

/// A straight segment in (u, v) parameter space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment2 {
    start: Point2,
    end: Point2,
}

impl Segment2 {
    /// Creates a new parameter-space segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide within tolerance.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("segment endpoints coincide".into()).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }
}

/// A circular arc in (u, v) parameter space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc2 {
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl Arc2 {
    /// Creates a new parameter-space arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle in radians.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }
}

/// A NURBS curve in (u, v) parameter space.
///
/// Same well-formedness rules as [`super::NurbsCurve3`]: clamped,
/// non-decreasing knot vector and positive weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsCurve2 {
    degree: usize,
    control_points: Vec<Point2>,
    weights: Option<Vec<f64>>,
    knots: Vec<f64>,
}

impl NurbsCurve2 {
    /// Creates a new parameter-space NURBS curve carrier.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`super::NurbsCurve3::new`].
    pub fn new(
        degree: usize,
        control_points: Vec<Point2>,
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
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }
}

/// A parameter-space curve carrier attached to a coedge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve2 {
    Segment(Segment2),
    Arc(Arc2),
    Nurbs(NurbsCurve2),
}

impl Curve2 {
    /// Returns the kind discriminant of this carrier.
    #[must_use]
    pub fn kind(&self) -> Curve2Kind {
        match self {
            Self::Segment(_) => Curve2Kind::Segment,
            Self::Arc(_) => Curve2Kind::Arc,
            Self::Nurbs(_) => Curve2Kind::Nurbs,
        }
    }
}
