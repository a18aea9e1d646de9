use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::super::curve::validate_basis;

/// A NURBS surface carrier.
///
/// Like the NURBS curve carrier, this is validated on construction and
/// passed through to the native kernel without being evaluated here. The
/// control net is stored row-major: `control_points[i * v_count + j]` is
/// the point at u-index `i`, v-index `j`. Both knot vectors must be
/// clamped and non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsSurface {
    u_degree: usize,
    v_degree: usize,
    u_count: usize,
    v_count: usize,
    control_points: Vec<Point3>,
    weights: Option<Vec<f64>>,
    u_knots: Vec<f64>,
    v_knots: Vec<f64>,
}

impl NurbsSurface {
    /// Creates a new NURBS surface carrier.
    ///
    /// # Errors
    ///
    /// Returns an error if either degree is zero, the control net does not
    /// match `u_count * v_count`, either knot vector is malformed (wrong
    /// length, decreasing, unclamped), or the weights are present but do
    /// not match the control net or are non-positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        u_degree: usize,
        v_degree: usize,
        u_count: usize,
        v_count: usize,
        control_points: Vec<Point3>,
        weights: Option<Vec<f64>>,
        u_knots: Vec<f64>,
        v_knots: Vec<f64>,
    ) -> Result<Self> {
        if control_points.len() != u_count * v_count {
            return Err(GeometryError::MalformedNurbs(format!(
                "expected {} control points, got {}",
                u_count * v_count,
                control_points.len()
            ))
            .into());
        }
        validate_basis(u_degree, u_count, &u_knots)?;
        validate_basis(v_degree, v_count, &v_knots)?;

        if let Some(w) = &weights {
            if w.len() != control_points.len() {
                return Err(GeometryError::MalformedNurbs(
                    "weight count does not match control net".into(),
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
            u_degree,
            v_degree,
            u_count,
            v_count,
            control_points,
            weights,
            u_knots,
            v_knots,
        })
    }

    /// Returns the degree in the u direction.
    #[must_use]
    pub fn u_degree(&self) -> usize {
        self.u_degree
    }

    /// Returns the degree in the v direction.
    #[must_use]
    pub fn v_degree(&self) -> usize {
        self.v_degree
    }

    /// Returns the control net size as `(u_count, v_count)`.
    #[must_use]
    pub fn net_size(&self) -> (usize, usize) {
        (self.u_count, self.v_count)
    }

    /// Returns the row-major control net.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the knot vector in the u direction.
    #[must_use]
    pub fn u_knots(&self) -> &[f64] {
        &self.u_knots
    }

    /// Returns the knot vector in the v direction.
    #[must_use]
    pub fn v_knots(&self) -> &[f64] {
        &self.v_knots
    }
}
