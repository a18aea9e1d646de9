use serde::{Deserialize, Serialize};

use crate::math::Matrix4;

/// An RGB color override for a face or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color from its RGB components.
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Opaque identifier of a material definition in the caller's material table.
///
/// The pipeline carries material identifiers through unchanged; resolving
/// them to actual material data is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u64);

/// A material reference plus an optional texture-mapping transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceMaterial {
    /// The referenced material.
    pub id: MaterialId,
    /// Transform from model space into the material's texture space.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mapping: Option<Matrix4>,
}

/// Outcome of an optional per-entity attribute call.
///
/// Distinguishes "this backend has no such concept" from "the call failed",
/// which callers need to tell apart from a successful application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeStatus {
    /// The attribute was recorded and will be carried into the result.
    Applied,
    /// The active backend has no concept of this attribute; nothing happened.
    NotApplicable,
    /// The backend understands the attribute but refused this value.
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.r, 10);
        assert_eq!(c.g, 20);
        assert_eq!(c.b, 30);
    }

    #[test]
    fn status_distinguishes_not_applicable_from_rejected() {
        assert_ne!(AttributeStatus::NotApplicable, AttributeStatus::Rejected);
        assert_ne!(AttributeStatus::Applied, AttributeStatus::NotApplicable);
    }
}
