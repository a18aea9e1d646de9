//! The cross-kernel transfer pipeline.
//!
//! [`extract`] walks a native B-Rep through the [`NativeBrep`] traversal
//! contract and captures it into a [`crate::snapshot::TopologySnapshot`];
//! [`replay`] drives a [`crate::builder::TopologyBuilder`] backed by any
//! kernel to reconstruct an equivalent solid from that snapshot.
//!
//! Placement transforms are the caller's concern. Rigid and uniform-scale
//! transforms can be applied directly to the finished solid; a non-uniform
//! or non-orthogonal transform that the target kernel's geometry cannot
//! express should instead be kept on an instance that references the
//! untransformed solid, rather than being baked into the B-Rep.

pub mod extract;
pub mod replay;
pub mod source;

pub use extract::{extract, ExtractOutcome, ExtractPolicy, ShellFailure};
pub use replay::{replay, ReplayOutcome};
pub use source::{NativeBrep, NoAttributes, VisualAttributeProvider};
