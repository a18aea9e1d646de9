use super::coedge::CoedgeId;

slotmap::new_key_type! {
    /// Unique identifier for a loop in the topology store.
    pub struct LoopId;
}

/// Data associated with a loop.
///
/// A loop is an ordered, closed cycle of coedges bounding a region of a
/// face: the outer boundary or an inner hole.
#[derive(Debug, Clone, Default)]
pub struct LoopData {
    /// The ordered sequence of coedges.
    pub coedges: Vec<CoedgeId>,
    /// Set once the loop has been finished; finished loops are immutable.
    pub complete: bool,
}

impl LoopData {
    /// Creates an empty, open loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
