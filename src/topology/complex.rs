use serde::{Deserialize, Serialize};

use super::shell::ShellId;

slotmap::new_key_type! {
    /// Unique identifier for a complex in the topology store.
    pub struct ComplexId;
}

/// Whether a finished result encloses a volume, and on which side.
///
/// Also used to express what the caller requested from a build: the
/// achieved classification can be downgraded from the request, never
/// upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellClassification {
    /// A surface boundary that does not enclose a volume.
    OpenShell,
    /// A closed boundary enclosing material on its inside.
    Solid,
    /// An inverted solid: a closed boundary enclosing empty space.
    Void,
}

impl ShellClassification {
    /// Returns `true` for `Solid` and `Void`, which require every shell
    /// to be edge-closed.
    #[must_use]
    pub fn requires_closed_shells(self) -> bool {
        matches!(self, Self::Solid | Self::Void)
    }
}

/// Data associated with a complex, the top-level topological unit of a
/// build: one solid, one void, or one open shell.
#[derive(Debug, Clone, Default)]
pub struct ComplexData {
    /// The shells that make up this complex.
    pub shells: Vec<ShellId>,
    /// Set once the complex has been finished; finished complexes are immutable.
    pub complete: bool,
}

impl ComplexData {
    /// Creates an empty, open complex.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
