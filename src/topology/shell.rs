use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a shell in the topology store.
    pub struct ShellId;
}

/// Data associated with a topological shell.
///
/// A shell is a maximal connected set of faces.
#[derive(Debug, Clone, Default)]
pub struct ShellData {
    /// The faces that make up this shell.
    pub faces: Vec<FaceId>,
    /// Set once the shell has been finished; finished shells are immutable.
    pub complete: bool,
}

impl ShellData {
    /// Creates an empty, open shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
