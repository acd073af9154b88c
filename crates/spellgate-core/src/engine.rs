// SpellEngine: the boundary to a stateful, non-reentrant spelling engine.

/// Errors reported by an engine call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The word contains a NUL byte and cannot cross a C string boundary.
    #[error("word contains an interior NUL byte: {word:?}")]
    InteriorNul { word: String },

    /// The engine reported a failure.
    #[error("engine call failed: {0}")]
    Fault(String),
}

/// A loaded spelling engine.
///
/// Implementations wrap a single mutable resource with no internal locking.
/// Every call takes `&mut self`, so holding a `&mut` (or an exclusive guard)
/// is the only way to call in. Construction loads the dictionary; dropping the
/// value releases it.
pub trait SpellEngine: Send + 'static {
    /// Whether `word` is spelled correctly.
    fn check(&mut self, word: &str) -> Result<bool, EngineError>;

    /// Suggested replacements for `word`, best first.
    fn suggest(&mut self, word: &str) -> Result<Vec<String>, EngineError>;

    /// Morphological analyses of `word`, in engine notation.
    fn analyze(&mut self, word: &str) -> Result<Vec<String>, EngineError>;
}
