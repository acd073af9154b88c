// spellgate-core: pure building blocks of the spellgate service.
//
// Nothing in this crate performs I/O or holds shared state. The tokenizer,
// payload validation and result types can be used from any number of tasks
// at once; only implementations of `SpellEngine` carry mutable state, and the
// trait's `&mut self` receivers make exclusive access a compile-time
// requirement for whoever owns one.

pub mod engine;
pub mod result;
pub mod segment;
pub mod tokenizer;
pub mod validate;

pub use engine::{EngineError, SpellEngine};
pub use result::{CheckResult, IGNORED_NOTE, RequestOutcome};
pub use segment::Segment;
pub use tokenizer::tokenize;
pub use validate::{MAX_TEXT_LEN, ValidationError, decode_text, validate_text};
