// Segment: one tokenized unit of input text.

/// A piece of the input text, tagged as word-like or not.
///
/// Word-like segments consist solely of ASCII letters (`A-Z`, `a-z`) and are
/// the only segments sent to the spelling engine. Everything else (digits,
/// whitespace, punctuation, symbols) is a single-character separator segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    text: String,
    word_like: bool,
}

impl Segment {
    /// Create a segment, classifying it from its text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_like = is_word_like(&text);
        Self { text, word_like }
    }

    /// The text covered by this segment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this segment is checked by the engine.
    pub fn is_word_like(&self) -> bool {
        self.word_like
    }

    /// Length of the segment in bytes (equal to characters for ASCII input).
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consume the segment, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// `true` iff `text` is non-empty and matches `^[A-Za-z]+$`.
pub fn is_word_like(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_word_like() {
        let seg = Segment::new("havv");
        assert!(seg.is_word_like());
        assert_eq!(seg.text(), "havv");
        assert_eq!(seg.len(), 4);
    }

    #[test]
    fn mixed_case_is_word_like() {
        assert!(Segment::new("McDonald").is_word_like());
    }

    #[test]
    fn separators_are_not_word_like() {
        for text in [" ", ".", "'", "7", "_", "[", "`", "\n"] {
            assert!(!Segment::new(text).is_word_like(), "{text:?}");
        }
    }

    #[test]
    fn letters_with_digit_are_not_word_like() {
        assert!(!is_word_like("abc1"));
    }

    #[test]
    fn empty_text_is_not_word_like() {
        let seg = Segment::new("");
        assert!(seg.is_empty());
        assert!(!seg.is_word_like());
    }

    #[test]
    fn non_ascii_letters_are_not_word_like() {
        assert!(!is_word_like("\u{00E4}iti"));
    }

    #[test]
    fn into_text_returns_owned_text() {
        assert_eq!(Segment::new("pen").into_text(), "pen");
    }
}
