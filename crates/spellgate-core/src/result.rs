// Per-segment verdicts and the outcome of one check request.

use std::time::Duration;

use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::segment::Segment;

/// Note attached to segments that were not sent to the engine.
pub const IGNORED_NOTE: &str = "ignored";

/// Verdict for one segment, in the same order as the tokenized input.
///
/// Serializes as the two-element array `[segment, {"note"?, "correct"}]`,
/// omitting `note` for word-like segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub segment: String,
    pub note: Option<&'static str>,
    pub correct: bool,
}

impl CheckResult {
    /// Result for a word-like segment, carrying the engine's verdict.
    pub fn checked(segment: impl Into<String>, correct: bool) -> Self {
        Self {
            segment: segment.into(),
            note: None,
            correct,
        }
    }

    /// Result for a segment the engine never saw. Always correct.
    pub fn ignored(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            note: Some(IGNORED_NOTE),
            correct: true,
        }
    }

    /// Build the result for `segment` given a verdict source.
    ///
    /// `verdict` is called only for word-like segments.
    pub fn for_segment<E>(
        segment: Segment,
        verdict: impl FnOnce(&str) -> Result<bool, E>,
    ) -> Result<Self, E> {
        if segment.is_word_like() {
            let correct = verdict(segment.text())?;
            Ok(Self::checked(segment.into_text(), correct))
        } else {
            Ok(Self::ignored(segment.into_text()))
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.note.is_some()
    }
}

#[derive(serde::Serialize)]
struct Verdict {
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
    correct: bool,
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.segment)?;
        tuple.serialize_element(&Verdict {
            note: self.note,
            correct: self.correct,
        })?;
        tuple.end()
    }
}

/// Everything a completed check request produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub results: Vec<CheckResult>,
    /// Time spent queued for the engine.
    pub wait_time: Duration,
    /// Time spent calling the engine for all segments of the request.
    pub check_time: Duration,
}

impl RequestOutcome {
    pub fn wait_time_ms(&self) -> u64 {
        as_millis(self.wait_time)
    }

    pub fn check_time_ms(&self) -> u64 {
        as_millis(self.check_time)
    }

    /// Number of segments that were sent to the engine.
    pub fn checked_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_ignored()).count()
    }
}

fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
