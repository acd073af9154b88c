//! Check orchestration: tokenize, take the gate once, classify every segment.

use std::time::Instant;

use spellgate_core::{CheckResult, EngineError, RequestOutcome, SpellEngine, tokenize};
use tokio::task::JoinError;

use crate::gate::{EngineGate, EngineLease};

/// Failures of a single check request after validation.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The engine returned an error for one of the words.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine call panicked or its task was torn down.
    #[error("engine call aborted: {0}")]
    EngineFault(String),
}

impl From<JoinError> for CheckError {
    fn from(err: JoinError) -> Self {
        if err.is_panic() {
            let payload = err.into_panic();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            CheckError::EngineFault(message)
        } else {
            CheckError::EngineFault(err.to_string())
        }
    }
}

/// Runs check requests against a gated engine.
pub struct SpellChecker<E> {
    gate: EngineGate<E>,
}

impl<E> Clone for SpellChecker<E> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
        }
    }
}

impl<E: SpellEngine> SpellChecker<E> {
    pub fn new(gate: EngineGate<E>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &EngineGate<E> {
        &self.gate
    }

    /// Check every word of `input`, returning one result per segment in
    /// order, plus queueing and engine time.
    ///
    /// Tokenization happens before queueing. The gate is acquired once for the
    /// whole request and the engine calls run on the blocking pool; the lease
    /// is released when that closure returns or unwinds.
    pub async fn check_text(&self, input: String) -> Result<RequestOutcome, CheckError> {
        let segments = tokenize(&input);
        let (lease, wait_time) = self.gate.acquire().await;

        let (results, check_time) = tokio::task::spawn_blocking(move || {
            let mut lease = lease;
            let started = Instant::now();
            let results = segments
                .into_iter()
                .map(|segment| CheckResult::for_segment(segment, |word| lease.check(word)))
                .collect::<Result<Vec<_>, EngineError>>();
            let check_time = started.elapsed();
            lease.release();
            results.map(|results| (results, check_time))
        })
        .await??;

        Ok(RequestOutcome {
            results,
            wait_time,
            check_time,
        })
    }

    /// Suggestions for a single word, through the gate.
    pub async fn suggest(&self, word: String) -> Result<Vec<String>, CheckError> {
        self.with_lease(move |lease| lease.suggest(&word)).await
    }

    /// Morphological analyses for a single word, through the gate.
    pub async fn analyze(&self, word: String) -> Result<Vec<String>, CheckError> {
        self.with_lease(move |lease| lease.analyze(&word)).await
    }

    async fn with_lease<T, F>(&self, f: F) -> Result<T, CheckError>
    where
        T: Send + 'static,
        F: FnOnce(&mut EngineLease<E>) -> Result<T, EngineError> + Send + 'static,
    {
        let (mut lease, _) = self.gate.acquire().await;
        let value = tokio::task::spawn_blocking(move || f(&mut lease)).await??;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Knows a fixed word list and records every word it is asked about.
    struct ListEngine {
        words: &'static [&'static str],
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ListEngine {
        fn new(words: &'static [&'static str]) -> (Self, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    words,
                    seen: Arc::clone(&seen),
                },
                seen,
            )
        }
    }

    impl SpellEngine for ListEngine {
        fn check(&mut self, word: &str) -> Result<bool, EngineError> {
            self.seen.lock().unwrap().push(word.to_string());
            if word == "boom" {
                panic!("engine fault on {word}");
            }
            if word == "fail" {
                return Err(EngineError::Fault("fail".into()));
            }
            Ok(self.words.contains(&word))
        }

        fn suggest(&mut self, word: &str) -> Result<Vec<String>, EngineError> {
            Ok(self
                .words
                .iter()
                .filter(|w| w.len() == word.len())
                .map(|w| w.to_string())
                .collect())
        }

        fn analyze(&mut self, word: &str) -> Result<Vec<String>, EngineError> {
            Ok(vec![format!("st:{word}")])
        }
    }

    fn checker(words: &'static [&'static str]) -> (SpellChecker<ListEngine>, Arc<Mutex<Vec<String>>>) {
        let (engine, seen) = ListEngine::new(words);
        (SpellChecker::new(EngineGate::new(engine)), seen)
    }

    #[tokio::test]
    async fn classifies_sentence() {
        let (checker, seen) = checker(&["I", "a", "have", "pen"]);
        let outcome = checker.check_text("I havv a pen.".to_string()).await.unwrap();

        assert_eq!(
            outcome.results,
            vec![
                CheckResult::checked("I", true),
                CheckResult::ignored(" "),
                CheckResult::checked("havv", false),
                CheckResult::ignored(" "),
                CheckResult::checked("a", true),
                CheckResult::ignored(" "),
                CheckResult::checked("pen", true),
                CheckResult::ignored("."),
            ]
        );
        assert_eq!(*seen.lock().unwrap(), vec!["I", "havv", "a", "pen"]);
    }

    #[tokio::test]
    async fn separators_never_reach_engine() {
        let (checker, seen) = checker(&[]);
        let outcome = checker.check_text("12 -- 34!".to_string()).await.unwrap();
        assert!(outcome.results.iter().all(|r| r.correct && r.is_ignored()));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn engine_error_is_reported_and_gate_released() {
        let (checker, _) = checker(&["ok"]);
        let err = checker.check_text("ok fail".to_string()).await.unwrap_err();
        assert!(matches!(err, CheckError::Engine(EngineError::Fault(_))));

        let outcome = checker.check_text("ok".to_string()).await.unwrap();
        assert_eq!(outcome.results, vec![CheckResult::checked("ok", true)]);
    }

    #[tokio::test]
    async fn engine_panic_is_contained() {
        let (checker, _) = checker(&["ok"]);
        let err = checker.check_text("boom".to_string()).await.unwrap_err();
        match err {
            CheckError::EngineFault(message) => assert!(message.contains("boom"), "{message}"),
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(checker.gate().waiting(), 0);
        let outcome = checker.check_text("ok".to_string()).await.unwrap();
        assert!(outcome.results[0].correct);
    }

    #[tokio::test]
    async fn suggest_and_analyze_go_through_gate() {
        let (checker, _) = checker(&["pen", "hen", "a"]);
        assert_eq!(
            checker.suggest("pem".to_string()).await.unwrap(),
            vec!["pen".to_string(), "hen".to_string()]
        );
        assert_eq!(
            checker.analyze("pens".to_string()).await.unwrap(),
            vec!["st:pens".to_string()]
        );
    }
}
