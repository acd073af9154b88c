//! Exclusive, first-come-first-served access to the spelling engine.
//!
//! The engine is owned by an [`EngineGate`] and never handed out directly.
//! Callers queue with [`EngineGate::acquire`] and receive an [`EngineLease`],
//! an owned guard that exposes the engine operations and frees the gate when
//! released or dropped. Waiters are granted the gate in the order they called
//! `acquire` (tokio's mutex is fair), so no request starves behind later ones.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use spellgate_core::{EngineError, SpellEngine};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes every call into a non-reentrant engine.
pub struct EngineGate<E> {
    engine: Arc<Mutex<E>>,
    waiting: Arc<AtomicUsize>,
}

impl<E> Clone for EngineGate<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            waiting: Arc::clone(&self.waiting),
        }
    }
}

impl<E: SpellEngine> EngineGate<E> {
    /// Take ownership of `engine`. It is dropped when the last gate clone and
    /// lease are gone, or returned by [`EngineGate::into_engine`].
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            waiting: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait for exclusive access. Returns the lease and the time spent
    /// queued. Suspends only the calling task.
    pub async fn acquire(&self) -> (EngineLease<E>, Duration) {
        let started = Instant::now();
        let queued = QueuedGuard::enter(&self.waiting);
        let guard = Arc::clone(&self.engine).lock_owned().await;
        drop(queued);
        (EngineLease { guard }, started.elapsed())
    }

    /// Number of tasks currently waiting in `acquire`.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::Acquire)
    }

    /// Recover the engine for deterministic teardown.
    ///
    /// Returns the gate back if other clones or leases are still alive.
    pub fn into_engine(self) -> Result<E, Self> {
        let waiting = self.waiting;
        match Arc::try_unwrap(self.engine) {
            Ok(mutex) => Ok(mutex.into_inner()),
            Err(engine) => Err(Self { engine, waiting }),
        }
    }
}

/// Decrements the queue counter even if the waiting future is dropped.
struct QueuedGuard<'a>(&'a AtomicUsize);

impl<'a> QueuedGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for QueuedGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Exclusive access to the engine, held between `acquire` and release.
///
/// The lease is `Send`, so the critical section can run on a blocking thread.
/// Dropping it (including during unwinding) frees the gate for the next
/// waiter.
pub struct EngineLease<E> {
    guard: OwnedMutexGuard<E>,
}

impl<E: SpellEngine> EngineLease<E> {
    pub fn check(&mut self, word: &str) -> Result<bool, EngineError> {
        self.guard.check(word)
    }

    pub fn suggest(&mut self, word: &str) -> Result<Vec<String>, EngineError> {
        self.guard.suggest(word)
    }

    pub fn analyze(&mut self, word: &str) -> Result<Vec<String>, EngineError> {
        self.guard.analyze(word)
    }

    /// Free the gate. Equivalent to dropping the lease.
    pub fn release(self) {
        drop(self);
    }
}
