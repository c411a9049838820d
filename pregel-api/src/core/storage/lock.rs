//! Per-vertex mutual exclusion.
//!
//! Every vertex owns one lock guarding the slot that other workers write
//! messages into. Which primitive backs it is picked once, when the graph is
//! built, through [`LockStrategy`].

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};

use super::SpinMutex;

/// Busy-waiting raw mutex, suited to the very short critical sections of a message send.
pub struct RawSpinLock {
    locked: AtomicBool,
}

unsafe impl lock_api::RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: RawSpinLock = RawSpinLock {
        locked: AtomicBool::new(false),
    };

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        while !self.try_lock() {
            // wait on a plain load until the lock looks free
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockStrategy {
    /// parking_lot mutex, parks the thread under contention
    #[default]
    Mutex,
    /// spin lock, never yields to the OS
    Spin,
}

impl Display for LockStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LockStrategy::Mutex => write!(f, "mutex"),
            LockStrategy::Spin => write!(f, "spin"),
        }
    }
}

impl FromStr for LockStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mutex" => Ok(LockStrategy::Mutex),
            "spin" | "spinlock" => Ok(LockStrategy::Spin),
            other => Err(format!(
                "unknown lock strategy '{other}', expected 'mutex' or 'spin'"
            )),
        }
    }
}

/// A lock around a single vertex slot, backed by the primitive chosen by [`LockStrategy`].
pub enum VertexLock<T> {
    Mutex(parking_lot::Mutex<T>),
    Spin(SpinMutex<T>),
}

impl<T> VertexLock<T> {
    pub fn new(strategy: LockStrategy, value: T) -> Self {
        match strategy {
            LockStrategy::Mutex => VertexLock::Mutex(parking_lot::Mutex::new(value)),
            LockStrategy::Spin => VertexLock::Spin(SpinMutex::new(value)),
        }
    }

    pub fn strategy(&self) -> LockStrategy {
        match self {
            VertexLock::Mutex(_) => LockStrategy::Mutex,
            VertexLock::Spin(_) => LockStrategy::Spin,
        }
    }

    /// Runs `f` with exclusive access to the slot.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        match self {
            VertexLock::Mutex(m) => f(&mut m.lock()),
            VertexLock::Spin(m) => f(&mut m.lock()),
        }
    }

    /// Lock-free access when the caller holds the only reference.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        match self {
            VertexLock::Mutex(m) => m.get_mut(),
            VertexLock::Spin(m) => m.get_mut(),
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            VertexLock::Mutex(m) => m.into_inner(),
            VertexLock::Spin(m) => m.into_inner(),
        }
    }
}

impl<T: Default> VertexLock<T> {
    pub fn with_default(strategy: LockStrategy) -> Self {
        Self::new(strategy, T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for VertexLock<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VertexLock::Mutex(m) => f.debug_tuple("Mutex").field(m).finish(),
            VertexLock::Spin(m) => f.debug_tuple("Spin").field(m).finish(),
        }
    }
}
