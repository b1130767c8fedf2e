use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use crate::core::errors::Cancelled;

pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Monotonic render counter shared between whoever starts renders and the
/// renders themselves. Starting a new render supersedes every older one.
#[derive(Debug, Clone, Default)]
pub struct RenderGeneration {
    current: Arc<AtomicU64>,
}

impl RenderGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the generation and returns a token for the new render.
    #[must_use]
    pub fn begin(&self) -> GenerationToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;

        GenerationToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Cancels every outstanding token without starting a new render.
    pub fn supersede(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Cancelled as soon as its [`RenderGeneration`] moves past it.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl GenerationToken {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl CancelToken for GenerationToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Relaxed) != self.generation
    }
}
