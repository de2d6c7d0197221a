//! Injectable delay capability for MedBlock's simulated services.
//!
//! The dashboard fakes asynchronous work (signing in, verifying a block)
//! by waiting a fixed amount of time. Instead of calling
//! `tokio::time::sleep` directly, the mock services take a [`Delay`] so
//! tests can swap in an implementation that returns immediately.
//!
//! # Implementations
//!
//! - [`TokioDelay`] — real waiting on the Tokio timer. Cooperates with
//!   `tokio::time::pause()`, so paused-clock tests still observe the
//!   configured durations.
//! - [`InstantDelay`] — completes immediately.
//! - [`RecordingDelay`] — completes immediately and remembers every
//!   duration it was asked for.
//!
//! ```ignore
//! let provider = MockIdentityProvider::new(TokioDelay, IdentityConfig::default());
//! let principal = provider.sign_in().await?; // waits ~1s
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::trace;

/// Waits for a duration. The only source of time in the mock services.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` so one delay can be shared (through an `Arc`)
/// by several services living in the same async task.
pub trait Delay: Send + Sync + 'static {
    /// Completes once `duration` has elapsed, by this implementation's
    /// notion of elapsed.
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

impl<D: Delay> Delay for Arc<D> {
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        (**self).delay(duration)
    }
}

// ---------------------------------------------------------------------------
// TokioDelay
// ---------------------------------------------------------------------------

/// A [`Delay`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        trace!(?duration, "sleeping");
        tokio::time::sleep(duration)
    }
}

// ---------------------------------------------------------------------------
// InstantDelay
// ---------------------------------------------------------------------------

/// A [`Delay`] that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDelay;

impl Delay for InstantDelay {
    fn delay(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

// ---------------------------------------------------------------------------
// RecordingDelay
// ---------------------------------------------------------------------------

/// A [`Delay`] that never waits but logs each requested duration.
///
/// Lets tests assert *what* a service would have waited for without
/// spending the time.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    requested: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    /// Creates a recorder with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration requested so far, in call order.
    pub fn requested(&self) -> Vec<Duration> {
        self.lock().clone()
    }

    /// Sum of all requested durations.
    pub fn total(&self) -> Duration {
        self.lock().iter().sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Duration>> {
        // A poisoned log is still a valid log.
        self.requested
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Delay for RecordingDelay {
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.lock().push(duration);
        std::future::ready(())
    }
}
