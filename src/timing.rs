//! Wall-clock timing for extraction, reinterpretation, and transcription.
//!
//! Every user-facing operation reports how long it took, so the measurement
//! lives in one place instead of scattered `Instant::now()` pairs. The
//! helpers wrap a closure (or future) and return the result together with its
//! elapsed duration.

use std::future::Future;
use std::time::{Duration, Instant};

/// A value paired with the wall-clock time it took to produce.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in seconds, for `{:.2}`-style display.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Map the inner value, preserving the measurement.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

/// Run a closure and measure its wall-clock duration.
pub fn time_call<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Await a future and measure its wall-clock duration.
pub async fn time_async<T, F: Future<Output = T>>(fut: F) -> Timed<T> {
    let start = Instant::now();
    let value = fut.await;
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}
