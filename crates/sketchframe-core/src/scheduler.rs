//! Per-frame scheduling primitives.
//!
//! The host drives these from its animation-frame (or vsync) callback. Nothing
//! here spawns timers; every decision is made when the host calls in.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};

/// Default cadence for freehand redraws while a stroke is in progress.
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(8);

/// Coalesces high-frequency updates into at most one flush per frame.
///
/// Scheduling while a flush is already pending replaces the pending value;
/// only the latest value is delivered.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` for the next flush.
    ///
    /// Returns true when this call requested a new flush, false when it only
    /// replaced a value that was already waiting.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending.replace(value).is_none()
    }

    /// Whether a flush is pending.
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the latest value for this frame, leaving nothing scheduled.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop any pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Bounds how often a continuous gesture asks for a redraw.
#[derive(Debug, Clone)]
pub struct RedrawThrottle {
    interval: Duration,
    last_redraw: Option<Instant>,
    running: bool,
}

impl Default for RedrawThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REDRAW_INTERVAL)
    }
}

impl RedrawThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_redraw: None,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin ticking. The first poll after starting always fires.
    pub fn start(&mut self) {
        self.running = true;
        self.last_redraw = None;
    }

    /// Stop ticking; later polls never fire until restarted.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_redraw = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Called once per frame. Returns true when a redraw is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let due = match self.last_redraw {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_redraw = Some(now);
        }
        due
    }
}
