//! Button debouncing.
//!
//! Mechanical buttons bounce: a single physical press shows up on the pin as
//! a burst of transitions before the level settles. [`Debouncer`] turns that
//! noisy level into at most one logical edge per press by requiring the raw
//! level to hold steady for the full
//! [`DEBOUNCE_WINDOW_MS`](crate::consts::DEBOUNCE_WINDOW_MS) window before it
//! is trusted. Any transition re-arms the window, so arbitrarily ugly bounce
//! patterns still produce exactly one edge.
//!
//! Time is injected by the caller as monotonic milliseconds rather than read
//! from a hardware clock, which keeps the window testable without waiting on
//! wall time. Arithmetic is wrapping, so a `u32` millisecond counter rolling
//! over is harmless.
//!
//! ## Example
//!
//! ```rust
//! use optolink::debounce::Debouncer;
//!
//! let mut button = Debouncer::new();
//! assert!(!button.observe(true, 0)); // press lands, window starts
//! assert!(!button.observe(true, 30)); // still inside the window
//! assert!(button.observe(true, 60)); // stable past the window: one edge
//! assert!(!button.observe(true, 90)); // held, no repeat
//! ```

use crate::consts::DEBOUNCE_WINDOW_MS;
use embedded_hal::digital::InputPin;

/// Debounce state for one physical button.
///
/// One instance per button per node. Created at startup, fed once per tick,
/// never torn down. The pressed level is active-low on the fixture, but
/// [`observe`](Debouncer::observe) only sees the already-decoded `pressed`
/// boolean; [`sample`](Debouncer::sample) does the active-low read.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    /// Raw level seen on the previous observation, `true` = pressed.
    last_raw: bool,
    /// Timestamp of the last raw transition; the stability window restarts
    /// here on every bounce.
    last_change_ms: u32,
    /// Set once an edge has been reported for the current press, cleared on
    /// release, so holding the button yields exactly one edge.
    reported: bool,
}

impl Debouncer {
    /// Creates a debouncer with the line assumed released.
    pub const fn new() -> Self {
        Self {
            last_raw: false,
            last_change_ms: 0,
            reported: false,
        }
    }

    /// Feeds one raw sample and reports whether a press edge fired.
    ///
    /// # Arguments
    /// - `pressed`: the raw sampled level, `true` when the line reads active.
    /// - `now_ms`: caller-supplied monotonic milliseconds.
    ///
    /// # Returns
    /// `true` exactly once per physical press: on the first sample where the
    /// pressed level has held steady for longer than the debounce window.
    /// Returns to the released level clear the press so the next one can
    /// fire again.
    pub fn observe(&mut self, pressed: bool, now_ms: u32) -> bool {
        if pressed != self.last_raw {
            self.last_change_ms = now_ms;
            self.last_raw = pressed;
        }

        let mut edge = false;
        if now_ms.wrapping_sub(self.last_change_ms) > DEBOUNCE_WINDOW_MS && pressed && !self.reported
        {
            self.reported = true;
            edge = true;
        }
        if !pressed {
            self.reported = false;
        }
        edge
    }

    /// Reads an active-low pin and feeds the sample to [`observe`](Self::observe).
    ///
    /// # Errors
    /// Propagates the pin's read error; callers on fixtures where pin reads
    /// cannot fail may treat an error as "not pressed" for that sample.
    pub fn sample<P: InputPin>(&mut self, pin: &mut P, now_ms: u32) -> Result<bool, P::Error> {
        let pressed = pin.is_low()?;
        Ok(self.observe(pressed, now_ms))
    }
}
