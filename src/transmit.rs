//! The transmit state machine.
//!
//! The transceiver role runs one of two modes. In `Announce` it sends the
//! literal [`HELLO_TEXT`](crate::consts::HELLO_TEXT) every tick; in
//! `Countdown` it sends a rolling decimal counter between
//! [`COUNTDOWN_MIN`](crate::consts::COUNTDOWN_MIN) and
//! [`COUNTDOWN_MAX`](crate::consts::COUNTDOWN_MAX) inclusive, wrapping back
//! to the minimum past the top. The mode button toggles between the two;
//! either toggle resets the counter.
//!
//! One asymmetry is load-bearing: the toggle that *enters* `Countdown` still
//! announces on its own tick, but the toggle that *exits* `Countdown`
//! short-circuits the tick entirely — no line is sent, and the node skips its
//! pacing delay for that tick.
//!
//! ## Example
//!
//! ```rust
//! use optolink::transmit::{TxMachine, TxMode, TxPayload};
//!
//! let mut machine = TxMachine::new();
//! assert_eq!(machine.step(false), Some(TxPayload::Hello));
//! assert_eq!(machine.step(true), Some(TxPayload::Hello)); // toggle tick still announces
//! assert_eq!(machine.mode(), TxMode::Countdown);
//! assert_eq!(machine.step(false), Some(TxPayload::Count(1)));
//! assert_eq!(machine.step(true), None); // exit short-circuits the tick
//! assert_eq!(machine.mode(), TxMode::Announce);
//! ```

use crate::consts::{COUNTDOWN_MAX, COUNTDOWN_MIN, HELLO_TEXT};
use crate::port::LineBuf;
use core::fmt::Write;

/// Operating mode of the transmit state machine.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum TxMode {
    /// Sends [`HELLO_TEXT`](crate::consts::HELLO_TEXT) every tick. Initial mode.
    #[default]
    Announce,
    /// Sends the rolling counter every tick.
    Countdown,
}

/// One line the transceiver puts on the wire, before formatting.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TxPayload {
    /// The announce literal.
    Hello,
    /// One countdown value.
    Count(u8),
}

impl TxPayload {
    /// Formats the payload as its wire/display text.
    pub fn to_line(self) -> LineBuf {
        let mut line = LineBuf::new();
        match self {
            TxPayload::Hello => {
                let _ = line.write_str(HELLO_TEXT);
            }
            TxPayload::Count(n) => {
                let _ = write!(line, "{}", n);
            }
        }
        line
    }

    /// Text scale the payload is rendered at: countdown values get the
    /// larger emphasis.
    pub const fn text_scale(self) -> u8 {
        match self {
            TxPayload::Hello => 1,
            TxPayload::Count(_) => 2,
        }
    }
}

/// Mode and counter state for the transceiver role.
///
/// Mutated exactly once per tick via [`step`](TxMachine::step). The counter
/// always lies in `[COUNTDOWN_MIN, COUNTDOWN_MAX]`.
#[derive(Debug, Clone, Copy)]
pub struct TxMachine {
    mode: TxMode,
    counter: u8,
}

impl TxMachine {
    /// Creates the machine in `Announce` with the counter at its minimum.
    pub const fn new() -> Self {
        Self {
            mode: TxMode::Announce,
            counter: COUNTDOWN_MIN,
        }
    }

    /// The current operating mode.
    pub const fn mode(&self) -> TxMode {
        self.mode
    }

    /// The value the next `Countdown` tick will send.
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Advances the machine by one tick.
    ///
    /// # Arguments
    /// - `toggle`: whether a debounced mode-button edge was consumed this tick.
    ///
    /// # Returns
    /// The payload to send and render this tick, or `None` when a toggle
    /// exits `Countdown` — that transition short-circuits the tick and the
    /// caller must skip its send, render, and pacing delay.
    pub fn step(&mut self, toggle: bool) -> Option<TxPayload> {
        match self.mode {
            TxMode::Countdown if toggle => {
                self.mode = TxMode::Announce;
                self.counter = COUNTDOWN_MIN;
                None
            }
            TxMode::Announce => {
                if toggle {
                    self.mode = TxMode::Countdown;
                    self.counter = COUNTDOWN_MIN;
                }
                Some(TxPayload::Hello)
            }
            TxMode::Countdown => {
                let value = self.counter;
                self.counter = if value >= COUNTDOWN_MAX {
                    COUNTDOWN_MIN
                } else {
                    value + 1
                };
                Some(TxPayload::Count(value))
            }
        }
    }
}
