//! Baud-rate cycling.
//!
//! Both roles hold the same ordered table of candidate speeds
//! ([`BAUD_RATES`]) and a current index. A press of the baud button advances
//! the index modulo the table length and restarts the serial channel at the
//! new speed. Nothing on the wire coordinates the change: the peer's operator
//! presses the same button to keep the ends in sync.
//!
//! The restart is close → settle → reopen → settle → confirmation line.
//! Reconfiguring the UART while it is framing a byte corrupts that byte, so
//! the channel must be fully closed and given
//! [`BAUD_SETTLE_MS`](crate::consts::BAUD_SETTLE_MS) to drain before the
//! reopen, and the same again before the first write at the new speed.

use crate::consts::{BAUD_CHANGED_TEXT, BAUD_RATES, BAUD_SETTLE_MS};
use crate::port::LinkPort;
use embedded_hal::delay::DelayNs;

/// Index into the shared [`BAUD_RATES`] table.
///
/// The index always stays in range; [`advance`](BaudSelector::advance) wraps
/// it modulo the table length, so cycling through the whole table is a pure
/// rotation back to the starting speed.
#[derive(Debug, Clone, Copy)]
pub struct BaudSelector {
    index: usize,
}

impl BaudSelector {
    /// Creates a selector at the first (slowest) table entry.
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// The speed the channel is configured for.
    pub const fn current(&self) -> u32 {
        BAUD_RATES[self.index]
    }

    /// Advances to the next speed and restarts the channel at it.
    ///
    /// Closes the channel, waits for the UART to settle, reopens at the new
    /// speed, waits again, then emits [`BAUD_CHANGED_TEXT`] on the new
    /// channel. After this returns, all subsequent writes use the new speed.
    ///
    /// A reopen failure is not retried or rolled back: the fixture is left
    /// without a working link until power-cycled. The failure is surfaced
    /// through the optional log facade and nowhere else.
    ///
    /// # Returns
    /// The new speed, equal to [`current`](Self::current).
    pub fn advance<P: LinkPort, D: DelayNs>(&mut self, port: &mut P, delay: &mut D) -> u32 {
        self.index = (self.index + 1) % BAUD_RATES.len();
        let baud = BAUD_RATES[self.index];

        port.close();
        delay.delay_ms(BAUD_SETTLE_MS);
        if port.open(baud).is_err() {
            #[cfg(feature = "log")]
            log::error!("serial reopen at {} baud failed; link is down until power-cycle", baud);
            #[cfg(feature = "defmt-0-3")]
            defmt::error!(
                "serial reopen at {=u32} baud failed; link is down until power-cycle",
                baud
            );
        }
        delay.delay_ms(BAUD_SETTLE_MS);
        port.write_line(BAUD_CHANGED_TEXT);

        baud
    }
}
