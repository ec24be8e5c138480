//! The serial-channel seam.
//!
//! The link carries plain text, one message per line, terminated by a line
//! feed; there is no framing, checksum, or length prefix. [`LinkPort`] is the
//! trait the node drives: implementors wrap their platform's UART and provide
//! open-at-baud, close, fire-and-forget line writes, and a non-blocking line
//! read in the [`nb`] style.
//!
//! [`LineAccumulator`] is a helper for implementors whose UART hands over
//! bytes: it collects them into [`LineBuf`]s, one per line feed.
//!
//! The wire has no flow control, acknowledgment, or backpressure; a node
//! producing lines faster than its peer consumes them will drop or interleave
//! lines at the transport. That is an accepted limitation of the fixture.

use crate::consts::MAX_LINE_LEN_USIZE;

#[cfg(not(feature = "std"))]
use heapless::String;
#[cfg(feature = "std")]
use std::string::String;

/// One line of link text, without its terminating line feed.
#[cfg(not(feature = "std"))]
pub type LineBuf = String<MAX_LINE_LEN_USIZE>;

/// One line of link text, without its terminating line feed.
#[cfg(feature = "std")]
pub type LineBuf = String;

/// A reopenable, line-oriented serial channel.
///
/// The node treats the port exactly the way the fixture treats its UART:
/// writes are fire-and-forget (a failed write is not detected, there is no
/// acknowledgment to check), and reads are polled once per tick. Only
/// [`open`](LinkPort::open) can report failure, and the node deliberately
/// does nothing with it beyond an optional log line; a channel that cannot
/// be reopened leaves the link down until power-cycle.
pub trait LinkPort {
    /// Error produced when the channel cannot be (re)opened.
    type Error;

    /// Opens the channel at the given speed. All subsequent writes use it.
    fn open(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Closes the channel, flushing nothing; bytes in flight are lost.
    fn close(&mut self);

    /// Queues one line for transmission, appending the line feed.
    ///
    /// Fire-and-forget: implementors must not block on the peer, and the
    /// node never learns whether the line made it out.
    fn write_line(&mut self, line: &str);

    /// Polls for a complete received line.
    ///
    /// # Errors
    /// [`nb::Error::WouldBlock`] until a full line-feed-terminated line has
    /// arrived; [`nb::Error::Other`] for transport faults, which the node
    /// ignores. The returned line excludes the terminator.
    fn read_line(&mut self) -> nb::Result<LineBuf, Self::Error>;
}

/// Collects raw UART bytes into lines for [`LinkPort`] implementors.
///
/// Bytes accumulate until a line feed, at which point the finished line is
/// handed back and the buffer restarts. Carriage returns are dropped, so
/// CRLF peers work unchanged. Once the buffer is full, further bytes of the
/// same line are dropped; a line that long is already outside the accepted
/// grammar, so truncation can only turn garbage into shorter garbage.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buf: LineBuf,
}

impl LineAccumulator {
    /// Creates an empty accumulator.
    pub const fn new() -> Self {
        Self { buf: LineBuf::new() }
    }

    /// Feeds one received byte.
    ///
    /// # Returns
    /// The completed line when `byte` is a line feed, `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<LineBuf> {
        match byte {
            b'\n' => Some(core::mem::take(&mut self.buf)),
            b'\r' => None,
            _ => {
                if self.buf.len() < MAX_LINE_LEN_USIZE {
                    let _ = self.buf.push(byte as char);
                }
                None
            }
        }
    }
}
