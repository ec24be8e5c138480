//! Constants shared by both link roles.
//!
//! This module collects the fixed parameters of the demo link: the baud-rate
//! table both nodes cycle through, the button debounce window, the pacing and
//! settle delays, the countdown range, the message literals that travel over
//! the wire, and the display geometry.
//!
//! The two roles must agree on [`BAUD_RATES`] and on the accepted message
//! grammar ([`HELLO_TEXT`] and the [`COUNTDOWN_MIN`]..=[`COUNTDOWN_MAX`]
//! range); everything else is local to a node.

/// Candidate link speeds, cycled in this fixed order by both roles.
///
/// Each node advances through this table independently; nothing on the wire
/// negotiates a change, so the operator keeps the two ends in sync by
/// pressing the baud button on both fixtures.
pub const BAUD_RATES: [u32; 6] = [9_600, 19_200, 38_400, 57_600, 115_200, 230_400];

/// Minimum time (milliseconds) a raw button level must hold steady before
/// the debouncer trusts it.
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Delay after each transmitted line, in milliseconds.
///
/// This is the system's only throttle: the transceiver blocks for this long
/// after every send, so the line rate is roughly one message per second.
pub const PACING_DELAY_MS: u32 = 1_000;

/// Settle time around a serial close/reopen, in milliseconds.
///
/// Changing the active speed while a byte is mid-frame corrupts that byte;
/// the close/settle/reopen/settle sequence in
/// [`BaudSelector::advance`](crate::baud::BaudSelector::advance) exists to
/// avoid that race.
pub const BAUD_SETTLE_MS: u32 = 10;

/// Settle time after the initial port open at startup, in milliseconds.
pub const STARTUP_SETTLE_MS: u32 = 100;

/// Lowest countdown value; the counter wraps back to this after
/// [`COUNTDOWN_MAX`].
pub const COUNTDOWN_MIN: u8 = 1;

/// Highest countdown value sent before the counter wraps.
pub const COUNTDOWN_MAX: u8 = 50;

/// The announce-mode payload, and the one non-numeric line the receiver
/// accepts as well-formed.
pub const HELLO_TEXT: &str = "HELLO WORLD";

/// Confirmation line emitted on the new channel after a baud change.
pub const BAUD_CHANGED_TEXT: &str = "Baud rate changed.";

/// Display body shown while the serial channel is being reopened.
pub const CHANGING_BAUD_TEXT: &str = "Changing baud...";

/// Line emitted by the receiver when the corruption counter is reset.
pub const RESET_TEXT: &str = "Corruption count reset!";

/// Line emitted by the receiver once its port is open at startup.
pub const READY_TEXT: &str = "Receiver Ready";

/// Display body shown by the receiver before the first line arrives.
pub const WAITING_TEXT: &str = "Waiting...";

/// Header role name for the transmitting fixture.
pub const TRANSCEIVER_NAME: &str = "Transceiver";

/// Header role name for the receiving fixture.
pub const RECEIVER_NAME: &str = "Receiver";

/// Capacity (bytes) of a received or rendered line buffer.
///
/// Well-formed payloads are at most eleven bytes; anything long enough to
/// overflow this is already outside the grammar, so the excess is dropped.
pub const MAX_LINE_LEN: u8 = 64;

/// See [`MAX_LINE_LEN`].
pub const MAX_LINE_LEN_USIZE: usize = MAX_LINE_LEN as usize;

/// Width of the addressable display grid, in pixels.
pub const SCREEN_WIDTH: u8 = 128;

/// Height of the addressable display grid, in pixels.
pub const SCREEN_HEIGHT: u8 = 64;

/// Cursor row of the role/baud header line.
pub const HEADER_Y: u8 = 0;

/// Cursor row of the message body.
pub const BODY_Y: u8 = 20;

/// Cursor row of the receiver's corruption-count footer.
pub const FOOTER_Y: u8 = 54;
