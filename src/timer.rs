//! Tick-loop helper for nodes without a scheduler.
//!
//! The node itself is just a [`tick`](crate::node::Node::tick) function; how
//! often it runs is the caller's business. Firmware with its own scheduler
//! or timer calls `tick` from there. Single-purpose polling firmware can use
//! [`run_node_loop`] instead: a blocking loop that ticks forever, reading
//! the injected millisecond clock each iteration.
//!
//! The clock is a closure rather than a hardware read so that the loop works
//! the same against a real monotonic counter or a simulated one.

use crate::display::FrameSink;
use crate::node::Node;
use crate::port::LinkPort;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Runs a node's polling loop forever.
///
/// # Arguments
/// - `node`: the role instance to drive.
/// - `delay`: provider for the node's pacing and settle delays, typically
///   from the HAL.
/// - `now_ms`: monotonic millisecond clock, read once per iteration.
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose polling
///   firmware.
/// - The loop adds no pacing of its own: the transceiver throttles itself
///   through its per-send pacing delay, and the receiver spins polling its
///   port, which matches the fixture's behavior.
pub fn run_node_loop<PORT, DISP, A, B, D, F>(
    node: &mut Node<PORT, DISP, A, B>,
    delay: &mut D,
    mut now_ms: F,
) -> !
where
    PORT: LinkPort,
    DISP: FrameSink,
    A: InputPin,
    B: InputPin,
    D: DelayNs,
    F: FnMut() -> u32,
{
    loop {
        node.tick(now_ms(), delay);
    }
}
