//! # optolink
//!
//! A portable, no_std core for a two-node fiber-optic serial demo link: one
//! node (the transceiver) emits either a fixed announce string or a rolling
//! countdown over a serial line, the other (the receiver) classifies each
//! incoming line as well-formed or corrupted and keeps a running corruption
//! count. Both nodes drive a small local display and take two debounced
//! button inputs: a mode-toggle/reset action and a baud-rate cycle.
//!
//! This crate is the state machine, not the board support: buttons arrive as
//! `embedded-hal` input pins, delays as `embedded-hal` delay providers, and
//! the serial channel and display are traits ([`port::LinkPort`],
//! [`display::FrameSink`]) the firmware implements over its HAL. Time is
//! injected as monotonic milliseconds, so debounce windows and pacing are
//! testable without wall-clock waiting.
//!
//! ## Crate features
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | Disables `#![no_std]` support and replaces `heapless` line buffers with `std` strings |
//! | `defmt-0-3` | Uses `defmt` logging |
//! | `log`       | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **Debounced buttons**: one clean edge per physical press, any bounce
//!   pattern, injected clock
//! - **Baud cycling** over a fixed shared table with a race-free
//!   close/settle/reopen/settle channel restart
//! - **Transmit state machine**: announce / countdown modes, counter
//!   wrapping 50 → 1, toggle-out short-circuit
//! - **Receive classifier**: strict line grammar, corruption counting,
//!   idempotent reset
//! - One reusable [`node::Node`] runner shared by both roles
//!
//! ## Usage
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use optolink::port::{LineBuf, LinkPort};
//! # use optolink::display::FrameSink;
//! # #[derive(Debug, Default)]
//! # struct Uart(Vec<String>);
//! # impl LinkPort for Uart {
//! #     type Error = core::convert::Infallible;
//! #     fn open(&mut self, _baud: u32) -> Result<(), Self::Error> { Ok(()) }
//! #     fn close(&mut self) {}
//! #     fn write_line(&mut self, line: &str) { self.0.push(line.into()); }
//! #     fn read_line(&mut self) -> nb::Result<LineBuf, Self::Error> { Err(nb::Error::WouldBlock) }
//! # }
//! # #[derive(Debug, Default)]
//! # struct Oled;
//! # impl FrameSink for Oled {
//! #     type Error = core::convert::Infallible;
//! #     fn init(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn clear(&mut self) {}
//! #     fn set_cursor(&mut self, _x: u8, _y: u8) {}
//! #     fn set_text_scale(&mut self, _scale: u8) {}
//! #     fn print(&mut self, _text: &str) {}
//! #     fn flush(&mut self) {}
//! # }
//! use optolink::node::Node;
//!
//! # let btn_mode = Pin::new(&[PinTransaction::get(PinState::High)]);
//! # let btn_baud = Pin::new(&[PinTransaction::get(PinState::High)]);
//! # let mut delay = NoopDelay::new();
//! let mut node = Node::transceiver(Uart::default(), Oled, btn_mode, btn_baud, &mut delay)
//!     .expect("display failed to initialize");
//!
//! node.tick(0, &mut delay); // call once per loop iteration with monotonic millis
//! # assert_eq!(node.port.0, vec!["HELLO WORLD".to_string()]);
//! # node.btn_a.done();
//! # node.btn_b.done();
//! ```
//!
//! Or, hand the loop over entirely with a clock closure:
//!
//! ```rust,ignore
//! optolink::timer::run_node_loop(&mut node, &mut delay, || timer.millis());
//! ```
//!
//! ## Integration Notes
//!
//! - The transceiver blocks for its 1000 ms pacing delay after every send;
//!   buttons are not serviced during it. A press shorter than one loop
//!   iteration can be missed. This is the fixture's accepted limitation.
//! - The two nodes never negotiate a baud change over the wire; cycle both
//!   ends by hand to keep the link up.
//! - A serial channel that fails to reopen after a baud change stays down
//!   until power-cycle; only the optional log facade hears about it.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod baud;
pub mod classify;
pub mod consts;
pub mod debounce;
pub mod display;
pub mod error;
pub mod node;
pub mod port;
pub mod timer;
pub mod transmit;
