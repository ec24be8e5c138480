//! The presentation adapter.
//!
//! Both roles drive a small monochrome display through the [`FrameSink`]
//! seam: cleared frame, positioned text at a chosen scale, atomic flush.
//! Implementors wrap their display driver (the fixture uses a 128×64 OLED);
//! the node only ever talks through this trait.
//!
//! [`render`] is the one drawing routine: a header row with the role name
//! and the current link speed, a body (message or countdown value) at a
//! scale appropriate to its content, and, for the receiver, a footer with
//! the corruption count. It holds no state of its own and is idempotent
//! given identical inputs.

use crate::consts::{BODY_Y, FOOTER_Y, HEADER_Y};
use crate::port::LineBuf;
use core::fmt::Write;

/// A character/bitmap output sink with an addressable grid of at least
/// [`SCREEN_WIDTH`](crate::consts::SCREEN_WIDTH) ×
/// [`SCREEN_HEIGHT`](crate::consts::SCREEN_HEIGHT) units.
///
/// Drawing operations are buffered until [`flush`](FrameSink::flush), which
/// presents the frame atomically. Only [`init`](FrameSink::init) can fail;
/// per the fixture's fail-stop design a node refuses to start without a
/// working display, and every later operation is fire-and-forget.
pub trait FrameSink {
    /// Error produced when the display cannot be brought up.
    type Error;

    /// Brings the panel up. Called once, at node construction; failure is
    /// fatal to the role.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the pending frame.
    fn clear(&mut self);

    /// Moves the text cursor to `(x, y)` in grid units.
    fn set_cursor(&mut self, x: u8, y: u8);

    /// Sets the text magnification for subsequent prints.
    fn set_text_scale(&mut self, scale: u8);

    /// Prints text at the cursor in the current scale.
    fn print(&mut self, text: &str);

    /// Presents the pending frame.
    fn flush(&mut self);
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    /// Role name for the header row.
    pub role: &'a str,
    /// Link speed for the header row.
    pub baud: u32,
    /// Message body.
    pub body: &'a str,
    /// Text scale the body is printed at.
    pub body_scale: u8,
    /// Corruption count for the footer; `None` omits the footer entirely.
    pub corrupt: Option<u32>,
}

/// Draws one complete frame.
///
/// Clears the prior frame, prints the header, body, and optional footer at
/// the fixture's fixed rows, then flushes. Stateless; rendering the same
/// [`Screen`] twice produces identical frames.
pub fn render<D: FrameSink>(display: &mut D, screen: &Screen<'_>) {
    display.clear();

    display.set_text_scale(1);
    display.set_cursor(0, HEADER_Y);
    let mut header = LineBuf::new();
    let _ = write!(header, "{} {}", screen.role, screen.baud);
    display.print(header.as_str());

    display.set_text_scale(screen.body_scale);
    display.set_cursor(0, BODY_Y);
    display.print(screen.body);

    if let Some(count) = screen.corrupt {
        let mut footer = LineBuf::new();
        let _ = write!(footer, "Corrupt Count: {}", count);
        display.set_text_scale(1);
        display.set_cursor(0, FOOTER_Y);
        display.print(footer.as_str());
    }

    display.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every sink operation as a readable line.
    #[derive(Debug, Default)]
    struct RecordingSink {
        ops: Vec<String>,
    }

    impl FrameSink for RecordingSink {
        type Error = ();

        fn init(&mut self) -> Result<(), Self::Error> {
            self.ops.push("init".into());
            Ok(())
        }

        fn clear(&mut self) {
            self.ops.push("clear".into());
        }

        fn set_cursor(&mut self, x: u8, y: u8) {
            self.ops.push(format!("cursor {x},{y}"));
        }

        fn set_text_scale(&mut self, scale: u8) {
            self.ops.push(format!("scale {scale}"));
        }

        fn print(&mut self, text: &str) {
            self.ops.push(format!("print {text}"));
        }

        fn flush(&mut self) {
            self.ops.push("flush".into());
        }
    }

    #[test]
    fn frame_layout_with_footer() {
        let mut sink = RecordingSink::default();
        render(
            &mut sink,
            &Screen {
                role: "Receiver",
                baud: 9_600,
                body: "HELLO WORLD",
                body_scale: 1,
                corrupt: Some(3),
            },
        );

        assert_eq!(
            sink.ops,
            vec![
                "clear",
                "scale 1",
                "cursor 0,0",
                "print Receiver 9600",
                "scale 1",
                "cursor 0,20",
                "print HELLO WORLD",
                "scale 1",
                "cursor 0,54",
                "print Corrupt Count: 3",
                "flush",
            ]
        );
    }

    #[test]
    fn countdown_body_uses_the_larger_scale_without_footer() {
        let mut sink = RecordingSink::default();
        render(
            &mut sink,
            &Screen {
                role: "Transceiver",
                baud: 115_200,
                body: "42",
                body_scale: 2,
                corrupt: None,
            },
        );

        assert_eq!(
            sink.ops,
            vec![
                "clear",
                "scale 1",
                "cursor 0,0",
                "print Transceiver 115200",
                "scale 2",
                "cursor 0,20",
                "print 42",
                "flush",
            ]
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let screen = Screen {
            role: "Receiver",
            baud: 38_400,
            body: "17",
            body_scale: 1,
            corrupt: Some(0),
        };
        let mut sink = RecordingSink::default();
        render(&mut sink, &screen);
        let first = sink.ops.clone();
        render(&mut sink, &screen);
        assert_eq!(sink.ops[first.len()..], first[..]);
    }
}
