//! The shared role runner.
//!
//! The two fixtures are structurally near-duplicates: both poll two buttons
//! through debouncers, both cycle the same baud table, both render through
//! the same frame layout. [`Node`] owns that shared machinery once; only the
//! per-tick action differs, and it lives in the [`RoleState`] enum —
//! [`TxMachine`] for the transceiver, [`Classifier`] for the receiver.
//!
//! One [`tick`](Node::tick) runs one iteration of the cooperative polling
//! loop, in a load-bearing order: button sampling first, then baud/mode
//! transitions, then the role's transmit-or-receive action, then rendering.
//! Baud changes must apply before this tick's send or receive, and the
//! display must reflect post-transition state.
//!
//! Nothing here suspends except the transceiver's fixed pacing delay after a
//! send, which blocks the whole node for its duration: a button pressed
//! during it is detected late on the next iteration at best. That is an
//! accepted limitation of the single-threaded fixture.

use crate::baud::BaudSelector;
use crate::classify::Classifier;
use crate::consts::{
    CHANGING_BAUD_TEXT, HELLO_TEXT, PACING_DELAY_MS, READY_TEXT, RECEIVER_NAME, RESET_TEXT,
    STARTUP_SETTLE_MS, TRANSCEIVER_NAME, WAITING_TEXT,
};
use crate::debounce::Debouncer;
use crate::display::{FrameSink, Screen, render};
use crate::error::NodeError;
use crate::port::LinkPort;
use crate::transmit::TxMachine;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// The role-specific half of a node's state.
#[derive(Debug)]
pub enum RoleState {
    /// Emits lines: the announce literal or the rolling countdown.
    Transceiver(TxMachine),
    /// Classifies incoming lines and tracks the corruption count.
    Receiver(Classifier),
}

/// One runtime instance of the demo link, either role.
///
/// Owns its port, display, buttons, debounce state, baud selector, and role
/// state exclusively; the only thing shared with the peer node is the wire.
///
/// Button semantics: button A is the mode toggle (transceiver) or the
/// corruption-count reset (receiver); button B cycles the baud rate on both
/// roles. Both are read active-low.
#[derive(Debug)]
pub struct Node<PORT, DISP, A, B>
where
    PORT: LinkPort,
    DISP: FrameSink,
    A: InputPin,
    B: InputPin,
{
    /// The serial channel.
    pub port: PORT,
    /// The frame sink.
    pub display: DISP,
    /// Mode-toggle (transceiver) or count-reset (receiver) button.
    pub btn_a: A,
    /// Baud-cycle button.
    pub btn_b: B,
    deb_a: Debouncer,
    deb_b: Debouncer,
    baud: BaudSelector,
    role: RoleState,
}

impl<PORT, DISP, A, B> Node<PORT, DISP, A, B>
where
    PORT: LinkPort,
    DISP: FrameSink,
    A: InputPin,
    B: InputPin,
{
    /// Builds the transmitting node.
    ///
    /// Opens the port at the first table speed, settles, brings the display
    /// up, and renders the initial announce frame.
    ///
    /// # Errors
    /// [`NodeError::DisplayInit`] when the display will not come up; the
    /// role is fail-stop without one.
    pub fn transceiver<D: DelayNs>(
        port: PORT,
        display: DISP,
        btn_a: A,
        btn_b: B,
        delay: &mut D,
    ) -> Result<Self, NodeError<DISP::Error>> {
        Self::start(
            port,
            display,
            btn_a,
            btn_b,
            delay,
            RoleState::Transceiver(TxMachine::new()),
        )
    }

    /// Builds the receiving node.
    ///
    /// Like [`transceiver`](Self::transceiver), but announces readiness on
    /// the port and renders the waiting frame instead.
    ///
    /// # Errors
    /// [`NodeError::DisplayInit`] when the display will not come up.
    pub fn receiver<D: DelayNs>(
        port: PORT,
        display: DISP,
        btn_a: A,
        btn_b: B,
        delay: &mut D,
    ) -> Result<Self, NodeError<DISP::Error>> {
        Self::start(
            port,
            display,
            btn_a,
            btn_b,
            delay,
            RoleState::Receiver(Classifier::new()),
        )
    }

    fn start<D: DelayNs>(
        mut port: PORT,
        mut display: DISP,
        btn_a: A,
        btn_b: B,
        delay: &mut D,
        role: RoleState,
    ) -> Result<Self, NodeError<DISP::Error>> {
        let baud = BaudSelector::new();

        // The fixture never checked its initial open either; a port that
        // will not come up leaves the link dead until power-cycle.
        let _ = port.open(baud.current());
        delay.delay_ms(STARTUP_SETTLE_MS);
        if let RoleState::Receiver(_) = role {
            port.write_line(READY_TEXT);
        }

        display.init().map_err(NodeError::DisplayInit)?;

        let mut node = Self {
            port,
            display,
            btn_a,
            btn_b,
            deb_a: Debouncer::new(),
            deb_b: Debouncer::new(),
            baud,
            role,
        };

        let body = match node.role {
            RoleState::Transceiver(_) => HELLO_TEXT,
            RoleState::Receiver(_) => WAITING_TEXT,
        };
        let screen = Screen {
            role: node.role_name(),
            baud: node.baud.current(),
            body,
            body_scale: 1,
            corrupt: None,
        };
        render(&mut node.display, &screen);

        Ok(node)
    }

    /// The speed the node's channel is configured for.
    pub const fn baud(&self) -> u32 {
        self.baud.current()
    }

    /// The role-specific half of the node's state, for inspection.
    pub const fn role_state(&self) -> &RoleState {
        &self.role
    }

    const fn role_name(&self) -> &'static str {
        match self.role {
            RoleState::Transceiver(_) => TRANSCEIVER_NAME,
            RoleState::Receiver(_) => RECEIVER_NAME,
        }
    }

    /// Runs one iteration of the polling loop.
    ///
    /// # Arguments
    /// - `now_ms`: monotonic milliseconds, injected so debounce windows are
    ///   testable without wall-clock waiting.
    /// - `delay`: provider for the pacing and baud-settle delays.
    ///
    /// Order within the tick is fixed: buttons, then baud/mode transitions,
    /// then the per-tick transmit-or-receive action, then rendering. A pin
    /// read error degrades to "not pressed" for that sample; the debouncer
    /// absorbs the transient.
    pub fn tick<D: DelayNs>(&mut self, now_ms: u32, delay: &mut D) {
        let edge_a = self.deb_a.sample(&mut self.btn_a, now_ms).unwrap_or(false);
        let edge_b = self.deb_b.sample(&mut self.btn_b, now_ms).unwrap_or(false);

        if edge_b {
            let role = self.role_name();
            let baud = self.baud.advance(&mut self.port, delay);
            render(
                &mut self.display,
                &Screen {
                    role,
                    baud,
                    body: CHANGING_BAUD_TEXT,
                    body_scale: 1,
                    corrupt: None,
                },
            );
        }

        match &mut self.role {
            RoleState::Transceiver(machine) => {
                if let Some(payload) = machine.step(edge_a) {
                    let line = payload.to_line();
                    self.port.write_line(line.as_str());
                    render(
                        &mut self.display,
                        &Screen {
                            role: TRANSCEIVER_NAME,
                            baud: self.baud.current(),
                            body: line.as_str(),
                            body_scale: payload.text_scale(),
                            corrupt: None,
                        },
                    );
                    delay.delay_ms(PACING_DELAY_MS);
                }
            }
            RoleState::Receiver(classifier) => {
                if edge_a {
                    classifier.reset();
                    self.port.write_line(RESET_TEXT);
                }
                match self.port.read_line() {
                    Ok(line) => {
                        let msg = line.trim();
                        let valid = classifier.classify(msg);
                        if !valid {
                            #[cfg(feature = "log")]
                            log::warn!(
                                "corrupt line {:?} (count {})",
                                msg,
                                classifier.corruption_count()
                            );
                            #[cfg(feature = "defmt-0-3")]
                            defmt::warn!(
                                "corrupt line {=str} (count {=u32})",
                                msg,
                                classifier.corruption_count()
                            );
                        }
                        render(
                            &mut self.display,
                            &Screen {
                                role: RECEIVER_NAME,
                                baud: self.baud.current(),
                                body: msg,
                                body_scale: 1,
                                corrupt: Some(classifier.corruption_count()),
                            },
                        );
                    }
                    Err(nb::Error::WouldBlock) => {}
                    // Transport faults are an accepted risk of the fixture.
                    Err(nb::Error::Other(_)) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BAUD_CHANGED_TEXT;
    use crate::port::LineBuf;
    use crate::transmit::TxMode;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    struct ScriptPort {
        baud: Option<u32>,
        written: Vec<String>,
        rx: VecDeque<String>,
    }

    impl ScriptPort {
        fn with_rx(lines: &[&str]) -> Self {
            Self {
                rx: lines.iter().map(|l| l.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl LinkPort for ScriptPort {
        type Error = core::convert::Infallible;

        fn open(&mut self, baud: u32) -> Result<(), Self::Error> {
            self.baud = Some(baud);
            Ok(())
        }

        fn close(&mut self) {
            self.baud = None;
        }

        fn write_line(&mut self, line: &str) {
            self.written.push(line.into());
        }

        fn read_line(&mut self) -> nb::Result<LineBuf, Self::Error> {
            self.rx.pop_front().ok_or(nb::Error::WouldBlock)
        }
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        ops: Vec<String>,
        fail_init: bool,
    }

    impl FrameSink for RecordingSink {
        type Error = u8;

        fn init(&mut self) -> Result<(), Self::Error> {
            if self.fail_init {
                return Err(7);
            }
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

    fn idle_pin(samples: usize) -> PinMock {
        PinMock::new(&vec![PinTransaction::get(PinState::High); samples])
    }

    fn held_pin(samples: usize) -> PinMock {
        PinMock::new(&vec![PinTransaction::get(PinState::Low); samples])
    }

    fn corruption_count(node: &Node<ScriptPort, RecordingSink, PinMock, PinMock>) -> u32 {
        match node.role_state() {
            RoleState::Receiver(classifier) => classifier.corruption_count(),
            RoleState::Transceiver(_) => panic!("not a receiver"),
        }
    }

    #[test]
    fn display_init_failure_is_fatal() {
        let sink = RecordingSink {
            fail_init: true,
            ..RecordingSink::default()
        };
        let mut delay = NoopDelay::new();
        let btn_a = idle_pin(0);
        let btn_b = idle_pin(0);
        let mut btn_a_handle = btn_a.clone();
        let mut btn_b_handle = btn_b.clone();
        let result = Node::receiver(ScriptPort::default(), sink, btn_a, btn_b, &mut delay);
        assert_eq!(result.unwrap_err(), NodeError::DisplayInit(7));
        btn_a_handle.done();
        btn_b_handle.done();
    }

    #[test]
    fn receiver_startup_announces_and_waits() {
        let mut delay = NoopDelay::new();
        let mut node = Node::receiver(
            ScriptPort::default(),
            RecordingSink::default(),
            idle_pin(0),
            idle_pin(0),
            &mut delay,
        )
        .unwrap();

        assert_eq!(node.port.baud, Some(9_600));
        assert_eq!(node.port.written, vec![READY_TEXT.to_string()]);
        assert!(node.display.ops.contains(&"print Receiver 9600".to_string()));
        assert!(node.display.ops.contains(&"print Waiting...".to_string()));
        node.btn_a.done();
        node.btn_b.done();
    }

    #[test]
    fn receiver_accepts_hello_world() {
        let mut delay = NoopDelay::new();
        let mut node = Node::receiver(
            ScriptPort::with_rx(&["HELLO WORLD"]),
            RecordingSink::default(),
            idle_pin(1),
            idle_pin(1),
            &mut delay,
        )
        .unwrap();

        node.tick(0, &mut delay);

        assert_eq!(corruption_count(&node), 0);
        assert!(node.display.ops.contains(&"print HELLO WORLD".to_string()));
        assert!(node.display.ops.contains(&"print Corrupt Count: 0".to_string()));
        node.btn_a.done();
        node.btn_b.done();
    }

    #[test]
    fn receiver_counts_an_out_of_range_number() {
        let mut delay = NoopDelay::new();
        let mut node = Node::receiver(
            ScriptPort::with_rx(&["51"]),
            RecordingSink::default(),
            idle_pin(1),
            idle_pin(1),
            &mut delay,
        )
        .unwrap();

        node.tick(0, &mut delay);

        assert_eq!(corruption_count(&node), 1);
        assert!(node.display.ops.contains(&"print Corrupt Count: 1".to_string()));
        node.btn_a.done();
        node.btn_b.done();
    }

    #[test]
    fn reset_edge_zeroes_the_count_and_confirms() {
        let mut delay = NoopDelay::new();
        let mut node = Node::receiver(
            ScriptPort::with_rx(&["garbage"]),
            RecordingSink::default(),
            held_pin(2),
            idle_pin(2),
            &mut delay,
        )
        .unwrap();

        node.tick(0, &mut delay); // corrupt line lands, press starts debouncing
        assert_eq!(corruption_count(&node), 1);

        node.tick(60, &mut delay); // debounced edge fires
        assert_eq!(corruption_count(&node), 0);
        assert!(node.port.written.contains(&RESET_TEXT.to_string()));
        node.btn_a.done();
        node.btn_b.done();
    }

    #[test]
    fn transceiver_announces_once_per_tick() {
        let mut delay = NoopDelay::new();
        let mut node = Node::transceiver(
            ScriptPort::default(),
            RecordingSink::default(),
            idle_pin(2),
            idle_pin(2),
            &mut delay,
        )
        .unwrap();

        node.tick(0, &mut delay);
        node.tick(10, &mut delay);

        assert_eq!(
            node.port.written,
            vec![HELLO_TEXT.to_string(), HELLO_TEXT.to_string()]
        );
        assert!(node.display.ops.contains(&"print HELLO WORLD".to_string()));
        node.btn_a.done();
        node.btn_b.done();
    }

    #[test]
    fn mode_edge_enters_countdown_on_the_announce_tick() {
        let mut delay = NoopDelay::new();
        let mut node = Node::transceiver(
            ScriptPort::default(),
            RecordingSink::default(),
            held_pin(3),
            idle_pin(3),
            &mut delay,
        )
        .unwrap();

        node.tick(0, &mut delay); // press lands, still announcing
        node.tick(60, &mut delay); // edge: announces once more, switches mode
        node.tick(70, &mut delay); // first countdown tick

        assert_eq!(
            node.port.written,
            vec![
                HELLO_TEXT.to_string(),
                HELLO_TEXT.to_string(),
                "1".to_string()
            ]
        );
        match node.role_state() {
            RoleState::Transceiver(machine) => assert_eq!(machine.mode(), TxMode::Countdown),
            RoleState::Receiver(_) => panic!("not a transceiver"),
        }
        assert!(node.display.ops.contains(&"scale 2".to_string()));
        node.btn_a.done();
        node.btn_b.done();
    }

    #[test]
    fn baud_edge_recycles_the_port_before_the_send() {
        let mut delay = NoopDelay::new();
        let mut node = Node::transceiver(
            ScriptPort::default(),
            RecordingSink::default(),
            idle_pin(2),
            held_pin(2),
            &mut delay,
        )
        .unwrap();

        node.tick(0, &mut delay);
        node.tick(60, &mut delay); // baud edge fires

        assert_eq!(node.baud(), 19_200);
        assert_eq!(node.port.baud, Some(19_200));
        assert!(node.display.ops.contains(&"print Changing baud...".to_string()));
        assert!(node.display.ops.contains(&"print Transceiver 19200".to_string()));
        // The confirmation went out on the new channel, before this tick's send.
        assert_eq!(
            node.port.written,
            vec![
                HELLO_TEXT.to_string(),
                BAUD_CHANGED_TEXT.to_string(),
                HELLO_TEXT.to_string()
            ]
        );
        node.btn_a.done();
        node.btn_b.done();
    }
}
