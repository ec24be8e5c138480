//! Receive-side message-integrity classification.
//!
//! The receiver accepts exactly two payload shapes after trimming: the
//! literal [`HELLO_TEXT`](crate::consts::HELLO_TEXT), or a string of decimal
//! digits and nothing else whose parsed value lies in the countdown range.
//! Everything else — empty lines, stray characters, out-of-range numbers —
//! counts as line corruption.
//!
//! Leading zeros are accepted: "007" parses to 7, and only the parsed value
//! is range-checked. That is a deliberate simplification of the grammar, not
//! a bug, and it is preserved here.
//!
//! ## Example
//!
//! ```rust
//! use optolink::classify::Classifier;
//!
//! let mut classifier = Classifier::new();
//! assert!(classifier.classify("HELLO WORLD"));
//! assert!(classifier.classify("007"));
//! assert!(!classifier.classify("51"));
//! assert_eq!(classifier.corruption_count(), 1);
//! ```

use crate::consts::{COUNTDOWN_MAX, COUNTDOWN_MIN, HELLO_TEXT};

/// Grammar check plus the running corruption counter.
///
/// The counter is monotonically non-decreasing except for the explicit
/// [`reset`](Classifier::reset); it is mutated once per received line and
/// never persists across power cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    corruption_count: u32,
}

impl Classifier {
    /// Creates a classifier with a zero corruption count.
    pub const fn new() -> Self {
        Self { corruption_count: 0 }
    }

    /// Classifies one received line, counting it when corrupt.
    ///
    /// The line is trimmed of surrounding whitespace before the grammar
    /// check, so a carriage return left by a CRLF peer does not corrupt an
    /// otherwise well-formed payload.
    ///
    /// # Returns
    /// `true` when the line is well-formed; `false` when it is corrupt, in
    /// which case the corruption count has been incremented by exactly one.
    pub fn classify(&mut self, line: &str) -> bool {
        let msg = line.trim();
        let valid = msg == HELLO_TEXT || is_count_in_range(msg);
        if !valid {
            self.corruption_count += 1;
        }
        valid
    }

    /// The number of corrupt lines seen since startup or the last reset.
    pub const fn corruption_count(&self) -> u32 {
        self.corruption_count
    }

    /// Sets the corruption count back to zero. Idempotent; no effect on the
    /// grammar.
    pub fn reset(&mut self) {
        self.corruption_count = 0;
    }
}

/// Whether `msg` is one or more decimal digits parsing into the countdown
/// range.
///
/// Digit strings long enough to overflow the parse are rejected the same way
/// out-of-range values are: the parsed value must lie in the range, and an
/// overflowing one cannot.
fn is_count_in_range(msg: &str) -> bool {
    if msg.is_empty() || !msg.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    msg.parse::<u32>()
        .map(|n| (u32::from(COUNTDOWN_MIN)..=u32::from(COUNTDOWN_MAX)).contains(&n))
        .unwrap_or(false)
}
