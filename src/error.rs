//! Fatal startup faults.
//!
//! The fixture's error taxonomy is deliberately thin. Corrupt lines are
//! counted, not raised; a serial reopen failure is undetected and leaves the
//! link dead until power-cycle. The one condition modeled as an error is a
//! display that will not initialize: the demo is meaningless without visible
//! output, so the role fail-stops instead of running headless.

use thiserror::Error;

/// Faults that prevent a node from starting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError<E> {
    /// The display did not come up. The role halts before its first tick;
    /// there is no retry and no degraded mode.
    #[error("display initialization failed")]
    DisplayInit(E),
}
