//! Timer and listener bookkeeping shared by the DOM binding.

use std::time::Duration;

/// Milliseconds to pass to `setTimeout` so the callback runs no earlier
/// than `delay` from now.
///
/// Rounds up: a timer that fires a fraction of a millisecond early finds
/// the reflow not yet due.
pub fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_micros().div_ceil(1000)).unwrap_or(i32::MAX)
}

/// What to do with the document move/release listeners after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Attach,
    Detach,
    Keep,
}

/// Document listeners exist exactly while a drag is running.
pub fn listener_change(dragging: bool, attached: bool) -> ListenerChange {
    match (dragging, attached) {
        (true, false) => ListenerChange::Attach,
        (false, true) => ListenerChange::Detach,
        _ => ListenerChange::Keep,
    }
}
