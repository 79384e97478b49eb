//! Daily capacity limiting.
//!
//! Orders bundled signals by severity rank, then score, and truncates to
//! the configured capacity. The sort is a stable sort with an explicit
//! total order: NaN scores go to the end so a degenerate score can never
//! float to the top, and ties of identical severity and score keep their
//! input-relative order.

use std::cmp::Ordering;

use crate::bundle::BundledSignal;

/// Default number of signals a reviewer gets per run.
pub const DEFAULT_CAPACITY: usize = 12;

/// Sort by (severity desc, score desc) and cut to `capacity`.
///
/// Returns the kept signals and the overflow count.
pub fn select(mut signals: Vec<BundledSignal>, capacity: usize) -> (Vec<BundledSignal>, usize) {
    signals.sort_by(|a, b| {
        match b.signal.severity.cmp(&a.signal.severity) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        let (sa, sb) = (a.signal.score, b.signal.score);
        // Explicit total ordering: NaN goes to end (Greater)
        match (sa.is_nan(), sb.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
        }
    });
    let overflow = signals.len().saturating_sub(capacity);
    signals.truncate(capacity);
    (signals, overflow)
}
