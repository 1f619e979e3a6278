//! Shared test helpers for integration tests

#![allow(dead_code)]

use argent::{Assert, BufferSink, CausalityTracker, ConsoleOptions, LoggingConsole};
use std::rc::Rc;

/// Build an assertion engine with its causality tracker
pub fn engine() -> (Assert, Rc<CausalityTracker>) {
    let tracker = Rc::new(CausalityTracker::new());
    (Assert::new(tracker.clone()), tracker)
}

/// Build a buffering console over the given tracker
pub fn console(
    options: ConsoleOptions,
    tracker: Rc<CausalityTracker>,
) -> LoggingConsole<BufferSink> {
    LoggingConsole::new(BufferSink::new(), options, tracker)
}

/// Default options with causal wrapping enabled
pub fn causal_options() -> ConsoleOptions {
    ConsoleOptions {
        wrap_with_causal: true,
        ..ConsoleOptions::default()
    }
}
