//! Fuzz target for JSON style definitions.
//!
//! Malformed or hostile definitions must come back as errors, never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yapl_rust::{LogRecord, StickyBoard, StyleTemplate};

fuzz_target!(|data: &str| {
    if let Ok(style) = StyleTemplate::from_json(data) {
        let record = LogRecord::new()
            .with("event_type", "INFO")
            .with("message", "fuzz");
        let _ = style.render(&record);
    }

    if let Ok(mut board) = StickyBoard::from_json(data) {
        let _ = board.summary_string(80);
    }
});
