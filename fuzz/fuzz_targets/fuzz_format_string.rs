//! Fuzz target for the format-string parser.
//!
//! Parsing must never panic, and a parsed template must render with
//! any lookup result.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yapl_rust::FieldValue;
use yapl_rust::template::FormatString;

fuzz_target!(|data: &str| {
    let Ok(format) = FormatString::parse(data) else {
        return;
    };

    let _ = format.format_with(|_| Some(FieldValue::from(42)));
    let _ = format.format_with(|_| Some(FieldValue::from(-1.5)));
    let _ = format.format_with(|name| Some(FieldValue::from(name)));
    let _ = format.format_with(|_| None);
});
