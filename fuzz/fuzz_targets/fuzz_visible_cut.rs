//! Fuzz target for ANSI-aware measuring and cutting.
//!
//! Arbitrary text, including truncated escapes, must never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yapl_rust::{visible_cut, visible_length};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    start: u8,
    end: u8,
}

fuzz_target!(|input: Input<'_>| {
    let len = visible_length(input.text);
    let (start, end) = (usize::from(input.start), usize::from(input.end));

    let cut = visible_cut(input.text, start, end);
    let _ = visible_length(&cut);
    let _ = visible_cut(input.text, 0, len);
});
