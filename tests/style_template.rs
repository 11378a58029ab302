//! Style template behaviour: part skipping, derived modifiers, JSON styles.

use yapl_rust as yapl;
use yapl::{ConfigError, Error, LogRecord, ModifierTable, StyleTemplate, styles};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn event_style(skip_modifiers: bool) -> StyleTemplate {
    StyleTemplate::builder("{event}{message}")
        .part("event", "[{EVENT_TYPE_style_modifier}{event_type}]")
        .part("message", "{message}")
        .modifiers(ModifierTable::new().with(
            "EVENT_TYPE",
            "style_modifier",
            [("ERROR", "\x1b[38;5;1m")],
        ))
        .skip_modifiers(skip_modifiers)
        .build()
        .unwrap()
}

#[test]
fn all_parts_present_join_with_single_spaces() {
    init_logging();
    let style = StyleTemplate::builder("{a}{b}{c}")
        .part("a", "<{x}>")
        .part("b", "{y}")
        .part("c", "{z}!")
        .build()
        .unwrap();
    let record = LogRecord::new().with("x", 1).with("y", "two").with("z", "three");
    assert_eq!(style.render(&record), "<1> two three!");
}

#[test]
fn missing_field_drops_only_its_part() {
    init_logging();
    let style = StyleTemplate::builder("{a}{b}{c}")
        .part("a", "<{x}>")
        .part("b", "{y}")
        .part("c", "{z}!")
        .build()
        .unwrap();

    let no_middle = LogRecord::new().with("x", 1).with("z", "three");
    assert_eq!(style.render(&no_middle), "<1> three!");

    let no_last = LogRecord::new().with("x", 1).with("y", "two");
    assert_eq!(style.render(&no_last), "<1> two");

    let only_last = LogRecord::new().with("z", "three");
    assert_eq!(style.render(&only_last), "three!");

    assert_eq!(style.render(&LogRecord::new()), "");
}

#[test]
fn derived_modifier_substitutes_code() {
    let record = LogRecord::new()
        .with("event_type", "ERROR")
        .with("message", "boom");
    assert_eq!(
        event_style(true).render(&record),
        "[\x1b[38;5;1mERROR] boom"
    );
}

#[test]
fn unknown_selector_respects_skip_modifiers() {
    let record = LogRecord::new()
        .with("event_type", "UNKNOWN")
        .with("message", "boom");
    assert_eq!(event_style(true).render(&record), "[UNKNOWN] boom");
    assert_eq!(event_style(false).render(&record), "boom");
}

#[test]
fn missing_family_fails_at_build() {
    let err = StyleTemplate::builder("{p}")
        .part("p", "{BadFamily_thing}")
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingModifierFamily { ref family, .. }) if family == "BadFamily"
    ));
}

#[test]
fn json_style_definition() {
    let style = StyleTemplate::from_json(
        r#"{
            "template": "{when}{what}",
            "parts": {"when": "{hour:02d}:{minute:02d}", "what": "{LEVEL_tag}{message}"},
            "modifiers": {"LEVEL_modifiers": {"tag": {"WARN": "! "}}},
            "initial": "--- start",
            "final": "--- end"
        }"#,
    )
    .unwrap();
    assert_eq!(style.initial(), "--- start");
    assert_eq!(style.final_str(), "--- end");
    assert!(style.skip_modifiers());

    let record = LogRecord::new()
        .with("hour", 7)
        .with("minute", 3)
        .with("level", "WARN")
        .with("message", "disk at 91%");
    assert_eq!(style.render(&record), "07:03 ! disk at 91%");
}

#[test]
fn json_style_with_bad_shape_is_rejected() {
    let err = StyleTemplate::from_json(
        r#"{"template": "{p}", "parts": {"p": "{LEVEL_tag}"},
            "modifiers": {"LEVEL_modifiers": {"tag": ["not", "a", "map"]}}}"#,
    )
    .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"expected a mapping of strings in 'LEVEL_modifiers'->'tag', found array"
    );
}

#[test]
fn full_info_console_line() {
    let style = styles::stdout_full_info().unwrap();
    let record = LogRecord::new()
        .with("year", 2024)
        .with("month", 1)
        .with("day", 2)
        .with("hour", 3)
        .with("minute", 4)
        .with("second", 5)
        .with("microsecond", 6)
        .with("location", "main.rs:10")
        .with("event_type", "WARNING")
        .with("message", "retry 3 of 5 for 'db' (timeout)");
    let line = style.render(&record);

    insta::assert_snapshot!(
        yapl::ansi::strip_escapes(&line),
        @"2024-01-02 03:04:05.6| <main.rs:10> [WARNING]: retry 3 of 5 for 'db' (timeout)"
    );
    assert!(line.contains("[\x1b[38;5;3mWARNING\x1b[0m]:"));
    assert!(line.contains("\x1b[38;5;6m3\x1b[0m"));
    assert!(line.contains("\x1b[38;5;2m'db'\x1b[0m"));
    assert!(line.contains("\x1b[38;5;8m(timeout)\x1b[0m"));
}

#[test]
fn record_serializes_as_flat_json() {
    let record = LogRecord::new()
        .with("event_type", "INFO")
        .with("message", "ok")
        .with("line", 12);
    insta::assert_json_snapshot!(record, @r#"
    {
      "event_type": "INFO",
      "line": 12,
      "message": "ok"
    }
    "#);
}
