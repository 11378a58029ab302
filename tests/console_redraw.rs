//! Sticky console redraw tests against a mock terminal.

mod common;

use common::mock_terminal::{AnsiSequence, MockTerminal};
use yapl_rust as yapl;
use yapl::logger::{ConsoleDestination, DestinationKey, Logger};
use yapl::{ColumnConfig, ColumnWidth, StickyBoard, StickyConsole, StyleTemplate, WidthSource};

fn progress_board(done: i64, total: i64) -> StickyBoard {
    StickyBoard::new()
        .with_column(
            "label",
            ColumnConfig::new("build").width(ColumnWidth::Fixed(8)),
        )
        .unwrap()
        .with_column(
            "progress",
            ColumnConfig::new("{done}/{total}")
                .width(ColumnWidth::Auto)
                .variable("done", done)
                .variable("total", total),
        )
        .unwrap()
}

#[test]
fn sticky_lines_stay_below_log_output() {
    let term = MockTerminal::new();
    let mut console = StickyConsole::with_width(term.clone(), WidthSource::Fixed(20));
    let id = console.add_board(progress_board(0, 3));

    console.log_line("starting").unwrap();
    for done in 1..=3 {
        console
            .board_mut(id)
            .unwrap()
            .column_mut("progress")
            .unwrap()
            .set_variable("done", done);
        console.log_line(&format!("step {done}")).unwrap();
    }

    assert_eq!(
        term.screen(),
        vec![
            "starting",
            "step 1",
            "step 2",
            "step 3",
            "build   3/3         ",
        ]
    );
}

#[test]
fn erase_count_matches_drawn_lines() {
    let term = MockTerminal::new();
    let mut console = StickyConsole::with_width(term.clone(), WidthSource::Fixed(30));
    let a = console.add_board(progress_board(1, 2));
    console.add_board(progress_board(2, 2));
    console.refresh().unwrap();
    assert_eq!(term.count(&AnsiSequence::ClearLine), 0);

    console.log_line("x").unwrap();
    assert_eq!(term.count(&AnsiSequence::CursorUp(1)), 2);
    assert_eq!(term.count(&AnsiSequence::ClearLine), 2);

    // Removing a board still erases its old line once.
    console.remove_board(a).unwrap();
    term.clear_output();
    console.refresh().unwrap();
    assert_eq!(term.count(&AnsiSequence::ClearLine), 2);
    assert_eq!(console.drawn_lines(), 1);

    term.clear_output();
    console.refresh().unwrap();
    assert_eq!(term.count(&AnsiSequence::ClearLine), 1);
}

#[test]
fn one_flush_per_operation() {
    let term = MockTerminal::new();
    let mut console = StickyConsole::with_width(term.clone(), WidthSource::Fixed(30));
    console.add_board(progress_board(0, 1));
    console.log_line("a").unwrap();
    console.log_line("b").unwrap();
    console.refresh().unwrap();
    assert_eq!(term.flush_count(), 3);
}

#[test]
fn marquee_ticks_redraw_in_place() {
    let term = MockTerminal::new();
    let mut console = StickyConsole::with_width(term.clone(), WidthSource::Fixed(20));
    console.add_board(
        StickyBoard::new()
            .with_column(
                "news",
                ColumnConfig::new("breaking").width(ColumnWidth::Fixed(4)),
            )
            .unwrap(),
    );
    console.refresh().unwrap();
    console.tick().unwrap();
    console.tick().unwrap();
    assert_eq!(term.screen(), vec!["eaki"]);
}

#[test]
fn logger_console_destination_uses_sticky_console() {
    let term = MockTerminal::new();
    let style = StyleTemplate::builder("{event}{message}")
        .part("event", "[{event_type}]")
        .part("message", "{message}")
        .build()
        .unwrap();

    let mut logger = Logger::new();
    logger
        .add_destination(
            DestinationKey::Stdout,
            Box::new(ConsoleDestination::new(
                Box::new(term.clone()),
                WidthSource::Fixed(20),
            )),
            style,
        )
        .unwrap();
    logger
        .console_mut()
        .unwrap()
        .add_board(progress_board(5, 9));

    logger.info("one").unwrap();
    logger.error("two").unwrap();

    assert_eq!(
        term.screen(),
        vec!["[INFO] one", "[ERROR] two", "build   5/9         "]
    );
}
