//! Width column and sticky console benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use yapl_rust::{
    ColumnConfig, ColumnWidth, StickyBoard, StickyConsole, WidthColumn, WidthSource, visible_cut,
    visible_length,
};

fn ansi_measure(c: &mut Criterion) {
    let styled = "\x1b[38;5;2mok\x1b[0m ".repeat(64);

    c.bench_function("visible_length_styled", |b| {
        b.iter(|| visible_length(black_box(&styled)));
    });

    c.bench_function("visible_cut_styled", |b| {
        b.iter(|| visible_cut(black_box(&styled), black_box(10), black_box(90)));
    });
}

fn marquee(c: &mut Criterion) {
    let mut group = c.benchmark_group("marquee_render");
    for len in [16usize, 256, 4096] {
        let text = "x".repeat(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            let mut col = WidthColumn::new("m", text.clone()).with_width(12);
            b.iter(|| {
                col.shift_str().unwrap();
                black_box(col.render().unwrap());
            });
        });
    }
    group.finish();
}

fn board_with(columns: usize) -> StickyBoard {
    let mut board = StickyBoard::new();
    for i in 0..columns {
        let width = match i % 3 {
            0 => ColumnWidth::Fixed(10),
            1 => ColumnWidth::Fraction(0.1),
            _ => ColumnWidth::Auto,
        };
        board
            .add_column(
                format!("c{i}"),
                ColumnConfig::new("{n} items").width(width).variable("n", i as i64),
            )
            .unwrap();
    }
    board
}

fn summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary_string");
    for columns in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(columns), &columns, |b, &n| {
            let mut board = board_with(n);
            b.iter(|| board.summary_string(black_box(120)).unwrap());
        });
    }
    group.finish();
}

fn console_log_line(c: &mut Criterion) {
    c.bench_function("console_log_line_two_boards", |b| {
        let mut console = StickyConsole::with_width(std::io::sink(), WidthSource::Fixed(120));
        console.add_board(board_with(3));
        console.add_board(board_with(5));
        b.iter(|| console.log_line(black_box("worker finished batch 17")).unwrap());
    });
}

criterion_group!(benches, ansi_measure, marquee, summary, console_log_line);
criterion_main!(benches);
