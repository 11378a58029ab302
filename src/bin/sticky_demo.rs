//! `sticky_demo` - simulated job runner showing log lines above sticky status boards
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sticky_demo
//! cargo run --bin sticky_demo -- --help
//! cargo run --bin sticky_demo -- --jobs 5 --tick-ms 40 --style simple
//! ```

use std::ffi::OsString;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use yapl_rust::ansi::{CURSOR_HIDE, CURSOR_SHOW};
use yapl_rust::logger::ConsoleDestination;
use yapl_rust::{
    Align, ColumnConfig, ColumnWidth, DestinationKey, Logger, StickyBoard, StyleTemplate,
    WidthSource, styles,
};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "sticky_demo - yapl sticky console demonstration

USAGE:
    sticky_demo [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --jobs <N>              Number of simulated jobs (default: 3)
    --steps <N>             Steps per job (default: 8)
    --tick-ms <N>           Delay between marquee ticks (default: 80)
    --width <N>             Fixed console width instead of the terminal's
    --style <NAME>          Console style: full, default, simple, file, none
                            (default: picked from the terminal)
    --file <PATH>           Also log to PATH using the file style

EXAMPLES:
    sticky_demo                         # Detect width and colors
    sticky_demo --width 60 --style simple
    sticky_demo --jobs 1 --file run.log
";

/// Demo configuration parsed from command-line arguments.
#[derive(Clone, Debug)]
pub struct Config {
    pub jobs: u32,
    pub steps: u32,
    pub tick: Duration,
    pub width: Option<usize>,
    pub style: Option<String>,
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jobs: 3,
            steps: 8,
            tick: Duration::from_millis(80),
            width: None,
            style: None,
            file: None,
        }
    }
}

/// Result of CLI parsing.
pub enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

fn value_of(flag: &str, args: &mut impl Iterator<Item = OsString>) -> Result<String, String> {
    args.next()
        .map(|v| v.to_string_lossy().to_string())
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn number_of<T: std::str::FromStr>(
    flag: &str,
    args: &mut impl Iterator<Item = OsString>,
) -> Result<T, String> {
    let value = value_of(flag, args)?;
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid {flag} value: {value}"))
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();
            let parsed = match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,
                "--jobs" => number_of("--jobs", &mut args).map(|n| config.jobs = n),
                "--steps" => number_of("--steps", &mut args).map(|n| config.steps = n),
                "--tick-ms" => {
                    number_of("--tick-ms", &mut args).map(|n| config.tick = Duration::from_millis(n))
                }
                "--width" => number_of("--width", &mut args).map(|n| config.width = Some(n)),
                "--style" => value_of("--style", &mut args).map(|s| config.style = Some(s)),
                "--file" => value_of("--file", &mut args).map(|s| config.file = Some(s)),
                other => Err(format!("Unknown option: {other}")),
            };
            if let Err(msg) = parsed {
                return ParseResult::Error(msg);
            }
        }

        ParseResult::Config(config)
    }
}

fn main() -> ExitCode {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => match run(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        },
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            ExitCode::from(2)
        }
    }
}

// ============================================================================
// Demo
// ============================================================================

fn console_style(name: Option<&str>) -> yapl_rust::Result<StyleTemplate> {
    match name {
        None => styles::for_terminal(yapl_rust::ColorSupport::detect_stdout()),
        Some("full") => styles::stdout_full_info(),
        Some("simple") => styles::stdout_simple(),
        Some("file") => styles::file(),
        Some("none") => styles::none(),
        Some(_) => styles::stdout(),
    }
}

fn job_board(job: u32, steps: u32) -> yapl_rust::Result<StickyBoard> {
    StickyBoard::new()
        .with_column(
            "name",
            ColumnConfig::new("job-{job}")
                .width(ColumnWidth::Fixed(8))
                .variable("job", i64::from(job)),
        )?
        .with_column(
            "progress",
            ColumnConfig::new("{done:>3}/{total}")
                .width(ColumnWidth::Fixed(10))
                .align(Align::Right)
                .variable("done", 0)
                .variable("total", i64::from(steps)),
        )?
        .with_column(
            "news",
            ColumnConfig::new("compiling, linking and packaging artifacts for release")
                .width(ColumnWidth::Fraction(0.3)),
        )
}

fn run(config: &Config) -> yapl_rust::Result<()> {
    let style = console_style(config.style.as_deref())?;

    let mut logger = Logger::console()?;
    if let Some(width) = config.width {
        logger.remove_destination(&DestinationKey::Stdout)?;
        logger.add_destination(
            DestinationKey::Stdout,
            Box::new(ConsoleDestination::new(
                Box::new(std::io::stdout()),
                WidthSource::Fixed(width),
            )),
            style,
        )?;
    } else {
        logger.set_style(&DestinationKey::Stdout, style);
    }
    if let Some(path) = &config.file {
        logger.add_file(path, styles::file()?)?;
    }

    let mut logger = logger.open()?;
    print!("{CURSOR_HIDE}");
    logger.info("starting demo run")?;

    let mut boards = Vec::new();
    if let Some(console) = logger.console_mut() {
        for job in 1..=config.jobs {
            boards.push(console.add_board(job_board(job, config.steps)?));
        }
    }

    for step in 1..=config.steps {
        for (job, id) in boards.iter().enumerate() {
            if let Some(console) = logger.console_mut() {
                if let Some(column) = console
                    .board_mut(*id)
                    .and_then(|board| board.column_mut("progress"))
                {
                    column.set_variable("done", i64::from(step));
                }
                console.tick()?;
            }
            let message = format!("job-{} finished step {step} of {}", job + 1, config.steps);
            if step == config.steps / 2 && job == 0 {
                logger.warning(&format!("{message} (slow cache \"ccache\")"))?;
            } else {
                logger.debug(&message)?;
            }
            thread::sleep(config.tick);
        }
    }

    if let Some(console) = logger.console_mut() {
        console.clear_sticky()?;
    }
    print!("{CURSOR_SHOW}");
    logger.info("all jobs done")?;
    logger.close()
}
