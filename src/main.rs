mod app;
mod demo;
mod goto;
mod graph;
mod help;
mod logging;
mod theme;
use crate::app::{App, AppConfig};
use crate::graph::{parse_color, CalendarConfig, GraphStyle};
use crate::logging::LogConfig;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{style::Color, DefaultTerminal};
use std::io;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    week_start: Weekday,
    color: Color,
    animate: bool,
    seed: Option<u64>,
    log: LogConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            date: None,
            week_start: Weekday::Sunday,
            color: GraphStyle::default().base_color,
            animate: true,
            seed: None,
            log: LogConfig::default(),
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("week-start") => {
                    opts.week_start = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Long("color") => opts.color = parser.value()?.parse_with(parse_color)?,
                Arg::Long("no-animation") => opts.animate = false,
                Arg::Long("seed") => opts.seed = Some(parser.value()?.parse()?),
                Arg::Long("log-dir") => opts.log.dir = Some(parser.value()?.into()),
                Arg::Long("log-level") => opts.log.level = parser.value()?.string()?,
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let offset = OffsetDateTime::now_local()
                    .context("failed to determine local time zone")?
                    .offset();
                let _logger = opts.log.start()?;
                let calendar = CalendarConfig::new(opts.week_start, offset);
                let config = AppConfig {
                    calendar,
                    start: opts.date.unwrap_or_else(|| calendar.today()),
                    base_color: opts.color,
                    animate: opts.animate,
                    seed: opts.seed,
                };
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(config).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: contribgraph [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Month-at-a-glance contribution graphs filled with random activity");
                println!();
                println!("Options:");
                println!("      --week-start DAY  First day of the week [default: sunday]");
                println!("      --color COLOR     Cell tint, as a colour name or #RRGGBB");
                println!("      --no-animation    Don't fade cells in when they change");
                println!("      --seed N          Seed for the random activity");
                println!("      --log-dir DIR     Write a log file in DIR");
                println!("      --log-level SPEC  Log level or specification [default: info]");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday: {0:?}")]
struct ParseWeekdayError(String);

/// Parse a weekday given by its full English name or its first three letters,
/// in any case
fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    match s.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(Weekday::Sunday),
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        _ => Err(ParseWeekdayError(s.to_owned())),
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
