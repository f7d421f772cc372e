//! CLI smoke entry point.
//!
//! Usage: `timecard_cli [--month YYYY-MM] [--events FILE]`
//!
//! Prints the month grid as text. The events file holds a host-shaped event
//! array; covered days are marked with `*` and today is bracketed.

mod cli;

use chrono::Local;
use cli::Command;
use std::collections::BTreeSet;
use std::path::Path;
use std::process::ExitCode;
use timecard_core::{
    init_from_config, AppConfig, CalendarEvent, CalendarGridBuilder, DayCell, MonthCursor,
    MonthGrid,
};

const WEEKDAY_HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa";

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let args = match cli::parse(args)? {
        Command::Help(usage) => {
            println!("{usage}");
            return Ok(());
        }
        Command::Render(args) => args,
    };
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    init_from_config(&config).map_err(|err| err.to_string())?;

    let today = Local::now().date_naive();
    let cursor = args
        .month
        .unwrap_or_else(|| MonthCursor::containing(today));
    let events = match &args.events {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };

    let grid = CalendarGridBuilder::new(cursor)
        .today(today)
        .build(&events);

    println!("timecard_core ping={}", timecard_core::ping());
    println!("timecard_core version={}", timecard_core::core_version());
    println!();
    print!("{}", render(&cursor, &grid));
    Ok(())
}

fn load_events(path: &Path) -> Result<Vec<CalendarEvent>, String> {
    let shown = path.display();
    let raw =
        std::fs::read_to_string(path).map_err(|err| format!("cannot read `{shown}`: {err}"))?;
    serde_json::from_str(&raw).map_err(|err| format!("invalid events in `{shown}`: {err}"))
}

fn render(cursor: &MonthCursor, grid: &MonthGrid) -> String {
    let mut out = format!("{:^28}\n{WEEKDAY_HEADER}\n", cursor.label());
    for week in grid.weeks() {
        let line = week.iter().map(render_cell).collect::<String>();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let mut seen = BTreeSet::new();
    let listed = grid
        .cells()
        .iter()
        .flat_map(|cell| cell.events.iter())
        .filter(|event| seen.insert(event.id))
        .collect::<Vec<_>>();
    if !listed.is_empty() {
        out.push('\n');
        for event in listed {
            out.push_str(&render_event(event));
            out.push('\n');
        }
    }
    out
}

fn render_cell(cell: &DayCell) -> String {
    if !cell.in_current_month {
        return "    ".to_string();
    }
    if cell.is_today {
        return format!("[{:>2}]", cell.day());
    }
    let mark = if cell.has_events() { '*' } else { ' ' };
    format!(" {:>2}{mark}", cell.day())
}

fn render_event(event: &CalendarEvent) -> String {
    let when = if event.all_day {
        if event.is_multi_day() {
            format!("{}..{} all day", event.start_date(), event.end_date())
        } else {
            format!("{} all day", event.start_date())
        }
    } else {
        format!(
            "{} - {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format("%Y-%m-%d %H:%M")
        )
    };
    format!("#{} {when}  {}", event.id, event.title)
}
