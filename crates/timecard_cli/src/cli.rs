use std::path::PathBuf;

use getopts::Options;
use timecard_core::MonthCursor;

pub struct Args {
    /// Month to render; the current month when absent.
    pub month: Option<MonthCursor>,
    /// Host-shaped JSON event array to overlay.
    pub events: Option<PathBuf>,
}

pub enum Command {
    Help(String),
    Render(Args),
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "m",
        "month",
        "Month to render [Default: current month]",
        "YYYY-MM",
    );
    opts.optopt(
        "e",
        "events",
        "JSON file with events to overlay on the grid",
        "FILE",
    );
    opts
}

fn usage(opts: &Options) -> String {
    opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME")))
}

pub fn parse(args: Vec<String>) -> Result<Command, String> {
    let opts = opts();

    let matches = opts.parse(args).map_err(|fail| format!("{fail}\n\n{}", usage(&opts)))?;

    if matches.opt_present("help") {
        return Ok(Command::Help(usage(&opts)));
    }

    if let Some(extra) = matches.free.first() {
        return Err(format!("unexpected argument `{extra}`\n\n{}", usage(&opts)));
    }

    let month = matches
        .opt_get::<MonthCursor>("month")
        .map_err(|err| format!("Provided value for option 'month' is invalid: {err}"))?;

    Ok(Command::Render(Args {
        month,
        events: matches.opt_str("events").map(PathBuf::from),
    }))
}
