use std::io::{self, BufRead, Read, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, ValueEnum};
use datetime_recognizer::{
    Culture, DateTimeOptions, DateTimeRecognizer, RecognizerOptions, WeekStartDay,
};
use tracing_subscriber::EnvFilter;

/// Recognize dates, times, periods, durations and recurrences in text.
///
/// Results are printed as JSON. Logging goes to stderr and is controlled by
/// `RUST_LOG`.
#[derive(Parser, Debug)]
#[command(name = "dtr")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text to scan; read from stdin when omitted or "-"
    text: Option<String>,

    /// Culture code (en-us, en-gb, ...)
    #[arg(short, long, default_value = "en-us")]
    culture: String,

    /// Reference instant: 2016-11-07T16:12:00, "2016-11-07 16:12:00" or
    /// 2016-11-07. Defaults to the current local time.
    #[arg(short, long)]
    reference: Option<String>,

    /// Report "from X to Y" boundaries separately
    #[arg(long)]
    skip_from_to_merge: bool,

    /// Report "tomorrow at 3pm" as a date and a time
    #[arg(long)]
    split_date_and_time: bool,

    /// Do not recognize time zones
    #[arg(long)]
    skip_time_zone: bool,

    /// First day of the week for week periods
    #[arg(long, value_enum, default_value_t = WeekStart::Monday)]
    week_start: WeekStart,

    /// Give up on a text after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Run the extractors in parallel
    #[arg(long)]
    parallel: bool,

    /// Treat every input line as a separate text and print one JSON document per line
    #[arg(long)]
    lines: bool,

    /// Include dropped spans and the timeout marker in the output
    #[arg(long)]
    detailed: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum WeekStart {
    Monday,
    Sunday,
}

impl From<WeekStart> for WeekStartDay {
    fn from(w: WeekStart) -> Self {
        match w {
            WeekStart::Monday => WeekStartDay::Monday,
            WeekStart::Sunday => WeekStartDay::Sunday,
        }
    }
}

impl Cli {
    fn options(&self) -> RecognizerOptions {
        let mut flags = DateTimeOptions::NONE;
        if self.skip_from_to_merge {
            flags = flags | DateTimeOptions::SKIP_FROM_TO_MERGE;
        }
        if self.split_date_and_time {
            flags = flags | DateTimeOptions::SPLIT_DATE_AND_TIME;
        }
        if self.skip_time_zone {
            flags = flags | DateTimeOptions::SKIP_TIME_ZONE;
        }
        let mut options = RecognizerOptions::default()
            .with_flags(flags)
            .with_week_start(self.week_start.into())
            .with_parallel_scan(self.parallel);
        if let Some(ms) = self.timeout_ms {
            options = options.with_timeout(Duration::from_millis(ms));
        }
        options
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let culture = Culture::from_code(&cli.culture)?;
    let reference = match cli.reference.as_deref() {
        Some(raw) => parse_reference(raw)?,
        None => chrono::Local::now().naive_local(),
    };
    let recognizer = DateTimeRecognizer::new(culture, cli.options())
        .with_context(|| format!("Failed to load patterns for {culture}"))?;

    let mut stdout = io::stdout().lock();
    match cli.text.as_deref() {
        Some(text) if text != "-" => {
            let rendered = render(&recognizer, &cli, text, reference)?;
            writeln!(stdout, "{rendered}")?;
        }
        _ if cli.lines => {
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read stdin")?;
                let rendered = render(&recognizer, &cli, &line, reference)?;
                writeln!(stdout, "{rendered}")?;
            }
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            let rendered = render(&recognizer, &cli, &text, reference)?;
            writeln!(stdout, "{rendered}")?;
        }
    }
    Ok(())
}

fn render(recognizer: &DateTimeRecognizer, cli: &Cli, text: &str, reference: NaiveDateTime) -> Result<String> {
    let recognition = recognizer.recognize_detailed(text, reference);
    let value = if cli.detailed {
        serde_json::to_value(&recognition)?
    } else {
        serde_json::to_value(&recognition.results)?
    };
    // --lines keeps one document per line
    let rendered = if cli.pretty && !cli.lines {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(rendered)
}

fn parse_reference(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    bail!("Invalid reference instant '{raw}': expected YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD")
}
