//! Render the free/busy week from a local event list and print it to the terminal.
//!
//! The event file holds one busy interval per line, as two RFC 3339 timestamps separated by
//! whitespace. Blank lines and lines starting with `#` are skipped:
//!
//! ```text
//! 2024-01-02T09:00:00+03:00 2024-01-02T17:00:00+03:00
//! ```
//!
//! Defaults for the calendar, installation, color and timezone can be baked in at build time
//! through a `freebusy-creds` file of `KEY=value` lines (see `build.rs`).

use std::{
    fmt, fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb888;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use freebusy_week::{
    config::{parse_hex_color, ConfigError},
    run_once, BusyInterval, Canvas, EventSource, FreeBusyConfig, Outcome, Publisher,
};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

const DEFAULT_CALENDAR: Option<&str> = option_env!("FREEBUSY_CAL");
const DEFAULT_INSTALLATION: Option<&str> = option_env!("FREEBUSY_INSTALLATION");
const DEFAULT_COLOR: Option<&str> = option_env!("FREEBUSY_COLOR");
const DEFAULT_IMAGE: Option<&str> = option_env!("FREEBUSY_IMAGE");
const DEFAULT_TZ: Option<&str> = option_env!("FREEBUSY_TZ");

const FALLBACK_COLOR: &str = "#5E2BFF";

#[derive(Parser, Debug)]
#[command(name = "freebusy-preview", version, about)]
struct Args {
    /// Log debug messages
    #[arg(short, long)]
    debug: bool,

    /// Event list, one `START END` pair of RFC 3339 timestamps per line
    #[arg(short, long)]
    events: PathBuf,

    /// Calendar the events belong to
    #[arg(long)]
    calendar: Option<String>,

    /// Installation the image would be posted to
    #[arg(long)]
    installation: Option<String>,

    /// Block color as #RRGGBB
    #[arg(long)]
    color: Option<String>,

    /// Name of the rendered image
    #[arg(long)]
    image: Option<String>,

    /// IANA timezone that decides where days roll over
    #[arg(long)]
    tz: Option<String>,

    /// Render the week containing this RFC 3339 instant instead of now
    #[arg(long)]
    now: Option<String>,
}

#[derive(Debug)]
enum PreviewError {
    Config(ConfigError),
    UnknownTimezone(String),
    InvalidNow(String),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::UnknownTimezone(name) => write!(f, "unknown timezone {name:?}"),
            Self::InvalidNow(value) => write!(f, "--now {value:?} is not an RFC 3339 timestamp"),
        }
    }
}

impl Args {
    fn config(&self) -> Result<FreeBusyConfig<Rgb888>, PreviewError> {
        let color = self
            .color
            .as_deref()
            .or(DEFAULT_COLOR)
            .unwrap_or(FALLBACK_COLOR);
        let block_color = parse_hex_color(color).map_err(PreviewError::Config)?;

        let tz_name = self.tz.as_deref().or(DEFAULT_TZ).unwrap_or("UTC");
        let local_tz = tz_name
            .parse::<Tz>()
            .map_err(|_| PreviewError::UnknownTimezone(tz_name.to_string()))?;

        let mut config = FreeBusyConfig::new(
            self.calendar
                .as_deref()
                .or(DEFAULT_CALENDAR)
                .unwrap_or("primary"),
            self.installation
                .as_deref()
                .or(DEFAULT_INSTALLATION)
                .unwrap_or("freebusy"),
            block_color,
        )
        .with_local_tz(local_tz);
        if let Some(image) = self.image.as_deref().or(DEFAULT_IMAGE) {
            config = config.with_image_name(image);
        }
        Ok(config)
    }

    fn now(&self) -> Result<DateTime<Utc>, PreviewError> {
        match self.now.as_deref() {
            Some(now) => DateTime::parse_from_rfc3339(now)
                .map(|now| now.with_timezone(&Utc))
                .map_err(|_| PreviewError::InvalidNow(now.to_string())),
            None => {
                let since_epoch = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default();
                Ok(DateTime::from_timestamp(
                    since_epoch.as_secs() as i64,
                    since_epoch.subsec_nanos(),
                )
                .unwrap_or_default())
            }
        }
    }
}

#[derive(Debug)]
enum SourceError {
    // The fields are used when debug-printing on error
    Io(#[allow(dead_code)] io::Error),
    Parse {
        #[allow(dead_code)]
        line: usize,
        #[allow(dead_code)]
        reason: String,
    },
}

/// Busy intervals read from a local text file
struct FileSource {
    path: PathBuf,
}

impl FileSource {
    fn parse_line(line: &str) -> Result<BusyInterval<FixedOffset>, String> {
        let mut fields = line.split_whitespace();
        let (Some(start), Some(end), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err("expected exactly two timestamps".to_string());
        };
        let start = DateTime::parse_from_rfc3339(start).map_err(|e| format!("start: {e}"))?;
        let end = DateTime::parse_from_rfc3339(end).map_err(|e| format!("end: {e}"))?;
        if end < start {
            return Err("interval ends before it starts".to_string());
        }
        Ok(BusyInterval::new(start, end))
    }
}

impl EventSource for FileSource {
    type Event = BusyInterval<FixedOffset>;
    type Error = SourceError;

    fn fetch(
        &mut self,
        calendar_id: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        debug!(
            "reading {calendar_id} events from {} for {start} .. {end}",
            self.path.display()
        );
        let content = fs::read_to_string(&self.path).map_err(SourceError::Io)?;
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let event = Self::parse_line(trimmed).map_err(|reason| SourceError::Parse {
                line: idx + 1,
                reason,
            })?;
            events.push(event);
        }
        Ok(events)
    }
}

/// Prints the canvas instead of posting it
struct TerminalPublisher {
    block: Rgb888,
    label: Rgb888,
    background: Rgb888,
}

impl TerminalPublisher {
    fn legend(&self, color: Rgb888) -> char {
        if color == self.background {
            '.'
        } else if color == self.label {
            '#'
        } else if color == self.block {
            'o'
        } else {
            '+'
        }
    }
}

impl Publisher<Rgb888> for TerminalPublisher {
    type Error = io::Error;

    fn publish(
        &mut self,
        canvas: &Canvas<Rgb888>,
        installation_id: &str,
        image_name: &str,
    ) -> Result<(), Self::Error> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{image_name} -> {installation_id}")?;
        write!(stdout, "{}", canvas.to_ascii(|color| self.legend(color)))?;
        stdout.flush()
    }

    fn remove_installation(&mut self, installation_id: &str) -> Result<(), Self::Error> {
        info!("Nothing busy this week, {installation_id} would be removed");
        Ok(())
    }
}

fn init_logging(debug: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = if debug { "debug" } else { "info" };
    Logger::try_with_env_or_str(level)?
        .format(flexi_logger::detailed_format)
        .log_to_stderr()
        .start()
}

fn main() -> ExitCode {
    let args = Args::parse();
    // Keep the handle alive, dropping it stops the logger
    let _logger = init_logging(args.debug)
        .inspect_err(|e| eprintln!("failed to start logging: {e}"))
        .ok();

    let (config, now) = match args.config().and_then(|config| Ok((config, args.now()?))) {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut source = FileSource {
        path: args.events.clone(),
    };
    let mut publisher = TerminalPublisher {
        block: config.style.block,
        label: config.style.label,
        background: config.style.background,
    };

    match run_once(now, &mut source, &mut publisher, &config) {
        Ok(Outcome::Published { events }) => {
            debug!("rendered {events} events");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Removed) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
