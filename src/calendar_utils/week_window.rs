use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, TimeZone, Weekday};

use super::{all_weekdays, TimeSpan};

/// Number of day columns shown, starting at the window's day
pub const DAYS_SHOWN: i64 = 7;

/// The displayed week: `DAYS_SHOWN` days starting at a local midnight.
///
/// All shift offsets are measured from [`WeekWindow::start`].
#[derive(Debug, Clone)]
pub struct WeekWindow<Tz: TimeZone> {
    start: DateTime<Tz>,
}

impl<Tz: TimeZone> WeekWindow<Tz> {
    /// Use `start` verbatim as the origin of day 0
    pub fn starting_at(start: DateTime<Tz>) -> Self {
        Self { start }
    }

    /// The window whose day 0 is the calendar day of `now`, in `now`'s timezone.
    ///
    /// An ambiguous local midnight resolves to the earlier instant. Returns `None` when the
    /// timezone skips midnight on that day.
    pub fn containing(now: &DateTime<Tz>) -> Option<Self> {
        let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
        now.timezone()
            .from_local_datetime(&midnight)
            .earliest()
            .map(Self::starting_at)
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// First instant after the window
    pub fn end(&self) -> DateTime<Tz> {
        self.start.clone() + TimeDelta::days(DAYS_SHOWN)
    }

    /// Start and (exclusive) end of the range to ask the event source for
    pub fn fetch_range(&self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.start.clone(), self.end())
    }

    pub fn origin_utc(&self) -> NaiveDateTime {
        self.start.naive_utc()
    }

    /// False only for spans that lie wholly outside the window
    pub fn overlaps(&self, span: &impl TimeSpan) -> bool {
        let origin = self.origin_utc();
        let end = origin + TimeDelta::days(DAYS_SHOWN);
        span.end_utc() > origin && span.start_utc() < end
    }

    /// Weekday shown in column `day`
    pub fn weekday(&self, day: u32) -> Weekday {
        let first = self.start.weekday().num_days_from_monday();
        all_weekdays()[((first + day) % 7) as usize]
    }
}
