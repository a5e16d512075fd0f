use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};

/// Anything with a start and an end instant that can be laid out on the week grid.
///
/// Both instants are reported in UTC so events and the week window may carry
/// different timezone types.
pub trait TimeSpan {
    fn start_utc(&self) -> NaiveDateTime;
    fn end_utc(&self) -> NaiveDateTime;
}

impl<T: TimeSpan + ?Sized> TimeSpan for &T {
    fn start_utc(&self) -> NaiveDateTime {
        (**self).start_utc()
    }

    fn end_utc(&self) -> NaiveDateTime {
        (**self).end_utc()
    }
}

/// One busy interval of a calendar, `start <= end`
#[derive(Debug, Clone, PartialEq)]
pub struct BusyInterval<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> BusyInterval<Tz> {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end.naive_utc() - self.start.naive_utc()
    }
}

impl<Tz: TimeZone> TimeSpan for BusyInterval<Tz> {
    fn start_utc(&self) -> NaiveDateTime {
        self.start.naive_utc()
    }

    fn end_utc(&self) -> NaiveDateTime {
        self.end.naive_utc()
    }
}
