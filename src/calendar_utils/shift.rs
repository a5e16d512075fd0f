use chrono::{TimeDelta, TimeZone};

use super::{TimeSpan, WeekWindow};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: u32 = 3_600;

/// A signed time offset split into whole days and the seconds left over.
///
/// The split floors, so one second before the origin is day `-1`, second `86399`.
/// Equality compares the full offset, sub-second part included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShiftOffset(TimeDelta);

impl ShiftOffset {
    pub const fn new(delta: TimeDelta) -> Self {
        Self(delta)
    }

    pub const fn delta(self) -> TimeDelta {
        self.0
    }

    fn floor_seconds(self) -> i64 {
        let seconds = self.0.num_seconds();
        // `num_seconds` truncates toward zero, `subsec_nanos` carries the sign
        if self.0.subsec_nanos() < 0 {
            seconds - 1
        } else {
            seconds
        }
    }

    /// Whole days since the origin
    pub fn days(self) -> i64 {
        self.floor_seconds().div_euclid(SECONDS_PER_DAY)
    }

    /// Seconds into the day, `0..86400`
    pub fn seconds(self) -> u32 {
        self.floor_seconds().rem_euclid(SECONDS_PER_DAY) as u32
    }

    /// Hour of the day, `0..24`
    pub fn hour(self) -> u32 {
        self.seconds() / SECONDS_PER_HOUR
    }
}

/// One event laid out relative to the week window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub start: ShiftOffset,
    pub end: ShiftOffset,
    pub duration: ShiftOffset,
}

impl Shift {
    pub fn new<Tz: TimeZone>(span: &impl TimeSpan, window: &WeekWindow<Tz>) -> Self {
        let origin = window.origin_utc();
        let start = span.start_utc();
        let end = span.end_utc();
        Self {
            start: ShiftOffset::new(start - origin),
            end: ShiftOffset::new(end - origin),
            duration: ShiftOffset::new(end - start),
        }
    }

    /// Whole hours of the duration's sub-day remainder; a 25 hour shift reports 1.
    pub fn duration_hours(&self) -> u32 {
        self.duration.hour()
    }

    /// Start and end fall on different days of the week
    pub fn is_overnight(&self) -> bool {
        self.start.days() != self.end.days()
    }

    /// `next` starts exactly when this shift ends
    pub fn adjoins(&self, next: &Shift) -> bool {
        self.end == next.start
    }
}
