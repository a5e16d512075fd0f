//! A bunch of utils for working with calendar stuff

pub mod busy_interval;
pub mod shift;
pub mod week_window;

pub use busy_interval::{BusyInterval, TimeSpan};
use chrono::Weekday;
pub use shift::{Shift, ShiftOffset};
pub use week_window::{WeekWindow, DAYS_SHOWN};

pub const fn weekday_short_name(val: Weekday) -> &'static str {
    all_weekdays_short_en()[val.num_days_from_monday() as usize]
}

pub const fn all_weekdays() -> [Weekday; 7] {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

pub const fn all_weekdays_short_en() -> [&'static str; 7] {
    ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
}
