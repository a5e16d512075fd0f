//! Free/busy week for small displays.
//!
//! Lays a week of calendar busy intervals out on a 7 day by 24 hour grid: one 9 pixel wide
//! column per day below an 8 pixel header, one row per hour. Each interval becomes a solid
//! block, overnight intervals spill into the top of the next day, and the length of each shift
//! in hours is written above its block when there is room.
//!
//! The library is `no_std` and draws through [`embedded_graphics::draw_target::DrawTarget`], so
//! the same code runs against a display driver or the in-memory [`canvas::Canvas`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod calendar_utils;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod pipeline;

pub use calendar_utils::{BusyInterval, TimeSpan, WeekWindow};
pub use canvas::{Canvas, TIDBYT_SIZE};
pub use config::FreeBusyConfig;
pub use draw::{draw_week_header, FreeBusyStyle, OccupancyMap, WeekRenderer};
pub use pipeline::{run_once, EventSource, Outcome, PipelineError, Publisher};
