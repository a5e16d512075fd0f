//! Drawing a week of busy shifts onto the grid.
//!
//! Shifts are drawn in the order given, which must be by start time. Each shift gets its busy
//! blocks and, room permitting, a label with its length in hours above the first block. A
//! label is skipped when its anchor pixel is already painted, so crowded columns can lose
//! labels.

pub mod geometry;
pub mod occupancy;
pub mod text_styles;

use alloc::format;

use chrono::TimeZone;
use embedded_graphics::{image::GetPixel, prelude::*, primitives::PrimitiveStyle};
use log::{debug, trace, warn};

use crate::calendar_utils::{weekday_short_name, Shift, TimeSpan, WeekWindow, DAYS_SHOWN};
pub use geometry::{busy_blocks, column_left, label_anchor, label_hours};
pub use occupancy::{OccupancyMap, Recording};

/// Colors of a rendered week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeBusyStyle<C> {
    pub block: C,
    pub label: C,
    /// Color of a blank canvas; any other color counts as painted
    pub background: C,
}

#[derive(Debug, Clone, Copy)]
pub struct WeekRenderer<C> {
    style: FreeBusyStyle<C>,
}

impl<C: PixelColor> WeekRenderer<C> {
    pub const fn new(style: FreeBusyStyle<C>) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &FreeBusyStyle<C> {
        &self.style
    }

    /// Draw `events` on a canvas that can be read back.
    ///
    /// Pixels already on the canvas block labels the same way pixels drawn during this call do.
    pub fn render<D, Tz, I>(
        &self,
        canvas: &mut D,
        events: I,
        window: &WeekWindow<Tz>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C> + GetPixel<Color = C>,
        Tz: TimeZone,
        I: IntoIterator,
        I::Item: TimeSpan,
    {
        let mut occupancy = OccupancyMap::from_canvas(&*canvas, self.style.background);
        self.render_with_occupancy(canvas, events, window, &mut occupancy)
    }

    /// Draw `events`, consulting and updating `occupancy` instead of reading the canvas
    pub fn render_with_occupancy<D, Tz, I>(
        &self,
        canvas: &mut D,
        events: I,
        window: &WeekWindow<Tz>,
        occupancy: &mut OccupancyMap,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        Tz: TimeZone,
        I: IntoIterator,
        I::Item: TimeSpan,
    {
        let mut target = Recording::new(canvas, occupancy, self.style.background);
        let block_style = PrimitiveStyle::with_fill(self.style.block);

        let mut shifts = events
            .into_iter()
            .map(|event| Shift::new(&event, window))
            .peekable();

        while let Some(shift) = shifts.next() {
            if !(0..DAYS_SHOWN).contains(&shift.start.days()) {
                warn!(
                    "shift starts on day {} outside of the displayed week",
                    shift.start.days()
                );
            }

            for block in busy_blocks(&shift) {
                trace!("busy block {block:?}");
                block.into_styled(block_style).draw(&mut target)?;
            }

            let Some(anchor) = label_anchor(&shift) else {
                continue;
            };
            let hours = label_hours(&shift, shifts.peek());

            if target.is_occupied(anchor) {
                debug!("skipping drawing hours on populated pixel {anchor:?}");
                continue;
            }

            let text = format!("{hours}");
            text_styles::label(&text, anchor, self.style.label).draw(&mut target)?;
        }
        Ok(())
    }
}

/// Write each day's initial above its column
pub fn draw_week_header<D, Tz>(
    canvas: &mut D,
    window: &WeekWindow<Tz>,
    color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    Tz: TimeZone,
{
    let indent = (geometry::BLOCK_SPAN + 1 - text_styles::GLYPH_WIDTH) / 2;
    for day in 0..DAYS_SHOWN {
        let name = weekday_short_name(window.weekday(day as u32));
        let initial = name.as_bytes()[0].to_ascii_uppercase() as char;
        let mut buf = [0; 4];
        let position = Point::new(column_left(day) + indent, geometry::HEADER_TOP);
        text_styles::label(initial.encode_utf8(&mut buf), position, color).draw(canvas)?;
    }
    Ok(())
}
