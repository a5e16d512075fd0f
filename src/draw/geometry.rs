//! Where things go on the 64x32 week grid.
//!
//! Days are columns, hours are rows. Rectangles are given by inclusive corners.

use arrayvec::ArrayVec;
use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::calendar_utils::{Shift, DAYS_SHOWN};

/// First row of the hour grid; rows above it belong to the header
pub const GRID_TOP: i32 = 8;
/// Last row an overnight block is extended to
pub const GRID_BOTTOM: i32 = 32;
pub const COLUMN_PITCH: i32 = 9;
pub const COLUMN_INSET: i32 = 1;
/// Distance between a block's left and right edge
pub const BLOCK_SPAN: i32 = 7;
/// Labels are only drawn for blocks starting below this row
pub const LABEL_MIN_TOP: i32 = 14;
/// Height of the label cell above a block
pub const LABEL_RISE: i32 = 6;
/// Shift applied to one-digit labels to center them over the column
pub const SINGLE_DIGIT_INDENT: i32 = 2;
/// Row of the day initials
pub const HEADER_TOP: i32 = 1;

/// Left edge of day column `day`
pub fn column_left(day: i64) -> i32 {
    let left = day
        .saturating_mul(COLUMN_PITCH as i64)
        .saturating_add(COLUMN_INSET as i64);
    left.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Grid row of hour `hour`
pub const fn row(hour: u32) -> i32 {
    GRID_TOP + hour as i32
}

fn block(left: i32, top: i32, bottom: i32) -> Rectangle {
    Rectangle::with_corners(
        Point::new(left, top),
        Point::new(left.saturating_add(BLOCK_SPAN), bottom),
    )
}

/// Blocks covering `shift`.
///
/// An overnight shift fills its first column down to [`GRID_BOTTOM`] and continues at the top
/// of the next column, unless that column is past the end of the week.
pub fn busy_blocks(shift: &Shift) -> ArrayVec<Rectangle, 2> {
    let mut blocks = ArrayVec::new();
    let left = column_left(shift.start.days());
    let top = row(shift.start.hour());
    let bottom = row(shift.end.hour());

    if !shift.is_overnight() {
        blocks.push(block(left, top, bottom));
    } else {
        blocks.push(block(left, top, GRID_BOTTOM));
        if shift.end.days() < DAYS_SHOWN {
            blocks.push(block(left.saturating_add(COLUMN_PITCH), GRID_TOP, bottom));
        }
    }
    blocks
}

/// Top-left corner of the duration label, `None` when the block starts too high to fit one.
///
/// The single-digit check uses the shift's own hours, before any merge with the next shift.
pub fn label_anchor(shift: &Shift) -> Option<Point> {
    let top = row(shift.start.hour());
    if top <= LABEL_MIN_TOP {
        return None;
    }
    let indent = if shift.duration_hours() < 10 {
        SINGLE_DIGIT_INDENT
    } else {
        0
    };
    Some(Point::new(
        column_left(shift.start.days()).saturating_add(indent),
        top - LABEL_RISE,
    ))
}

/// Hours printed over `shift`: its own, plus those of `next` when it starts right as `shift`
/// ends. Only the immediate neighbour is considered.
pub fn label_hours(shift: &Shift, next: Option<&Shift>) -> u32 {
    match next {
        Some(next) if shift.adjoins(next) => shift.duration_hours() + next.duration_hours(),
        _ => shift.duration_hours(),
    }
}
