//! Tracking of canvas pixels that were already drawn on.
//!
//! Labels must not land on painted pixels. Instead of reading pixels back from the display,
//! which write-only e-paper and LED matrix drivers can't do, an [`OccupancyMap`] is kept next
//! to the canvas and every draw goes through a [`Recording`] target that updates it.

use alloc::{vec, vec::Vec};

use embedded_graphics::{
    image::GetPixel,
    prelude::*,
    primitives::{ContainsPoint, PointsIter, Rectangle},
    Pixel,
};

const WORD_BITS: usize = u32::BITS as usize;

/// Bit set of occupied points within a fixed area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    area: Rectangle,
    words: Vec<u32>,
}

impl OccupancyMap {
    /// Empty map covering `area`
    pub fn new(area: Rectangle) -> Self {
        let cells = area.size.width as usize * area.size.height as usize;
        Self {
            area,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Map of every pixel of `canvas` that differs from `background`
    pub fn from_canvas<D>(canvas: &D, background: <D as GetPixel>::Color) -> Self
    where
        D: Dimensions + GetPixel,
    {
        let mut map = Self::new(canvas.bounding_box());
        let area = map.area;
        for point in area.points() {
            if canvas.pixel(point).is_some_and(|color| color != background) {
                map.mark(point);
            }
        }
        map
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    fn index(&self, point: Point) -> Option<usize> {
        if !self.area.contains(point) {
            return None;
        }
        let offset = point - self.area.top_left;
        Some(offset.y as usize * self.area.size.width as usize + offset.x as usize)
    }

    /// Points outside the area are ignored
    pub fn mark(&mut self, point: Point) {
        if let Some(idx) = self.index(point) {
            self.words[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
        }
    }

    /// Points outside the area are never occupied
    pub fn is_occupied(&self, point: Point) -> bool {
        self.index(point)
            .is_some_and(|idx| self.words[idx / WORD_BITS] & (1 << (idx % WORD_BITS)) != 0)
    }

    pub fn occupied_count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }
}

/// Draw target that forwards to `target` and marks every non-background pixel it receives
pub struct Recording<'a, D: DrawTarget> {
    target: &'a mut D,
    occupancy: &'a mut OccupancyMap,
    background: D::Color,
}

impl<'a, D: DrawTarget> Recording<'a, D> {
    pub fn new(target: &'a mut D, occupancy: &'a mut OccupancyMap, background: D::Color) -> Self {
        Self {
            target,
            occupancy,
            background,
        }
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.occupancy.is_occupied(point)
    }
}

impl<D: DrawTarget> Dimensions for Recording<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D: DrawTarget> DrawTarget for Recording<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let occupancy = &mut *self.occupancy;
        let background = self.background;
        self.target
            .draw_iter(pixels.into_iter().inspect(|Pixel(point, color)| {
                if *color != background {
                    occupancy.mark(*point);
                }
            }))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        if color != self.background {
            let visible = area.intersection(&self.target.bounding_box());
            for point in visible.points() {
                self.occupancy.mark(point);
            }
        }
        self.target.fill_solid(area, color)
    }
}
