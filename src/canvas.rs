//! In-memory raster used as the drawing surface before the image is handed off.

use alloc::{string::String, vec, vec::Vec};
use core::convert::Infallible;

use embedded_graphics::{image::GetPixel, prelude::*, Pixel};

/// Size of a Tidbyt LED matrix
pub const TIDBYT_SIZE: Size = Size::new(64, 32);

/// Fixed size raster, row major. Drawing outside of it is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas<C> {
    size: Size,
    background: C,
    pixels: Vec<C>,
}

impl<C: PixelColor> Canvas<C> {
    /// Blank canvas filled with `background`
    pub fn new(size: Size, background: C) -> Self {
        Self {
            size,
            background,
            pixels: vec![background; size.width as usize * size.height as usize],
        }
    }

    pub fn background(&self) -> C {
        self.background
    }

    pub fn pixels(&self) -> &[C] {
        &self.pixels
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        let width = self.size.width as usize;
        (x < width && y < self.size.height as usize).then(|| y * width + x)
    }

    pub fn set_pixel(&mut self, point: Point, color: C) {
        if let Some(idx) = self.index(point) {
            self.pixels[idx] = color;
        }
    }

    /// One line per row, one character per pixel as chosen by `legend`
    pub fn to_ascii(&self, legend: impl Fn(C) -> char) -> String {
        let width = self.size.width as usize;
        let mut out = String::with_capacity((width + 1) * self.size.height as usize);
        for row in self.pixels.chunks(width.max(1)) {
            out.extend(row.iter().map(|&color| legend(color)));
            out.push('\n');
        }
        out
    }
}

impl<C: PixelColor> OriginDimensions for Canvas<C> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<C: PixelColor> DrawTarget for Canvas<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<C>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}

impl<C: PixelColor> GetPixel for Canvas<C> {
    type Color = C;

    fn pixel(&self, p: Point) -> Option<C> {
        self.index(p).map(|idx| self.pixels[idx])
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        pixelcolor::BinaryColor,
        primitives::{PrimitiveStyle, Rectangle},
    };

    use super::*;

    #[test]
    fn clips_out_of_bounds_drawing() {
        let mut canvas = Canvas::new(Size::new(4, 3), BinaryColor::Off);
        Rectangle::with_corners(Point::new(2, 1), Point::new(9, 9))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut canvas)
            .unwrap();

        assert_eq!(canvas.pixel(Point::new(3, 2)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(1, 1)), Some(BinaryColor::Off));
        assert_eq!(canvas.pixel(Point::new(4, 2)), None);
        assert_eq!(canvas.pixel(Point::new(-1, 0)), None);
        assert_eq!(
            canvas.to_ascii(|c| if c.is_on() { '#' } else { '.' }),
            "....\n..##\n..##\n"
        );
    }

    #[test]
    fn tidbyt_canvas_starts_blank() {
        let canvas = Canvas::new(TIDBYT_SIZE, BinaryColor::Off);
        assert_eq!(canvas.bounding_box().size, TIDBYT_SIZE);
        assert!(canvas.pixels().iter().all(|&c| c == canvas.background()));
        assert_eq!(canvas.pixels().len(), 64 * 32);
    }
}
