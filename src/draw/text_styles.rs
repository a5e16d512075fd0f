use embedded_graphics::{
    mono_font::{ascii::FONT_4X6, MonoTextStyle},
    prelude::*,
    text::{Baseline, Text},
};

pub type StyleType<C> = MonoTextStyle<'static, C>;

/// Width of one label glyph
pub const GLYPH_WIDTH: i32 = 4;

pub fn label_style<C: PixelColor>(color: C) -> StyleType<C> {
    StyleType::new(&FONT_4X6, color)
}

/// Label text with the top-left corner of its first glyph cell at `position`
pub fn label<C: PixelColor>(text: &str, position: Point, color: C) -> Text<'_, StyleType<C>> {
    Text::with_baseline(text, position, label_style(color), Baseline::Top)
}
