//! Settings handed to the pipeline at startup.

use alloc::string::{String, ToString};
use core::{fmt, ops::Range};

use chrono_tz::Tz;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::draw::FreeBusyStyle;

/// Change this value to change the default local timezone
///
/// Used to find the day roll-over time
pub const DEFAULT_TZ: Tz = chrono_tz::UTC;

pub const DEFAULT_IMAGE_NAME: &str = "working.gif";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidColor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(value) => {
                write!(f, "invalid color {value:?}, expected #RRGGBB")
            }
        }
    }
}

/// Everything one run of the free/busy pipeline needs to know
#[derive(Debug, Clone)]
pub struct FreeBusyConfig<C> {
    /// Calendar to read busy intervals from
    pub calendar_id: String,
    /// Display installation the image is posted to
    pub installation_id: String,
    pub image_name: String,
    pub local_tz: Tz,
    pub style: FreeBusyStyle<C>,
}

impl FreeBusyConfig<Rgb888> {
    /// White labels over `block_color` blocks on a black canvas
    pub fn new(
        calendar_id: impl Into<String>,
        installation_id: impl Into<String>,
        block_color: Rgb888,
    ) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            installation_id: installation_id.into(),
            image_name: DEFAULT_IMAGE_NAME.to_string(),
            local_tz: DEFAULT_TZ,
            style: FreeBusyStyle {
                block: block_color,
                label: Rgb888::WHITE,
                background: Rgb888::BLACK,
            },
        }
    }
}

impl<C> FreeBusyConfig<C> {
    pub fn with_local_tz(mut self, local_tz: Tz) -> Self {
        self.local_tz = local_tz;
        self
    }

    pub fn with_image_name(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color
pub fn parse_hex_color(value: &str) -> Result<Rgb888, ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
    Ok(Rgb888::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
