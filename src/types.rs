// Core value types shared by layout, animation and compositing.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 32-bit ARGB color, `0xAARRGGBB`, straight (non-premultiplied) alpha.
/// Visual: this is what a stroke or fill looks like before it is blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFFFF_0000);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline] pub const fn alpha(self) -> u8 { (self.0 >> 24) as u8 }
    #[inline] pub const fn red(self) -> u8 { (self.0 >> 16) as u8 }
    #[inline] pub const fn green(self) -> u8 { (self.0 >> 8) as u8 }
    #[inline] pub const fn blue(self) -> u8 { self.0 as u8 }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#RRGGBB` (opaque) or `#AARRGGBB`; the leading `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let bad = || Error::InvalidColor(s.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Size the host gave us, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The clear scan window. Derived from the viewport, never set directly.
/// May be inverted for tiny viewports; nothing downstream guards against that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutoutRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CutoutRect {
    pub fn width(&self) -> i32 { self.right - self.left }

    /// True when the rectangle encloses a positive area.
    pub fn is_proper(&self) -> bool {
        self.left < self.right && self.top < self.bottom
    }
}

/// Software surface: one ARGB `u32` per pixel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the surface is (pixels)
    pub height: usize,     // how tall the surface is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0xAARRGGBB
}

impl FrameBuffer {
    /// Fully transparent surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.0; width * height] }
    }

    /// Pixel at (x,y), or None when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height { return None; }
        Some(Color(self.pixels[y * self.width + x]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_argb() {
        assert_eq!("#FF0000".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("77000000".parse::<Color>().unwrap(), Color(0x7700_0000));
        assert_eq!(" #80ffffff ".parse::<Color>().unwrap(), Color(0x80FF_FFFF));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("#FFF".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("#+F0000".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
        assert!("##FF0000".parse::<Color>().is_err());
        assert!("#".parse::<Color>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let c = Color::from_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_string(), "#12345678");
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
        assert_eq!((c.alpha(), c.red(), c.green(), c.blue()), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn frame_buffer_get_is_bounds_checked() {
        let fb = FrameBuffer::filled(2, 2, Color::WHITE);
        assert_eq!(fb.get(1, 1), Some(Color::WHITE));
        assert_eq!(fb.get(2, 0), None);
        assert_eq!(fb.get(-1, 0), None);
    }
}
