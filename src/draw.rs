// Window + on-screen hint text for the demo host.
// Visual effects provided here:
// 1) A window that shows the camera preview with the scan overlay on top.
// 2) A tiny 5x7 bitmap font used to print an alignment hint under the cutout.

use crate::error::Error;
use crate::types::{Color, CutoutRect, FrameBuffer};
use minifb::{Key, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
    scratch: Vec<u32>,
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, scratch: Vec::new() })
    }

    /// Push the pixels for this frame to the screen.
    /// minifb wants 0x00RRGGBB, so the alpha byte is dropped on the way out.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.scratch.clear();
        self.scratch.extend(framebuffer.pixels.iter().map(|p| p & 0x00FF_FFFF));
        self.window
            .update_with_buffer(&self.scratch, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down.
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current window content size; the overlay is laid out to this.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }
}

/* ---------- 5x7 bitmap font (just the letters the hints use) ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        ' ' => g!(0,0,0,0,0,0,0),
        _ => None,
    }
}

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }
    fb.pixels[y * fb.width + x] = color.0;
}

/// One glyph with a 1-pixel black drop shadow so it reads over the mask.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Color) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (dx, dy, c) in [(1, 1, Color::BLACK), (0, 0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if rowbits & (1 << (4 - rx)) != 0 {
                    put_pixel(fb, x + rx + dx, y + ry as i32 + dy, c);
                }
            }
        }
    }
}

/// Pixel width of `text` at 5x7 with 1-pixel spacing.
pub fn text_width(text: &str) -> i32 {
    (text.chars().count() as i32 * 6 - 1).max(0)
}

pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Color) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}

/// Centre `text` horizontally on the cutout, `gap` pixels below its bottom edge.
/// Returns the top-left corner used.
pub fn draw_hint(fb: &mut FrameBuffer, cutout: &CutoutRect, text: &str, gap: i32, color: Color) -> (i32, i32) {
    let x = cutout.left + (cutout.width() - text_width(text)) / 2;
    let y = cutout.bottom + gap;
    draw_text_5x7(fb, x, y, text, color);
    (x, y)
}
