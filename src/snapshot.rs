// Headless output: turn a composited frame into an image and write it out.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::Error;
use crate::types::FrameBuffer;

/// ARGB words to an RGBA image, alpha preserved.
pub fn to_rgba_image(fb: &FrameBuffer) -> RgbaImage {
    RgbaImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let p = fb.pixels[y as usize * fb.width + x as usize];
        Rgba([(p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8])
    })
}

/// Write `fb` as an image; the format follows the file extension.
pub fn save(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_rgba_image(fb)
        .save(path)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))?;
    log::info!("wrote snapshot {}x{} to {}", fb.width, fb.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn channels_are_reordered() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.pixels[1] = 0x7711_2233;
        let img = to_rgba_image(&fb);
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([0x11, 0x22, 0x33, 0x77]));
    }

    #[test]
    fn saves_png() {
        let fb = FrameBuffer::filled(3, 2, Color::RED);
        let path = std::env::temp_dir().join(format!("scan-frame-{}.png", std::process::id()));
        save(&fb, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(2, 1), &Rgba([255, 0, 0, 255]));
        let _ = std::fs::remove_file(&path);
    }
}
