// Frame sources for the preview underneath the overlay.
// `CameraCapture` opens a real device via nokhwa; `TestPattern` fakes one so the
// overlay can be previewed (or snapshotted) on machines without a camera.

use crate::error::Error;
use crate::types::{Color, FrameBuffer};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that can hand the host a fresh opaque frame to draw over.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error>;
    fn resolution(&self) -> (u32, u32);
}

// A small wrapper around nokhwa::Camera so the host loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution (the driver may pick
    /// a slightly different one) and start streaming.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        log::info!("camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self { cam, width: actual.width(), height: actual.height() })
    }
}

impl FrameSource for CameraCapture {
    /// Blocks until the next frame, then packs it as opaque 0xFFRRGGBB.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| Color::from_argb(0xFF, p[0], p[1], p[2]).0)
            .collect();

        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Slowly scrolling diagonal gradient; stands in for a camera.
pub struct TestPattern {
    width: u32,
    height: u32,
    phase: u32,
}

impl TestPattern {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, phase: 0 }
    }
}

impl FrameSource for TestPattern {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let r = (x as u32).wrapping_add(self.phase) as u8;
                let g = (y as u32).wrapping_add(self.phase / 2) as u8;
                let b = ((x + y) / 2) as u8;
                pixels.push(Color::from_argb(0xFF, r, g, b).0);
            }
        }
        self.phase = self.phase.wrapping_add(1);
        Ok(FrameBuffer { width: w, height: h, pixels })
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_frames_are_opaque_and_sized() {
        let mut p = TestPattern::new(16, 9);
        let f = p.next_frame().unwrap();
        assert_eq!((f.width, f.height), (16, 9));
        assert_eq!(f.pixels.len(), 16 * 9);
        assert!(f.pixels.iter().all(|px| px >> 24 == 0xFF));
    }

    #[test]
    fn pattern_scrolls() {
        let mut p = TestPattern::new(4, 4);
        let a = p.next_frame().unwrap();
        let b = p.next_frame().unwrap();
        assert_ne!(a, b);
    }
}
