// Cutout geometry: fixed proportional margins around the scan window.

use crate::config::FrameConfig;
use crate::types::{CutoutRect, Viewport};

/// Derive the scan window for a viewport.
/// Horizontal margin is `W / width_scale` (integer division), vertical margin is
/// `round(H / height_scale)`. Tiny viewports may yield an inverted rectangle;
/// that is passed through untouched.
pub fn compute_cutout(viewport: Viewport, width_scale: u32, height_scale: f64) -> CutoutRect {
    let w = viewport.width as i64;
    let h = viewport.height as i64;

    let mx = w.checked_div(width_scale as i64).unwrap_or(0);
    // A zero, negative or NaN scale saturates (or casts to 0) instead of panicking.
    let my = (h as f64 / height_scale).round() as i64;

    CutoutRect {
        left: clamp_i32(mx),
        top: clamp_i32(my),
        right: clamp_i32(w.saturating_sub(mx)),
        bottom: clamp_i32(h.saturating_sub(my)),
    }
}

/// Same as [`compute_cutout`] using the scales from a config.
pub fn cutout_for(viewport: Viewport, config: &FrameConfig) -> CutoutRect {
    compute_cutout(viewport, config.width_scale, config.height_scale)
}

#[inline]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
