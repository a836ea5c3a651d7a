// Software rasteriser for the overlay: fills, a destination-out hole,
// rounded-rect outlines and thick butt-capped segments, all on ARGB buffers.
// Pixels are sampled at their centres (x + 0.5, y + 0.5); no anti-aliasing.

use crate::types::{Color, CutoutRect, FrameBuffer};

/// Source-over blend of one straight-alpha ARGB pixel onto another.
#[inline]
pub fn blend_over(dst: u32, src: u32) -> u32 {
    let sa = src >> 24;
    if sa == 255 { return src; }
    if sa == 0 { return dst; }
    let da = dst >> 24;

    let inv = 255 - sa;
    let out_a = sa + (da * inv + 127) / 255;
    if out_a == 0 { return 0; }

    let den = out_a * 255;
    let channel = |shift: u32| -> u32 {
        let sc = (src >> shift) & 0xFF;
        let dc = (dst >> shift) & 0xFF;
        let num = sc * sa * 255 + dc * da * inv;
        ((num + den / 2) / den).min(255)
    };

    (out_a << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// Blend `color` onto the pixel at (x,y) if it is inside the buffer.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }
    let idx = y * fb.width + x;
    fb.pixels[idx] = blend_over(fb.pixels[idx], color.0);
}

/// Overwrite every pixel (no blending), like painting an empty layer.
pub fn fill(fb: &mut FrameBuffer, color: Color) {
    for p in &mut fb.pixels { *p = color.0; }
}

/// Signed distance from `(px,py)` to the rounded rectangle; negative inside.
fn round_rect_distance(rect: &CutoutRect, radius: f32, px: f32, py: f32) -> f32 {
    let half_w = (rect.right - rect.left) as f32 * 0.5;
    let half_h = (rect.bottom - rect.top) as f32 * 0.5;
    let cx = rect.left as f32 + half_w;
    let cy = rect.top as f32 + half_h;
    let r = radius.clamp(0.0, half_w.min(half_h));

    let qx = (px - cx).abs() - (half_w - r);
    let qy = (py - cy).abs() - (half_h - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Visit every pixel whose centre lies in the rect grown by `pad`, clipped to `fb`.
fn for_each_near(
    fb: &FrameBuffer,
    rect: &CutoutRect,
    pad: i32,
    mut f: impl FnMut(i32, i32),
) {
    let x0 = (rect.left - pad).max(0);
    let y0 = (rect.top - pad).max(0);
    let x1 = (rect.right + pad).min(fb.width as i32);
    let y1 = (rect.bottom + pad).min(fb.height as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            f(x, y);
        }
    }
}

/// Destination-out with a fully opaque shape: pixels inside the rounded rect
/// become fully transparent. An inverted or empty rect clears nothing.
pub fn clear_round_rect(fb: &mut FrameBuffer, rect: &CutoutRect, radius: f32) {
    if !rect.is_proper() { return; }
    let width = fb.width;
    let mut hits = Vec::new();
    for_each_near(fb, rect, 0, |x, y| {
        if round_rect_distance(rect, radius, x as f32 + 0.5, y as f32 + 0.5) < 0.0 {
            hits.push(y as usize * width + x as usize);
        }
    });
    for idx in hits { fb.pixels[idx] = 0; }
}

/// Outline of the rounded rect, centred on its edge. A width of 0 is a hairline.
pub fn stroke_round_rect(fb: &mut FrameBuffer, rect: &CutoutRect, radius: f32, width: f32, color: Color) {
    if !rect.is_proper() { return; }
    let half = width.max(1.0) * 0.5;
    let pad = half.ceil() as i32 + 1;
    let mut hits = Vec::new();
    for_each_near(fb, rect, pad, |x, y| {
        let d = round_rect_distance(rect, radius, x as f32 + 0.5, y as f32 + 0.5);
        if d >= -half && d < half {
            hits.push((x, y));
        }
    });
    for (x, y) in hits { blend_pixel(fb, x, y, color); }
}

/// Thick segment from `from` to `to` with butt caps: covers pixel centres
/// whose projection lies in `[0, len)` along the segment and within
/// `(-width/2, width/2]` across it. Zero-length segments draw nothing.
pub fn stroke_line(fb: &mut FrameBuffer, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
    let (ax, ay) = from;
    let dx = to.0 - ax;
    let dy = to.1 - ay;
    let len = (dx * dx + dy * dy).sqrt();
    if len <= 0.0 || !len.is_finite() { return; }

    let (ux, uy) = (dx / len, dy / len); // along
    let (nx, ny) = (-uy, ux);            // across
    let half = width.max(1.0) * 0.5;

    // Bounding box of the stroke, clipped to the buffer.
    let min_x = (ax.min(to.0) - half).floor().max(0.0) as i32;
    let min_y = (ay.min(to.1) - half).floor().max(0.0) as i32;
    let max_x = ((ax.max(to.0) + half).ceil() as i32).min(fb.width as i32);
    let max_y = ((ay.max(to.1) + half).ceil() as i32).min(fb.height as i32);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let px = x as f32 + 0.5 - ax;
            let py = y as f32 + 0.5 - ay;
            let t = px * ux + py * uy;
            let d = px * nx + py * ny;
            if t >= 0.0 && t < len && d > -half && d <= half {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/// Source-over blit of `src` onto `dst` at the origin; extra pixels are clipped.
pub fn blit_over(dst: &mut FrameBuffer, src: &FrameBuffer) {
    let w = dst.width.min(src.width);
    let h = dst.height.min(src.height);
    for y in 0..h {
        let d_row = y * dst.width;
        let s_row = y * src.width;
        for x in 0..w {
            let d = &mut dst.pixels[d_row + x];
            *d = blend_over(*d, src.pixels[s_row + x]);
        }
    }
}
