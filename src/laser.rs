// Scan laser: one vertical position, wrapped back to the top of the cutout
// whenever it leaves it, advanced by elapsed wall-clock time.

use std::num::NonZeroU64;

use crate::types::CutoutRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Laser {
    y: i32,
}

impl Laser {
    /// Starts at y = 0; the first step snaps it into the cutout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Place the laser directly (hosts restoring state, tests).
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    /// Pixels travelled in `elapsed_ms`: `floor(elapsed_ms / speed)`.
    pub fn travel(elapsed_ms: u64, speed: NonZeroU64) -> i32 {
        (elapsed_ms / speed.get()).min(i32::MAX as u64) as i32
    }

    /// Re-enter at the top when outside `[top, bottom]`. Re-entry, not bounce.
    pub fn wrap(&mut self, cutout: &CutoutRect) {
        if self.y > cutout.bottom || self.y < cutout.top {
            self.y = cutout.top;
        }
    }

    /// One redraw: wrap, report the row to draw, then advance.
    pub fn step(&mut self, cutout: &CutoutRect, elapsed_ms: u64, speed: NonZeroU64) -> i32 {
        self.wrap(cutout);
        let drawn = self.y;
        self.y = self.y.saturating_add(Self::travel(elapsed_ms, speed));
        drawn
    }
}
