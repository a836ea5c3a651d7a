// Render commands produced by one overlay tick, and the compositor that
// rasterises them onto a FrameBuffer.
//
// Order matters: the dimming layer is blitted first, then brackets, then the
// laser. The layer carries its own fixed guide color, so changing the bracket
// color never touches the cached layer.

use crate::raster;
use crate::types::{Color, CutoutRect, FrameBuffer, Viewport};

/// Off-screen dimming layer: fill, punch the hole, stroke the guide outline.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskLayer {
    pub viewport: Viewport,
    pub hole: CutoutRect,
    pub corner_radius: f32,
    pub fill: Color,
    pub guide: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Bracket,
    Laser,
}

/// One butt-capped segment drawn straight onto the target surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub kind: StrokeKind,
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Mask(MaskLayer),
    Stroke(Stroke),
}

impl MaskLayer {
    /// Rasterise the layer into a fresh viewport-sized buffer.
    pub fn rasterize(&self) -> FrameBuffer {
        let mut layer = FrameBuffer::new(self.viewport.width as usize, self.viewport.height as usize);
        raster::fill(&mut layer, self.fill);
        raster::clear_round_rect(&mut layer, &self.hole, self.corner_radius);
        // Hairline guide, same paint that did the clear minus the xfer mode.
        raster::stroke_round_rect(&mut layer, &self.hole, self.corner_radius, 0.0, self.guide);
        layer
    }
}

/// Executes command lists. Keeps the last mask layer around and reuses it while
/// its description is unchanged (same viewport, hole and style).
#[derive(Default)]
pub struct Compositor {
    cached: Option<(MaskLayer, FrameBuffer)>,
    rebuilds: u64,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `commands` onto `target` in order.
    pub fn execute(&mut self, commands: &[RenderCommand], target: &mut FrameBuffer) {
        for cmd in commands {
            match cmd {
                RenderCommand::Mask(mask) => {
                    let layer = self.layer_for(mask);
                    raster::blit_over(target, layer);
                }
                RenderCommand::Stroke(s) => {
                    raster::stroke_line(target, s.from, s.to, s.width, s.color);
                }
            }
        }
    }

    /// How many times the mask layer has been rasterised.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Drop the cached layer; the next mask command rebuilds it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    fn layer_for(&mut self, mask: &MaskLayer) -> &FrameBuffer {
        if !matches!(&self.cached, Some((key, _)) if key == mask) {
            self.cached = None;
        }
        let (_, layer) = self.cached.get_or_insert_with(|| {
            log::trace!(
                "rebuilding mask layer {}x{} hole {:?}",
                mask.viewport.width, mask.viewport.height, mask.hole
            );
            self.rebuilds += 1;
            (mask.clone(), mask.rasterize())
        });
        layer
    }
}
