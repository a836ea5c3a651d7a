// The scan-window overlay: a dimmed mask with a clear cutout, four corner
// brackets and a laser sweeping down the cutout.
//
// The host owns the refresh mechanism. It calls `on_layout` when it sizes the
// overlay, pushes colors through the setters, and whenever `wants_redraw`
// returns true it calls `redraw` and executes the returned commands.

use crate::clock::{FrameClock, LoopState, RedrawLoop};
use crate::config::FrameConfig;
use crate::laser::Laser;
use crate::layout;
use crate::render::{MaskLayer, RenderCommand, Stroke, StrokeKind};
use crate::types::{Color, CutoutRect, Viewport};

pub struct ScanFrame {
    config: FrameConfig,
    viewport: Viewport,
    cutout: CutoutRect,
    frame_color: Color,
    laser_color: Color,
    laser: Laser,
    clock: FrameClock,
    redraw: RedrawLoop,
}

impl ScanFrame {
    /// `config.bracket_length` is read here once; later edits to the host's
    /// theme do not reach an existing overlay.
    pub fn new(config: FrameConfig) -> Self {
        Self {
            frame_color: config.frame_color,
            laser_color: config.laser_color,
            config,
            viewport: Viewport::default(),
            cutout: CutoutRect::default(),
            laser: Laser::new(),
            clock: FrameClock::new(),
            redraw: RedrawLoop::new(),
        }
    }

    /// Host assigned a size. The cutout is recomputed only when it changed.
    pub fn on_layout(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        // The initial 0x0 viewport already has its (all-zero) cutout.
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.cutout = layout::cutout_for(viewport, &self.config);
        log::debug!("layout {width}x{height} -> cutout {:?}", self.cutout);
    }

    pub fn set_frame_color(&mut self, color: Color) {
        self.frame_color = color;
    }

    pub fn set_laser_color(&mut self, color: Color) {
        self.laser_color = color;
    }

    pub fn cutout(&self) -> CutoutRect { self.cutout }
    pub fn viewport(&self) -> Viewport { self.viewport }

    /// Current laser row, i.e. where the next frame draws it before wrapping.
    pub fn laser_y(&self) -> i32 {
        self.laser.y()
    }

    pub fn set_laser_y(&mut self, y: i32) {
        self.laser.set_y(y);
    }

    /// Pure frame step: build this frame's commands and advance the laser by
    /// `elapsed_ms`. Mask first, then brackets, then the laser.
    pub fn tick(&mut self, elapsed_ms: u64) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(10);
        commands.push(RenderCommand::Mask(self.mask_layer()));
        self.push_brackets(&mut commands);

        let y = self.laser.step(&self.cutout, elapsed_ms, self.config.animation_speed);
        let stroke = self.config.stroke_width as f32;
        let row = y as f32;
        commands.push(RenderCommand::Stroke(Stroke {
            kind: StrokeKind::Laser,
            from: (self.cutout.left as f32 + stroke, row),
            to: (self.cutout.right as f32 - stroke, row),
            width: stroke,
            color: self.laser_color,
        }));
        commands
    }

    /// Clocked redraw: elapsed time since the previous redraw drives `tick`,
    /// the clock restarts after the frame, and the loop re-arms itself.
    pub fn redraw(&mut self) -> Vec<RenderCommand> {
        let elapsed = self.clock.elapsed_ms();
        let commands = self.tick(elapsed);
        self.clock.reset();
        self.redraw.request();
        commands
    }

    pub fn start(&mut self) {
        self.clock.reset();
        self.redraw.start();
    }

    pub fn stop(&mut self) {
        self.redraw.stop();
    }

    /// Tear down: stop asking the host for frames.
    pub fn dispose(mut self) {
        self.redraw.stop();
        log::debug!("scan frame disposed after {} frames", self.redraw.frames());
    }

    /// Host refresh callback: true when a redraw has been requested.
    pub fn wants_redraw(&mut self) -> bool {
        self.redraw.take_request()
    }

    pub fn loop_state(&self) -> LoopState {
        self.redraw.state()
    }

    fn mask_layer(&self) -> MaskLayer {
        MaskLayer {
            viewport: self.viewport,
            hole: self.cutout,
            corner_radius: self.config.corner_radius,
            fill: self.config.mask_color,
            guide: self.config.guide_color,
        }
    }

    /// Eight legs, two per corner, each starting at the corner and running
    /// `bracket_length` toward the centre.
    fn push_brackets(&self, commands: &mut Vec<RenderCommand>) {
        let CutoutRect { left, top, right, bottom } = self.cutout;
        let (l, t, r, b) = (left as f32, top as f32, right as f32, bottom as f32);
        let m = self.config.bracket_length as f32;
        let legs = [
            ((l, t), (l, t + m)),
            ((l, t), (l + m, t)),
            ((l, b), (l, b - m)),
            ((l, b), (l + m, b)),
            ((r, t), (r - m, t)),
            ((r, t), (r, t + m)),
            ((r, b), (r, b - m)),
            ((r, b), (r - m, b)),
        ];
        for (from, to) in legs {
            commands.push(RenderCommand::Stroke(Stroke {
                kind: StrokeKind::Bracket,
                from,
                to,
                width: self.config.stroke_width as f32,
                color: self.frame_color,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    fn frame() -> ScanFrame {
        let mut f = ScanFrame::new(FrameConfig::with_bracket_length(30));
        f.on_layout(1000, 1000);
        f
    }

    fn laser_stroke(cmds: &[RenderCommand]) -> &Stroke {
        cmds.iter()
            .find_map(|c| match c {
                RenderCommand::Stroke(s) if s.kind == StrokeKind::Laser => Some(s),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn tick_orders_mask_brackets_laser() {
        let cmds = frame().tick(0);
        assert_eq!(cmds.len(), 10);
        assert!(matches!(cmds[0], RenderCommand::Mask(_)));
        for c in &cmds[1..9] {
            assert!(matches!(c, RenderCommand::Stroke(s) if s.kind == StrokeKind::Bracket));
        }
        assert!(matches!(&cmds[9], RenderCommand::Stroke(s) if s.kind == StrokeKind::Laser));
    }

    #[test]
    fn laser_spans_cutout_inset_by_stroke() {
        let mut f = frame();
        let cmds = f.tick(0);
        let s = laser_stroke(&cmds);
        assert_eq!(s.from, (147.0, 364.0));
        assert_eq!(s.to, (853.0, 364.0));
        assert_eq!(s.width, 5.0);
    }

    #[test]
    fn brackets_anchor_at_corners() {
        let cmds = frame().tick(0);
        let legs: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Stroke(s) if s.kind == StrokeKind::Bracket => Some((s.from, s.to)),
                _ => None,
            })
            .collect();
        assert!(legs.contains(&((142.0, 364.0), (142.0, 394.0))));
        assert!(legs.contains(&((142.0, 364.0), (172.0, 364.0))));
        assert!(legs.contains(&((858.0, 636.0), (828.0, 636.0))));
        assert!(legs.contains(&((858.0, 636.0), (858.0, 606.0))));
    }

    #[test]
    fn speed_law() {
        let mut f = frame();
        f.set_laser_y(400);
        f.tick(800);
        assert_eq!(f.laser_y(), 500);
        f.tick(0);
        assert_eq!(f.laser_y(), 500);
    }

    #[test]
    fn colors_apply_on_next_tick() {
        let mut f = frame();
        f.set_frame_color(Color::RED);
        f.set_laser_color(Color(0xFF00_FF00));
        let cmds = f.tick(0);
        assert!(matches!(&cmds[1], RenderCommand::Stroke(s) if s.color == Color::RED));
        assert_eq!(laser_stroke(&cmds).color, Color(0xFF00_FF00));
    }

    #[test]
    fn setters_do_not_request_redraws() {
        let mut f = frame();
        f.set_frame_color(Color::RED);
        f.set_laser_color(Color::RED);
        assert!(!f.wants_redraw());
    }

    #[test]
    fn resize_recomputes_cutout() {
        let mut f = frame();
        f.on_layout(700, 1100);
        assert_eq!(f.cutout(), CutoutRect { left: 100, top: 400, right: 600, bottom: 700 });
    }

    #[test]
    fn redraw_feeds_wall_clock_delta_to_laser() {
        let mut f = frame();
        f.set_laser_y(364);
        let before_start = Instant::now();
        f.start();
        thread::sleep(Duration::from_millis(80));
        let before_first = Instant::now();
        f.redraw();
        let upper = before_start.elapsed().as_millis() as i32 / 8;
        let first = f.laser_y() - 364;
        assert!(first >= 10 && first <= upper, "advanced {first}, bound {upper}");

        // The clock restarted after that frame, so an immediate redraw barely moves.
        let y = f.laser_y();
        f.redraw();
        let upper = before_first.elapsed().as_millis() as i32 / 8;
        if y <= f.cutout().bottom {
            let second = f.laser_y() - y;
            assert!(second <= upper, "advanced {second} right after a frame, bound {upper}");
        }
    }

    #[test]
    fn redraw_loop_runs_until_stopped() {
        let mut f = frame();
        assert!(!f.wants_redraw());
        f.start();
        assert!(f.wants_redraw());
        f.redraw();
        assert!(f.wants_redraw());
        f.stop();
        f.redraw();
        assert!(!f.wants_redraw());
        assert_eq!(f.loop_state(), LoopState::Stopped);
    }
}
