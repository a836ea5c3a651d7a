use std::time::Instant;

/// Wall-clock delta between redraws, in whole milliseconds.
/// `elapsed_ms` does not advance the clock; call `reset` once the frame is drawn.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.last.elapsed().as_millis().min(u64::MAX as u128) as u64
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// The self-re-arming redraw request, made explicit. Every finished redraw
/// calls `request`; the host polls `take_request` from its refresh callback.
/// Once stopped, requests are dropped and nothing is left pending.
#[derive(Debug, Default)]
pub struct RedrawLoop {
    state: LoopState,
    pending: bool,
    frames: u64,
}

impl RedrawLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the loop with one redraw pending.
    pub fn start(&mut self) {
        if self.state != LoopState::Running {
            log::debug!("redraw loop started");
        }
        self.state = LoopState::Running;
        self.pending = true;
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("redraw loop stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
        self.pending = false;
    }

    /// Ask for another frame. Ignored unless running.
    pub fn request(&mut self) {
        if self.is_running() {
            self.pending = true;
            self.frames += 1;
        }
    }

    /// Consume the pending request, if any.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Redraws completed while running.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
