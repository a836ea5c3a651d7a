// What you SEE:
// • The live camera (or a moving test pattern) fills the window.
// • A dark translucent mask covers everything except the scan window.
// • Four corner brackets frame the window; a laser line sweeps down inside it.
// • A short hint sits centred under the window. ESC quits.

use std::time::{Duration, Instant};

use clap::Parser;

use scan_frame::camera::{CameraCapture, FrameSource, TestPattern};
use scan_frame::cli::Cli;
use scan_frame::draw::{self, Drawer};
use scan_frame::{Color, Compositor, Error, FrameBuffer, FrameConfig, ScanFrame, snapshot};

const HINT_GAP: i32 = 12;

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    /* --- Overlay config: file first, CLI on top --- */
    let mut config = FrameConfig::load(&cli.config)?;
    if let Some(len) = cli.bracket_length { config.bracket_length = len; }
    // The host always pushes its colors; these are its defaults.
    let frame_color = cli.frame_color.unwrap_or(Color::WHITE);
    let laser_color = cli.laser_color.unwrap_or(Color::RED);

    let mut source = open_source(&cli);
    let (w, h) = source.resolution();

    let mut overlay = ScanFrame::new(config);
    overlay.set_frame_color(frame_color);
    overlay.set_laser_color(laser_color);
    overlay.on_layout(w, h);
    let mut compositor = Compositor::new();

    if let Some(path) = &cli.snapshot {
        let mut screen = source.next_frame()?;
        compositor.execute(&overlay.tick(0), &mut screen);
        draw::draw_hint(&mut screen, &overlay.cutout(), &cli.hint, HINT_GAP, Color::WHITE);
        snapshot::save(&screen, path)?;
        overlay.dispose();
        return Ok(());
    }

    let mut drawer = Drawer::new("Scan Frame", w as usize, h as usize)?;
    overlay.start();

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Fresh preview frame; this is the base we draw over.
        let mut screen: FrameBuffer = source.next_frame()?;

        // 2) Window or camera may have changed size; the overlay follows the frame.
        overlay.on_layout(screen.width as u32, screen.height as u32);

        // 3) Overlay redraw if one is pending (it always is while running).
        if overlay.wants_redraw() {
            let commands = overlay.redraw();
            compositor.execute(&commands, &mut screen);
        }
        draw::draw_hint(&mut screen, &overlay.cutout(), &cli.hint, HINT_GAP, Color::WHITE);

        // 4) Present.
        drawer.present(&screen)?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::info!("FPS: {:.1} (window {:?})", frames_this_second as f32 / secs, drawer.size());
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    overlay.dispose();
    Ok(())
}

/// Camera if requested and available, otherwise the test pattern.
fn open_source(cli: &Cli) -> Box<dyn FrameSource> {
    if cli.test_pattern {
        return Box::new(TestPattern::new(cli.width, cli.height));
    }
    match CameraCapture::new(cli.camera, cli.width, cli.height) {
        Ok(cam) => Box::new(cam),
        Err(e) => {
            log::warn!("{e}; falling back to test pattern");
            Box::new(TestPattern::new(cli.width, cli.height))
        }
    }
}
