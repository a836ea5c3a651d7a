// cli.rs - Command-line interface for the demo host
use std::path::PathBuf;

use clap::Parser;

use crate::types::Color;

#[derive(Parser, Debug, Clone)]
#[command(name = "scan-frame")]
#[command(about = "Barcode scan-window overlay over a live camera preview", long_about = None)]
pub struct Cli {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested preview width (the camera may pick another)
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested preview height (the camera may pick another)
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// TOML file with overlay settings
    #[arg(long, default_value = "scan-frame.toml")]
    pub config: PathBuf,

    /// Corner bracket color, #RRGGBB or #AARRGGBB
    #[arg(long)]
    pub frame_color: Option<Color>,

    /// Laser color, #RRGGBB or #AARRGGBB
    #[arg(long)]
    pub laser_color: Option<Color>,

    /// Corner bracket leg length in pixels
    #[arg(long)]
    pub bracket_length: Option<u32>,

    /// Use a synthetic moving pattern instead of a camera
    #[arg(long = "test-pattern", default_value = "false")]
    pub test_pattern: bool,

    /// Text printed under the scan window
    #[arg(long, default_value = "MOVE CLOSER")]
    pub hint: String,

    /// Render one frame to this PNG and exit (no window)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["scan-frame"]);
        assert_eq!(cli.camera, 0);
        assert_eq!((cli.width, cli.height), (640, 480));
        assert!(!cli.test_pattern);
        assert!(cli.frame_color.is_none());
        assert!(cli.snapshot.is_none());
    }

    #[test]
    fn parses_colors_and_flags() {
        let cli = Cli::parse_from([
            "scan-frame",
            "--frame-color", "#FFFFFF",
            "--laser-color", "#80FF0000",
            "--bracket-length", "24",
            "--test-pattern",
        ]);
        assert_eq!(cli.frame_color, Some(Color::WHITE));
        assert_eq!(cli.laser_color, Some(Color(0x80FF_0000)));
        assert_eq!(cli.bracket_length, Some(24));
        assert!(cli.test_pattern);
    }

    #[test]
    fn rejects_bad_color() {
        assert!(Cli::try_parse_from(["scan-frame", "--laser-color", "blue"]).is_err());
    }
}
