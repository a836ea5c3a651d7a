// Host-side errors. The overlay core itself never fails; everything here comes
// from the window, the camera, the config file or user input.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),   // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String),   // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),  // Grabbing/decoding a frame failed
    #[error("Config error: {0}")]
    Config(String),       // Reading or parsing the config file failed
    #[error("Invalid color {0:?}: expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
    #[error("Snapshot error: {0}")]
    Snapshot(String),     // Writing the PNG snapshot failed
}
