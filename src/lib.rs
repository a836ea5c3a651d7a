//! Barcode scan-window overlay for a live camera preview: a dimmed mask with a
//! clear cutout, corner brackets, and a laser line swept at a frame-rate
//! independent speed. Rendering is pure software onto ARGB buffers.

pub mod camera;
pub mod cli;
pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod frame;
pub mod laser;
pub mod layout;
pub mod raster;
pub mod render;
pub mod snapshot;
pub mod types;

pub use config::FrameConfig;
pub use error::Error;
pub use frame::ScanFrame;
pub use render::{Compositor, RenderCommand};
pub use types::{Color, CutoutRect, FrameBuffer, Viewport};
