use std::path::PathBuf;
use thiserror::Error;

/// One decoded RGBA8 frame, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("cannot read frame directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no PNG frames found in {0}")]
    Empty(PathBuf),
    #[error("failed to decode frame {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("browser video source: {0}")]
    Dom(String),
}

/// Continuously updating image source sampled once per rendered frame.
pub trait FrameSource {
    /// Returns a frame only when the picture changed since the last call.
    fn next_frame(&mut self, elapsed_secs: f32) -> Result<Option<VideoFrame>, FrameError>;
}
