use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::media::frame_source::{FrameError, FrameSource, VideoFrame};

/// Loops a directory of PNG frames at a fixed rate.
pub struct ImageSequenceSource {
    frames: Vec<PathBuf>,
    frame_rate: f32,
    current: Option<usize>,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path, frame_rate: f32) -> Result<Self, FrameError> {
        let entries = fs::read_dir(dir).map_err(|source| FrameError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(FrameError::Empty(dir.to_path_buf()));
        }

        info!("Frame sequence: {} frames from {}", frames.len(), dir.display());
        Ok(Self {
            frames,
            frame_rate,
            current: None,
        })
    }

    fn index_at(&self, elapsed_secs: f32) -> usize {
        let frame = (elapsed_secs.max(0.0) * self.frame_rate) as usize;
        frame % self.frames.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self, elapsed_secs: f32) -> Result<Option<VideoFrame>, FrameError> {
        let index = self.index_at(elapsed_secs);
        if self.current == Some(index) {
            return Ok(None);
        }

        let path = &self.frames[index];
        let decoded = image::open(path)
            .map_err(|source| FrameError::Decode {
                path: path.clone(),
                source,
            })?
            .to_rgba8();

        self.current = Some(index);
        Ok(Some(VideoFrame {
            width: decoded.width(),
            height: decoded.height(),
            rgba: decoded.into_raw(),
        }))
    }
}

/// Resolve an asset-relative path the same way the asset server does for
/// native builds.
pub fn asset_path(relative: &str) -> PathBuf {
    asset_base(
        std::env::var("BEVY_ASSET_ROOT").ok(),
        std::env::var("CARGO_MANIFEST_DIR").ok(),
        std::env::current_exe().ok(),
    )
    .join("assets")
    .join(relative)
}

/// `BEVY_ASSET_ROOT`, then `CARGO_MANIFEST_DIR`, then the executable's directory.
fn asset_base(
    asset_root: Option<String>,
    manifest_dir: Option<String>,
    executable: Option<PathBuf>,
) -> PathBuf {
    asset_root
        .or(manifest_dir)
        .map(PathBuf::from)
        .or_else(|| executable.and_then(|exe| exe.parent().map(Path::to_path_buf)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chroma-room-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_frame(dir: &Path, name: &str, rgb: [u8; 3]) {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([rgb[0], rgb[1], rgb[2], 255]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = std::env::temp_dir().join("chroma-room-does-not-exist");
        assert!(matches!(
            ImageSequenceSource::open(&dir, 24.0),
            Err(FrameError::Io { .. })
        ));
    }

    #[test]
    fn directory_without_png_is_empty() {
        let dir = scratch_dir("empty");
        fs::write(dir.join("notes.txt"), "not a frame").unwrap();
        assert!(matches!(
            ImageSequenceSource::open(&dir, 24.0),
            Err(FrameError::Empty(_))
        ));
    }

    #[test]
    fn plays_frames_in_order_and_loops() {
        let dir = scratch_dir("loop");
        write_frame(&dir, "frame_000.png", [255, 0, 0]);
        write_frame(&dir, "frame_001.png", [0, 0, 255]);

        let mut source = ImageSequenceSource::open(&dir, 2.0).unwrap();

        let first = source.next_frame(0.0).unwrap().unwrap();
        assert_eq!((first.width, first.height), (2, 2));
        assert_eq!(&first.rgba[..4], &[255, 0, 0, 255]);

        // Same frame index yields nothing new.
        assert!(source.next_frame(0.2).unwrap().is_none());

        let second = source.next_frame(0.5).unwrap().unwrap();
        assert_eq!(&second.rgba[..4], &[0, 0, 255, 255]);

        let looped = source.next_frame(1.0).unwrap().unwrap();
        assert_eq!(&looped.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn corrupt_frame_is_a_decode_error() {
        let dir = scratch_dir("corrupt");
        fs::write(dir.join("frame_000.png"), b"garbage").unwrap();
        let mut source = ImageSequenceSource::open(&dir, 24.0).unwrap();
        assert!(matches!(
            source.next_frame(0.0),
            Err(FrameError::Decode { .. })
        ));
    }

    #[test]
    fn shipped_binary_resolves_assets_beside_itself() {
        let exe = PathBuf::from("/opt/chroma-room/bin/chroma-room");
        assert_eq!(
            asset_base(None, None, Some(exe.clone())),
            PathBuf::from("/opt/chroma-room/bin")
        );
        assert_eq!(
            asset_base(None, Some("/src/chroma-room".into()), Some(exe.clone())),
            PathBuf::from("/src/chroma-room")
        );
        assert_eq!(
            asset_base(Some("/data".into()), Some("/src/chroma-room".into()), Some(exe)),
            PathBuf::from("/data")
        );
    }
}
