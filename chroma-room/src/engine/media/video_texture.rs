use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use constants::media::VIDEO_TEXTURE_SIZE;

use crate::engine::config::scene_config::{MediaConfig, SceneConfig};
use crate::engine::media::frame_source::{FrameSource, VideoFrame};
use crate::engine::scene::video_plane::VideoPlane;
use crate::engine::shaders::chroma_key::discard_ratio;

/// The scene's only video texture. Frames are written into it in place.
#[derive(Resource, Debug, Clone)]
pub struct VideoTexture {
    pub handle: Handle<Image>,
}

impl VideoTexture {
    /// Blank `Rgba8Unorm` placeholder. Unorm keeps shader samples in raw,
    /// non gamma-decoded RGB for the key comparison.
    pub fn create(images: &mut Assets<Image>) -> Self {
        let [width, height] = VIDEO_TEXTURE_SIZE;
        let image = Image::new_fill(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[0, 0, 0, 0],
            TextureFormat::Rgba8Unorm,
            RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
        );
        Self {
            handle: images.add(image),
        }
    }
}

/// Owner of the frame collaborator. Non-send because browser handles are
/// bound to the main thread.
pub struct VideoFeed {
    source: Option<Box<dyn FrameSource>>,
    frames_uploaded: u64,
}

impl VideoFeed {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source: Some(source),
            frames_uploaded: 0,
        }
    }

    pub fn disabled() -> Self {
        Self {
            source: None,
            frames_uploaded: 0,
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    #[cfg(test)]
    pub fn frames_uploaded(&self) -> u64 {
        self.frames_uploaded
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(media: &MediaConfig) -> Self {
        use crate::engine::media::image_sequence::{ImageSequenceSource, asset_path};

        let dir = asset_path(&media.video_frames_dir);
        match ImageSequenceSource::open(&dir, media.frame_rate) {
            Ok(source) => Self::new(Box::new(source)),
            Err(error) => {
                warn!("Video unavailable: {error}");
                Self::disabled()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn open(media: &MediaConfig) -> Self {
        use crate::engine::media::html_video::HtmlVideoSource;

        match HtmlVideoSource::open(&media.video_url) {
            Ok(source) => Self::new(Box::new(source)),
            Err(error) => {
                warn!("Video unavailable: {error}");
                Self::disabled()
            }
        }
    }
}

/// Exclusive startup step: the feed is a non-send resource.
pub fn open_video_feed(world: &mut World) {
    if world.get_non_send_resource::<VideoFeed>().is_some() {
        return;
    }
    let media = world
        .get_resource::<SceneConfig>()
        .map(|config| config.media.clone())
        .unwrap_or_default();
    world.insert_non_send_resource(VideoFeed::open(&media));
}

/// Copy the newest frame into the video texture. The first frame reveals the
/// plane; a source error disables the feed for good.
pub fn upload_video_frames(
    feed: Option<NonSendMut<VideoFeed>>,
    time: Res<Time>,
    video: Option<Res<VideoTexture>>,
    config: Res<SceneConfig>,
    mut images: ResMut<Assets<Image>>,
    mut planes: Query<&mut Visibility, With<VideoPlane>>,
) {
    let (Some(mut feed), Some(video)) = (feed, video) else {
        return;
    };
    let Some(source) = feed.source.as_mut() else {
        return;
    };

    let frame = match source.next_frame(time.elapsed_secs()) {
        Ok(Some(frame)) => frame,
        Ok(None) => return,
        Err(error) => {
            warn!("Video feed stopped: {error}");
            feed.source = None;
            return;
        }
    };

    if frame.rgba.len() != (frame.width * frame.height * 4) as usize {
        debug!(
            "Skipping malformed {}x{} frame ({} bytes)",
            frame.width,
            frame.height,
            frame.rgba.len()
        );
        return;
    }

    if feed.frames_uploaded == 0 {
        debug!(
            "First video frame {}x{}, {:.1}% keyed out",
            frame.width,
            frame.height,
            discard_ratio(&config.chroma_key, frame.width, &frame.rgba) * 100.0
        );
        for mut visibility in &mut planes {
            *visibility = Visibility::Inherited;
        }
    }

    if let Some(image) = images.get_mut(&video.handle) {
        write_frame(image, frame);
        feed.frames_uploaded += 1;
    }
}

fn write_frame(image: &mut Image, frame: VideoFrame) {
    let size = Extent3d {
        width: frame.width,
        height: frame.height,
        depth_or_array_layers: 1,
    };
    if image.texture_descriptor.size != size {
        image.resize(size);
    }
    image.data = Some(frame.rgba);
}
