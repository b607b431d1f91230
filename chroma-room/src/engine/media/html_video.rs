use bevy::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, window};

use crate::engine::media::frame_source::{FrameError, FrameSource, VideoFrame};

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

/// Copies the current picture of a muted, looping `<video>` element through
/// an offscreen 2D canvas.
pub struct HtmlVideoSource {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    last_time: Option<f64>,
}

fn dom_error(what: &str, value: JsValue) -> FrameError {
    FrameError::Dom(format!("{what}: {value:?}"))
}

fn watch_autoplay(promise: js_sys::Promise) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
            warn!("Video autoplay refused: {:?}", e);
        }
    });
}

impl HtmlVideoSource {
    pub fn open(url: &str) -> Result<Self, FrameError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| FrameError::Dom("document unavailable".into()))?;

        let video: HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| dom_error("create <video>", e))?
            .dyn_into()
            .map_err(|e| dom_error("cast <video>", e.into()))?;
        video.set_cross_origin(Some("anonymous"));
        video.set_muted(true);
        video.set_loop(true);
        video.set_autoplay(true);
        video
            .set_attribute("playsinline", "")
            .map_err(|e| dom_error("playsinline", e))?;
        video.set_src(url);
        // Muted playback is allowed without a user gesture; a rejected promise
        // only leaves the plane hidden.
        match video.play() {
            Ok(promise) => watch_autoplay(promise),
            Err(e) => warn!("Video autoplay refused: {:?}", e),
        }

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| dom_error("create <canvas>", e))?
            .dyn_into()
            .map_err(|e| dom_error("cast <canvas>", e.into()))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| dom_error("get 2d context", e))?
            .ok_or_else(|| FrameError::Dom("2d context unavailable".into()))?
            .dyn_into()
            .map_err(|e| dom_error("cast 2d context", e.into()))?;

        info!("Video element streaming {}", url);
        Ok(Self {
            video,
            canvas,
            context,
            last_time: None,
        })
    }
}

impl FrameSource for HtmlVideoSource {
    fn next_frame(&mut self, _elapsed_secs: f32) -> Result<Option<VideoFrame>, FrameError> {
        if self.video.error().is_some() {
            return Err(FrameError::Dom("video element reported a media error".into()));
        }
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return Ok(None);
        }

        let time = self.video.current_time();
        if self.last_time == Some(time) {
            return Ok(None);
        }

        let (width, height) = (self.video.video_width(), self.video.video_height());
        if width == 0 || height == 0 {
            return Ok(None);
        }
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }

        self.context
            .draw_image_with_html_video_element_and_dw_and_dh(
                &self.video,
                0.0,
                0.0,
                width as f64,
                height as f64,
            )
            .map_err(|e| dom_error("draw video frame", e))?;
        let pixels = self
            .context
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(|e| dom_error("read video frame", e))?;

        self.last_time = Some(time);
        Ok(Some(VideoFrame {
            width,
            height,
            rgba: pixels.data().0,
        }))
    }
}
