//! Music toggle surfaces.
//!
//! Native builds draw a checkbox with bevy_ui; the browser build listens to the
//! page's `#toggle` checkbox. Both report edges as `MusicToggled` events.

/// In-window checkbox for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub mod music_toggle;

/// DOM checkbox bridge for the browser build.
#[cfg(any(target_arch = "wasm32", test))]
pub mod dom_toggle;
