use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::audio::playback::PlaybackPlugin;
use crate::engine::camera::orbit_camera::camera_controller;
use crate::engine::config::config_loader::{ConfigLoader, resolve_scene_config, start_loading};
use crate::engine::config::scene_config::SceneConfig;
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::media::video_texture::{open_video_feed, upload_video_frames};
use crate::engine::scene::scene_root::spawn_scene;
use crate::engine::shaders::chroma_key::ChromaKeyMaterial;

#[cfg(target_arch = "wasm32")]
use crate::ui::dom_toggle::{attach_toggle_listener, forward_dom_toggles, reflect_playback_state};
#[cfg(not(target_arch = "wasm32"))]
use crate::ui::music_toggle::{
    handle_music_toggle_clicks, refresh_music_toggle, spawn_music_toggle,
};

const LOG_FILTER: &str = "wgpu=error,naga=warn,chroma_room=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Prepass and shadow passes would write depth for keyed-out fragments.
        .add_plugins(MaterialPlugin::<ChromaKeyMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_plugins(JsonAssetPlugin::<SceneConfig>::new(&["config.json"]))
        .add_plugins(PlaybackPlugin)
        .init_resource::<ConfigLoader>();

    app.add_systems(Startup, start_loading).add_systems(
        Update,
        resolve_scene_config.run_if(in_state(AppState::Loading)),
    );

    app.add_systems(
        OnEnter(AppState::Running),
        (spawn_scene, open_video_feed).chain(),
    );

    app.add_systems(
        Update,
        (camera_controller, upload_video_frames)
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(target_arch = "wasm32")]
    {
        use crate::engine::audio::playback::handle_music_toggles;

        // Listens from startup in every app state; clicks made while loading count.
        app.add_systems(Startup, attach_toggle_listener).add_systems(
            Update,
            (
                forward_dom_toggles.before(handle_music_toggles),
                reflect_playback_state.after(handle_music_toggles),
            ),
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(OnEnter(AppState::Running), spawn_music_toggle)
            .add_systems(
                Update,
                (handle_music_toggle_clicks, refresh_music_toggle)
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
