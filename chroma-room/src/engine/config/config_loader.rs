use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::media::SCENE_CONFIG_PATH;

use crate::engine::config::scene_config::SceneConfig;
use crate::engine::core::app_state::AppState;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<SceneConfig>>,
}

// Start the loading process
pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene configuration from {}", SCENE_CONFIG_PATH);
    config_loader.handle = Some(asset_server.load(SCENE_CONFIG_PATH));
}

/// Resolve the configuration asset into a `SceneConfig` resource and leave
/// `Loading`. Missing or invalid files fall back to compiled defaults.
pub fn resolve_scene_config(
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<SceneConfig>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = config_loader.handle.as_ref() else {
        return;
    };

    let resolved = if let Some(config) = configs.get(handle) {
        Some(accept_or_default(config.clone()))
    } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        warn!("Scene configuration unavailable ({error}); using defaults");
        Some(SceneConfig::default())
    } else {
        None
    };

    if let Some(config) = resolved {
        commands.insert_resource(config);
        info!("→ Configuration resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

fn accept_or_default(config: SceneConfig) -> SceneConfig {
    match config.validate() {
        Ok(()) => {
            info!("✓ Scene configuration loaded");
            config
        }
        Err(error) => {
            warn!("Rejected scene configuration: {error}; using defaults");
            SceneConfig::default()
        }
    }
}
