use bevy::audio::SpatialListener;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use constants::camera::LISTENER_EAR_GAP;
use constants::room::SHADOW_TEXTURE_SIZE;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::config::scene_config::SceneConfig;
use crate::engine::media::video_texture::VideoTexture;
use crate::engine::scene::layout::{
    AreaLightNode, Finish, SceneLayout, SceneNode, SurfaceNode, VideoPlaneNode,
};
use crate::engine::scene::shadow::{ShadowDecal, shadow_material, shadow_texture, shadow_transform};
use crate::engine::scene::video_plane::spawn_video_plane;
use crate::engine::shaders::chroma_key::ChromaKeyMaterial;

/// Top of the scene tree. Every node spawned from the layout is a descendant.
#[derive(Component, Debug)]
pub struct SceneRoot;

#[derive(SystemParam)]
pub struct SceneAssets<'w> {
    asset_server: Res<'w, AssetServer>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    chroma_materials: ResMut<'w, Assets<ChromaKeyMaterial>>,
    images: ResMut<'w, Assets<Image>>,
}

/// Evaluate the layout into entities. Runs once; a second invocation is a
/// no-op so the tree is never duplicated.
pub fn spawn_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    existing: Query<(), With<SceneRoot>>,
    mut assets: SceneAssets,
) {
    if !existing.is_empty() {
        debug!("Scene already built; skipping");
        return;
    }

    let layout = SceneLayout::from_config(&config);
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: layout.ambient_brightness,
        ..default()
    });

    let root = commands
        .spawn((
            Name::new("SceneRoot"),
            SceneRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for node in &layout.nodes {
        match node {
            SceneNode::Surface(surface) => spawn_surface(&mut commands, root, surface, &mut assets),
            SceneNode::AreaLight(light) => spawn_area_light(&mut commands, root, light),
            SceneNode::VideoPlane(plane) => spawn_plane(&mut commands, root, plane, &mut assets),
            SceneNode::ShadowDecal(decal) => {
                let texture = assets.images.add(shadow_texture(SHADOW_TEXTURE_SIZE));
                commands.spawn((
                    Name::new("ShadowDecal"),
                    ShadowDecal,
                    Mesh3d(assets.meshes.add(Rectangle::new(1.0, 1.0))),
                    MeshMaterial3d(assets.materials.add(shadow_material(decal, texture))),
                    shadow_transform(decal),
                    ChildOf(root),
                ));
            }
        }
    }

    let orbit = OrbitCamera::with_bounds(config.orbit);
    commands.spawn((
        Name::new("OrbitCamera"),
        Camera3d::default(),
        orbit.target_transform(),
        SpatialListener::new(LISTENER_EAR_GAP),
        ChildOf(root),
    ));
    commands.insert_resource(orbit);

    info!(
        "Scene built: {} nodes, {} room surfaces, {} video planes",
        layout.nodes.len(),
        layout.surfaces().count(),
        layout.video_planes().count()
    );
}

fn spawn_surface(
    commands: &mut Commands,
    root: Entity,
    node: &SurfaceNode,
    assets: &mut SceneAssets,
) {
    let material = match node.finish {
        Finish::Matte(colour) => StandardMaterial {
            base_color: colour,
            ..default()
        },
        Finish::Emissive(emissive) => StandardMaterial {
            base_color: Color::WHITE,
            emissive,
            ..default()
        },
    };

    commands.spawn((
        Name::new(format!("{:?}", node.surface)),
        node.surface,
        Mesh3d(assets.meshes.add(Cuboid::from_size(node.size))),
        MeshMaterial3d(assets.materials.add(material)),
        Transform::from_translation(node.position),
        ChildOf(root),
    ));
}

fn spawn_area_light(commands: &mut Commands, root: Entity, node: &AreaLightNode) {
    commands.spawn((
        Name::new("AreaLight"),
        PointLight {
            intensity: node.intensity,
            radius: node.radius,
            range: node.range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(node.position),
        ChildOf(root),
    ));
}

fn spawn_plane(
    commands: &mut Commands,
    root: Entity,
    node: &VideoPlaneNode,
    assets: &mut SceneAssets,
) {
    let video = VideoTexture::create(&mut assets.images);
    let material = assets
        .chroma_materials
        .add(ChromaKeyMaterial::new(&node.chroma_key, video.handle.clone()));
    let mesh = assets.meshes.add(Rectangle::new(node.size.x, node.size.y));
    let audio = assets.asset_server.load(node.audio_path.as_str());

    spawn_video_plane(commands, root, node, mesh, material, audio);
    commands.insert_resource(video);
}
