use bevy::prelude::*;
use constants::room::{
    AMBIENT_BRIGHTNESS, AREA_LIGHT_INTENSITY, AREA_LIGHT_RADIUS, AREA_LIGHT_RANGE,
    LIGHT_PANEL_LUMINANCE, LIGHT_PANEL_POSITION, LIGHT_PANEL_SIZE, ROOM_HALF_EXTENT, ROOM_SIZE,
    SHADOW_OPACITY, SHADOW_POSITION, SHADOW_SCALE, VIDEO_PLANE_POSITION, VIDEO_PLANE_SIZE,
    WALL_THICKNESS,
};

use crate::engine::config::scene_config::SceneConfig;
use crate::engine::shaders::chroma_key::ChromaKeyParams;

/// Fixed slabs making up the room, including the ceiling light fixture.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSurface {
    LeftWall,
    RightWall,
    Ceiling,
    Floor,
    LightPanel,
    BackWall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finish {
    Matte(Color),
    Emissive(LinearRgba),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceNode {
    pub surface: RoomSurface,
    pub position: Vec3,
    pub size: Vec3,
    pub finish: Finish,
}

/// Panel light under the ceiling fixture, facing down.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLightNode {
    pub position: Vec3,
    pub intensity: f32,
    pub radius: f32,
    pub range: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoPlaneNode {
    pub position: Vec3,
    pub size: Vec2,
    pub chroma_key: ChromaKeyParams,
    pub audio_path: String,
    pub audio_reference_distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowDecalNode {
    pub position: Vec3,
    pub scale: Vec3,
    pub colour: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Surface(SurfaceNode),
    AreaLight(AreaLightNode),
    VideoPlane(VideoPlaneNode),
    ShadowDecal(ShadowDecalNode),
}

/// Complete scene description, evaluated once into entities.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub ambient_brightness: f32,
    pub nodes: Vec<SceneNode>,
}

fn surface(surface: RoomSurface, position: [f32; 3], size: [f32; 3], finish: Finish) -> SceneNode {
    SceneNode::Surface(SurfaceNode {
        surface,
        position: Vec3::from_array(position),
        size: Vec3::from_array(size),
        finish,
    })
}

/// Five opaque slabs, the emissive fixture and its light.
pub fn static_room() -> Vec<SceneNode> {
    let h = ROOM_HALF_EXTENT;
    let (s, t) = (ROOM_SIZE, WALL_THICKNESS);
    let white = Finish::Matte(Color::WHITE);

    vec![
        surface(RoomSurface::LeftWall, [-h, 0.0, 0.0], [t, s, s], Finish::Matte(Color::srgb(1.0, 0.0, 0.0))),
        surface(RoomSurface::RightWall, [h, 0.0, 0.0], [t, s, s], Finish::Matte(Color::srgb_u8(0, 128, 0))),
        surface(RoomSurface::Ceiling, [0.0, h, 0.0], [s, t, s], white),
        surface(RoomSurface::Floor, [0.0, -h, 0.0], [s, t, s], white),
        surface(
            RoomSurface::LightPanel,
            LIGHT_PANEL_POSITION,
            LIGHT_PANEL_SIZE,
            Finish::Emissive(LinearRgba::WHITE * LIGHT_PANEL_LUMINANCE),
        ),
        SceneNode::AreaLight(AreaLightNode {
            // Just below the fixture so the panel slab does not enclose it.
            position: Vec3::from_array(LIGHT_PANEL_POSITION) - Vec3::Y * LIGHT_PANEL_SIZE[1],
            intensity: AREA_LIGHT_INTENSITY,
            radius: AREA_LIGHT_RADIUS,
            range: AREA_LIGHT_RANGE,
        }),
        surface(RoomSurface::BackWall, [0.0, 0.0, -h], [s, s, t], white),
    ]
}

impl SceneLayout {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut nodes = static_room();

        nodes.push(SceneNode::VideoPlane(VideoPlaneNode {
            position: Vec3::from_array(VIDEO_PLANE_POSITION),
            size: Vec2::from_array(VIDEO_PLANE_SIZE),
            chroma_key: config.chroma_key,
            audio_path: config.media.audio_path.clone(),
            audio_reference_distance: config.media.audio_reference_distance,
        }));

        nodes.push(SceneNode::ShadowDecal(ShadowDecalNode {
            position: Vec3::from_array(SHADOW_POSITION),
            scale: Vec3::from_array(SHADOW_SCALE),
            colour: Color::BLACK,
            opacity: SHADOW_OPACITY,
        }));

        Self {
            ambient_brightness: AMBIENT_BRIGHTNESS,
            nodes,
        }
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceNode> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Surface(surface) => Some(surface),
            _ => None,
        })
    }

    pub fn video_planes(&self) -> impl Iterator<Item = &VideoPlaneNode> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::VideoPlane(plane) => Some(plane),
            _ => None,
        })
    }
}
