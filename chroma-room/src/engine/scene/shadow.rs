use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use std::f32::consts::FRAC_PI_2;

use crate::engine::scene::layout::ShadowDecalNode;

#[derive(Component, Debug)]
pub struct ShadowDecal;

/// RGBA8 radial gradient: black, fully opaque at the centre fading linearly
/// to transparent at the inscribed circle's edge.
pub fn radial_falloff(size: u32) -> Vec<u8> {
    let centre = (size as f32 - 1.0) * 0.5;
    let radius = (size as f32 * 0.5).max(f32::EPSILON);

    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let d = Vec2::new(x as f32 - centre, y as f32 - centre).length() / radius;
            let alpha = (1.0 - d).clamp(0.0, 1.0);
            pixels.extend_from_slice(&[0, 0, 0, (alpha * 255.0).round() as u8]);
        }
    }
    pixels
}

pub fn shadow_texture(size: u32) -> Image {
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        radial_falloff(size),
        TextureFormat::Rgba8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    )
}

pub fn shadow_material(node: &ShadowDecalNode, texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: node.colour.with_alpha(node.opacity),
        base_color_texture: Some(texture),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

/// Unit quad lying flat (facing +Y), scaled by the node.
pub fn shadow_transform(node: &ShadowDecalNode) -> Transform {
    Transform::from_translation(node.position)
        .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
        .with_scale(node.scale)
}
