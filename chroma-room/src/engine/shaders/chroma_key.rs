use bevy::render::render_resource::ShaderType;
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use constants::chroma_key::{KEY_COLOUR, KEY_THRESHOLD, KEYED_RESERVED, TINT_STRENGTH};
use serde::{Deserialize, Serialize};

/// Chroma key configuration handed to the shading stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaKeyParams {
    /// Raw normalised RGB, compared without gamma correction.
    pub key_colour: [f32; 3],
    pub threshold: f32,
    pub tint_strength: f32,
    /// Reserved; bound as `uKeyed` but unused by the fragment program.
    pub keyed: f32,
}

impl Default for ChromaKeyParams {
    fn default() -> Self {
        Self {
            key_colour: KEY_COLOUR,
            threshold: KEY_THRESHOLD,
            tint_strength: TINT_STRENGTH,
            keyed: KEYED_RESERVED,
        }
    }
}

impl ChromaKeyParams {
    pub fn key_vec(&self) -> Vec3 {
        Vec3::from_array(self.key_colour)
    }
}

/// GPU layout of [`ChromaKeyParams`].
#[derive(Debug, Clone, Copy, ShaderType)]
#[repr(C)]
pub struct ChromaKeyUniform {
    /// rgb: key colour, w: threshold
    pub key_colour: Vec4,
    /// x: tint strength, y: keyed (reserved)
    pub tint: Vec4,
}

impl From<&ChromaKeyParams> for ChromaKeyUniform {
    fn from(params: &ChromaKeyParams) -> Self {
        Self {
            key_colour: params.key_vec().extend(params.threshold),
            tint: Vec4::new(params.tint_strength, params.keyed, 0.0, 0.0),
        }
    }
}

/// Surface program for the character plane.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct ChromaKeyMaterial {
    #[uniform(0)]
    pub params: ChromaKeyUniform,

    #[texture(1)]
    #[sampler(2)]
    pub frame_texture: Handle<Image>,
}

impl ChromaKeyMaterial {
    pub fn new(params: &ChromaKeyParams, frame_texture: Handle<Image>) -> Self {
        Self {
            params: params.into(),
            frame_texture,
        }
    }
}

impl Material for ChromaKeyMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/chroma_key.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Opaque
    }
}

/// Outcome of shading a single texel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fragment {
    Discard,
    Colour(Vec4),
}

/// CPU mirror of `chroma_key.wgsl`. Must stay in lockstep with the shader.
pub fn shade_fragment(params: &ChromaKeyParams, texel: Vec4, u: f32) -> Fragment {
    let diff = texel.truncate().distance(params.key_vec());
    if diff > params.threshold {
        return Fragment::Discard;
    }

    let mut colour = texel;
    colour.x += (1.0 - u) * params.tint_strength;
    colour.y += u * params.tint_strength;
    Fragment::Colour(colour)
}

/// Fraction of an RGBA8 frame the shader would discard.
pub fn discard_ratio(params: &ChromaKeyParams, width: u32, rgba: &[u8]) -> f32 {
    let total = rgba.len() / 4;
    if total == 0 || width == 0 {
        return 0.0;
    }

    let discarded = rgba
        .chunks_exact(4)
        .enumerate()
        .filter(|(index, px)| {
            let u = (*index as u32 % width) as f32 / width as f32;
            let texel = Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0;
            shade_fragment(params, texel, u) == Fragment::Discard
        })
        .count();

    discarded as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn green_key() -> ChromaKeyParams {
        ChromaKeyParams::default()
    }

    fn colour(fragment: Fragment) -> Vec4 {
        match fragment {
            Fragment::Colour(c) => c,
            Fragment::Discard => panic!("expected a kept fragment"),
        }
    }

    #[test]
    fn sample_equal_to_key_is_kept() {
        let params = green_key();
        let texel = params.key_vec().extend(1.0);
        assert!(matches!(shade_fragment(&params, texel, 0.5), Fragment::Colour(_)));
    }

    #[test]
    fn distance_exactly_at_threshold_is_kept() {
        let params = ChromaKeyParams {
            key_colour: [0.0, 0.0, 0.0],
            threshold: 0.5,
            ..default()
        };
        let texel = Vec4::new(0.5, 0.0, 0.0, 1.0);
        assert!(matches!(shade_fragment(&params, texel, 0.0), Fragment::Colour(_)));
    }

    #[test]
    fn distance_beyond_threshold_is_discarded() {
        let params = green_key();
        let magenta = Vec4::new(1.0, 0.0, 1.0, 1.0);
        assert_eq!(shade_fragment(&params, magenta, 0.5), Fragment::Discard);

        let just_over = ChromaKeyParams {
            key_colour: [0.0, 0.0, 0.0],
            threshold: 0.5,
            ..default()
        };
        let texel = Vec4::new(0.51, 0.0, 0.0, 1.0);
        assert_eq!(shade_fragment(&just_over, texel, 0.5), Fragment::Discard);
    }

    #[test]
    fn tint_runs_red_left_to_green_right() {
        let params = green_key();
        let texel = params.key_vec().extend(1.0);

        let left = colour(shade_fragment(&params, texel, 0.0));
        assert!((left.x - 0.07).abs() < EPSILON);
        assert!((left.y - texel.y).abs() < EPSILON);

        let mid = colour(shade_fragment(&params, texel, 0.5));
        assert!((mid.x - 0.035).abs() < EPSILON);
        assert!((mid.y - (texel.y + 0.035)).abs() < EPSILON);

        let right = colour(shade_fragment(&params, texel, 1.0));
        assert!(right.x.abs() < EPSILON);
        assert!((right.y - (texel.y + 0.07)).abs() < EPSILON);
    }

    #[test]
    fn tint_leaves_blue_and_alpha_alone() {
        let params = ChromaKeyParams {
            key_colour: [0.2, 0.2, 0.2],
            ..default()
        };
        let texel = Vec4::new(0.2, 0.2, 0.3, 0.4);
        let out = colour(shade_fragment(&params, texel, 0.25));
        assert_eq!(out.z, 0.3);
        assert_eq!(out.w, 0.4);
    }

    #[test]
    fn threshold_is_parameterised() {
        let texel = Vec4::new(0.3, 0.5, 0.0, 1.0);
        let tight = ChromaKeyParams {
            threshold: 0.1,
            ..default()
        };
        let loose = ChromaKeyParams {
            threshold: 0.9,
            ..default()
        };
        assert_eq!(shade_fragment(&tight, texel, 0.5), Fragment::Discard);
        assert!(matches!(shade_fragment(&loose, texel, 0.5), Fragment::Colour(_)));
    }

    #[test]
    fn uniform_packs_threshold_and_reserved_keyed() {
        let params = ChromaKeyParams {
            keyed: 1.0,
            ..default()
        };
        let uniform = ChromaKeyUniform::from(&params);
        assert_eq!(uniform.key_colour.w, 0.5);
        assert_eq!(uniform.key_colour.y, 128.0 / 255.0);
        assert_eq!(uniform.tint.x, 0.07);
        assert_eq!(uniform.tint.y, 1.0);
    }

    #[test]
    fn discard_ratio_counts_far_texels() {
        let params = green_key();
        // Two key-green texels and two magenta texels.
        let rgba: [u8; 16] = [
            0, 128, 0, 255, //
            255, 0, 255, 255, //
            0, 128, 0, 255, //
            255, 0, 255, 255,
        ];
        assert!((discard_ratio(&params, 2, &rgba) - 0.5).abs() < EPSILON);
        assert_eq!(discard_ratio(&params, 2, &[]), 0.0);
    }
}
