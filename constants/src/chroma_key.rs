/// Key colour as raw normalised RGB: CSS `green` (#008000).
pub const KEY_COLOUR: [f32; 3] = [0.0, 128.0 / 255.0, 0.0];

/// Euclidean RGB distance above which a sampled texel is discarded.
pub const KEY_THRESHOLD: f32 = 0.5;

/// Peak strength of the left-red / right-green tint added to kept texels.
pub const TINT_STRENGTH: f32 = 0.07;

/// Reserved `keyed` uniform value. Bound but never read by the fragment program.
pub const KEYED_RESERVED: f32 = 0.0;
