//! Custom surface programs.

/// Chroma key material, uniform layout and CPU reference of the fragment stage.
pub mod chroma_key;
