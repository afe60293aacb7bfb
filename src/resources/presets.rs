use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{LuciteError, Result};
use crate::resources::image::Image;
use crate::resources::texture::{Texture, WrapMode};

/// A named preset binding the textures and scalars one subsurface look
/// needs: base color map, optional tangent-space normal map, optional
/// emissive map, tiling scale, color boosts, wrap mode.
///
/// Wrap mode and color space are baked into the [`Texture`]s at
/// construction, before any draw can sample them.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    pub label: String,
    pub color_map: Arc<Texture>,
    pub normal_map: Option<Arc<Texture>>,
    pub emissive_map: Option<Arc<Texture>>,
    /// Multiplies the sampling position before UV derivation: higher scale
    /// means smaller, more repeated texture features.
    pub scale: f32,
    pub color_boost: f32,
    pub emissive_color_boost: f32,
}

/// Deduplicates textures shared between presets (the stone and tree looks
/// each appear with and without a normal map but share their images).
#[derive(Debug, Default)]
pub struct TextureCache {
    loaded: FxHashMap<(String, WrapMode), Arc<Texture>>,
}

impl TextureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached texture for `name`, building it from `source`
    /// on first use.
    pub fn load(
        &mut self,
        name: &str,
        wrap: WrapMode,
        source: impl FnOnce() -> Image,
    ) -> Arc<Texture> {
        self.loaded
            .entry((name.to_string(), wrap))
            .or_insert_with(|| Arc::new(Texture::new(&source(), wrap)))
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

/// Looks up a preset by label.
pub fn find_preset<'a>(presets: &'a [TextureConfig], label: &str) -> Result<&'a TextureConfig> {
    presets
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label))
        .ok_or_else(|| LuciteError::PresetNotFound(label.to_string()))
}

/// The shipped preset table, backed by procedural stand-in images (see
/// [`Image`] for the generators): stone and tree each with and without
/// normal mapping, an emissive lava look, and a low-boost marble.
#[must_use]
pub fn builtin_presets(cache: &mut TextureCache) -> Vec<TextureConfig> {
    let stone = |c: &mut TextureCache| {
        c.load("stone_basecolor", WrapMode::MirroredRepeat, || {
            Image::value_noise("stone_basecolor", 256, 32, [120, 114, 108], [201, 196, 189])
        })
    };
    let stone_nm = |c: &mut TextureCache| {
        c.load("stone_normal", WrapMode::MirroredRepeat, || {
            Image::bump_normal_map("stone_normal", 256, 8)
        })
    };
    let tree = |c: &mut TextureCache| {
        c.load("tree_diffuse", WrapMode::MirroredRepeat, || {
            Image::value_noise("tree_diffuse", 256, 16, [92, 62, 40], [176, 142, 105])
        })
    };
    let tree_nm = |c: &mut TextureCache| {
        c.load("tree_normal", WrapMode::MirroredRepeat, || {
            Image::bump_normal_map("tree_normal", 256, 12)
        })
    };
    let lava = |c: &mut TextureCache| {
        c.load("lava_emissive", WrapMode::Repeat, || {
            Image::value_noise("lava_emissive", 256, 24, [52, 8, 2], [255, 96, 12])
        })
    };
    let marble = |c: &mut TextureCache| {
        c.load("marble_diffuse", WrapMode::Repeat, || {
            Image::checkerboard("marble_diffuse", 256, 256, 32)
        })
    };

    vec![
        TextureConfig {
            label: "stone nm".to_string(),
            color_map: stone(cache),
            normal_map: Some(stone_nm(cache)),
            emissive_map: None,
            scale: 4.0,
            color_boost: 6.5,
            emissive_color_boost: 1.0,
        },
        TextureConfig {
            label: "stone".to_string(),
            color_map: stone(cache),
            normal_map: None,
            emissive_map: None,
            scale: 4.0,
            color_boost: 6.5,
            emissive_color_boost: 1.0,
        },
        TextureConfig {
            label: "tree nm".to_string(),
            color_map: tree(cache),
            normal_map: Some(tree_nm(cache)),
            emissive_map: None,
            scale: 2.0,
            color_boost: 6.5,
            emissive_color_boost: 1.0,
        },
        TextureConfig {
            label: "tree".to_string(),
            color_map: tree(cache),
            normal_map: None,
            emissive_map: None,
            scale: 2.0,
            color_boost: 6.5,
            emissive_color_boost: 1.0,
        },
        TextureConfig {
            label: "emissive".to_string(),
            color_map: lava(cache),
            normal_map: None,
            emissive_map: Some(lava(cache)),
            scale: 4.0,
            color_boost: 6.0,
            emissive_color_boost: 1.5,
        },
        TextureConfig {
            label: "potato".to_string(),
            color_map: marble(cache),
            normal_map: None,
            emissive_map: None,
            scale: 3.0,
            color_boost: 2.0,
            emissive_color_boost: 1.0,
        },
    ]
}
