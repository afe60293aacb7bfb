use std::sync::Arc;

use glam::Vec3;
use lucite::errors::LuciteError;
use lucite::resources::{
    builtin_presets, find_preset, ColorPreset, MaterialParams, ScatteringPreset,
    SharedMaterialParams, TextureCache,
};

#[test]
fn depth_clamps_to_its_documented_range() {
    let mut params = MaterialParams::default();
    params.set_depth(0.4);
    assert_eq!(params.depth, 0.15);
    params.set_depth(-1.0);
    assert_eq!(params.depth, 0.0);
    params.set_depth(0.07);
    assert_eq!(params.depth, 0.07);
}

#[test]
fn mip_controls_round_to_integer_steps() {
    let mut params = MaterialParams::default();
    params.set_mip_multiplier(7.4);
    assert_eq!(params.mip_multiplier, 7.0);
    params.set_mip_multiplier(25.0);
    assert_eq!(params.mip_multiplier, 20.0);

    params.set_min_mip_level(2.6);
    assert_eq!(params.min_mip_level, 3.0);
    params.set_min_mip_level(-4.0);
    assert_eq!(params.min_mip_level, 0.0);
}

#[test]
fn color_presets_resolve_by_name() {
    let preset = ColorPreset::from_name("light BLUE").unwrap();
    assert_eq!(preset, ColorPreset::LightBlue);

    let mut params = MaterialParams::default();
    params.apply_color_preset(preset);
    let (medium, thin, tint) = ColorPreset::LightBlue.colors();
    assert_eq!(params.medium_color, medium);
    assert_eq!(params.thin_medium_color, thin);
    assert_eq!(params.subsurface_tint, tint);

    assert!(matches!(
        ColorPreset::from_name("chartreuse"),
        Err(LuciteError::PresetNotFound(_))
    ));
}

#[test]
fn default_params_match_the_red_preset() {
    let params = MaterialParams::default();
    let (medium, thin, tint) = ColorPreset::Red.colors();
    assert_eq!(params.medium_color, medium);
    assert_eq!(params.thin_medium_color, thin);
    assert_eq!(params.subsurface_tint, tint);
}

#[test]
fn scattering_presets_set_both_mip_controls() {
    let mut params = MaterialParams::default();

    params.apply_scattering_preset(ScatteringPreset::Off);
    assert_eq!((params.min_mip_level, params.mip_multiplier), (0.0, 0.0));

    params.apply_scattering_preset(ScatteringPreset::High);
    assert_eq!((params.min_mip_level, params.mip_multiplier), (2.0, 10.0));
}

#[test]
fn shared_params_updates_are_visible_to_snapshots() {
    let shared = SharedMaterialParams::default();
    shared.update(|p| {
        p.set_depth(0.12);
        p.camera_pos_model = Vec3::new(1.0, 2.0, 3.0);
    });

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.depth, 0.12);
    assert_eq!(snapshot.camera_pos_model, Vec3::new(1.0, 2.0, 3.0));

    // Snapshots are copies: mutating shared state later does not reach them
    shared.update(|p| p.set_depth(0.01));
    assert_eq!(snapshot.depth, 0.12);
}

#[test]
fn builtin_presets_share_textures_through_the_cache() {
    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);

    assert_eq!(presets.len(), 6);
    // stone/tree pairs reuse their basecolor; the cache holds one texture
    // per distinct (image, wrap) pair
    assert_eq!(cache.len(), 6);

    let stone_nm = find_preset(&presets, "stone nm").unwrap();
    let stone = find_preset(&presets, "stone").unwrap();
    assert!(Arc::ptr_eq(&stone_nm.color_map, &stone.color_map));

    // The emissive look reuses one texture for color and glow
    let emissive = find_preset(&presets, "emissive").unwrap();
    let glow = emissive.emissive_map.as_ref().unwrap();
    assert!(Arc::ptr_eq(&emissive.color_map, glow));
}

#[test]
fn preset_lookup_is_case_insensitive_and_fallible() {
    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);

    assert!(find_preset(&presets, "Stone NM").is_ok());
    assert!(matches!(
        find_preset(&presets, "granite"),
        Err(LuciteError::PresetNotFound(_))
    ));
}
