//! Renders a translucent crystal sphere with the emissive preset and
//! writes the frame to `crystal.png` (plus `crystal_emissive.png` for the
//! raw glow plane).
//!
//! Run with `cargo run --example crystal`. Set `RUST_LOG=debug` for bake
//! and frame timing output.

use anyhow::Result;
use glam::Vec3;
use lucite::renderer::Renderer;
use lucite::resources::primitives::{create_sphere, SphereOptions};
use lucite::resources::{
    builtin_presets, find_preset, ColorPreset, Mesh, ScatteringPreset, SharedMaterialParams,
    TextureCache,
};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> Result<()> {
    env_logger::init();

    let params = SharedMaterialParams::default();
    params.update(|p| {
        p.apply_color_preset(ColorPreset::LightBlue);
        p.apply_scattering_preset(ScatteringPreset::Low);
        p.set_depth(0.1);
    });

    let mut renderer = Renderer::new(WIDTH, HEIGHT, params);
    renderer.init()?;
    renderer.set_camera_position(Vec3::new(0.6, 0.4, -1.9));

    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);

    let mut geometry = create_sphere(&SphereOptions::default());
    geometry.center_and_normalize();
    let mut mesh = Mesh::new("crystal", geometry);
    renderer.bake_mesh(&mut mesh, find_preset(&presets, "emissive")?)?;

    let frame = renderer.render_frame(std::slice::from_ref(&mesh))?;

    image::save_buffer(
        "crystal.png",
        &frame.composite_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
    )?;
    image::save_buffer(
        "crystal_emissive.png",
        &frame.emissive_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
    )?;

    log::info!("wrote crystal.png and crystal_emissive.png");
    Ok(())
}
