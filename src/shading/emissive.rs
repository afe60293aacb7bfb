use glam::{Vec3, Vec4};

use crate::resources::material::MaterialParams;
use crate::resources::mesh::SubsurfaceMaterial;
use crate::shading::context::SubsurfaceContext;
use crate::shading::triplanar;

/// Shades the emissive contribution of one fragment, reusing the
/// intersection context produced by the subsurface pass.
///
/// Emission only shows where the exit normal faces the camera; the same
/// fourth-power falloff as the transmission mix keeps the glow inside the
/// body instead of smearing over the silhouette. The boosted output is
/// meant to exceed 1.0 so a downstream bloom pass can pick it up.
#[must_use]
pub fn shade(
    context: &SubsurfaceContext,
    material: &SubsurfaceMaterial,
    params: &MaterialParams,
) -> Vec4 {
    let Some(emissive_map) = &material.emissive_map else {
        return Vec4::new(0.0, 0.0, 0.0, 1.0);
    };

    let sampled = triplanar::project(
        emissive_map,
        context.subsurface_position,
        context.entry_normal,
        context.mip_level,
        material.texture_scale,
    );
    let emission = Vec3::new(sampled.x, sampled.y, sampled.z) * params.subsurface_tint;

    let visibility = context
        .view_dot_exit_normal
        .clamp(0.0, 1.0)
        .powi(4);
    let rgb = Vec3::ZERO.lerp(emission, visibility) * material.emissive_color_boost;
    rgb.extend(1.0)
}
