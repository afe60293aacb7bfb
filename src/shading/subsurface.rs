use glam::{Vec3, Vec4};

use crate::resources::material::MaterialParams;
use crate::resources::mesh::SubsurfaceMaterial;
use crate::shading::context::SubsurfaceContext;
use crate::shading::resolver::{sample_cube_direction, ResolverInputs};
use crate::shading::triplanar;

/// Incidence floor for the thickness march. At the silhouette the view
/// ray grazes the surface and `dot(view, normal)` approaches zero, which
/// would send the exit position to infinity; clamping bounds the march
/// instead of letting NaNs reach the samplers.
const MIN_INCIDENCE: f32 = 1e-4;

/// Model-space fragment fed to the shaders: interpolated position and
/// geometric (vertex) normal.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput {
    pub position: Vec3,
    pub geometric_normal: Vec3,
}

/// Mip level for all of a fragment's subsurface lookups.
///
/// Grazing views (`d` near zero) travel further through the medium and
/// scatter more, so they read blurrier mips; `min_mip_level` keeps even
/// head-on views slightly diffused.
#[must_use]
pub fn derive_mip_level(d: f32, mip_multiplier: f32, min_mip_level: f32) -> f32 {
    (1.0 - d) * mip_multiplier + min_mip_level
}

/// The three-way color mix at the heart of the effect.
///
/// `d` is `dot(exit_normal, view_vec)`. A front-facing exit normal
/// (`d > 0`) lets the tinted surface color re-emerge over the bulk medium
/// color; a back-facing one (`d < 0`) means the fragment sits on a thin
/// rim lit from behind, which blends toward the thin-medium color. The
/// fourth power keeps both transitions tight around the extremes.
#[must_use]
pub fn mix_medium_colors(
    surface_color: Vec3,
    medium_color: Vec3,
    thin_medium_color: Vec3,
    subsurface_tint: Vec3,
    d: f32,
) -> Vec3 {
    let transmission = d.max(0.0).powi(4).min(1.0);
    let inner = medium_color.lerp(surface_color * subsurface_tint, transmission);
    let back_glow = (-d).max(0.0).powi(4);
    inner.lerp(thin_medium_color, back_glow)
}

/// Shades one fragment of the subsurface material.
///
/// Returns the color alongside the intersection context so the emissive
/// pass can reuse the exact same march without recomputing it.
#[must_use]
pub fn shade(
    fragment: &FragmentInput,
    material: &SubsurfaceMaterial,
    params: &MaterialParams,
) -> (SubsurfaceContext, Vec4) {
    let view_vec = (params.camera_pos_model - fragment.position).normalize_or_zero();

    // March the view ray through the medium by `depth` along its travel
    // direction; the geometric normal sets how steeply it enters.
    let incidence = view_vec.dot(fragment.geometric_normal).max(MIN_INCIDENCE);
    let scale_factor = params.depth / incidence;
    let subsurface_position = fragment.position - view_vec * scale_factor;

    let entry_normal = sample_cube_direction(material.normal_cube(), fragment.position);
    let basic_normal = sample_cube_direction(material.normal_cube(), subsurface_position);

    // The mip level keys off the basic exit normal, before any normal
    // mapping: the blur stands in for scatter through the bulk, which the
    // surface detail at the exit point does not change.
    let mip_level = derive_mip_level(
        basic_normal.dot(view_vec),
        params.mip_multiplier,
        params.min_mip_level,
    );

    let exit_normal = material.strategy.resolve(&ResolverInputs {
        subsurface_position,
        basic_normal,
        entry_normal,
        view_vec,
        mip_level,
        texture_scale: material.texture_scale,
    });

    // Surface color is fetched at the exit position but blended with the
    // entry normal's weights, so the projection stays stable as depth
    // changes.
    let sampled = triplanar::project(
        &material.color_map,
        subsurface_position,
        entry_normal,
        mip_level,
        material.texture_scale,
    );
    let surface_color = Vec3::new(sampled.x, sampled.y, sampled.z) * material.color_boost;

    let d = exit_normal.dot(view_vec);
    let rgb = mix_medium_colors(
        surface_color,
        params.medium_color,
        params.thin_medium_color,
        params.subsurface_tint,
        d,
    );

    let context = SubsurfaceContext {
        view_vec,
        entry_normal,
        subsurface_position,
        exit_normal,
        mip_level,
        view_dot_exit_normal: d,
    };
    (context, rgb.extend(1.0))
}
