use glam::{Vec3, Vec4};

use crate::resources::texture::Texture;

/// Per-axis blend weights for a triplanar projection: the absolute normal
/// components, normalized so the three weights sum to one.
#[must_use]
pub fn blend_weights(normal: Vec3) -> Vec3 {
    let a = normal.abs();
    let sum = a.x + a.y + a.z;
    debug_assert!(sum > 0.0, "triplanar projection needs a non-zero normal");
    a / sum
}

/// Samples `texture` three times through axis-aligned planar projections
/// of `position` and blends the results by how closely `normal` faces
/// each axis.
///
/// UVs are derived from the scaled position: the YZ plane for the X
/// projection, XZ for Y, XY for Z. All three lookups use the explicit
/// `mip_level`; the mip chain is how the effect fakes scattering, so the
/// level must come from the caller rather than from screen-space
/// derivatives.
#[must_use]
pub fn project(
    texture: &Texture,
    position: Vec3,
    normal: Vec3,
    mip_level: f32,
    scale: f32,
) -> Vec4 {
    let w = blend_weights(normal);
    let p = position * scale;

    let sx = texture.sample_trilinear(p.y, p.z, mip_level);
    let sy = texture.sample_trilinear(p.x, p.z, mip_level);
    let sz = texture.sample_trilinear(p.x, p.y, mip_level);

    sx * w.x + sy * w.y + sz * w.z
}
