use glam::{Vec3, Vec4};

/// Flat gray inspection shading used before a mesh's cube maps are baked.
/// View-dependent Lambert-ish ramp, lifted and capped so geometry reads
/// without any light setup.
#[must_use]
pub fn shade(position: Vec3, normal: Vec3, camera_pos_model: Vec3) -> Vec4 {
    let view_vec = (camera_pos_model - position).normalize_or_zero();
    let shade = (normal.dot(view_vec) * 0.5 + 0.7).min(0.7);
    Vec3::splat(shade.max(0.0)).extend(1.0)
}
