use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;

/// Axis-aligned box centered at the origin, 4 vertices per face so each
/// face keeps its own flat normal and UVs.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

    // (normal, tangent-direction, bitangent-direction) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let half = Vec3::new(hx, hy, hz);

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u_dir, v_dir) in faces {
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = normal + u_dir * su + v_dir * sv;
            positions.push(corner * half);
            normals.push(normal);
            uvs.push(Vec2::new(su * 0.5 + 0.5, sv * 0.5 + 0.5));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut geo = Geometry::new("Box", positions, normals, uvs, indices);
    geo.compute_bounding_volume();
    geo
}
