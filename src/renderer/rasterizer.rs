use glam::{Vec3, Vec4};

use crate::resources::cube::CubeFace;
use crate::resources::geometry::Geometry;
use crate::renderer::target::RenderTarget;

/// Pinhole camera with an explicit orthonormal basis.
///
/// Camera space: `x` along `right`, `y` along `up`, `z` along `forward`
/// with positive `z` in front of the camera. Screen-space Y grows with
/// camera-space Y (rows are stored bottom-up).
#[derive(Debug, Clone, Copy)]
pub struct RasterCamera {
    pub position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal: f32,
    near: f32,
    far: f32,
}

impl RasterCamera {
    /// Perspective camera at `position` looking at `target`, world-up Y.
    #[must_use]
    pub fn look_at(position: Vec3, target: Vec3, fov_y: f32, near: f32, far: f32) -> Self {
        let forward = (target - position).normalize_or_zero();
        let mut right = forward.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            // Looking straight up or down
            right = Vec3::X;
        }
        let up = right.cross(forward);
        Self {
            position,
            right,
            up,
            forward,
            focal: 1.0 / (fov_y * 0.5).tan(),
            near,
            far,
        }
    }

    /// 90-degree capture camera at the origin for one cube face, sharing
    /// the face's addressing basis so rendered texel (u, v) lies exactly
    /// on the direction [`CubeFace::direction`] reports for it.
    #[must_use]
    pub fn cube_face(face: CubeFace, near: f32, far: f32) -> Self {
        let (right, up, forward) = face.basis();
        Self {
            position: Vec3::ZERO,
            right,
            up,
            forward,
            focal: 1.0,
            near,
            far,
        }
    }

    fn to_camera_space(&self, p: Vec3) -> Vec3 {
        let rel = p - self.position;
        Vec3::new(rel.dot(self.right), rel.dot(self.up), rel.dot(self.forward))
    }
}

/// Model-space attributes carried across a triangle and handed to the
/// fragment callback after perspective-correct interpolation.
#[derive(Debug, Clone, Copy)]
pub struct Varyings {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec4,
}

impl Varyings {
    fn scale(&self, s: f32) -> Self {
        Self {
            position: self.position * s,
            normal: self.normal * s,
            tangent: self.tangent * s,
        }
    }

    fn add(&self, other: &Self) -> Self {
        Self {
            position: self.position + other.position,
            normal: self.normal + other.normal,
            tangent: self.tangent + other.tangent,
        }
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.scale(1.0 - t).add(&other.scale(t))
    }
}

#[derive(Clone, Copy)]
struct ClipVertex {
    camera: Vec3,
    varyings: Varyings,
}

/// Rasterizes every triangle of `geometry` into `target`, invoking
/// `shade` once per covered, depth-passing pixel. The callback returns
/// the (color, emissive) pair written to the target's two planes.
///
/// Backface culling keys off the authored vertex normals against the
/// direction to the camera rather than off screen winding or the edge
/// cross product, so it holds for any index winding convention.
/// `double_sided` disables it, which the bake passes rely on to capture
/// back geometry through the front.
pub fn draw_geometry<F>(
    camera: &RasterCamera,
    target: &mut RenderTarget,
    geometry: &Geometry,
    double_sided: bool,
    mut shade: F,
) where
    F: FnMut(&Varyings) -> (Vec4, Vec4),
{
    let positions = geometry.positions();
    let normals = geometry.normals();
    let zero_tangents;
    let tangents: &[Vec4] = match geometry.tangents() {
        Some(t) => t,
        None => {
            zero_tangents = vec![Vec4::ZERO; positions.len()];
            &zero_tangents
        }
    };

    for tri in geometry.indices().chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        if !double_sided {
            let orientation = normals[i0] + normals[i1] + normals[i2];
            let centroid = (positions[i0] + positions[i1] + positions[i2]) / 3.0;
            if orientation.dot(camera.position - centroid) <= 0.0 {
                continue;
            }
        }

        let corners = [i0, i1, i2].map(|i| ClipVertex {
            camera: camera.to_camera_space(positions[i]),
            varyings: Varyings {
                position: positions[i],
                normal: normals[i],
                tangent: tangents[i],
            },
        });

        for clipped in clip_near(&corners, camera.near) {
            fill_triangle(camera, target, &clipped, &mut shade);
        }
    }
}

/// Sutherland-Hodgman clip of one triangle against the `z = near` plane
/// in camera space, fanned back into triangles. Varyings interpolate
/// linearly here; camera space is affine so that is exact.
fn clip_near(corners: &[ClipVertex; 3], near: f32) -> Vec<[ClipVertex; 3]> {
    let mut kept: Vec<ClipVertex> = Vec::with_capacity(4);

    for i in 0..3 {
        let a = corners[i];
        let b = corners[(i + 1) % 3];
        let a_in = a.camera.z >= near;
        let b_in = b.camera.z >= near;

        if a_in {
            kept.push(a);
        }
        if a_in != b_in {
            let t = (near - a.camera.z) / (b.camera.z - a.camera.z);
            kept.push(ClipVertex {
                camera: a.camera.lerp(b.camera, t),
                varyings: a.varyings.lerp(&b.varyings, t),
            });
        }
    }

    match kept.len() {
        3 => vec![[kept[0], kept[1], kept[2]]],
        4 => vec![[kept[0], kept[1], kept[2]], [kept[0], kept[2], kept[3]]],
        _ => Vec::new(),
    }
}

fn fill_triangle<F>(
    camera: &RasterCamera,
    target: &mut RenderTarget,
    corners: &[ClipVertex; 3],
    shade: &mut F,
) where
    F: FnMut(&Varyings) -> (Vec4, Vec4),
{
    let width = target.width() as f32;
    let height = target.height() as f32;
    let aspect = width / height;

    // Project to pixel coordinates; every vertex has z >= near after
    // clipping so the division is safe.
    let screen = corners.map(|v| {
        let ndc_x = camera.focal / aspect * v.camera.x / v.camera.z;
        let ndc_y = camera.focal * v.camera.y / v.camera.z;
        Vec3::new(
            (ndc_x * 0.5 + 0.5) * width,
            (ndc_y * 0.5 + 0.5) * height,
            v.camera.z,
        )
    });

    let area = edge(screen[0], screen[1], screen[2]);
    if area.abs() < 1e-12 {
        return;
    }
    let inv_area = 1.0 / area;

    let min_x = screen.iter().map(|s| s.x).fold(f32::INFINITY, f32::min);
    let max_x = screen.iter().map(|s| s.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = screen.iter().map(|s| s.y).fold(f32::INFINITY, f32::min);
    let max_y = screen.iter().map(|s| s.y).fold(f32::NEG_INFINITY, f32::max);

    let x0 = (min_x.floor().max(0.0)) as u32;
    let x1 = (max_x.ceil().min(width)) as u32;
    let y0 = (min_y.floor().max(0.0)) as u32;
    let y1 = (max_y.ceil().min(height)) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
            let b0 = edge(screen[1], screen[2], p) * inv_area;
            let b1 = edge(screen[2], screen[0], p) * inv_area;
            let b2 = edge(screen[0], screen[1], p) * inv_area;
            if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                continue;
            }

            // Perspective-correct interpolation through 1/z
            let q0 = b0 / screen[0].z;
            let q1 = b1 / screen[1].z;
            let q2 = b2 / screen[2].z;
            let inv_w = q0 + q1 + q2;
            let depth = 1.0 / inv_w;
            if depth > camera.far {
                continue;
            }

            let index = (y * target.width() + x) as usize;
            if depth >= target.depth_at(index) {
                continue;
            }

            let varyings = corners[0]
                .varyings
                .scale(q0)
                .add(&corners[1].varyings.scale(q1))
                .add(&corners[2].varyings.scale(q2))
                .scale(depth);
            let (color, emissive) = shade(&varyings);
            target.write(index, depth, color, emissive);
        }
    }
}

#[inline]
fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
