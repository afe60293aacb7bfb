use glam::{Vec2, Vec3, Vec4};
use uuid::Uuid;

use crate::errors::{LuciteError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Indexed triangle geometry: positions, normals, UVs, derived tangents.
///
/// Tangents are never authored. They are computed from UVs on demand,
/// which the cube map baker does before its tangent pass when a geometry
/// arrives without them.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub uuid: Uuid,
    pub name: String,

    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    tangents: Option<Vec<Vec4>>,
    indices: Vec<u32>,

    bounding_box: Option<BoundingBox>,
}

impl Geometry {
    #[must_use]
    pub fn new(
        name: &str,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            positions,
            normals,
            uvs,
            tangents: None,
            indices,
            bounding_box: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[must_use]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    #[must_use]
    pub fn tangents(&self) -> Option<&[Vec4]> {
        self.tangents.as_deref()
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    /// Validates that the geometry can be rasterized and baked.
    pub fn validate_for_bake(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(LuciteError::MissingAttribute {
                attribute: "position",
                context: "cube map bake",
            });
        }
        if self.normals.len() != self.positions.len() {
            return Err(LuciteError::MissingAttribute {
                attribute: "normal",
                context: "cube map bake",
            });
        }
        if self.uvs.len() != self.positions.len() {
            return Err(LuciteError::MissingAttribute {
                attribute: "uv",
                context: "tangent derivation for cube map bake",
            });
        }
        if self.indices.len() < 3 {
            return Err(LuciteError::EmptyGeometry(self.name.clone()));
        }
        Ok(())
    }

    // ========================================================================
    // Derived data
    // ========================================================================

    pub fn compute_bounding_volume(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        self.bounding_box = Some(BoundingBox { min, max });
    }

    /// Recenters the geometry at the origin and scales it so the bounding
    /// box diagonal is 1.8 units, the working size the capture rig and its
    /// near/far planes are tuned for. Run before baking.
    pub fn center_and_normalize(&mut self) {
        self.compute_bounding_volume();
        let Some(bbox) = self.bounding_box else {
            return;
        };

        let center = bbox.center();
        let diagonal = bbox.size().length();
        let scale = if diagonal > 0.0 { 1.8 / diagonal } else { 1.0 };

        for p in &mut self.positions {
            *p = (*p - center) * scale;
        }
        self.compute_bounding_volume();
    }

    /// Area-weighted smooth vertex normals.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if i0 >= normals.len() || i1 >= normals.len() || i2 >= normals.len() {
                continue;
            }
            let v0 = self.positions[i0];
            // Cross product length is twice the triangle area, so summing
            // unnormalized face normals area-weights the result
            let face_normal =
                (self.positions[i1] - v0).cross(self.positions[i2] - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Derives per-vertex tangents from UVs (Lengyel's method), stored as
    /// `xyz` = tangent direction, `w` = bitangent handedness sign.
    ///
    /// No-op when tangents are already present.
    pub fn compute_tangents(&mut self) {
        if self.tangents.is_some() {
            return;
        }
        let count = self.positions.len();
        let mut tan_u = vec![Vec3::ZERO; count];
        let mut tan_v = vec![Vec3::ZERO; count];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if i0 >= count || i1 >= count || i2 >= count {
                continue;
            }

            let e1 = self.positions[i1] - self.positions[i0];
            let e2 = self.positions[i2] - self.positions[i0];
            let duv1 = self.uvs[i1] - self.uvs[i0];
            let duv2 = self.uvs[i2] - self.uvs[i0];

            let det = duv1.x * duv2.y - duv2.x * duv1.y;
            if det.abs() < 1e-12 {
                // Degenerate UV mapping on this triangle
                continue;
            }
            let r = 1.0 / det;
            let sdir = (e1 * duv2.y - e2 * duv1.y) * r;
            let tdir = (e2 * duv1.x - e1 * duv2.x) * r;

            for i in [i0, i1, i2] {
                tan_u[i] += sdir;
                tan_v[i] += tdir;
            }
        }

        let mut tangents = Vec::with_capacity(count);
        for i in 0..count {
            let n = self.normals[i];
            let t = tan_u[i];

            // Gram-Schmidt orthogonalize against the normal
            let mut tangent = (t - n * n.dot(t)).normalize_or_zero();
            if tangent == Vec3::ZERO {
                tangent = arbitrary_perpendicular(n);
            }

            let w = if n.cross(t).dot(tan_v[i]) < 0.0 { -1.0 } else { 1.0 };
            tangents.push(tangent.extend(w));
        }
        self.tangents = Some(tangents);
    }
}

/// Any unit vector perpendicular to `n`, for vertices whose UV
/// neighborhood is degenerate.
fn arbitrary_perpendicular(n: Vec3) -> Vec3 {
    let axis = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    n.cross(axis).normalize_or_zero()
}
