use std::sync::Arc;

use glam::{Vec3, Vec4};

use crate::errors::Result;
use crate::renderer::rasterizer::{draw_geometry, RasterCamera, Varyings};
use crate::renderer::target::RenderTarget;
use crate::resources::cube::{CubeTexture, CUBE_FACES};
use crate::resources::geometry::Geometry;

/// Face resolution of the baked cube maps.
pub const BAKE_FACE_SIZE: u32 = 256;
/// Near plane of the capture cameras. Geometry closer than this to the
/// origin is dropped from the bake.
pub const BAKE_NEAR: f32 = 0.1;
/// Far plane of the capture cameras, sized for geometry normalized to a
/// 1.8-unit bounding diagonal around the origin.
pub const BAKE_FAR: f32 = 3.0;

/// Value every face is cleared to before capture: it decodes to the zero
/// vector, so directions that miss the mesh resolve to no normal rather
/// than a stale or biased one.
const CLEAR_ENCODED_ZERO: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);

/// The cube map pair one bake produces, ready to attach to the mesh's
/// subsurface material.
#[derive(Debug, Clone)]
pub struct BakedCubeMaps {
    pub normal_cube: Arc<CubeTexture>,
    pub tangent_cube: Arc<CubeTexture>,
}

/// Bakes a mesh's surface normals and tangents into cube maps by
/// rendering the geometry from its center, once per face and attribute.
///
/// Directions with layered geometry resolve to the nearest surface; the
/// passes render double-sided so back-facing geometry seen from the
/// inside still lands in the maps.
#[derive(Debug, Clone)]
pub struct CubeMapBaker {
    face_size: u32,
}

impl Default for CubeMapBaker {
    fn default() -> Self {
        Self {
            face_size: BAKE_FACE_SIZE,
        }
    }
}

#[derive(Clone, Copy)]
enum BakeAttribute {
    Normal,
    Tangent,
}

impl CubeMapBaker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower resolutions are useful in tests; sampling quality drops
    /// accordingly.
    pub fn with_face_size(face_size: u32) -> Self {
        Self { face_size }
    }

    /// Runs the full bake for one geometry.
    ///
    /// Derives tangents first when the geometry arrived without them.
    /// Both cube textures are allocated fresh on every call; the returned
    /// maps belong to exactly one mesh and must never be shared, reusing
    /// a previous mesh's maps shades the new mesh with the old surface.
    pub fn bake(&self, geometry: &mut Geometry) -> Result<BakedCubeMaps> {
        geometry.validate_for_bake()?;
        geometry.compute_tangents();

        log::debug!(
            "baking cube maps for '{}': {} triangles at {}x{} per face",
            geometry.name,
            geometry.triangle_count(),
            self.face_size,
            self.face_size
        );

        let normal_faces = self.capture(geometry, BakeAttribute::Normal)?;
        let tangent_faces = self.capture(geometry, BakeAttribute::Tangent)?;

        let normal_cube = CubeTexture::from_faces(
            &format!("{}.normal_cube", geometry.name),
            self.face_size,
            normal_faces,
        )?;
        let tangent_cube = CubeTexture::from_faces(
            &format!("{}.tangent_cube", geometry.name),
            self.face_size,
            tangent_faces,
        )?;

        Ok(BakedCubeMaps {
            normal_cube: Arc::new(normal_cube),
            tangent_cube: Arc::new(tangent_cube),
        })
    }

    /// Renders the six faces for one attribute, encoded as `(v + 1) / 2`
    /// so the signed direction survives the unsigned texel format.
    fn capture(
        &self,
        geometry: &Geometry,
        attribute: BakeAttribute,
    ) -> Result<[Vec<Vec4>; 6]> {
        let mut faces: [Vec<Vec4>; 6] = Default::default();

        for face in CUBE_FACES {
            let camera = RasterCamera::cube_face(face, BAKE_NEAR, BAKE_FAR);
            let mut target = RenderTarget::new(self.face_size, self.face_size)?;
            target.clear(CLEAR_ENCODED_ZERO);

            draw_geometry(&camera, &mut target, geometry, true, |varyings: &Varyings| {
                let dir = match attribute {
                    BakeAttribute::Normal => varyings.normal,
                    BakeAttribute::Tangent => varyings.tangent.truncate(),
                };
                let encoded = dir.normalize_or_zero() * 0.5 + Vec3::splat(0.5);
                (encoded.extend(1.0), Vec4::new(0.0, 0.0, 0.0, 1.0))
            });

            faces[face.index()] = target.into_texels();
        }

        Ok(faces)
    }
}
