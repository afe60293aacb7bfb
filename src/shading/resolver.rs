use std::sync::Arc;

use glam::{Mat3, Vec3};

use crate::resources::cube::CubeTexture;
use crate::resources::texture::Texture;
use crate::shading::triplanar;

/// How the exit normal is derived from the baked cube maps.
///
/// `Flat` uses the baked surface normal as-is. `NormalMapped` perturbs it
/// with a tangent-space normal map projected triplanarly onto the exit
/// position, using the baked tangent cube to build the TBN frame.
#[derive(Debug, Clone)]
pub enum ExitNormalStrategy {
    Flat,
    NormalMapped {
        normal_map: Arc<Texture>,
        tangent_cube: Arc<CubeTexture>,
    },
}

/// Fragment state every strategy needs; computed once by the subsurface
/// shader and passed through so the resolver never re-samples it.
#[derive(Debug, Clone, Copy)]
pub struct ResolverInputs {
    /// Position where the view ray is estimated to exit the medium.
    pub subsurface_position: Vec3,
    /// Baked surface normal sampled at the exit position.
    pub basic_normal: Vec3,
    /// Baked surface normal at the entry position; drives the triplanar
    /// blend weights.
    pub entry_normal: Vec3,
    pub view_vec: Vec3,
    pub mip_level: f32,
    pub texture_scale: f32,
}

/// Decodes a direction baked into a cube map texel and renormalizes it.
/// `f16` quantization of the `(v + 1) / 2` encoding denormalizes slightly;
/// shading math downstream assumes unit length.
#[must_use]
pub fn sample_cube_direction(cube: &CubeTexture, position: Vec3) -> Vec3 {
    let texel = cube.sample_trilinear(position, 0.0);
    let decoded = Vec3::new(texel.x, texel.y, texel.z) * 2.0 - Vec3::ONE;
    decoded.normalize_or_zero()
}

impl ExitNormalStrategy {
    /// Resolves the final exit normal for one fragment.
    #[must_use]
    pub fn resolve(&self, inputs: &ResolverInputs) -> Vec3 {
        match self {
            ExitNormalStrategy::Flat => inputs.basic_normal,
            ExitNormalStrategy::NormalMapped {
                normal_map,
                tangent_cube,
            } => resolve_normal_mapped(normal_map, tangent_cube, inputs),
        }
    }
}

/// Rebuilds a TBN frame at the exit position from the baked tangent cube
/// and perturbs the basic normal by the triplanar normal-map sample.
///
/// The mapped normal is only trusted where the basic normal faces the
/// camera (`dot >= 0.1`); past the silhouette the baked tangent frame is
/// unstable and the perturbation flips visibly, so the basic normal wins
/// there.
fn resolve_normal_mapped(
    normal_map: &Texture,
    tangent_cube: &CubeTexture,
    inputs: &ResolverInputs,
) -> Vec3 {
    let tangent = sample_cube_direction(tangent_cube, inputs.subsurface_position);
    let bitangent = inputs.basic_normal.cross(tangent);
    let tbn = Mat3::from_cols(tangent, bitangent, inputs.basic_normal);

    let sampled = triplanar::project(
        normal_map,
        inputs.subsurface_position,
        inputs.entry_normal,
        inputs.mip_level,
        inputs.texture_scale,
    );
    let tangent_space = Vec3::new(sampled.x, sampled.y, sampled.z) * 2.0 - Vec3::ONE;
    let mapped = (tbn * tangent_space).normalize_or_zero();

    let facing = if inputs.basic_normal.dot(inputs.view_vec) >= 0.1 {
        1.0
    } else {
        0.0
    };
    inputs.basic_normal.lerp(mapped, facing).normalize_or_zero()
}
