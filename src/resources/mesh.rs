use std::sync::Arc;

use crate::resources::cube::CubeTexture;
use crate::resources::geometry::Geometry;
use crate::resources::presets::TextureConfig;
use crate::resources::texture::Texture;
use crate::shading::resolver::ExitNormalStrategy;

/// Per-mesh effect material: the baked cube map pair plus the bindings of
/// the selected texture preset.
///
/// The cube maps are exclusively owned by one mesh's material — they are
/// allocated fresh by every bake and never shared, because aliasing them
/// between meshes produces visibly wrong shading.
#[derive(Debug, Clone)]
pub struct SubsurfaceMaterial {
    normal_cube: Arc<CubeTexture>,
    tangent_cube: Arc<CubeTexture>,
    pub strategy: ExitNormalStrategy,
    pub color_map: Arc<Texture>,
    pub emissive_map: Option<Arc<Texture>>,
    pub texture_scale: f32,
    pub color_boost: f32,
    pub emissive_color_boost: f32,
}

impl SubsurfaceMaterial {
    /// Binds a texture preset to a freshly baked cube map pair. Presets
    /// with a normal map get the normal-mapped exit-normal strategy,
    /// everything else stays flat.
    #[must_use]
    pub fn from_preset(
        preset: &TextureConfig,
        normal_cube: Arc<CubeTexture>,
        tangent_cube: Arc<CubeTexture>,
    ) -> Self {
        let strategy = match &preset.normal_map {
            Some(normal_map) => ExitNormalStrategy::NormalMapped {
                normal_map: normal_map.clone(),
                tangent_cube: tangent_cube.clone(),
            },
            None => ExitNormalStrategy::Flat,
        };

        Self {
            normal_cube,
            tangent_cube,
            strategy,
            color_map: preset.color_map.clone(),
            emissive_map: preset.emissive_map.clone(),
            texture_scale: preset.scale,
            color_boost: preset.color_boost,
            emissive_color_boost: preset.emissive_color_boost,
        }
    }

    /// Re-binds a different preset at runtime, keeping the baked maps.
    pub fn apply_preset(&mut self, preset: &TextureConfig) {
        *self = Self::from_preset(preset, self.normal_cube.clone(), self.tangent_cube.clone());
    }

    #[must_use]
    pub fn normal_cube(&self) -> &Arc<CubeTexture> {
        &self.normal_cube
    }

    #[must_use]
    pub fn tangent_cube(&self) -> &Arc<CubeTexture> {
        &self.tangent_cube
    }
}

/// What a mesh is drawn with.
///
/// `Overview` is the cheap view-dot-normal gray shading used while
/// inspecting geometry (or before a bake has finished); `Subsurface` is
/// the full effect material, activated only once its bake completed.
#[derive(Debug, Clone)]
pub enum MeshMaterial {
    Overview,
    Subsurface(SubsurfaceMaterial),
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: MeshMaterial,
    pub visible: bool,
}

impl Mesh {
    /// A freshly loaded mesh starts on the overview material; the effect
    /// material is attached after its cube maps are baked.
    #[must_use]
    pub fn new(name: &str, geometry: Geometry) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material: MeshMaterial::Overview,
            visible: true,
        }
    }

    pub fn set_subsurface_material(&mut self, material: SubsurfaceMaterial) {
        self.material = MeshMaterial::Subsurface(material);
    }
}
