//! Core resource definitions.
//!
//! Render-facing data structures with no dependency on the execution
//! backend:
//! - [`Mesh`] / [`SubsurfaceMaterial`]: a geometry plus its effect material
//! - [`Geometry`]: indexed triangle data with derived tangents
//! - [`Image`] / [`Texture`]: decoded pixels and sampleable mip chains
//! - [`CubeTexture`]: baked 6-face directional data
//! - [`MaterialParams`]: process-wide shading tunables
//! - presets: named texture/color configurations

pub mod cube;
pub mod geometry;
pub mod image;
pub mod material;
pub mod mesh;
pub mod presets;
pub mod primitives;
pub mod texture;

pub use cube::{face_uv, CubeFace, CubeTexture, CUBE_FACES};
pub use geometry::{BoundingBox, Geometry};
pub use image::{ColorSpace, Image};
pub use material::{
    ColorPreset, MaterialParams, ScatteringPreset, SharedMaterialParams,
};
pub use mesh::{Mesh, MeshMaterial, SubsurfaceMaterial};
pub use presets::{builtin_presets, find_preset, TextureCache, TextureConfig};
pub use texture::{MipLevel, Texture, WrapMode};
