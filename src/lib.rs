//! Lucite renders translucent crystal-like meshes with a fake
//! subsurface-scattering effect in real time.
//!
//! The trick: bake the mesh's surface normals and tangents into cube
//! maps once per mesh, then at shading time march the view ray an
//! approximate `depth` through the medium, look the exit normal up in
//! the baked maps, and mix medium, surface and thin-rim colors by how
//! the exit normal faces the camera. Mip level selection stands in for
//! scatter blur.
//!
//! Typical flow:
//!
//! ```no_run
//! use lucite::renderer::Renderer;
//! use lucite::resources::{builtin_presets, find_preset, Mesh, SharedMaterialParams, TextureCache};
//! use lucite::resources::primitives::{create_sphere, SphereOptions};
//!
//! # fn main() -> lucite::errors::Result<()> {
//! let params = SharedMaterialParams::default();
//! let mut renderer = Renderer::new(800, 600, params);
//! renderer.init()?;
//!
//! let mut cache = TextureCache::new();
//! let presets = builtin_presets(&mut cache);
//!
//! let mut mesh = Mesh::new("crystal", create_sphere(&SphereOptions::default()));
//! mesh.geometry.center_and_normalize();
//! renderer.bake_mesh(&mut mesh, find_preset(&presets, "stone nm")?)?;
//!
//! let frame = renderer.render_frame(std::slice::from_ref(&mesh))?;
//! # let _ = frame;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::module_inception)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod renderer;
pub mod resources;
pub mod shading;
pub mod utils;

pub use errors::{LuciteError, Result};
pub use renderer::{CubeMapBaker, Frame, InitState, Renderer};
pub use resources::{
    CubeTexture, Geometry, Image, MaterialParams, Mesh, SharedMaterialParams, Texture,
};
pub use shading::{ExitNormalStrategy, SubsurfaceContext};
