//! Fragment shading for the subsurface effect.
//!
//! The pipeline per fragment: the subsurface shader marches the view ray
//! through the medium, resolves an exit normal, and mixes the medium
//! colors; the emissive shader reuses the same [`SubsurfaceContext`] for
//! its glow. All texture lookups go through the triplanar projector with
//! an explicit mip level.

pub mod context;
pub mod emissive;
pub mod overview;
pub mod resolver;
pub mod subsurface;
pub mod triplanar;

pub use context::SubsurfaceContext;
pub use resolver::ExitNormalStrategy;
pub use subsurface::FragmentInput;
