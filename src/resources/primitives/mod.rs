//! Procedural test geometry. Real meshes arrive pre-decoded from the
//! asset pipeline; these primitives exist for demos and tests.

mod box_shape;
mod sphere;

pub use box_shape::create_box;
pub use sphere::{create_sphere, SphereOptions};
