use glam::Vec3;

/// Per-fragment intersection state shared between the subsurface color
/// shader and the emissive shader.
///
/// The subsurface shader produces it, the emissive shader consumes it;
/// nothing is recomputed between the two passes, so they can never
/// disagree about where the view ray exits the medium.
#[derive(Debug, Clone, Copy)]
pub struct SubsurfaceContext {
    /// Unit vector from the fragment toward the camera, in model space.
    pub view_vec: Vec3,
    /// Surface normal sampled from the normal cube map at the entry
    /// (un-marched) position.
    pub entry_normal: Vec3,
    /// Estimated position where light re-emerges from the medium.
    pub subsurface_position: Vec3,
    /// Resolved exit normal (flat or normal-mapped strategy).
    pub exit_normal: Vec3,
    /// Explicit mip level for every triplanar lookup of this fragment.
    pub mip_level: f32,
    /// `dot(exit_normal, view_vec)` — the single scalar both color mixes
    /// key off.
    pub view_dot_exit_normal: f32,
}
