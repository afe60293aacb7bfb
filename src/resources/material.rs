use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;

use crate::errors::{LuciteError, Result};

/// Process-wide shading tunables, read by every shader invocation for
/// every mesh.
///
/// Mutation happens only through the update interface on
/// [`SharedMaterialParams`]; the renderer takes one snapshot at the start
/// of a frame, so a concurrent control-surface update can never be
/// observed half-applied within one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParams {
    /// Color of the bulk medium (what thick sections converge to).
    pub medium_color: Vec3,
    /// Color that bleeds through thin, back-lit sections.
    pub thin_medium_color: Vec3,
    /// Tint applied to surface color re-emerging from inside the medium.
    pub subsurface_tint: Vec3,
    /// Approximate thickness the view ray travels through. Range [0, 0.15].
    pub depth: f32,
    /// Scales how fast grazing angles push lookups down the mip chain.
    /// Range [0, 20], integer steps.
    pub mip_multiplier: f32,
    /// Mip floor for all subsurface lookups. Range [0, 10], integer steps.
    pub min_mip_level: f32,
    /// Camera position expressed in the shaded mesh's model space,
    /// refreshed by the renderer at the start of each frame.
    pub camera_pos_model: Vec3,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            medium_color: Vec3::new(0.05, 0.02, 0.02),
            thin_medium_color: Vec3::new(0.79, 0.07, 0.04),
            subsurface_tint: Vec3::new(0.6, 0.32, 0.09),
            depth: 0.1,
            mip_multiplier: 4.0,
            min_mip_level: 2.0,
            camera_pos_model: Vec3::new(0.0, 0.0, -2.0),
        }
    }
}

impl MaterialParams {
    /// Clamps into the documented [0, 0.15] range.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 0.15);
    }

    /// Rounds to integer steps and clamps into [0, 20].
    pub fn set_mip_multiplier(&mut self, multiplier: f32) {
        self.mip_multiplier = multiplier.round().clamp(0.0, 20.0);
    }

    /// Rounds to integer steps and clamps into [0, 10].
    pub fn set_min_mip_level(&mut self, level: f32) {
        self.min_mip_level = level.round().clamp(0.0, 10.0);
    }

    pub fn apply_color_preset(&mut self, preset: ColorPreset) {
        let (medium, thin, tint) = preset.colors();
        self.medium_color = medium;
        self.thin_medium_color = thin;
        self.subsurface_tint = tint;
    }

    pub fn apply_scattering_preset(&mut self, preset: ScatteringPreset) {
        let (min_mip, multiplier) = preset.levels();
        self.min_mip_level = min_mip;
        self.mip_multiplier = multiplier;
    }
}

// ============================================================================
// Presets
// ============================================================================

/// Named color bundles for the medium/thin/tint triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPreset {
    Red,
    Yellow,
    Green,
    LightBlue,
    Purple,
    White,
}

impl ColorPreset {
    pub const ALL: [ColorPreset; 6] = [
        ColorPreset::Red,
        ColorPreset::Yellow,
        ColorPreset::Green,
        ColorPreset::LightBlue,
        ColorPreset::Purple,
        ColorPreset::White,
    ];

    /// (medium, thin medium, subsurface tint)
    #[must_use]
    pub fn colors(self) -> (Vec3, Vec3, Vec3) {
        match self {
            ColorPreset::Red => (
                Vec3::new(0.05, 0.02, 0.02),
                Vec3::new(0.79, 0.07, 0.04),
                Vec3::new(0.6, 0.32, 0.09),
            ),
            ColorPreset::Yellow => (
                Vec3::new(0.05, 0.03, 0.02),
                Vec3::new(0.82, 0.38, 0.02),
                Vec3::new(0.56, 0.32, 0.09),
            ),
            ColorPreset::Green => (
                Vec3::new(0.02, 0.05, 0.02),
                Vec3::new(0.02, 0.76, 0.13),
                Vec3::new(0.08, 0.47, 0.34),
            ),
            ColorPreset::LightBlue => (
                Vec3::new(0.02, 0.05, 0.05),
                Vec3::new(0.03, 0.75, 0.89),
                Vec3::new(0.1, 0.45, 0.59),
            ),
            ColorPreset::Purple => (
                Vec3::new(0.04, 0.02, 0.05),
                Vec3::new(0.46, 0.03, 0.89),
                Vec3::new(0.46, 0.1, 0.59),
            ),
            ColorPreset::White => (
                Vec3::new(0.08, 0.08, 0.08),
                Vec3::new(0.78, 0.71, 0.66),
                Vec3::new(0.36, 0.41, 0.41),
            ),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ColorPreset::Red => "Red",
            ColorPreset::Yellow => "Yellow",
            ColorPreset::Green => "Green",
            ColorPreset::LightBlue => "Light blue",
            ColorPreset::Purple => "Purple",
            ColorPreset::White => "White",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LuciteError::PresetNotFound(name.to_string()))
    }
}

/// Scattering intensity steps exposed by the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatteringPreset {
    Off,
    Low,
    High,
}

impl ScatteringPreset {
    /// (min mip level, mip multiplier)
    #[must_use]
    pub fn levels(self) -> (f32, f32) {
        match self {
            ScatteringPreset::Off => (0.0, 0.0),
            ScatteringPreset::Low => (1.0, 6.0),
            ScatteringPreset::High => (2.0, 10.0),
        }
    }
}

// ============================================================================
// Shared handle
// ============================================================================

/// Shared, runtime-mutable handle to the process-wide tunables.
///
/// Clones are cheap and refer to the same parameters. The control surface
/// mutates through [`update`](Self::update); the renderer reads one
/// [`snapshot`](Self::snapshot) per frame.
#[derive(Debug, Clone, Default)]
pub struct SharedMaterialParams(Arc<RwLock<MaterialParams>>);

impl SharedMaterialParams {
    #[must_use]
    pub fn new(params: MaterialParams) -> Self {
        Self(Arc::new(RwLock::new(params)))
    }

    /// Applies a mutation. The write lock spans the whole closure, so a
    /// multi-field update is visible to the next frame atomically.
    pub fn update<R>(&self, f: impl FnOnce(&mut MaterialParams) -> R) -> R {
        f(&mut self.0.write())
    }

    /// Read-only copy for one frame's shading.
    #[must_use]
    pub fn snapshot(&self) -> MaterialParams {
        self.0.read().clone()
    }
}
