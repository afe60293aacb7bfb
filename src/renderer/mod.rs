//! Frame rendering and cube map baking.
//!
//! [`Renderer`] owns the frame target, the capture rig and the frame
//! timer; it must go through [`Renderer::init`] exactly once before any
//! bake or draw. Everything here is CPU rasterization, deterministic
//! across runs.

pub mod baker;
pub mod rasterizer;
pub mod target;

use glam::{Vec3, Vec4};

use crate::errors::{LuciteError, Result};
use crate::resources::material::SharedMaterialParams;
use crate::resources::mesh::{Mesh, MeshMaterial, SubsurfaceMaterial};
use crate::resources::presets::TextureConfig;
use crate::shading::subsurface::FragmentInput;
use crate::shading::{emissive, overview, subsurface};
use crate::utils::FrameTimer;

pub use baker::{BakedCubeMaps, CubeMapBaker, BAKE_FACE_SIZE, BAKE_FAR, BAKE_NEAR};
pub use rasterizer::{draw_geometry, RasterCamera, Varyings};
pub use target::RenderTarget;

const FRAME_NEAR: f32 = 0.01;
const FRAME_FAR: f32 = 100.0;

/// One-time initialization state.
///
/// Bakes and draws are rejected until `Ready`; nothing downstream has to
/// handle half-initialized targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initializing,
    Ready,
}

/// A finished frame: the color and emissive planes rendered for one
/// camera position.
#[derive(Debug, Clone)]
pub struct Frame {
    target: RenderTarget,
}

impl Frame {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.target.texel(x, y)
    }

    #[must_use]
    pub fn emissive_texel(&self, x: u32, y: u32) -> Vec4 {
        self.target.emissive_texel(x, y)
    }

    #[must_use]
    pub fn texels(&self) -> &[Vec4] {
        self.target.texels()
    }

    #[must_use]
    pub fn emissive_texels(&self) -> &[Vec4] {
        self.target.emissive_texels()
    }

    /// Top-down, sRGB-encoded color plane, ready for image export.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.target.to_rgba8(true, true)
    }

    /// Top-down, sRGB-encoded emissive plane.
    #[must_use]
    pub fn emissive_rgba8(&self) -> Vec<u8> {
        self.target.emissive_to_rgba8(true, true)
    }

    /// Top-down, sRGB-encoded additive composite of color and emissive.
    #[must_use]
    pub fn composite_rgba8(&self) -> Vec<u8> {
        self.target.composite_rgba8(true, true)
    }
}

/// The renderer front-end: bakes cube maps for meshes and rasterizes
/// frames with the subsurface materials.
#[derive(Debug)]
pub struct Renderer {
    width: u32,
    height: u32,
    fov_y: f32,
    state: InitState,
    baker: CubeMapBaker,
    params: SharedMaterialParams,
    camera_position: Vec3,
    frame_target: Option<RenderTarget>,
    timer: FrameTimer,
}

impl Renderer {
    /// Creates an uninitialized renderer. [`init`](Self::init) must run
    /// before the first bake or frame.
    #[must_use]
    pub fn new(width: u32, height: u32, params: SharedMaterialParams) -> Self {
        Self {
            width,
            height,
            fov_y: 45f32.to_radians(),
            state: InitState::Uninitialized,
            baker: CubeMapBaker::new(),
            params,
            camera_position: Vec3::new(0.0, 0.0, -2.0),
            frame_target: None,
            timer: FrameTimer::new(),
        }
    }

    /// One-time setup: allocates the frame target and flips the state to
    /// `Ready`. Idempotent once ready.
    pub fn init(&mut self) -> Result<()> {
        if self.state == InitState::Ready {
            return Ok(());
        }
        self.state = InitState::Initializing;
        self.frame_target = Some(RenderTarget::new(self.width, self.height)?);
        self.state = InitState::Ready;
        log::info!("renderer ready: {}x{} frame target", self.width, self.height);
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> InitState {
        self.state
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == InitState::Ready
    }

    #[must_use]
    pub fn params(&self) -> &SharedMaterialParams {
        &self.params
    }

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera_position = position;
    }

    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    fn ensure_ready(&self, operation: &str) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(LuciteError::RendererNotReady(operation.to_string()))
        }
    }

    /// Bakes fresh cube maps for `mesh` and attaches the subsurface
    /// material built from `preset`. Until this succeeds the mesh keeps
    /// its overview material.
    pub fn bake_mesh(&self, mesh: &mut Mesh, preset: &TextureConfig) -> Result<()> {
        self.ensure_ready("cube map bake")?;
        let maps = self.baker.bake(&mut mesh.geometry)?;
        mesh.set_subsurface_material(SubsurfaceMaterial::from_preset(
            preset,
            maps.normal_cube,
            maps.tangent_cube,
        ));
        log::info!("mesh '{}' switched to subsurface material", mesh.name);
        Ok(())
    }

    /// Renders one frame of every visible mesh from the current camera
    /// position.
    ///
    /// Takes a single snapshot of the shared material parameters up
    /// front, so control-surface updates landing mid-frame apply to the
    /// next frame as a whole.
    pub fn render_frame(&mut self, meshes: &[Mesh]) -> Result<Frame> {
        self.ensure_ready("frame render")?;
        self.timer.begin_frame();

        let mut params = self.params.snapshot();
        params.camera_pos_model = self.camera_position;

        let camera = RasterCamera::look_at(
            self.camera_position,
            Vec3::ZERO,
            self.fov_y,
            FRAME_NEAR,
            FRAME_FAR,
        );

        let target = self
            .frame_target
            .as_mut()
            .ok_or_else(|| LuciteError::RendererNotReady("frame target missing".to_string()))?;
        target.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));

        for mesh in meshes.iter().filter(|m| m.visible) {
            match &mesh.material {
                MeshMaterial::Overview => {
                    draw_geometry(&camera, target, &mesh.geometry, false, |v| {
                        let color =
                            overview::shade(v.position, v.normal, params.camera_pos_model);
                        (color, Vec4::new(0.0, 0.0, 0.0, 1.0))
                    });
                }
                MeshMaterial::Subsurface(material) => {
                    draw_geometry(&camera, target, &mesh.geometry, false, |v| {
                        let fragment = FragmentInput {
                            position: v.position,
                            geometric_normal: v.normal.normalize_or_zero(),
                        };
                        let (context, color) = subsurface::shade(&fragment, material, &params);
                        let glow = emissive::shade(&context, material, &params);
                        (color, glow)
                    });
                }
            }
        }

        if let Some(average_ms) = self.timer.end_frame() {
            log::debug!("average frame time: {average_ms:.2} ms");
        }

        Ok(Frame {
            target: target.clone(),
        })
    }
}
