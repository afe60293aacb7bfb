use glam::Vec4;

use crate::errors::{LuciteError, Result};
use crate::utils::linear_to_srgb;

/// A CPU render target: linear RGBA color texels, an emissive plane for
/// the bloom chain, and a depth buffer holding camera-space distance
/// along the view axis.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    width: u32,
    height: u32,
    color: Vec<Vec4>,
    emissive: Vec<Vec4>,
    depth: Vec<f32>,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LuciteError::TargetAllocation(format!(
                "render target dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            color: vec![Vec4::ZERO; len],
            emissive: vec![Vec4::new(0.0, 0.0, 0.0, 1.0); len],
            depth: vec![f32::INFINITY; len],
        })
    }

    pub fn clear(&mut self, color: Vec4) {
        self.color.fill(color);
        self.emissive.fill(Vec4::new(0.0, 0.0, 0.0, 1.0));
        self.depth.fill(f32::INFINITY);
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.color[(y * self.width + x) as usize]
    }

    #[must_use]
    pub fn emissive_texel(&self, x: u32, y: u32) -> Vec4 {
        self.emissive[(y * self.width + x) as usize]
    }

    #[must_use]
    pub fn texels(&self) -> &[Vec4] {
        &self.color
    }

    #[must_use]
    pub fn emissive_texels(&self) -> &[Vec4] {
        &self.emissive
    }

    #[must_use]
    pub fn into_texels(self) -> Vec<Vec4> {
        self.color
    }

    pub(crate) fn depth_at(&self, index: usize) -> f32 {
        self.depth[index]
    }

    pub(crate) fn write(&mut self, index: usize, depth: f32, color: Vec4, emissive: Vec4) {
        self.depth[index] = depth;
        self.color[index] = color;
        self.emissive[index] = emissive;
    }

    /// Encodes the color plane to 8-bit RGBA. Rows are stored bottom-up
    /// (screen-space Y grows upward); pass `flip_y` when the consumer
    /// expects top-down image rows, and `srgb_encode` for
    /// display-referred output.
    #[must_use]
    pub fn to_rgba8(&self, flip_y: bool, srgb_encode: bool) -> Vec<u8> {
        self.encode_rgba8(flip_y, srgb_encode, |x, y| self.texel(x, y))
    }

    /// Encodes the emissive plane the same way.
    #[must_use]
    pub fn emissive_to_rgba8(&self, flip_y: bool, srgb_encode: bool) -> Vec<u8> {
        self.encode_rgba8(flip_y, srgb_encode, |x, y| self.emissive_texel(x, y))
    }

    /// Additive composite of color and emissive planes. A stand-in for a
    /// proper bloom chain: emissive values above 1.0 saturate instead of
    /// blooming.
    #[must_use]
    pub fn composite_rgba8(&self, flip_y: bool, srgb_encode: bool) -> Vec<u8> {
        self.encode_rgba8(flip_y, srgb_encode, |x, y| {
            let e = self.emissive_texel(x, y);
            self.texel(x, y) + Vec4::new(e.x, e.y, e.z, 0.0)
        })
    }

    fn encode_rgba8(
        &self,
        flip_y: bool,
        srgb_encode: bool,
        fetch: impl Fn(u32, u32) -> Vec4,
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.color.len() * 4);
        for row in 0..self.height {
            let y = if flip_y { self.height - 1 - row } else { row };
            for x in 0..self.width {
                let c = fetch(x, y);
                for channel in [c.x, c.y, c.z] {
                    let v = if srgb_encode {
                        linear_to_srgb(channel.clamp(0.0, 1.0))
                    } else {
                        channel.clamp(0.0, 1.0)
                    };
                    out.push((v * 255.0 + 0.5) as u8);
                }
                out.push((c.w.clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
            }
        }
        out
    }
}
