use glam::Vec4;
use uuid::Uuid;

use crate::resources::image::{ColorSpace, Image};
use crate::utils::srgb_to_linear;

/// Texture coordinate wrap mode.
///
/// Presets choose between mirrored and plain repetition per texture;
/// mirroring hides tiling seams on the triplanar projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
}

/// One level of a mip chain: linear-space RGBA texels.
#[derive(Debug, Clone)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<Vec4>,
}

impl MipLevel {
    #[inline]
    fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.texels[(y * self.width + x) as usize]
    }
}

/// A sampleable 2D texture: linearized pixel data plus a full box-filtered
/// mip chain.
///
/// Wrap mode and color space are fixed at construction — before the first
/// sampling use — so a texture can never be observed half-configured. All
/// sampling happens at an explicit mip level supplied by the caller; the
/// shading pipeline derives that level itself instead of relying on
/// hardware gradient selection.
#[derive(Debug)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    pub wrap: WrapMode,
    mips: Vec<MipLevel>,
}

impl Texture {
    /// Wraps decoded image data. sRGB-tagged data is linearized here, once.
    #[must_use]
    pub fn new(image: &Image, wrap: WrapMode) -> Self {
        let mut texels = Vec::with_capacity((image.width * image.height) as usize);
        for y in 0..image.height {
            for x in 0..image.width {
                let [r, g, b, a] = image.texel(x, y);
                let v = match image.color_space {
                    ColorSpace::Srgb => Vec4::new(
                        srgb_to_linear(r),
                        srgb_to_linear(g),
                        srgb_to_linear(b),
                        a,
                    ),
                    ColorSpace::Linear => Vec4::new(r, g, b, a),
                };
                texels.push(v);
            }
        }

        let base = MipLevel {
            width: image.width,
            height: image.height,
            texels,
        };
        let mips = build_mip_chain(base);

        Self {
            uuid: Uuid::new_v4(),
            name: image.name.clone(),
            wrap,
            mips,
        }
    }

    #[must_use]
    pub fn mip_count(&self) -> u32 {
        self.mips.len() as u32
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.mips[0].width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.mips[0].height
    }

    /// Bilinear sample within a single mip level.
    #[must_use]
    pub fn sample_level(&self, u: f32, v: f32, level: u32) -> Vec4 {
        let mip = &self.mips[level.min(self.mip_count() - 1) as usize];
        sample_bilinear(mip, u, v, self.wrap)
    }

    /// Trilinear sample at an explicit, possibly fractional mip level.
    ///
    /// The level is clamped into the available chain; fractional parts
    /// blend between the two adjacent levels.
    #[must_use]
    pub fn sample_trilinear(&self, u: f32, v: f32, level: f32) -> Vec4 {
        let max_level = (self.mip_count() - 1) as f32;
        let level = level.clamp(0.0, max_level);
        let lo = level.floor();
        let frac = level - lo;

        let c0 = self.sample_level(u, v, lo as u32);
        if frac <= 0.0 {
            return c0;
        }
        let c1 = self.sample_level(u, v, (lo as u32 + 1).min(self.mip_count() - 1));
        c0.lerp(c1, frac)
    }
}

// ============================================================================
// Sampling internals
// ============================================================================

#[inline]
fn wrap_coord(i: i64, n: u32, wrap: WrapMode) -> u32 {
    let n = i64::from(n);
    match wrap {
        WrapMode::Repeat => (i.rem_euclid(n)) as u32,
        WrapMode::MirroredRepeat => {
            // Triangle wave with period 2n
            let m = i.rem_euclid(2 * n);
            if m < n { m as u32 } else { (2 * n - 1 - m) as u32 }
        }
    }
}

fn sample_bilinear(mip: &MipLevel, u: f32, v: f32, wrap: WrapMode) -> Vec4 {
    let x = u * mip.width as f32 - 0.5;
    let y = v * mip.height as f32 - 0.5;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let x0 = x0 as i64;
    let y0 = y0 as i64;
    let xa = wrap_coord(x0, mip.width, wrap);
    let xb = wrap_coord(x0 + 1, mip.width, wrap);
    let ya = wrap_coord(y0, mip.height, wrap);
    let yb = wrap_coord(y0 + 1, mip.height, wrap);

    let top = mip.texel(xa, ya).lerp(mip.texel(xb, ya), fx);
    let bottom = mip.texel(xa, yb).lerp(mip.texel(xb, yb), fx);
    top.lerp(bottom, fy)
}

/// Builds the full mip chain down to 1x1 with a 2x2 box filter.
fn build_mip_chain(base: MipLevel) -> Vec<MipLevel> {
    let mut mips = vec![base];
    loop {
        let prev = mips.last().expect("chain is never empty");
        if prev.width == 1 && prev.height == 1 {
            break;
        }
        let width = (prev.width / 2).max(1);
        let height = (prev.height / 2).max(1);
        let mut texels = Vec::with_capacity((width * height) as usize);

        for y in 0..height {
            for x in 0..width {
                let x0 = (x * 2).min(prev.width - 1);
                let x1 = (x * 2 + 1).min(prev.width - 1);
                let y0 = (y * 2).min(prev.height - 1);
                let y1 = (y * 2 + 1).min(prev.height - 1);
                let sum = prev.texel(x0, y0)
                    + prev.texel(x1, y0)
                    + prev.texel(x0, y1)
                    + prev.texel(x1, y1);
                texels.push(sum * 0.25);
            }
        }

        mips.push(MipLevel {
            width,
            height,
            texels,
        });
    }
    mips
}
