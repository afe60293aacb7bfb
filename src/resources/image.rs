use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::errors::{LuciteError, Result};

// Global Image ID generator (u64 for cheap map lookups)
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Color space tag carried by decoded pixel data.
///
/// Must be set before the image is wrapped into a [`crate::Texture`]: the
/// texture linearizes sRGB data exactly once, when its mip chain is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Linear,
    Srgb,
}

/// Decoded RGBA8 pixel data plus the metadata the sampling path needs.
///
/// This is the hand-off format from the asset pipeline (file I/O and
/// format decoding are external collaborators): width, height, tightly
/// packed RGBA bytes, and a color space tag.
#[derive(Debug, Clone)]
pub struct Image {
    pub id: u64,
    pub uuid: Uuid,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(
        name: &str,
        width: u32,
        height: u32,
        color_space: ColorSpace,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LuciteError::ImageData(format!(
                "'{name}': image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(LuciteError::ImageData(format!(
                "'{name}': expected {expected} bytes for {width}x{height} RGBA, got {}",
                data.len()
            )));
        }
        Ok(Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            width,
            height,
            color_space,
            data,
        })
    }

    /// Reads one texel as raw (non-linearized) RGBA in [0, 1].
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        let texels: &[[u8; 4]] = bytemuck::cast_slice(&self.data);
        let [r, g, b, a] = texels[(y * self.width + x) as usize];
        [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        ]
    }

    // ========================================================================
    // Procedural sources
    // ========================================================================
    //
    // The shipped texture presets are backed by procedurally generated
    // stand-ins so the pipeline is exercisable without asset files. Real
    // deployments replace these with decoded basecolor/normal/emissive maps.

    /// A two-color checkerboard, sRGB.
    #[must_use]
    pub fn checkerboard(name: &str, width: u32, height: u32, check_size: u32) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        let color_a = [225u8, 218, 209, 255];
        let color_b = [96u8, 88, 82, 255];

        for y in 0..height {
            for x in 0..width {
                let is_a = (x / check_size + y / check_size) % 2 == 0;
                data.extend_from_slice(if is_a { &color_a } else { &color_b });
            }
        }

        Self::new(name, width, height, ColorSpace::Srgb, data)
            .expect("checkerboard dimensions are consistent")
    }

    /// Hash-based value noise remapped between two colors, sRGB. Used as a
    /// stand-in for the stone/tree/marble basecolor maps.
    #[must_use]
    pub fn value_noise(name: &str, size: u32, cell: u32, low: [u8; 3], high: [u8; 3]) -> Self {
        let cells = (size / cell).max(1);
        let lattice = |cx: u32, cy: u32| -> f32 {
            // Wrap the lattice so the image tiles seamlessly
            let h = hash2(cx % cells, cy % cells);
            (h & 0xffff) as f32 / 65535.0
        };

        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let fx = x as f32 / cell as f32;
                let fy = y as f32 / cell as f32;
                let (cx, cy) = (fx.floor() as u32, fy.floor() as u32);
                let (tx, ty) = (smoothstep(fx.fract()), smoothstep(fy.fract()));

                let v00 = lattice(cx, cy);
                let v10 = lattice(cx + 1, cy);
                let v01 = lattice(cx, cy + 1);
                let v11 = lattice(cx + 1, cy + 1);
                let v = lerp(lerp(v00, v10, tx), lerp(v01, v11, tx), ty);

                for ch in 0..3 {
                    let c = lerp(f32::from(low[ch]), f32::from(high[ch]), v);
                    data.push(c.round() as u8);
                }
                data.push(255);
            }
        }

        Self::new(name, size, size, ColorSpace::Srgb, data)
            .expect("noise dimensions are consistent")
    }

    /// A tangent-space normal map with a repeating bump pattern, linear.
    /// RGB encodes the direction as `(n + 1) / 2`.
    #[must_use]
    pub fn bump_normal_map(name: &str, size: u32, bumps: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let freq = bumps as f32 * std::f32::consts::TAU / size as f32;

        for y in 0..size {
            for x in 0..size {
                // Height field h = sin(fx)*sin(fy); normal from its gradient
                let (fx, fy) = (x as f32 * freq, y as f32 * freq);
                let dx = -0.6 * fx.cos() * fy.sin();
                let dy = -0.6 * fx.sin() * fy.cos();
                let inv_len = 1.0 / (dx * dx + dy * dy + 1.0).sqrt();
                let n = [dx * inv_len, dy * inv_len, inv_len];

                for c in n {
                    data.push(((c * 0.5 + 0.5) * 255.0).round() as u8);
                }
                data.push(255);
            }
        }

        Self::new(name, size, size, ColorSpace::Linear, data)
            .expect("normal map dimensions are consistent")
    }
}

fn hash2(x: u32, y: u32) -> u32 {
    let mut h = x.wrapping_mul(0x9e37_79b9) ^ y.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^ (h >> 16)
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
