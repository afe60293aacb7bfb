use glam::{Vec3, Vec4};
use half::f16;
use uuid::Uuid;

use crate::errors::{LuciteError, Result};

/// The six cube map faces, in layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace::PosX,
    CubeFace::NegX,
    CubeFace::PosY,
    CubeFace::NegY,
    CubeFace::PosZ,
    CubeFace::NegZ,
];

impl CubeFace {
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Face basis: (right, up, forward). `forward` points out of the cube
    /// center through the face; `right`/`up` span the face so that
    /// `forward + u*right + v*up` (u, v in [-1, 1]) addresses the face
    /// exactly as [`CubeTexture::sample_trilinear`] does. The capture rig
    /// uses the same basis, which keeps bake and lookup consistent by
    /// construction.
    #[must_use]
    pub fn basis(self) -> (Vec3, Vec3, Vec3) {
        match self {
            CubeFace::PosX => (Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, -1.0, 0.0), Vec3::X),
            CubeFace::NegX => (Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, -1.0, 0.0), Vec3::NEG_X),
            CubeFace::PosY => (Vec3::X, Vec3::new(0.0, 0.0, 1.0), Vec3::Y),
            CubeFace::NegY => (Vec3::X, Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Y),
            CubeFace::PosZ => (Vec3::X, Vec3::new(0.0, -1.0, 0.0), Vec3::Z),
            CubeFace::NegZ => (Vec3::NEG_X, Vec3::new(0.0, -1.0, 0.0), Vec3::NEG_Z),
        }
    }

    /// Direction through the face texel at normalized coordinates
    /// (u01, v01) in [0, 1].
    #[must_use]
    pub fn direction(self, u01: f32, v01: f32) -> Vec3 {
        let (right, up, forward) = self.basis();
        (forward + right * (u01 * 2.0 - 1.0) + up * (v01 * 2.0 - 1.0)).normalize()
    }
}

/// Maps a direction to (face, u01, v01). The direction does not need to
/// be normalized, only non-zero.
#[must_use]
pub fn face_uv(dir: Vec3) -> (CubeFace, f32, f32) {
    let a = dir.abs();
    let face = if a.x >= a.y && a.x >= a.z {
        if dir.x >= 0.0 { CubeFace::PosX } else { CubeFace::NegX }
    } else if a.y >= a.z {
        if dir.y >= 0.0 { CubeFace::PosY } else { CubeFace::NegY }
    } else if dir.z >= 0.0 {
        CubeFace::PosZ
    } else {
        CubeFace::NegZ
    };

    let (right, up, forward) = face.basis();
    let major = dir.dot(forward);
    let u = dir.dot(right) / major;
    let v = dir.dot(up) / major;
    (face, u * 0.5 + 0.5, v * 0.5 + 0.5)
}

// ============================================================================
// Cube texture
// ============================================================================

#[derive(Debug, Clone)]
struct FaceMip {
    size: u32,
    texels: Vec<[f16; 4]>,
}

impl FaceMip {
    #[inline]
    fn texel(&self, x: u32, y: u32) -> Vec4 {
        let [r, g, b, a] = self.texels[(y * self.size + x) as usize];
        Vec4::new(r.to_f32(), g.to_f32(), b.to_f32(), a.to_f32())
    }
}

/// A 6-face directional texture with RGBA half-float texels, a full mip
/// chain per face, and trilinear sampling at explicit levels.
///
/// Each mesh exclusively owns the normal/tangent pair baked for it. The
/// `uuid` is the resource identity the aliasing regression test checks:
/// two bakes must never yield the same cube map resource.
#[derive(Debug)]
pub struct CubeTexture {
    pub uuid: Uuid,
    pub name: String,
    size: u32,
    faces: [Vec<FaceMip>; 6],
}

impl CubeTexture {
    /// Builds a cube texture from six freshly rendered faces of
    /// `size * size` linear RGBA texels each, generating mipmaps down to
    /// 1x1 with a box filter.
    pub fn from_faces(name: &str, size: u32, faces: [Vec<Vec4>; 6]) -> Result<Self> {
        if size == 0 || !size.is_power_of_two() {
            return Err(LuciteError::TargetAllocation(format!(
                "cube face size must be a non-zero power of two, got {size}"
            )));
        }
        let expected = (size as usize) * (size as usize);
        for (i, face) in faces.iter().enumerate() {
            if face.len() != expected {
                return Err(LuciteError::TargetAllocation(format!(
                    "face {i} holds {} texels, expected {expected}",
                    face.len()
                )));
            }
        }

        let face_chains = faces.map(|texels| {
            let base = FaceMip {
                size,
                texels: texels
                    .into_iter()
                    .map(|v| {
                        [
                            f16::from_f32(v.x),
                            f16::from_f32(v.y),
                            f16::from_f32(v.z),
                            f16::from_f32(v.w),
                        ]
                    })
                    .collect(),
            };
            build_face_mips(base)
        });

        Ok(Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            size,
            faces: face_chains,
        })
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn mip_count(&self) -> u32 {
        self.faces[0].len() as u32
    }

    /// Bilinear sample of one face at a single mip level, clamp-to-edge.
    #[must_use]
    pub fn sample_face_level(&self, face: CubeFace, u01: f32, v01: f32, level: u32) -> Vec4 {
        let chain = &self.faces[face.index()];
        let mip = &chain[level.min(self.mip_count() - 1) as usize];
        let fsize = mip.size as f32;

        let x = u01 * fsize - 0.5;
        let y = v01 * fsize - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let clamp = |c: f32| (c.max(0.0) as u32).min(mip.size - 1);
        let xa = clamp(x0);
        let xb = clamp(x0 + 1.0);
        let ya = clamp(y0);
        let yb = clamp(y0 + 1.0);

        let top = mip.texel(xa, ya).lerp(mip.texel(xb, ya), fx);
        let bottom = mip.texel(xa, yb).lerp(mip.texel(xb, yb), fx);
        top.lerp(bottom, fy)
    }

    /// Samples along a direction at an explicit, possibly fractional mip
    /// level (trilinear: bilinear per level, linear across levels).
    #[must_use]
    pub fn sample_trilinear(&self, dir: Vec3, level: f32) -> Vec4 {
        let (face, u01, v01) = face_uv(dir);
        let max_level = (self.mip_count() - 1) as f32;
        let level = if level.is_finite() {
            level.clamp(0.0, max_level)
        } else {
            max_level
        };
        let lo = level.floor();
        let frac = level - lo;

        let c0 = self.sample_face_level(face, u01, v01, lo as u32);
        if frac <= 0.0 {
            return c0;
        }
        let c1 = self.sample_face_level(face, u01, v01, lo as u32 + 1);
        c0.lerp(c1, frac)
    }
}

fn build_face_mips(base: FaceMip) -> Vec<FaceMip> {
    let mut mips = vec![base];
    while mips.last().expect("chain is never empty").size > 1 {
        let prev = mips.last().expect("chain is never empty");
        let size = prev.size / 2;
        let mut texels = Vec::with_capacity((size * size) as usize);

        for y in 0..size {
            for x in 0..size {
                let sum = prev.texel(x * 2, y * 2)
                    + prev.texel(x * 2 + 1, y * 2)
                    + prev.texel(x * 2, y * 2 + 1)
                    + prev.texel(x * 2 + 1, y * 2 + 1);
                let avg = sum * 0.25;
                texels.push([
                    f16::from_f32(avg.x),
                    f16::from_f32(avg.y),
                    f16::from_f32(avg.z),
                    f16::from_f32(avg.w),
                ]);
            }
        }

        mips.push(FaceMip { size, texels });
    }
    mips
}
