use glam::Vec3;
use lucite::errors::LuciteError;
use lucite::resources::{ColorSpace, Image, Texture, WrapMode};
use lucite::shading::triplanar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn solid_texture(rgba: [u8; 4]) -> Texture {
    let image = Image::new("solid", 1, 1, ColorSpace::Linear, rgba.to_vec()).unwrap();
    Texture::new(&image, WrapMode::Repeat)
}

fn random_unit(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
        );
        let len = v.length();
        if len > 1e-3 && len <= 1.0 {
            return v / len;
        }
    }
}

#[test]
fn zero_sized_images_are_rejected() {
    // The image constructor is the validation gate for decoded assets; a
    // zero dimension must fail there, not panic later in mip generation
    assert!(matches!(
        Image::new("empty", 0, 0, ColorSpace::Linear, Vec::new()),
        Err(LuciteError::ImageData(_))
    ));
    assert!(matches!(
        Image::new("flat", 4, 0, ColorSpace::Linear, Vec::new()),
        Err(LuciteError::ImageData(_))
    ));
    assert!(matches!(
        Image::new("thin", 0, 4, ColorSpace::Linear, Vec::new()),
        Err(LuciteError::ImageData(_))
    ));
}

#[test]
fn mip_chains_extend_down_to_one_texel() {
    // 8x4 -> 4x2 -> 2x1 -> 1x1
    let wide = Image::new("wide", 8, 4, ColorSpace::Linear, vec![0; 8 * 4 * 4]).unwrap();
    assert_eq!(Texture::new(&wide, WrapMode::Repeat).mip_count(), 4);

    // log2(256) + 1 levels for a square chain
    let square =
        Image::new("square", 256, 256, ColorSpace::Linear, vec![0; 256 * 256 * 4]).unwrap();
    assert_eq!(Texture::new(&square, WrapMode::Repeat).mip_count(), 9);
}

#[test]
fn blend_weights_are_a_partition_of_unity() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let n = random_unit(&mut rng);
        let w = triplanar::blend_weights(n);
        assert!(w.x >= 0.0 && w.y >= 0.0 && w.z >= 0.0);
        assert!(
            (w.x + w.y + w.z - 1.0).abs() < 1e-5,
            "weights {w:?} for normal {n:?} do not sum to 1"
        );
    }
}

#[test]
fn axis_aligned_normal_selects_a_single_projection() {
    assert_eq!(triplanar::blend_weights(Vec3::X), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(triplanar::blend_weights(Vec3::NEG_Y), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(triplanar::blend_weights(Vec3::Z), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn constant_texture_projects_to_its_color_everywhere() {
    let texture = solid_texture([255, 0, 0, 255]);
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..100 {
        let n = random_unit(&mut rng);
        let p = random_unit(&mut rng) * rng.gen_range(0.0f32..5.0);
        let mip = rng.gen_range(0.0f32..8.0);
        let c = triplanar::project(&texture, p, n, mip, 4.0);
        assert!((c.x - 1.0).abs() < 1e-5, "red channel drifted: {c:?}");
        assert!(c.y.abs() < 1e-5 && c.z.abs() < 1e-5);
        assert!((c.w - 1.0).abs() < 1e-5);
    }
}

#[test]
fn z_normal_ignores_the_z_coordinate() {
    // A gradient along image X: with a Z-facing normal the UVs come from
    // the position's XY plane, so moving along Z must not change the
    // sample.
    let size = 8u32;
    let mut data = Vec::new();
    for _y in 0..size {
        for x in 0..size {
            let v = (x * 255 / (size - 1)) as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let image = Image::new("gradient", size, size, ColorSpace::Linear, data).unwrap();
    let texture = Texture::new(&image, WrapMode::Repeat);

    let p = Vec3::new(0.3, 0.6, 0.0);
    let reference = triplanar::project(&texture, p, Vec3::Z, 0.0, 1.0);
    for z in [-2.0f32, -0.5, 0.25, 1.75] {
        let c = triplanar::project(&texture, Vec3::new(0.3, 0.6, z), Vec3::Z, 0.0, 1.0);
        assert!(
            (c - reference).length() < 1e-6,
            "Z movement changed a Z-projected sample: {c:?} vs {reference:?}"
        );
    }
}

#[test]
fn scale_controls_tiling_frequency() {
    // With wrap repeat, scaling the position by the texture's period in UV
    // space lands on the same texel.
    let size = 8u32;
    let mut data = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let image = Image::new("checks", size, size, ColorSpace::Linear, data).unwrap();
    let texture = Texture::new(&image, WrapMode::Repeat);

    let p = Vec3::new(0.13, 0.42, 0.0);
    let a = triplanar::project(&texture, p, Vec3::Z, 0.0, 2.0);
    let b = triplanar::project(&texture, p + Vec3::new(0.5, 0.0, 0.0), Vec3::Z, 0.0, 2.0);
    // One full UV period at scale 2 is a 0.5 world-space step
    assert!((a - b).length() < 1e-5);
}
