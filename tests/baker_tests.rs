use glam::Vec3;
use lucite::errors::LuciteError;
use lucite::renderer::CubeMapBaker;
use lucite::resources::primitives::{create_box, create_sphere, SphereOptions};
use lucite::resources::{face_uv, CUBE_FACES};
use lucite::shading::resolver::sample_cube_direction;

#[test]
fn face_addressing_round_trips() {
    // The sampler's face_uv must invert the face direction used by the
    // capture rig; a mismatch would smear every baked map.
    for face in CUBE_FACES {
        for (u, v) in [(0.5, 0.5), (0.1, 0.8), (0.95, 0.05), (0.25, 0.25)] {
            let dir = face.direction(u, v);
            let (found_face, fu, fv) = face_uv(dir);
            assert_eq!(found_face, face, "direction {dir:?} landed on the wrong face");
            assert!((fu - u).abs() < 1e-5 && (fv - v).abs() < 1e-5);
        }
    }
}

fn normalized_sphere() -> lucite::resources::Geometry {
    let mut geometry = create_sphere(&SphereOptions::default());
    geometry.center_and_normalize();
    geometry
}

#[test]
fn baked_sphere_normals_match_the_radial_direction() {
    let mut geometry = normalized_sphere();
    let maps = CubeMapBaker::with_face_size(64).bake(&mut geometry).unwrap();

    for dir in [
        Vec3::X,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::new(1.0, 1.0, 0.0).normalize(),
        Vec3::new(-0.3, 0.8, 0.5).normalize(),
    ] {
        let n = sample_cube_direction(&maps.normal_cube, dir);
        // A sphere's outward normal along `dir` is `dir` itself; the bake
        // quantizes through 64px faces and f16 texels
        assert!(
            n.dot(dir) > 0.98,
            "baked normal {n:?} diverges from radial {dir:?}"
        );
    }
}

#[test]
fn baked_tangents_are_orthogonal_to_baked_normals() {
    let mut geometry = normalized_sphere();
    let maps = CubeMapBaker::with_face_size(64).bake(&mut geometry).unwrap();

    for dir in [Vec3::X, Vec3::Z, Vec3::new(0.6, 0.2, -0.4).normalize()] {
        let n = sample_cube_direction(&maps.normal_cube, dir);
        let t = sample_cube_direction(&maps.tangent_cube, dir);
        assert!(
            n.dot(t).abs() < 0.1,
            "tangent {t:?} not orthogonal to normal {n:?} along {dir:?}"
        );
    }
}

#[test]
fn baked_cube_maps_carry_full_mip_chains() {
    let mut geometry = normalized_sphere();
    let maps = CubeMapBaker::with_face_size(64).bake(&mut geometry).unwrap();

    // 64 -> 32 -> ... -> 1: log2(64) + 1 levels per face
    assert_eq!(maps.normal_cube.mip_count(), 7);
    assert_eq!(maps.tangent_cube.mip_count(), 7);
}

#[test]
fn every_bake_allocates_fresh_cube_maps() {
    let baker = CubeMapBaker::with_face_size(32);

    let mut sphere = normalized_sphere();
    let first = baker.bake(&mut sphere).unwrap();
    let second = baker.bake(&mut sphere).unwrap();

    // Same geometry, two bakes: distinct resources
    assert_ne!(first.normal_cube.uuid, second.normal_cube.uuid);
    assert_ne!(first.tangent_cube.uuid, second.tangent_cube.uuid);
}

#[test]
fn different_meshes_bake_different_maps() {
    let baker = CubeMapBaker::with_face_size(32);

    let mut sphere = normalized_sphere();
    let mut box_geometry = create_box(1.0, 1.0, 1.0);
    box_geometry.center_and_normalize();

    let sphere_maps = baker.bake(&mut sphere).unwrap();
    let box_maps = baker.bake(&mut box_geometry).unwrap();

    // Off-axis the sphere's normal follows the direction while the box
    // face keeps its flat +X normal; a shared or stale map would make
    // these agree
    let dir = Vec3::new(1.0, 0.45, 0.0).normalize();
    let sphere_normal = sample_cube_direction(&sphere_maps.normal_cube, dir);
    let box_normal = sample_cube_direction(&box_maps.normal_cube, dir);
    assert!(
        (sphere_normal - box_normal).length() > 0.2,
        "sphere {sphere_normal:?} and box {box_normal:?} should disagree along {dir:?}"
    );
    assert!(box_normal.dot(Vec3::X) > 0.9);
}

#[test]
fn bake_derives_missing_tangents_in_place() {
    let mut geometry = normalized_sphere();
    assert!(geometry.tangents().is_none());
    CubeMapBaker::with_face_size(32).bake(&mut geometry).unwrap();
    assert!(geometry.tangents().is_some());
}

#[test]
fn bake_rejects_incomplete_geometry() {
    let sphere = create_sphere(&SphereOptions::default());
    let mut no_uvs = lucite::resources::Geometry::new(
        "no uvs",
        sphere.positions().to_vec(),
        sphere.normals().to_vec(),
        Vec::new(),
        sphere.indices().to_vec(),
    );

    let result = CubeMapBaker::with_face_size(32).bake(&mut no_uvs);
    assert!(matches!(
        result,
        Err(LuciteError::MissingAttribute { attribute: "uv", .. })
    ));
}

#[test]
fn bake_rejects_bad_face_sizes() {
    let mut geometry = normalized_sphere();
    let result = CubeMapBaker::with_face_size(48).bake(&mut geometry);
    assert!(matches!(result, Err(LuciteError::TargetAllocation(_))));
}
