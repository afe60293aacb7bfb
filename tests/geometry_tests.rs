use glam::Vec3;
use lucite::errors::LuciteError;
use lucite::resources::primitives::{create_box, create_sphere, SphereOptions};
use lucite::resources::Geometry;

fn assert_vec3_near(a: Vec3, b: Vec3, eps: f32) {
    assert!(
        (a - b).length() < eps,
        "vectors differ: {a:?} vs {b:?} (eps {eps})"
    );
}

#[test]
fn sphere_primitive_is_well_formed() {
    let geometry = create_sphere(&SphereOptions::default());
    assert!(geometry.vertex_count() > 0);
    assert!(geometry.triangle_count() > 0);
    assert_eq!(geometry.normals().len(), geometry.vertex_count());
    assert_eq!(geometry.uvs().len(), geometry.vertex_count());
    geometry.validate_for_bake().unwrap();
}

#[test]
fn center_and_normalize_targets_working_size() {
    let source = create_box(4.0, 1.0, 2.0);
    // Shift away from origin to prove recentering happens
    let positions: Vec<Vec3> = source
        .positions()
        .iter()
        .map(|p| *p + Vec3::splat(10.0))
        .collect();
    let mut geometry = Geometry::new(
        "offset box",
        positions,
        source.normals().to_vec(),
        source.uvs().to_vec(),
        source.indices().to_vec(),
    );

    geometry.center_and_normalize();
    let bbox = geometry.bounding_box().unwrap();
    assert_vec3_near(bbox.center(), Vec3::ZERO, 1e-5);
    assert!((bbox.size().length() - 1.8).abs() < 1e-4);
}

#[test]
fn sphere_normals_point_outward() {
    let mut geometry = create_sphere(&SphereOptions::default());
    geometry.compute_vertex_normals();

    for (p, n) in geometry.positions().iter().zip(geometry.normals()) {
        if p.length() < 1e-3 {
            continue;
        }
        // Smooth normals on a sphere approximate the radial direction.
        // Pole vertices are shared across degenerate triangles, so allow
        // some slack there.
        assert!(
            n.dot(p.normalize()) > 0.7,
            "normal {n:?} not outward at {p:?}"
        );
    }
}

#[test]
fn tangents_are_unit_orthogonal_and_signed() {
    let mut geometry = create_sphere(&SphereOptions::default());
    geometry.compute_tangents();

    let tangents = geometry.tangents().unwrap();
    assert_eq!(tangents.len(), geometry.vertex_count());

    for (n, t) in geometry.normals().iter().zip(tangents) {
        let dir = t.truncate();
        assert!((dir.length() - 1.0).abs() < 1e-4, "tangent not unit: {t:?}");
        assert!(dir.dot(*n).abs() < 1e-3, "tangent not orthogonal: {t:?} vs {n:?}");
        assert!(t.w == 1.0 || t.w == -1.0, "handedness must be a sign: {}", t.w);
    }
}

#[test]
fn compute_tangents_is_idempotent() {
    let mut geometry = create_sphere(&SphereOptions::default());
    geometry.compute_tangents();
    let first = geometry.tangents().unwrap().to_vec();
    geometry.compute_tangents();
    assert_eq!(first, geometry.tangents().unwrap());
}

#[test]
fn validation_rejects_missing_attributes() {
    let empty = Geometry::new("empty", Vec::new(), Vec::new(), Vec::new(), Vec::new());
    assert!(matches!(
        empty.validate_for_bake(),
        Err(LuciteError::MissingAttribute { attribute: "position", .. })
    ));

    let sphere = create_sphere(&SphereOptions::default());
    let no_uvs = Geometry::new(
        "no uvs",
        sphere.positions().to_vec(),
        sphere.normals().to_vec(),
        Vec::new(),
        sphere.indices().to_vec(),
    );
    assert!(matches!(
        no_uvs.validate_for_bake(),
        Err(LuciteError::MissingAttribute { attribute: "uv", .. })
    ));

    let no_triangles = Geometry::new(
        "no triangles",
        sphere.positions().to_vec(),
        sphere.normals().to_vec(),
        sphere.uvs().to_vec(),
        Vec::new(),
    );
    assert!(matches!(
        no_triangles.validate_for_bake(),
        Err(LuciteError::EmptyGeometry(_))
    ));
}
