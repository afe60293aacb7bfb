use glam::{Vec3, Vec4};
use lucite::errors::LuciteError;
use lucite::renderer::{InitState, Renderer};
use lucite::resources::primitives::{create_sphere, SphereOptions};
use lucite::resources::{
    builtin_presets, find_preset, Geometry, Mesh, MeshMaterial, SharedMaterialParams,
    TextureCache,
};

const BACKGROUND: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

fn normalized_sphere_mesh() -> Mesh {
    let mut geometry = create_sphere(&SphereOptions::default());
    geometry.center_and_normalize();
    Mesh::new("crystal", geometry)
}

fn ready_renderer(width: u32, height: u32) -> Renderer {
    let mut renderer = Renderer::new(width, height, SharedMaterialParams::default());
    renderer.init().unwrap();
    renderer
}

#[test]
fn renderer_rejects_work_before_init() {
    let mut renderer = Renderer::new(64, 48, SharedMaterialParams::default());
    assert_eq!(renderer.state(), InitState::Uninitialized);

    let mut mesh = normalized_sphere_mesh();
    assert!(matches!(
        renderer.render_frame(std::slice::from_ref(&mesh)),
        Err(LuciteError::RendererNotReady(_))
    ));

    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);
    let preset = find_preset(&presets, "potato").unwrap();
    assert!(matches!(
        renderer.bake_mesh(&mut mesh, preset),
        Err(LuciteError::RendererNotReady(_))
    ));
}

#[test]
fn init_is_idempotent() {
    let mut renderer = ready_renderer(32, 32);
    assert_eq!(renderer.state(), InitState::Ready);
    renderer.init().unwrap();
    assert_eq!(renderer.state(), InitState::Ready);
}

#[test]
fn overview_material_renders_flat_gray() {
    let mut renderer = ready_renderer(64, 64);
    let mesh = normalized_sphere_mesh();
    assert!(matches!(mesh.material, MeshMaterial::Overview));

    let frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();

    // The sphere covers the frame center; overview shading caps at 0.7
    let center = frame.texel(32, 32);
    assert_ne!(center, BACKGROUND);
    assert!((center.x - 0.7).abs() < 1e-3);
    assert_eq!(center.x, center.y);
    assert_eq!(center.y, center.z);

    // Corners stay background
    assert_eq!(frame.texel(0, 0), BACKGROUND);
}

#[test]
fn baked_mesh_renders_the_subsurface_material() {
    let mut renderer = ready_renderer(64, 64);
    let mut mesh = normalized_sphere_mesh();

    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);
    renderer
        .bake_mesh(&mut mesh, find_preset(&presets, "stone nm").unwrap())
        .unwrap();
    assert!(matches!(mesh.material, MeshMaterial::Subsurface(_)));

    let frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();
    let center = frame.texel(32, 32);
    assert_ne!(center, BACKGROUND);
    assert!(center.is_finite());

    // The noise basecolor through the triplanar path is not flat gray
    let off_center = frame.texel(28, 36);
    assert_ne!(center.truncate(), off_center.truncate());
}

#[test]
fn emissive_preset_fills_the_emissive_plane() {
    let mut renderer = ready_renderer(64, 64);
    let mut mesh = normalized_sphere_mesh();

    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);
    renderer
        .bake_mesh(&mut mesh, find_preset(&presets, "emissive").unwrap())
        .unwrap();

    let frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();
    let glow = frame.emissive_texel(32, 32);
    assert!(glow.truncate().length() > 0.0, "center glow missing: {glow:?}");

    // Non-emissive presets leave the plane black
    renderer
        .bake_mesh(&mut mesh, find_preset(&presets, "stone").unwrap())
        .unwrap();
    let frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();
    assert_eq!(frame.emissive_texel(32, 32), BACKGROUND);
}

#[test]
fn culling_ignores_index_winding() {
    let mut renderer = ready_renderer(64, 64);
    let mesh = normalized_sphere_mesh();

    // Same sphere with every triangle's winding reversed: the cull keys
    // off the authored vertex normals, so the frames must be identical
    let mut indices = mesh.geometry.indices().to_vec();
    for tri in indices.chunks_exact_mut(3) {
        tri.swap(1, 2);
    }
    let reversed = Mesh::new(
        "reversed",
        Geometry::new(
            "reversed",
            mesh.geometry.positions().to_vec(),
            mesh.geometry.normals().to_vec(),
            mesh.geometry.uvs().to_vec(),
            indices,
        ),
    );

    let forward_frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();
    let reversed_frame = renderer
        .render_frame(std::slice::from_ref(&reversed))
        .unwrap();

    // A winding-dependent cull would discard every front face here and
    // leave the reversed frame empty
    let covered = |frame: &lucite::Frame| {
        frame.texels().iter().filter(|t| **t != BACKGROUND).count()
    };
    let forward_covered = covered(&forward_frame);
    let reversed_covered = covered(&reversed_frame);
    assert!(forward_covered > 0);
    assert!(
        forward_covered.abs_diff(reversed_covered) <= 16,
        "coverage diverged: {forward_covered} vs {reversed_covered}"
    );

    // Interior shading agrees; only exact triangle-boundary pixels may
    // round differently between the two index orders
    for (x, y) in [(32, 32), (26, 32), (32, 38), (38, 28)] {
        let f = forward_frame.texel(x, y);
        let r = reversed_frame.texel(x, y);
        assert!(
            (f - r).length() < 1e-4,
            "texel ({x}, {y}) diverged: {f:?} vs {r:?}"
        );
    }
}

#[test]
fn invisible_meshes_are_skipped() {
    let mut renderer = ready_renderer(32, 32);
    let mut mesh = normalized_sphere_mesh();
    mesh.visible = false;

    let frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();
    assert!(frame.texels().iter().all(|t| *t == BACKGROUND));
}

#[test]
fn shared_param_updates_apply_to_the_next_frame() {
    let params = SharedMaterialParams::default();
    let mut renderer = Renderer::new(64, 64, params.clone());
    renderer.init().unwrap();

    let mut mesh = normalized_sphere_mesh();
    let mut cache = TextureCache::new();
    let presets = builtin_presets(&mut cache);
    renderer
        .bake_mesh(&mut mesh, find_preset(&presets, "stone").unwrap())
        .unwrap();

    let meshes = [mesh];
    let before = renderer.render_frame(&meshes).unwrap();

    // Pushing the medium color far off must change the rendered body;
    // probe off-center where transmission has not saturated and the
    // medium color still contributes
    params.update(|p| p.medium_color = Vec3::new(0.0, 1.0, 0.0));
    let after = renderer.render_frame(&meshes).unwrap();

    assert_ne!(before.texel(22, 32), after.texel(22, 32));
}

#[test]
fn rgba8_export_matches_frame_dimensions() {
    let mut renderer = ready_renderer(48, 32);
    let mesh = normalized_sphere_mesh();
    let frame = renderer.render_frame(std::slice::from_ref(&mesh)).unwrap();

    assert_eq!(frame.width(), 48);
    assert_eq!(frame.height(), 32);
    assert_eq!(frame.to_rgba8().len(), 48 * 32 * 4);
    assert_eq!(frame.composite_rgba8().len(), 48 * 32 * 4);
}
