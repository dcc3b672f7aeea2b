// Tests for scene assembly, label picking, meshes and the dot backdrop.

use glam::Vec3;
use ripple_core::constants::{GHOST_OPACITY, GRID_ALPHA_MAX};
use ripple_core::grid::{dot_alpha, DotGrid};
use ripple_core::mesh::{ghost_scale, shape_mesh};
use ripple_core::scene::{object_pick_spheres, pick_label, Drawable};
use ripple_core::{build_scene, CameraPose, GhostPreview, Ripple, RippleId, RippleKind, Shape};

fn text(id: &str, at: Vec3) -> Ripple {
    Ripple {
        id: RippleId::new(id),
        kind: RippleKind::Text {
            text: format!("ripple {id}"),
        },
        position: at,
        rotation: Vec3::ZERO,
        created_at: None,
    }
}

fn object(id: &str, at: Vec3) -> Ripple {
    Ripple {
        id: RippleId::new(id),
        kind: RippleKind::Object {
            shape: Shape::Cone,
            color: "red".into(),
        },
        position: at,
        rotation: Vec3::ZERO,
        created_at: None,
    }
}

fn camera() -> CameraPose {
    CameraPose::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
}

#[test]
fn one_item_per_ripple_without_ghost_or_grid() {
    let ripples = [text("a", Vec3::ZERO), object("b", Vec3::X)];
    let frame = build_scene(&ripples, &GhostPreview::default(), &camera(), None);
    assert_eq!(frame.items.len(), 2);
    assert_eq!(frame.meshes().count(), 1);
    assert_eq!(frame.labels().count(), 1);
    assert!(frame.dots.is_empty());
    let Drawable::Mesh { color, opacity, .. } = &frame.meshes().next().unwrap().drawable else {
        unreachable!()
    };
    assert_eq!(*color, [1.0, 0.0, 0.0]);
    assert_eq!(*opacity, 1.0);
}

#[test]
fn unrotated_labels_face_the_camera() {
    let ripples = [text("a", Vec3::new(2.0, 1.0, 0.0))];
    let cam = camera();
    let frame = build_scene(&ripples, &GhostPreview::default(), &cam, None);
    let item = &frame.items[0];
    let facing = item.orientation * Vec3::NEG_Z;
    let to_camera = (cam.position - item.position).normalize();
    assert!((facing - to_camera).length() < 1e-4);
}

#[test]
fn visible_ghost_adds_mesh_and_caption() {
    let ghost = GhostPreview {
        visible: true,
        text: "draft".into(),
        shape: Shape::Sphere,
        ..Default::default()
    };
    let frame = build_scene(&[], &ghost, &camera(), None);
    assert_eq!(frame.items.len(), 2);
    assert!(frame.items.iter().all(|i| i.id.is_none()));
    let Drawable::Mesh { opacity, scale, .. } = &frame.meshes().next().unwrap().drawable else {
        unreachable!()
    };
    assert_eq!(*opacity, GHOST_OPACITY);
    assert_eq!(*scale, ghost_scale(Shape::Sphere));
}

#[test]
fn ghost_without_text_has_no_caption() {
    let ghost = GhostPreview {
        visible: true,
        ..Default::default()
    };
    let frame = build_scene(&[], &ghost, &camera(), None);
    assert_eq!(frame.items.len(), 1);
}

#[test]
fn grid_dots_fade_with_distance() {
    let grid = DotGrid::new(10.0, 5.0);
    assert_eq!(grid.len(), 125);
    let frame = build_scene(&[], &GhostPreview::default(), &camera(), Some(&grid));
    assert_eq!(frame.dots.len(), 125);
    let near = frame
        .dots
        .iter()
        .find(|d| d.position == Vec3::new(0.0, 0.0, 10.0))
        .unwrap();
    let far = frame
        .dots
        .iter()
        .find(|d| d.position == Vec3::new(0.0, 0.0, -10.0))
        .unwrap();
    assert!(near.alpha > far.alpha);
    assert!(near.gray > far.gray);
}

#[test]
fn dot_alpha_bounds() {
    assert_eq!(dot_alpha(0.0, 40.0), GRID_ALPHA_MAX);
    assert_eq!(dot_alpha(1_000.0, 40.0), 0.0);
    assert!(DotGrid::new(0.0, 5.0).is_empty());
    assert!(DotGrid::new(10.0, 0.0).is_empty());
}

#[test]
fn pick_spheres_cover_objects_only() {
    let ripples = [text("a", Vec3::ZERO), object("b", Vec3::X)];
    let spheres = object_pick_spheres(&ripples);
    assert_eq!(spheres.len(), 1);
    assert_eq!(spheres[0].center, Vec3::X);
}

#[test]
fn clicking_a_label_picks_it() {
    let ripples = [text("a", Vec3::ZERO), text("b", Vec3::new(5.0, 0.0, 0.0))];
    let picked = pick_label(&ripples, Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
    assert_eq!(picked, Some(RippleId::new("a")));
}

#[test]
fn object_in_front_blocks_the_label() {
    let ripples = [text("a", Vec3::ZERO), object("b", Vec3::new(0.0, 0.0, 3.0))];
    assert_eq!(
        pick_label(&ripples, Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z),
        None
    );
}

#[test]
fn empty_space_picks_nothing() {
    let ripples = [text("a", Vec3::ZERO)];
    assert_eq!(pick_label(&ripples, Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z), None);
}

#[test]
fn meshes_have_valid_triangles() {
    for shape in Shape::ALL {
        let mesh = shape_mesh(shape);
        assert!(!mesh.indices.is_empty(), "{:?}", shape);
        assert_eq!(mesh.indices.len() % 3, 0, "{:?}", shape);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n), "{:?}", shape);
    }
}

#[test]
fn mesh_sizes() {
    let r = |s| shape_mesh(s).bounding_radius();
    assert!((r(Shape::Box) - 0.75f32.sqrt()).abs() < 1e-4);
    assert!((r(Shape::Sphere) - 0.75).abs() < 1e-4);
    assert!((r(Shape::Cone) - (0.7f32.powi(2) + 0.6f32.powi(2)).sqrt()).abs() < 1e-4);
    assert!((r(Shape::Torus) - 0.7).abs() < 1e-3);
}
