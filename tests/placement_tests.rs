// Tests for the three placement strategies and ray picking.

use glam::{Quat, Vec2, Vec3};
use ripple_core::camera::{CameraPose, Lens};
use ripple_core::constants::PLACEMENT_DISTANCE;
use ripple_core::placement::{
    camera_offset, ray_ground, ray_sphere, raycast, HitTarget, Orientation, PickSphere,
};
use ripple_core::{Placer, PlacementStrategy};

fn lens() -> Lens {
    Lens {
        fovy_radians: 60f32.to_radians(),
        aspect: 1.0,
        znear: 0.1,
        zfar: 1000.0,
    }
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-2
}

#[test]
fn camera_offset_is_ahead_of_the_camera() {
    let pose = CameraPose::default();
    assert!(approx(camera_offset(&pose, 5.0), Vec3::new(0.0, 0.0, -5.0)));
}

#[test]
fn offset_strategy_places_with_zero_rotation() {
    let placer = Placer::new(PlacementStrategy::CameraOffset {
        distance: PLACEMENT_DISTANCE,
        orientation: Orientation::Zero,
    });
    let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
    let p = placer.place(&pose);
    assert!(approx(p.position, Vec3::new(1.0, 2.0, 3.0 - PLACEMENT_DISTANCE)));
    assert_eq!(p.rotation, Vec3::ZERO);
}

#[test]
fn snapshot_orientation_freezes_camera_rotation() {
    let placer = Placer::new(PlacementStrategy::CameraOffset {
        distance: 2.0,
        orientation: Orientation::CameraSnapshot,
    });
    let pose = CameraPose::new(Vec3::ZERO, Quat::from_rotation_y(0.5));
    let p = placer.place(&pose);
    assert!((p.rotation.y - 0.5).abs() < 1e-4);
    assert!(p.rotation.x.abs() < 1e-4);
}

#[test]
fn ray_hits_sphere_in_front() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!((t.unwrap() - 3.0).abs() < 1e-5);
}

#[test]
fn ray_misses_sphere_behind() {
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
}

#[test]
fn ray_ground_requires_downward_ray() {
    let origin = Vec3::new(0.0, 4.0, 0.0);
    assert_eq!(ray_ground(origin, Vec3::NEG_Y, 0.0), Some(4.0));
    assert!(ray_ground(origin, Vec3::Y, 0.0).is_none());
    assert!(ray_ground(origin, Vec3::X, 0.0).is_none());
}

#[test]
fn raycast_prefers_nearest_target() {
    let origin = Vec3::new(0.0, 5.0, 0.0);
    let spheres = [PickSphere {
        center: Vec3::new(0.0, 1.0, 0.0),
        radius: 0.5,
    }];
    let hit = raycast(origin, Vec3::NEG_Y, &spheres).unwrap();
    assert_eq!(hit.target, HitTarget::Mesh(0));
    assert!(approx(hit.point, Vec3::new(0.0, 1.5, 0.0)));

    let hit = raycast(origin, Vec3::NEG_Y, &[]).unwrap();
    assert_eq!(hit.target, HitTarget::Ground);
    assert!(approx(hit.point, Vec3::ZERO));
}

#[test]
fn raycast_click_anchors_the_next_submit() {
    let mut placer = Placer::new(PlacementStrategy::Raycast { distance: 5.0 });
    let pose = CameraPose::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let hit = placer.click(&pose, &lens(), Vec2::ZERO, &[]).unwrap();
    assert_eq!(hit.target, HitTarget::Ground);
    assert!(approx(hit.point, Vec3::ZERO));
    assert_eq!(placer.anchor(), Some(hit.point));

    // Anchor sticks even after the camera moves.
    let moved = CameraPose::looking_at(Vec3::new(10.0, 5.0, 0.0), Vec3::ZERO);
    assert!(approx(placer.place(&moved).position, Vec3::ZERO));
}

#[test]
fn raycast_miss_falls_back_to_camera_offset() {
    let mut placer = Placer::new(PlacementStrategy::Raycast { distance: 5.0 });
    let ground = CameraPose::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    placer.click(&ground, &lens(), Vec2::ZERO, &[]);
    assert!(placer.anchor().is_some());

    let sky = CameraPose::looking_at(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 10.0, -10.0));
    assert!(placer.click(&sky, &lens(), Vec2::ZERO, &[]).is_none());
    assert!(placer.anchor().is_none());
    assert!(approx(placer.place(&sky).position, camera_offset(&sky, 5.0)));
}

#[test]
fn raycast_without_click_uses_camera_offset() {
    let placer = Placer::new(PlacementStrategy::Raycast { distance: 3.0 });
    let pose = CameraPose::default();
    assert!(approx(placer.place(&pose).position, Vec3::new(0.0, 0.0, -3.0)));
}

#[test]
fn ghost_strategy_places_at_the_tracked_ghost() {
    let mut placer = Placer::new(PlacementStrategy::Ghost { distance: 5.0 });
    let pose = CameraPose::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    placer.frame(&pose);
    assert!(approx(placer.ghost.position, Vec3::new(0.0, 0.0, 5.0)));
    let p = placer.place(&pose);
    assert_eq!(p.position, placer.ghost.position);
    assert_eq!(p.rotation, Vec3::ZERO);
}

#[test]
fn ghost_faces_the_viewer() {
    let mut placer = Placer::new(PlacementStrategy::default());
    let pose = CameraPose::looking_at(Vec3::new(3.0, 2.0, 8.0), Vec3::ZERO);
    placer.frame(&pose);
    let facing = placer.ghost.orientation * Vec3::NEG_Z;
    let to_camera = (pose.position - placer.ghost.position).normalize();
    assert!(approx(facing, to_camera));
}

#[test]
fn non_ghost_strategies_do_not_track() {
    let mut placer = Placer::new(PlacementStrategy::Raycast { distance: 5.0 });
    placer.frame(&CameraPose::new(Vec3::new(9.0, 9.0, 9.0), Quat::IDENTITY));
    assert_eq!(placer.ghost.position, Vec3::ZERO);
}

#[test]
fn strategy_names() {
    assert!(matches!(
        PlacementStrategy::from_name("Raycast"),
        Some(PlacementStrategy::Raycast { .. })
    ));
    assert!(matches!(
        PlacementStrategy::from_name("snapshot"),
        Some(PlacementStrategy::CameraOffset {
            orientation: Orientation::CameraSnapshot,
            ..
        })
    ));
    assert!(PlacementStrategy::from_name("teleport").is_none());
    assert!(PlacementStrategy::default().uses_ghost());
}
