// Host-side tests for pointer normalisation and damping.

use glam::Vec2;
use hero_core::*;

fn tracker() -> PointerTracker {
    PointerTracker::new(0.05, 0.03, 0.3)
}

fn rect() -> ViewportRect {
    ViewportRect::new(100.0, 50.0, 400.0, 200.0)
}

#[test]
fn maps_client_coordinates_with_bottom_left_origin() {
    let mut t = tracker();
    let top_left = t.on_pointer_move(100.0, 50.0, rect()).unwrap();
    assert_eq!(top_left.uv, Vec2::new(0.0, 1.0));
    let bottom_right = t.on_pointer_move(500.0, 250.0, rect()).unwrap();
    assert_eq!(bottom_right.uv, Vec2::new(1.0, 0.0));
    let centre = t.on_pointer_move(300.0, 150.0, rect()).unwrap();
    assert_eq!(centre.uv, Vec2::splat(0.5));
    assert_eq!(centre.target_rotation, Vec2::ZERO);
}

#[test]
fn samples_outside_the_surface_are_clamped() {
    let mut t = tracker();
    let p = t.on_pointer_move(-1000.0, 5000.0, rect()).unwrap();
    assert_eq!(p.uv, Vec2::new(0.0, 0.0));
}

#[test]
fn target_rotation_is_proportional_and_clamped() {
    let mut t = PointerTracker::new(0.05, 0.03, 0.2);
    // Right edge, vertical centre: ry = 0.5 * 0.6 = 0.3, clamped to 0.2.
    let p = t.on_pointer_move(500.0, 150.0, rect()).unwrap();
    assert!((p.target_rotation.y - 0.2).abs() < 1e-6);
    assert!(p.target_rotation.x.abs() < 1e-6);
    // Quarter from the top: rx = (0.25 - 0.5) * -0.6 = 0.15.
    let p = t.on_pointer_move(300.0, 100.0, rect()).unwrap();
    assert!((p.target_rotation.x - 0.15).abs() < 1e-6);
    assert!(p.target_rotation.y.abs() < 1e-6);
}

#[test]
fn zero_area_rect_holds_last_sample() {
    let mut t = tracker();
    t.on_pointer_move(200.0, 100.0, rect()).unwrap();
    let before = t.raw();
    assert!(t
        .on_pointer_move(10.0, 10.0, ViewportRect::new(0.0, 0.0, 0.0, 300.0))
        .is_none());
    assert_eq!(t.raw(), before);
}

#[test]
fn latest_sample_wins() {
    let mut t = tracker();
    for x in [120.0, 180.0, 420.0, 260.0] {
        t.on_pointer_move(x, 150.0, rect());
    }
    assert!((t.raw().x - 0.4).abs() < 1e-6);
    // Nothing moves until a tick.
    assert_eq!(t.smoothed(), Vec2::splat(0.5));
}

#[test]
fn smoothed_pointer_never_snaps() {
    let mut t = tracker();
    t.on_pointer_move(500.0, 250.0, rect());
    t.tick();
    let s = t.smoothed();
    assert!((s.x - 0.525).abs() < 1e-6);
    assert!((s.y - 0.475).abs() < 1e-6);
}

#[test]
fn damping_converges_within_predicted_ticks() {
    for f in [0.03f32, 0.04, 0.05] {
        let mut t = PointerTracker::new(f, 0.03, 0.3);
        t.on_pointer_move(500.0, 250.0, rect());
        let raw = t.raw();
        let gap0 = (raw - t.smoothed()).length();
        let k = damping_ticks(f);
        for _ in 0..k {
            t.tick();
        }
        let gap = (raw - t.smoothed()).length();
        assert!(gap <= gap0 * 0.01 + 1e-6, "f={f} k={k} gap={gap}");
    }
    assert_eq!(damping_ticks(0.05), 90);
}

#[test]
fn rotation_lags_toward_target() {
    let mut t = tracker();
    let initial = t.rotation();
    assert_eq!(initial, Vec2::new(-0.15, 0.25));
    let target = t.on_pointer_move(100.0, 150.0, rect()).unwrap().target_rotation;
    t.tick();
    let r = t.rotation();
    let expected = initial + (target - initial) * 0.03;
    assert!((r - expected).length() < 1e-6);
    for _ in 0..500 {
        t.tick();
    }
    assert!((t.rotation() - target).length() < 1e-4);
}

#[test]
fn tracker_is_the_pointer_writer() {
    let mut store = UniformStore::new(0.25, 0.6, Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 1.0, 1.0));
    assert_eq!(store.snapshot().pointer, Vec2::splat(0.5));
    let mut t = tracker();
    t.on_pointer_move(100.0, 250.0, rect());
    t.tick();
    t.write_pointer(&mut store);
    assert_eq!(store.snapshot().pointer, t.smoothed());
}
