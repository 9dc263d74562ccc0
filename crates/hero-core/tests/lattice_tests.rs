// Host-side tests for lattice generation.

use hero_core::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn build_is_deterministic() {
    let a = GridMeshBuilder::build(80, 8.0).unwrap();
    let b = GridMeshBuilder::build(80, 8.0).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.uvs(), b.uvs());
}

#[test]
fn four_by_four_spans_expected_coordinates() {
    let lattice = GridMeshBuilder::build(4, 2.0).unwrap();
    assert_eq!(lattice.len(), 16);

    let expected_xy = [-1.0, -0.333, 0.333, 1.0];
    let expected_uv = [0.0, 0.333, 0.667, 1.0];
    for (k, (p, uv)) in lattice.iter().enumerate() {
        let i = k / 4;
        let j = k % 4;
        assert!(approx(p.x, expected_xy[i], 0.01), "x at {k}: {}", p.x);
        assert!(approx(p.y, expected_xy[j], 0.01), "y at {k}: {}", p.y);
        assert_eq!(p.z, 0.0);
        assert!(approx(uv.x, expected_uv[i], 0.01), "u at {k}: {}", uv.x);
        assert!(approx(uv.y, expected_uv[j], 0.01), "v at {k}: {}", uv.y);
    }
}

#[test]
fn lattice_is_centered_and_evenly_spaced() {
    let lattice = GridMeshBuilder::build(11, 5.0).unwrap();
    let sum = lattice
        .positions()
        .iter()
        .fold(glam::Vec3::ZERO, |acc, p| acc + *p);
    assert!(sum.length() < 1e-3);

    // Neighbouring points along the inner index differ by extent/(grid-1) in y.
    let step = 5.0 / 10.0;
    for i in 0..11 {
        for j in 0..10 {
            let a = lattice.positions()[i * 11 + j];
            let b = lattice.positions()[i * 11 + j + 1];
            assert!(approx(b.y - a.y, step, 1e-5));
            assert!(approx(b.x, a.x, 1e-6));
        }
    }
}

#[test]
fn uvs_stay_in_unit_square() {
    let lattice = GridMeshBuilder::build(33, 8.0).unwrap();
    for uv in lattice.uvs() {
        assert!((0.0..=1.0).contains(&uv.x));
        assert!((0.0..=1.0).contains(&uv.y));
    }
    assert_eq!(lattice.uvs()[0], glam::Vec2::ZERO);
    assert_eq!(*lattice.uvs().last().unwrap(), glam::Vec2::ONE);
}

#[test]
fn zero_grid_is_rejected() {
    let err = GridMeshBuilder::build(0, 8.0).unwrap_err();
    assert!(matches!(err, HeroError::InvalidConfiguration(_)));
}

#[test]
fn bad_extent_is_rejected() {
    for extent in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert!(GridMeshBuilder::build(4, extent).is_err(), "extent {extent}");
    }
}

#[test]
fn single_point_grid_sits_at_origin() {
    let lattice = GridMeshBuilder::build(1, 3.0).unwrap();
    assert_eq!(lattice.len(), 1);
    assert_eq!(lattice.positions()[0], glam::Vec3::ZERO);
    assert_eq!(lattice.uvs()[0], glam::Vec2::splat(0.5));
}

#[test]
fn packed_vertices_follow_lattice_order() {
    let lattice = GridMeshBuilder::build(3, 2.0).unwrap();
    let verts = lattice.to_vertices();
    assert_eq!(verts.len(), 9);
    for (v, (p, uv)) in verts.iter().zip(lattice.iter()) {
        assert_eq!(v.position, p.to_array());
        assert_eq!(v.uv, uv.to_array());
    }
    assert_eq!(std::mem::size_of::<LatticeVertex>(), 20);
    let bytes: &[u8] = bytemuck::cast_slice(&verts);
    assert_eq!(bytes.len(), 9 * 20);
}

#[test]
fn grid_above_cap_is_rejected() {
    let cap = hero_core::constants::MAX_GRID;
    let err = GridMeshBuilder::build(cap + 1, 8.0).unwrap_err();
    assert!(matches!(err, HeroError::InvalidConfiguration(_)));
    assert!(GridMeshBuilder::build(65_536, 8.0).is_err());
}
