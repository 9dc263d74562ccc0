// Host-side tests for the CPU reference of the wave shading stages.

use glam::{Vec2, Vec3, Vec4};
use hero_core::constants::MAX_WAVE_MAGNITUDE;
use hero_core::*;
use rand::prelude::*;

fn uniforms(time: f32, amplitude: f32, pointer: Vec2) -> Uniforms {
    Uniforms {
        time,
        amplitude,
        speed: 0.6,
        pointer,
        color_a: Rgb::new(0.2, 0.4, 0.6),
        color_b: Rgb::new(0.8, 0.6, 0.4),
    }
}

fn params() -> ShadeParams {
    ShadeParams {
        opacity: 0.9,
        wave_tint: 0.2,
        point_size_min: 3.0,
        point_size_range: 2.0,
        point_size_ref_depth: 5.0,
    }
}

#[test]
fn displacement_is_bounded_on_dense_grid() {
    let amplitude = 0.25;
    let bound = amplitude * 1.3;
    let steps = 24;
    for xi in 0..steps {
        for yi in 0..steps {
            let x = -4.0 + 8.0 * xi as f32 / (steps - 1) as f32;
            let y = -4.0 + 8.0 * yi as f32 / (steps - 1) as f32;
            let uv = Vec2::new((x + 4.0) / 8.0, (y + 4.0) / 8.0);
            for ti in 0..12 {
                let time = ti as f32 * 0.77;
                for pi in 0..5 {
                    let pointer = Vec2::new(pi as f32 / 4.0, 1.0 - pi as f32 / 4.0);
                    let z = z_offset(Vec3::new(x, y, 0.0), uv, &uniforms(time, amplitude, pointer));
                    assert!(z.abs() <= bound, "z={z} at x={x} y={y} t={time}");
                    assert!(z.abs() <= amplitude * MAX_WAVE_MAGNITUDE + 1e-6);
                }
            }
        }
    }
}

#[test]
fn displacement_is_bounded_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20_000 {
        let amplitude = rng.gen_range(0.0..2.0f32);
        let pos = Vec3::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), 0.0);
        let uv = Vec2::new(rng.gen(), rng.gen());
        let pointer = Vec2::new(rng.gen(), rng.gen());
        let time = rng.gen_range(0.0..1000.0f32);
        let z = z_offset(pos, uv, &uniforms(time, amplitude, pointer));
        assert!(z.abs() <= amplitude * 1.3 + 1e-6);
        assert!(z.abs() <= WaveShadingPipeline::max_displacement(amplitude) + 1e-5);
    }
}

#[test]
fn pointer_wave_decays_with_distance() {
    let mut prev = f32::INFINITY;
    for i in 0..=200 {
        let d = i as f32 / 200.0;
        let env = pointer_wave_envelope(d);
        assert!(env <= prev, "envelope rose at d={d}");
        prev = env;
        for ti in 0..8 {
            let wave = pointer_wave(d, ti as f32 * 0.4);
            assert!(wave.abs() <= env + 1e-7);
        }
    }
}

#[test]
fn pointer_wave_is_finite_at_pointer() {
    let w = pointer_wave(0.0, 0.0);
    assert!(w.is_finite());
    assert!((w - 0.15).abs() < 1e-6);
}

#[test]
fn zero_amplitude_gives_flat_field() {
    let lattice = GridMeshBuilder::build(4, 2.0).unwrap();
    let pipeline = WaveShadingPipeline::new(params());
    let u = uniforms(0.0, 0.0, Vec2::splat(0.5));
    for p in pipeline.displace_lattice(&lattice, &u) {
        assert_eq!(p.position.z, 0.0);
        assert_eq!(p.wave, 0.0);
    }
    // Same flat field at any later time.
    let later = uniforms(37.5, 0.0, Vec2::new(0.1, 0.9));
    for p in pipeline.displace_lattice(&lattice, &later) {
        assert_eq!(p.wave, 0.0);
    }
}

#[test]
fn displaced_z_is_forwarded_as_wave() {
    let u = uniforms(1.3, 0.25, Vec2::new(0.3, 0.7));
    let pos = Vec3::new(0.5, -1.0, 0.0);
    let uv = Vec2::new(0.55, 0.4);
    let d = displace(pos, uv, &u);
    assert_eq!(d.position.x, pos.x);
    assert_eq!(d.position.y, pos.y);
    assert_eq!(d.wave, d.position.z);
    assert!((d.wave - z_offset(pos, uv, &u)).abs() < 1e-7);
}

#[test]
fn plane_ripple_travels_with_time() {
    // Phase advances by time*speed*2, so shifting x+y by that much (over 1.6) holds the value.
    let speed = 0.6;
    let t = 2.0;
    let a = plane_ripple(0.0, 0.0, 0.0, speed);
    let shift = t * speed * 2.0 / (1.6 * 2.0);
    let b = plane_ripple(shift, shift, t, speed);
    assert!((a - b).abs() < 1e-5);
}

#[test]
fn fragment_mask_is_soft_and_round() {
    assert!((point_mask(Vec2::splat(0.5)) - 1.0).abs() < 1e-6);
    // Corners of the sprite are fully transparent.
    assert_eq!(point_mask(Vec2::new(0.0, 0.0)), 0.0);
    assert_eq!(point_mask(Vec2::new(1.0, 1.0)), 0.0);
    // Falls off smoothly: strictly between the centre and the rim.
    let mid = point_mask(Vec2::new(0.75, 0.5));
    assert!(mid > 0.0 && mid < 1.0);
    // Radially symmetric.
    let a = point_mask(Vec2::new(0.5 + 0.2, 0.5));
    let b = point_mask(Vec2::new(0.5, 0.5 - 0.2));
    assert!((a - b).abs() < 1e-6);
}

#[test]
fn fragment_color_ramps_with_v_and_tints_with_wave() {
    let p = params();
    let u = uniforms(0.0, 0.25, Vec2::splat(0.5));
    let bottom = shade(Vec2::splat(0.5), Vec2::new(0.3, 0.0), 0.0, &u, &p);
    let top = shade(Vec2::splat(0.5), Vec2::new(0.3, 1.0), 0.0, &u, &p);
    assert!((bottom[0] - 0.2).abs() < 1e-6 && (bottom[2] - 0.6).abs() < 1e-6);
    assert!((top[0] - 0.8).abs() < 1e-6 && (top[2] - 0.4).abs() < 1e-6);
    assert!((bottom[3] - 0.9).abs() < 1e-6);

    let crest = shade(Vec2::splat(0.5), Vec2::new(0.3, 0.0), 0.1, &u, &p);
    assert!((crest[0] - bottom[0] - 0.02).abs() < 1e-6);
    assert!(crest[1] > bottom[1]);
}

#[test]
fn point_size_attenuates_with_view_depth() {
    let p = params();
    let at_ref = point_size(Vec4::new(0.0, 0.0, 4.9, 5.0), &p);
    assert!((at_ref - 5.0).abs() < 1e-6);
    let near = point_size(Vec4::new(0.0, 0.0, 3.4, 3.5), &p);
    let far = point_size(Vec4::new(0.0, 0.0, 6.4, 6.5), &p);
    assert!(near > at_ref && at_ref > far);
    // Capped close to the eye, floored behind it.
    assert_eq!(point_size(Vec4::new(0.0, 0.0, 0.0, 0.01), &p), 7.0);
    assert_eq!(point_size(Vec4::new(0.0, 0.0, 0.0, -1.0), &p), 3.0);
}

#[test]
fn projected_lattice_points_vary_in_size() {
    let config = HeroConfig::default();
    let mut camera = Camera::looking_at_origin(
        config.camera_z,
        config.fov_y_deg,
        config.z_near,
        config.z_far,
    );
    camera.set_viewport(1280, 640);
    let pipeline = WaveShadingPipeline::new(ShadeParams {
        opacity: config.opacity,
        wave_tint: config.wave_tint,
        point_size_min: config.point_size_min,
        point_size_range: config.point_size_range,
        point_size_ref_depth: config.point_size_ref_depth,
    });
    let lattice = GridMeshBuilder::build(config.grid, config.extent).unwrap();
    let mvp = camera.view_proj() * group_rotation(Vec2::from(hero_core::constants::INITIAL_ROTATION));

    let mut samples: Vec<(f32, f32)> = lattice
        .positions()
        .iter()
        .map(|p| {
            let clip = mvp * p.extend(1.0);
            (clip.w, pipeline.point_size(clip))
        })
        .collect();
    let min = samples.iter().map(|s| s.1).fold(f32::INFINITY, f32::min);
    let max = samples.iter().map(|s| s.1).fold(0.0, f32::max);
    assert!(max - min > 1.0, "sizes span only {min}..{max}");
    assert!(min >= config.point_size_min);

    // Nearer (smaller w) never renders smaller.
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in samples.windows(2) {
        assert!(pair[0].1 >= pair[1].1 - 1e-5);
    }
}

#[test]
fn wgsl_source_has_both_stages() {
    assert!(POINTS_WGSL.contains("fn vs_points"));
    assert!(POINTS_WGSL.contains("fn fs_points"));
    assert!(POINTS_WGSL.contains("d * 12.0 - g.time * 4.0"));
}

#[test]
fn gpu_globals_layout_matches_wgsl_block() {
    assert_eq!(std::mem::size_of::<GpuGlobals>(), 208);
    assert_eq!(std::mem::size_of::<GpuGlobals>() % 16, 0);
}

#[test]
fn wgsl_sizes_on_view_depth() {
    assert!(POINTS_WGSL.contains("g.point_size_ref_depth / max(center.w, 1e-4)"));
    assert!(!POINTS_WGSL.contains("length(center.xyz)"));
}
