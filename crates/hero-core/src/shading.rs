//! CPU reference of the point shading stages.
//!
//! `shaders/points.wgsl` runs the same math on the GPU; these functions are
//! what the tests check and what the renderer uses for bounds.

use crate::constants::*;
use crate::lattice::Lattice;
use crate::uniforms::{ShadeParams, Uniforms};
use glam::{Vec2, Vec3, Vec4};

/// Diagonal plane wave travelling across the lattice.
#[inline]
pub fn plane_ripple(x: f32, y: f32, time: f32, speed: f32) -> f32 {
    let phase = (x * PLANE_WAVE_FREQ + y * PLANE_WAVE_FREQ) - time * speed * PLANE_WAVE_TIME_SCALE;
    phase.sin() * PLANE_WAVE_HEIGHT
}

/// Height envelope of the pointer ripple at uv-distance `d`.
#[inline]
pub fn pointer_wave_envelope(d: f32) -> f32 {
    POINTER_WAVE_HEIGHT / (1.0 + d * POINTER_WAVE_FALLOFF)
}

/// Radial wave centred on the pointer; finite at `d = 0`.
#[inline]
pub fn pointer_wave(d: f32, time: f32) -> f32 {
    (d * POINTER_WAVE_FREQ - time * POINTER_WAVE_RATE).cos() * pointer_wave_envelope(d)
}

/// Depth offset of one point.
#[inline]
pub fn z_offset(position: Vec3, uv: Vec2, u: &Uniforms) -> f32 {
    let ripple = plane_ripple(position.x, position.y, u.time, u.speed);
    let d = uv.distance(u.pointer);
    (ripple + pointer_wave(d, u.time)) * u.amplitude
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacedPoint {
    pub position: Vec3,
    /// Displaced z, forwarded to colouring.
    pub wave: f32,
}

/// Vertex stage: push the point along +z by the wave superposition.
#[inline]
pub fn displace(position: Vec3, uv: Vec2, u: &Uniforms) -> DisplacedPoint {
    let mut p = position;
    p.z += z_offset(position, uv, u);
    DisplacedPoint {
        position: p,
        wave: p.z,
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Soft round mask over a point sprite; `point_coord` spans \[0, 1\]².
#[inline]
pub fn point_mask(point_coord: Vec2) -> f32 {
    let p = point_coord - Vec2::splat(0.5);
    1.0 - smoothstep(0.0, POINT_MASK_RADIUS_SQ, p.dot(p))
}

/// Fragment stage. Returns straight (non-premultiplied) RGBA.
#[inline]
pub fn shade(point_coord: Vec2, uv: Vec2, wave: f32, u: &Uniforms, params: &ShadeParams) -> [f32; 4] {
    let base = u.color_a.to_vec3().lerp(u.color_b.to_vec3(), uv.y);
    let rgb = base + Vec3::splat(wave * params.wave_tint);
    let alpha = point_mask(point_coord) * params.opacity;
    [rgb.x, rgb.y, rgb.z, alpha]
}

/// On-screen point size in pixels for a clip-space position.
///
/// Perspective attenuation on view depth (`clip.w` under a perspective
/// projection): `point_size_range` extra pixels at `point_size_ref_depth`,
/// growing as `1 / depth` up to `POINT_SIZE_MAX_BOOST` times that. Points at
/// or behind the eye get the floor.
#[inline]
pub fn point_size(clip: Vec4, params: &ShadeParams) -> f32 {
    let depth = clip.w;
    if !(depth > 0.0) {
        return params.point_size_min;
    }
    let boost = (params.point_size_ref_depth / depth).min(POINT_SIZE_MAX_BOOST);
    params.point_size_min + params.point_size_range * boost
}

/// Both shading stages bundled with their fixed parameters.
#[derive(Clone, Copy, Debug)]
pub struct WaveShadingPipeline {
    pub params: ShadeParams,
}

impl WaveShadingPipeline {
    pub fn new(params: ShadeParams) -> Self {
        Self { params }
    }

    /// Run the vertex stage over a whole lattice.
    pub fn displace_lattice(&self, lattice: &Lattice, u: &Uniforms) -> Vec<DisplacedPoint> {
        lattice.iter().map(|(p, uv)| displace(p, uv, u)).collect()
    }

    /// Colour at the centre of each point's sprite, in lattice order.
    pub fn shade_lattice(&self, lattice: &Lattice, u: &Uniforms) -> Vec<[f32; 4]> {
        lattice
            .iter()
            .map(|(p, uv)| {
                let d = displace(p, uv, u);
                shade(Vec2::splat(0.5), uv, d.wave, u, &self.params)
            })
            .collect()
    }

    pub fn point_size(&self, clip: Vec4) -> f32 {
        point_size(clip, &self.params)
    }

    /// Largest `|z_offset|` any input can produce for this amplitude.
    pub fn max_displacement(amplitude: f32) -> f32 {
        amplitude.abs() * MAX_WAVE_MAGNITUDE
    }
}
