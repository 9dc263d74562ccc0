//! Procedural point lattice.
//!
//! The field is a square grid of points lying in the z = 0 plane, centred on
//! the origin. Each point carries a texture coordinate in \[0, 1\]² that the
//! shading stage uses for the pointer ripple and the vertical colour ramp.

use crate::constants::MAX_GRID;
use crate::error::{HeroError, HeroResult};
use glam::{Vec2, Vec3};

/// One lattice point as uploaded to the GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LatticeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Immutable `grid × grid` set of positions and matching UVs.
///
/// Element `k = i * grid + j`: the outer index `i` walks x (and u), the inner
/// index `j` walks y (and v).
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    grid: u32,
    extent: f32,
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
}

impl Lattice {
    pub fn grid(&self) -> u32 {
        self.grid
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec2)> + '_ {
        self.positions.iter().copied().zip(self.uvs.iter().copied())
    }

    /// Interleaved copy for the vertex/instance buffer.
    pub fn to_vertices(&self) -> Vec<LatticeVertex> {
        self.iter()
            .map(|(p, uv)| LatticeVertex {
                position: p.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// Builds the lattice. Stateless; kept as a type so callers can name it.
pub struct GridMeshBuilder;

impl GridMeshBuilder {
    /// Generate `grid × grid` evenly spaced points spanning `extent` world units.
    ///
    /// A single-point grid sits at the origin with uv (0.5, 0.5). `grid` is
    /// capped at `MAX_GRID` so the instance buffer stays within device limits.
    pub fn build(grid: u32, extent: f32) -> HeroResult<Lattice> {
        if grid == 0 || grid > MAX_GRID {
            return Err(HeroError::InvalidConfiguration(format!(
                "grid must lie in [1, {MAX_GRID}], got {grid}"
            )));
        }
        if !(extent.is_finite() && extent > 0.0) {
            return Err(HeroError::InvalidConfiguration(format!(
                "extent must be a positive finite number, got {extent}"
            )));
        }

        let n = grid as usize;
        let mut positions = Vec::with_capacity(n * n);
        let mut uvs = Vec::with_capacity(n * n);
        for i in 0..grid {
            let u = lattice_coord(i, grid);
            for j in 0..grid {
                let v = lattice_coord(j, grid);
                positions.push(Vec3::new((u - 0.5) * extent, (v - 0.5) * extent, 0.0));
                uvs.push(Vec2::new(u, v));
            }
        }
        log::debug!("[lattice] built {}x{} points over {:.2}", grid, grid, extent);
        Ok(Lattice {
            grid,
            extent,
            positions,
            uvs,
        })
    }
}

#[inline]
fn lattice_coord(index: u32, grid: u32) -> f32 {
    if grid == 1 {
        0.5
    } else {
        index as f32 / (grid - 1) as f32
    }
}
