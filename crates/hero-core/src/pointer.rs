use crate::constants::{INITIAL_ROTATION, ROTATION_GAIN};
use crate::uniforms::UniformStore;
use glam::Vec2;

/// Bounding rectangle of the rendering surface in client (CSS) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A pointer sample mapped onto the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPointer {
    /// \[0, 1\]², origin bottom-left (matches lattice `v` growing upward).
    pub uv: Vec2,
    /// Group orientation `(rx, ry)` the field should drift toward.
    pub target_rotation: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub raw: Vec2,
    pub smoothed: Vec2,
}

/// Exponential step of `current` toward `target` by fraction `f`.
#[inline]
pub fn damp(current: Vec2, target: Vec2, f: f32) -> Vec2 {
    current + (target - current) * f
}

/// Ticks needed for a damped value to close 99% of a constant gap.
pub fn damping_ticks(f: f32) -> u32 {
    if f >= 1.0 {
        return 1;
    }
    if f <= 0.0 {
        return u32::MAX;
    }
    ((0.01f64).ln() / (1.0 - f as f64).ln()).ceil() as u32
}

/// Latest pointer sample plus its smoothed follower and the derived tilt.
///
/// Samples are last-write-wins; nothing moves until `tick`.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    state: PointerState,
    rotation: Vec2,
    target_rotation: Vec2,
    damping: f32,
    rotation_damping: f32,
    max_tilt: f32,
}

impl PointerTracker {
    pub fn new(damping: f32, rotation_damping: f32, max_tilt: f32) -> Self {
        let initial = Vec2::from(INITIAL_ROTATION);
        Self {
            state: PointerState {
                raw: Vec2::splat(0.5),
                smoothed: Vec2::splat(0.5),
            },
            rotation: initial,
            target_rotation: initial,
            damping,
            rotation_damping,
            max_tilt,
        }
    }

    /// Record a client-space sample. A zero-area rect (hidden container)
    /// is ignored and the previous sample is kept.
    pub fn on_pointer_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        rect: ViewportRect,
    ) -> Option<NormalizedPointer> {
        if rect.is_empty() || !client_x.is_finite() || !client_y.is_finite() {
            return None;
        }
        let x = ((client_x - rect.left) / rect.width).clamp(0.0, 1.0);
        let y = ((client_y - rect.top) / rect.height).clamp(0.0, 1.0);
        let uv = Vec2::new(x, 1.0 - y);
        let tilt = self.max_tilt;
        let target_rotation = Vec2::new(
            ((y - 0.5) * -ROTATION_GAIN).clamp(-tilt, tilt),
            ((x - 0.5) * ROTATION_GAIN).clamp(-tilt, tilt),
        );
        self.state.raw = uv;
        self.target_rotation = target_rotation;
        Some(NormalizedPointer {
            uv,
            target_rotation,
        })
    }

    /// One frame of lag-follow for both the pointer and the group tilt.
    pub fn tick(&mut self) {
        self.state.smoothed = damp(self.state.smoothed, self.state.raw, self.damping);
        self.rotation = damp(self.rotation, self.target_rotation, self.rotation_damping);
    }

    /// Publish the smoothed pointer to the shading uniforms.
    pub fn write_pointer(&self, store: &mut UniformStore) {
        store.set_pointer(self.state.smoothed);
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn raw(&self) -> Vec2 {
        self.state.raw
    }

    pub fn smoothed(&self) -> Vec2 {
        self.state.smoothed
    }

    /// Current `(rx, ry)` in radians.
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn target_rotation(&self) -> Vec2 {
        self.target_rotation
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }
}
