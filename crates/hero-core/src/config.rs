use crate::constants::*;
use crate::error::{HeroError, HeroResult};
use crate::uniforms::Rgb;

/// Everything tunable about one hero field. Defaults come from `constants.rs`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroConfig {
    pub grid: u32,
    pub extent: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub opacity: f32,
    pub wave_tint: f32,
    pub point_size_min: f32,
    pub point_size_range: f32,
    pub point_size_ref_depth: f32,
    pub pointer_damping: f32,
    pub rotation_damping: f32,
    pub max_tilt: f32,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub camera_z: f32,
    pub max_pixel_ratio: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            grid: GRID,
            extent: EXTENT,
            amplitude: AMPLITUDE,
            speed: SPEED,
            color_a: Rgb::from_hex(COLOR_A_HEX).unwrap_or(Rgb::new(0.49, 0.95, 0.83)),
            color_b: Rgb::from_hex(COLOR_B_HEX).unwrap_or(Rgb::new(0.6, 0.97, 0.88)),
            opacity: OPACITY,
            wave_tint: WAVE_TINT,
            point_size_min: POINT_SIZE_MIN,
            point_size_range: POINT_SIZE_RANGE,
            point_size_ref_depth: POINT_SIZE_REF_DEPTH,
            pointer_damping: POINTER_DAMPING,
            rotation_damping: ROTATION_DAMPING,
            max_tilt: MAX_TILT,
            fov_y_deg: FOV_Y_DEG,
            z_near: Z_NEAR,
            z_far: Z_FAR,
            camera_z: CAMERA_Z,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

fn invalid(msg: impl Into<String>) -> HeroError {
    HeroError::InvalidConfiguration(msg.into())
}

fn positive(name: &str, v: f32) -> HeroResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be a positive finite number, got {v}")))
    }
}

fn unit_interval(name: &str, v: f32) -> HeroResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must lie in [0, 1], got {v}")))
    }
}

impl HeroConfig {
    /// Check every field; called once when a `RenderContext` is built.
    pub fn validate(&self) -> HeroResult<()> {
        if self.grid == 0 || self.grid > MAX_GRID {
            return Err(invalid(format!(
                "grid must lie in [1, {MAX_GRID}], got {}",
                self.grid
            )));
        }
        positive("extent", self.extent)?;
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(invalid(format!(
                "amplitude must be non-negative, got {}",
                self.amplitude
            )));
        }
        if !self.speed.is_finite() {
            return Err(invalid("speed must be finite"));
        }
        unit_interval("opacity", self.opacity)?;
        if !self.wave_tint.is_finite() {
            return Err(invalid("wave_tint must be finite"));
        }
        positive("point_size_min", self.point_size_min)?;
        positive("point_size_range", self.point_size_range)?;
        positive("point_size_ref_depth", self.point_size_ref_depth)?;
        // A zero factor would never converge; one would snap.
        if !(self.pointer_damping > 0.0 && self.pointer_damping <= 1.0) {
            return Err(invalid(format!(
                "pointer_damping must lie in (0, 1], got {}",
                self.pointer_damping
            )));
        }
        if !(self.rotation_damping > 0.0 && self.rotation_damping <= 1.0) {
            return Err(invalid(format!(
                "rotation_damping must lie in (0, 1], got {}",
                self.rotation_damping
            )));
        }
        if !self.max_tilt.is_finite() || self.max_tilt < 0.0 {
            return Err(invalid("max_tilt must be non-negative"));
        }
        if !(self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0) {
            return Err(invalid(format!("fov_y_deg out of range: {}", self.fov_y_deg)));
        }
        positive("z_near", self.z_near)?;
        if !(self.z_far > self.z_near) {
            return Err(invalid("z_far must exceed z_near"));
        }
        positive("camera_z", self.camera_z)?;
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio > 0.0) {
            return Err(invalid("max_pixel_ratio must be positive"));
        }
        Ok(())
    }

    /// Apply one textual override, e.g. from a `data-*` attribute on the
    /// mount container. Unknown keys are rejected so typos surface early.
    pub fn apply_override(&mut self, key: &str, value: &str) -> HeroResult<()> {
        let value = value.trim();
        let num = |v: &str| -> HeroResult<f32> {
            v.parse::<f32>()
                .map_err(|_| invalid(format!("{key}: '{v}' is not a number")))
        };
        match key {
            "grid" => {
                self.grid = value
                    .parse::<u32>()
                    .map_err(|_| invalid(format!("grid: '{value}' is not a positive integer")))?;
            }
            "extent" => self.extent = num(value)?,
            "amplitude" => self.amplitude = num(value)?,
            "speed" => self.speed = num(value)?,
            "opacity" => self.opacity = num(value)?,
            "color-a" => {
                self.color_a = Rgb::from_hex(value)
                    .ok_or_else(|| invalid(format!("color-a: '{value}' is not a hex color")))?;
            }
            "color-b" => {
                self.color_b = Rgb::from_hex(value)
                    .ok_or_else(|| invalid(format!("color-b: '{value}' is not a hex color")))?;
            }
            _ => return Err(invalid(format!("unknown option '{key}'"))),
        }
        Ok(())
    }
}

/// Keys `apply_override` understands, in the order front-ends should read them.
pub const OVERRIDE_KEYS: [&str; 7] = [
    "grid",
    "extent",
    "amplitude",
    "speed",
    "opacity",
    "color-a",
    "color-b",
];
