use glam::{Mat4, Vec2, Vec3};

/// Linear RGB colour with components in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok().map(|v| v as f32 / 255.0);
        match hex.len() {
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |h: &str| channel(h.repeat(2).as_str());
                Some(Self::new(
                    short(&hex[0..1])?,
                    short(&hex[1..2])?,
                    short(&hex[2..3])?,
                ))
            }
            _ => None,
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_array4(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// Per-frame shading parameters shared by every point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    pub time: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub pointer: Vec2,
    pub color_a: Rgb,
    pub color_b: Rgb,
}

/// Owner of the live `Uniforms`.
///
/// `time` is written only through `advance` (driven by the frame scheduler)
/// and `pointer` only through `PointerTracker::write_pointer`.
#[derive(Clone, Debug)]
pub struct UniformStore {
    current: Uniforms,
}

impl UniformStore {
    pub fn new(amplitude: f32, speed: f32, color_a: Rgb, color_b: Rgb) -> Self {
        Self {
            current: Uniforms {
                time: 0.0,
                amplitude,
                speed,
                pointer: Vec2::splat(0.5),
                color_a,
                color_b,
            },
        }
    }

    /// Move the clock forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.current.time += dt;
        }
    }

    pub(crate) fn set_pointer(&mut self, p: Vec2) {
        self.current.pointer = p;
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.current.amplitude = amplitude.max(0.0);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.current.speed = speed;
    }

    pub fn set_colors(&mut self, a: Rgb, b: Rgb) {
        self.current.color_a = a;
        self.current.color_b = b;
    }

    pub fn snapshot(&self) -> Uniforms {
        self.current
    }
}

/// Fixed parameters of the fragment/point-size stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeParams {
    pub opacity: f32,
    pub wave_tint: f32,
    pub point_size_min: f32,
    pub point_size_range: f32,
    pub point_size_ref_depth: f32,
}

/// Uniform block consumed by `points.wgsl`. Field order matches the WGSL
/// `Globals` struct; every member is 16-byte aligned or packed into a vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuGlobals {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    pub pointer: [f32; 2],
    pub resolution: [f32; 2],
    pub time: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub opacity: f32,
    pub point_size_min: f32,
    pub point_size_range: f32,
    pub point_size_ref_depth: f32,
    pub wave_tint: f32,
}

impl GpuGlobals {
    pub fn new(
        u: &Uniforms,
        shade: &ShadeParams,
        view_proj: Mat4,
        model: Mat4,
        resolution: [f32; 2],
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color_a: u.color_a.to_array4(),
            color_b: u.color_b.to_array4(),
            pointer: u.pointer.to_array(),
            resolution,
            time: u.time,
            amplitude: u.amplitude,
            speed: u.speed,
            opacity: shade.opacity,
            point_size_min: shade.point_size_min,
            point_size_range: shade.point_size_range,
            point_size_ref_depth: shade.point_size_ref_depth,
            wave_tint: shade.wave_tint,
        }
    }
}
