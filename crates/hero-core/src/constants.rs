// Default tuning for the hero point field. `HeroConfig::default()` reads these.

// Lattice
pub const GRID: u32 = 80; // points per side
pub const MAX_GRID: u32 = 1024; // ~1M instances, 20 MiB instance buffer
pub const EXTENT: f32 = 8.0; // world-space side length

// Waves
pub const AMPLITUDE: f32 = 0.25;
pub const SPEED: f32 = 0.6;
pub const PLANE_WAVE_FREQ: f32 = 1.6; // per world unit, applied to x and y
pub const PLANE_WAVE_TIME_SCALE: f32 = 2.0;
pub const PLANE_WAVE_HEIGHT: f32 = 0.3;
pub const POINTER_WAVE_FREQ: f32 = 12.0; // per uv unit
pub const POINTER_WAVE_RATE: f32 = 4.0; // radians per second
pub const POINTER_WAVE_HEIGHT: f32 = 0.15;
pub const POINTER_WAVE_FALLOFF: f32 = 8.0;
/// Upper bound of `|ripple + pointer wave|` before amplitude scaling.
pub const MAX_WAVE_MAGNITUDE: f32 = PLANE_WAVE_HEIGHT + POINTER_WAVE_HEIGHT;

// Palette
pub const COLOR_A_HEX: &str = "#7cf2d4";
pub const COLOR_B_HEX: &str = "#9af7e1";
pub const OPACITY: f32 = 0.9;
pub const WAVE_TINT: f32 = 0.2; // brightening per unit of displaced z

// Point sprites (pixels)
pub const POINT_SIZE_MIN: f32 = 3.0;
pub const POINT_SIZE_RANGE: f32 = 2.0; // extra pixels at the reference depth
pub const POINT_SIZE_REF_DEPTH: f32 = 5.0; // view-space depth of the field centre
pub const POINT_SIZE_MAX_BOOST: f32 = 2.0; // cap on ref_depth / depth
pub const POINT_MASK_RADIUS_SQ: f32 = 0.25;

// Pointer follow
pub const POINTER_DAMPING: f32 = 0.05; // fraction of the gap closed per tick
pub const ROTATION_DAMPING: f32 = 0.03;
pub const ROTATION_GAIN: f32 = 0.6; // radians per unit of centre offset
pub const MAX_TILT: f32 = 0.3; // radians
pub const INITIAL_ROTATION: [f32; 2] = [-0.15, 0.25]; // (rx, ry)

// Camera
pub const FOV_Y_DEG: f32 = 55.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 5.0;

// Surface
pub const MAX_PIXEL_RATIO: f64 = 1.8;
pub const CONTAINER_ID: &str = "hero-canvas";
