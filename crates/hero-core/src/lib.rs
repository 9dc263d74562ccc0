pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod lattice;
pub mod pointer;
pub mod scheduler;
pub mod shading;
pub mod uniforms;

pub use camera::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use lattice::*;
pub use pointer::*;
pub use scheduler::*;
pub use shading::*;
pub use uniforms::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
