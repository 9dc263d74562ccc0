use crate::camera::{group_rotation, Camera, Viewport};
use crate::config::HeroConfig;
use crate::error::{HeroError, HeroResult};
use crate::lattice::{GridMeshBuilder, Lattice};
use crate::pointer::{NormalizedPointer, PointerTracker, ViewportRect};
use crate::scheduler::{FrameHandle, FrameHost, FrameScheduler, SchedulerState};
use crate::shading::WaveShadingPipeline;
use crate::uniforms::{GpuGlobals, ShadeParams, UniformStore, Uniforms};

/// Backend that puts the field on screen.
pub trait PointRenderer {
    /// Reconfigure the surface for a new (non-empty) size.
    fn resize(&mut self, viewport: Viewport);
    /// Draw one frame.
    fn draw(&mut self, globals: &GpuGlobals) -> HeroResult<()>;
    /// Free GPU-side buffers. Called once, on teardown.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    Applied,
    /// Zero-area size; projection kept until a real size arrives.
    Deferred,
    Unchanged,
}

/// Everything one mounted hero panel owns.
pub struct RenderContext<R: PointRenderer> {
    config: HeroConfig,
    lattice: Lattice,
    uniforms: UniformStore,
    pointer: PointerTracker,
    camera: Camera,
    viewport: Viewport,
    scheduler: FrameScheduler,
    shading: WaveShadingPipeline,
    renderer: Option<R>,
    reduced_motion: bool,
    last_drawn: Option<Uniforms>,
    frames_drawn: u64,
    released: bool,
}

impl<R: PointRenderer> RenderContext<R> {
    /// Validate `config`, build the lattice and camera for `viewport`.
    pub fn new(config: HeroConfig, viewport: Viewport) -> HeroResult<Self> {
        config.validate()?;
        if viewport.is_empty() {
            return Err(HeroError::InvalidConfiguration(format!(
                "viewport must be non-empty, got {}x{}",
                viewport.width, viewport.height
            )));
        }
        let lattice = GridMeshBuilder::build(config.grid, config.extent)?;
        let uniforms = UniformStore::new(
            config.amplitude,
            config.speed,
            config.color_a,
            config.color_b,
        );
        let pointer = PointerTracker::new(
            config.pointer_damping,
            config.rotation_damping,
            config.max_tilt,
        );
        let mut camera =
            Camera::looking_at_origin(config.camera_z, config.fov_y_deg, config.z_near, config.z_far);
        camera.set_viewport(viewport.width, viewport.height);
        let shading = WaveShadingPipeline::new(ShadeParams {
            opacity: config.opacity,
            wave_tint: config.wave_tint,
            point_size_min: config.point_size_min,
            point_size_range: config.point_size_range,
            point_size_ref_depth: config.point_size_ref_depth,
        });
        log::info!(
            "[hero] context {}x{} lattice={} points",
            viewport.width,
            viewport.height,
            lattice.len()
        );
        Ok(Self {
            config,
            lattice,
            uniforms,
            pointer,
            camera,
            viewport,
            scheduler: FrameScheduler::new(),
            shading,
            renderer: None,
            reduced_motion: false,
            last_drawn: None,
            frames_drawn: 0,
            released: false,
        })
    }

    pub fn attach_renderer(&mut self, mut renderer: R) {
        renderer.resize(self.viewport);
        self.renderer = Some(renderer);
    }

    // ---------------- lifecycle ----------------

    /// Begin animating. Idempotent; refused while reduced motion is on or
    /// after teardown.
    pub fn start(&mut self, host: &mut impl FrameHost) -> bool {
        if self.released {
            log::warn!("[hero] start after stop ignored");
            return false;
        }
        if self.reduced_motion {
            return false;
        }
        self.scheduler.start(host)
    }

    pub fn pause(&mut self, host: &mut impl FrameHost) -> bool {
        self.scheduler.pause(host)
    }

    /// Cancel any pending frame and release GPU buffers. Terminal.
    pub fn stop(&mut self, host: &mut impl FrameHost) {
        self.scheduler.stop(host);
        if let Some(mut r) = self.renderer.take() {
            r.release();
        }
        if !self.released {
            log::info!("[hero] torn down after {} frames", self.frames_drawn);
        }
        self.released = true;
    }

    /// Follow the motion-preference signal. `true` pauses (or, if nothing
    /// has been drawn yet, paints one flat static frame); `false` resumes.
    pub fn set_reduced_motion(&mut self, reduce: bool, host: &mut impl FrameHost) {
        if self.released {
            return;
        }
        self.reduced_motion = reduce;
        if reduce {
            if !self.scheduler.pause(host) && self.last_drawn.is_none() {
                self.draw_static_frame();
            }
        } else {
            self.start(host);
        }
    }

    /// Host callback entry point for the frame `handle` fired at `now_sec`.
    pub fn frame(&mut self, handle: FrameHandle, now_sec: f64, host: &mut impl FrameHost) {
        let Some(dt) = self.scheduler.begin_frame(handle, now_sec) else {
            return;
        };
        self.uniforms.advance(dt);
        self.pointer.tick();
        self.pointer.write_pointer(&mut self.uniforms);
        let snapshot = self.uniforms.snapshot();
        self.draw(snapshot);
        self.scheduler.end_frame(host);
    }

    /// Paint the field once with the waves flattened and the clock untouched.
    pub fn draw_static_frame(&mut self) {
        let mut still = self.uniforms.snapshot();
        still.amplitude = 0.0;
        self.draw(still);
    }

    // ---------------- inputs ----------------

    pub fn on_pointer_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        rect: ViewportRect,
    ) -> Option<NormalizedPointer> {
        if self.released {
            return None;
        }
        self.pointer.on_pointer_move(client_x, client_y, rect)
    }

    /// Apply a new surface size immediately. Uniforms and the lattice are
    /// never touched; while not running the last frame is repainted so the
    /// resized surface isn't left blank. Ignored after `stop`.
    pub fn resize(&mut self, width: u32, height: u32) -> ResizeOutcome {
        if self.released {
            return ResizeOutcome::Unchanged;
        }
        let next = Viewport::new(width, height);
        if next.is_empty() {
            log::debug!("[hero] deferring resize to {}x{}", width, height);
            return ResizeOutcome::Deferred;
        }
        if next == self.viewport {
            return ResizeOutcome::Unchanged;
        }
        self.viewport = next;
        self.camera.set_viewport(width, height);
        if let Some(r) = self.renderer.as_mut() {
            r.resize(next);
        }
        if self.scheduler.state() != SchedulerState::Running {
            if let Some(last) = self.last_drawn {
                self.draw(last);
            }
        }
        ResizeOutcome::Applied
    }

    // ---------------- accessors ----------------

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn uniforms(&self) -> Uniforms {
        self.uniforms.snapshot()
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.scheduler.pending()
    }

    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }

    pub fn shading(&self) -> &WaveShadingPipeline {
        &self.shading
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// `true` once `stop` has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Uniform block for `u` under the current camera and tilt.
    pub fn globals_for(&self, u: &Uniforms) -> GpuGlobals {
        GpuGlobals::new(
            u,
            &self.shading.params,
            self.camera.view_proj(),
            group_rotation(self.pointer.rotation()),
            self.viewport.resolution(),
        )
    }

    fn draw(&mut self, u: Uniforms) {
        let globals = self.globals_for(&u);
        let Some(r) = self.renderer.as_mut() else {
            return;
        };
        match r.draw(&globals) {
            Ok(()) => {
                self.frames_drawn += 1;
                self.last_drawn = Some(u);
            }
            Err(e) => log::error!("[hero] {}", e),
        }
    }
}
