use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

use hero_core::gpu::PointsRenderer;
use hero_core::{FrameHandle, FrameHost, HeroConfig, RenderContext, Viewport, ViewportRect};

/// Redraw requests as frame callbacks. Cancelling forgets the handle so the
/// next `RedrawRequested` does nothing.
struct NativeFrameHost {
    window: Arc<Window>,
    next_id: i64,
    pending: Option<FrameHandle>,
}

impl NativeFrameHost {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
        }
    }

    fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameHost for NativeFrameHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let h = FrameHandle(self.next_id);
        self.pending = Some(h);
        self.window.request_redraw();
        Some(h)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().context("event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Hero point field (native)")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 640.0))
            .build(&event_loop)
            .context("window")?,
    );

    let size = window.inner_size();
    let mut ctx: RenderContext<PointsRenderer<'static>> =
        RenderContext::new(HeroConfig::default(), Viewport::new(size.width, size.height))?;
    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(window.clone())
        .context("surface")?;
    let renderer = pollster::block_on(PointsRenderer::new(
        &instance,
        surface,
        ctx.viewport(),
        ctx.lattice(),
    ))?;
    ctx.attach_renderer(renderer);

    let mut host = NativeFrameHost::new(window.clone());
    let mut reduce = std::env::var("HERO_REDUCED_MOTION")
        .map(|v| v == "1")
        .unwrap_or(false);
    ctx.set_reduced_motion(reduce, &mut host);
    log::info!("press M to toggle reduced motion, Esc to quit");

    let epoch = Instant::now();
    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::Resized(size) => {
                ctx.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let s = window.inner_size();
                let rect = ViewportRect::new(0.0, 0.0, s.width as f32, s.height as f32);
                ctx.on_pointer_move(position.x as f32, position.y as f32, rect);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Character(c) if c.as_str().eq_ignore_ascii_case("m") => {
                    reduce = !reduce;
                    log::info!("reduced motion: {}", reduce);
                    ctx.set_reduced_motion(reduce, &mut host);
                }
                Key::Named(NamedKey::Escape) => {
                    ctx.stop(&mut host);
                    elwt.exit();
                }
                _ => {}
            },
            WindowEvent::CloseRequested => {
                ctx.stop(&mut host);
                elwt.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Some(h) = host.fire() {
                    ctx.frame(h, epoch.elapsed().as_secs_f64(), &mut host);
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
