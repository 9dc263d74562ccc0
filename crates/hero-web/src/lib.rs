#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use hero_core::constants::CONTAINER_ID;
use hero_core::gpu::PointsRenderer;
use hero_core::{HeroError, RenderContext};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;

pub(crate) type WebContext = RenderContext<PointsRenderer<'static>>;

/// A mounted hero panel.
#[wasm_bindgen]
pub struct HeroHandle {
    ctx: Rc<RefCell<WebContext>>,
    host: frame::WebFrameHost,
    canvas: web::HtmlCanvasElement,
    listeners: RefCell<Vec<events::Listener>>,
}

#[wasm_bindgen]
impl HeroHandle {
    /// Tear the panel down: detach listeners, cancel the pending frame, free
    /// GPU buffers and remove the canvas. Safe to call twice.
    pub fn stop(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            listener.detach();
        }
        let mut host = self.host.clone();
        self.ctx.borrow_mut().stop(&mut host);
        self.host.teardown();
        self.canvas.remove();
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&self, reduce: bool) {
        let mut host = self.host.clone();
        self.ctx.borrow_mut().set_reduced_motion(reduce, &mut host);
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.ctx.borrow().state() == hero_core::SchedulerState::Running
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<HeroHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    // Pages without the hero container simply don't get one.
    let has_container = dom::window_document()
        .and_then(|d| d.get_element_by_id(CONTAINER_ID))
        .is_some();
    if !has_container {
        log::info!("[hero] no #{} on this page", CONTAINER_ID);
        return Ok(());
    }
    spawn_local(async move {
        match mount(CONTAINER_ID).await {
            Ok(handle) => ACTIVE.with(|a| {
                if let Some(old) = a.borrow_mut().replace(handle) {
                    old.stop();
                }
            }),
            // Decorative layer: log and leave the panel empty.
            Err(e) => log::warn!("[hero] disabled: {:#}", e),
        }
    });
    Ok(())
}

/// Mount a field into the element with id `container_id`.
///
/// Resolves to `undefined` when the page can't host one (no container, no
/// WebGPU); rejects only for invalid `data-*` options.
#[wasm_bindgen(js_name = mountHero)]
pub async fn mount_hero(container_id: String) -> Result<Option<HeroHandle>, JsValue> {
    match mount(&container_id).await {
        Ok(handle) => Ok(Some(handle)),
        Err(e) if is_environment_error(&e) => {
            log::warn!("[hero] disabled: {:#}", e);
            Ok(None)
        }
        Err(e) => Err(JsValue::from(js_sys::Error::new(&format!("{:#}", e)))),
    }
}

/// Stop the automatically mounted panel, if any.
#[wasm_bindgen(js_name = stopHero)]
pub fn stop_hero() {
    ACTIVE.with(|a| {
        if let Some(handle) = a.borrow_mut().take() {
            handle.stop();
        }
    });
}

fn is_environment_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<HeroError>()
        .is_some_and(HeroError::is_environment_unavailable)
}

fn missing(what: &str) -> HeroError {
    HeroError::EnvironmentUnavailable(what.to_string())
}

async fn mount(container_id: &str) -> anyhow::Result<HeroHandle> {
    let window = web::window().ok_or_else(|| missing("no window"))?;
    let document = window.document().ok_or_else(|| missing("no document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| missing(&format!("missing #{}", container_id)))?;

    let config = dom::read_config(&container).context("reading data-* options")?;
    let max_pixel_ratio = config.max_pixel_ratio;
    let canvas = dom::create_canvas(&document, &container)?;
    let viewport = dom::sync_canvas_backing_size(&container, &canvas, max_pixel_ratio);

    let ctx = match build_context(config, viewport, &canvas).await {
        Ok(c) => c,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    let ctx = Rc::new(RefCell::new(ctx));
    let mut host = frame::install_loop(ctx.clone(), window.clone());

    let listeners = events::wire_all(&events::EventWiring {
        window: window.clone(),
        container,
        canvas: canvas.clone(),
        ctx: ctx.clone(),
        host: host.clone(),
        max_pixel_ratio,
    });

    let reduce = dom::reduced_motion_query(&window)
        .map(|q| q.matches())
        .unwrap_or(false);
    // `false` starts the loop; `true` paints one still frame.
    ctx.borrow_mut().set_reduced_motion(reduce, &mut host);
    log::info!(
        "[hero] mounted (reduced motion: {}, {} listeners)",
        reduce,
        listeners.len()
    );

    Ok(HeroHandle {
        ctx,
        host,
        canvas,
        listeners: RefCell::new(listeners),
    })
}

async fn build_context(
    config: hero_core::HeroConfig,
    viewport: hero_core::Viewport,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<WebContext> {
    let mut ctx = WebContext::new(config, viewport)?;
    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| HeroError::EnvironmentUnavailable(format!("WebGPU surface: {e}")))?;
    let renderer = PointsRenderer::new(&instance, surface, viewport, ctx.lattice()).await?;
    ctx.attach_renderer(renderer);
    Ok(ctx)
}
