use hero_core::{HeroConfig, HeroError, HeroResult, Viewport, ViewportRect, OVERRIDE_KEYS};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// The motion-preference media query, if the browser supports `matchMedia`.
pub fn reduced_motion_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

/// Defaults overlaid with any `data-*` options set on the container.
pub fn read_config(container: &web::Element) -> HeroResult<HeroConfig> {
    let mut config = HeroConfig::default();
    for key in OVERRIDE_KEYS {
        if let Some(value) = container.get_attribute(&format!("data-{key}")) {
            config.apply_override(key, &value)?;
        }
    }
    Ok(config)
}

/// Create the drawing canvas and stretch it over the container.
pub fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> HeroResult<web::HtmlCanvasElement> {
    let unavailable = |what: &str, e: JsValue| {
        HeroError::EnvironmentUnavailable(format!("{what}: {:?}", e))
    };
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| unavailable("create canvas", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| unavailable("canvas element", e.into()))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = canvas.set_attribute("aria-hidden", "true");
    container
        .append_child(&canvas)
        .map_err(|e| unavailable("append canvas", e))?;
    Ok(canvas)
}

/// Match the canvas backing store to the container's CSS size times the
/// (capped) device pixel ratio. A hidden container yields an empty viewport
/// and leaves the backing store alone.
pub fn sync_canvas_backing_size(
    container: &web::Element,
    canvas: &web::HtmlCanvasElement,
    max_pixel_ratio: f64,
) -> Viewport {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0);
    let viewport = Viewport::from_css(
        container.client_width() as f64,
        container.client_height() as f64,
        dpr,
        max_pixel_ratio,
    );
    if !viewport.is_empty() {
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);
    }
    viewport
}

#[inline]
pub fn client_rect(canvas: &web::HtmlCanvasElement) -> ViewportRect {
    let rect = canvas.get_bounding_client_rect();
    ViewportRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}
