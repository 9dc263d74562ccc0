use crate::dom;
use crate::frame::WebFrameHost;
use crate::WebContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Inputs for one mounted panel's listeners.
#[derive(Clone)]
pub struct EventWiring {
    pub window: web::Window,
    pub container: web::Element,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: Rc<RefCell<WebContext>>,
    pub host: WebFrameHost,
    pub max_pixel_ratio: f64,
}

/// One registered DOM listener. Owns its closure until `detach`.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    fn attach(
        target: web::EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web::Event)>,
    ) -> Option<Self> {
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target,
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("[hero] could not listen for {}: {:?}", kind, e);
                None
            }
        }
    }

    /// Unregister and drop the closure (and the context it captured).
    pub fn detach(self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Install every listener once; the caller keeps them until teardown.
pub fn wire_all(w: &EventWiring) -> Vec<Listener> {
    [
        wire_pointermove(w),
        wire_resize(w),
        wire_motion_preference(w),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn wire_pointermove(w: &EventWiring) -> Option<Listener> {
    let target: web::EventTarget = w.window.clone().into();
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        if !w.canvas.is_connected() {
            return;
        }
        let rect = dom::client_rect(&w.canvas);
        _ = w
            .ctx
            .borrow_mut()
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32, rect);
    }) as Box<dyn FnMut(_)>);
    Listener::attach(target, "pointermove", closure)
}

fn wire_resize(w: &EventWiring) -> Option<Listener> {
    let target: web::EventTarget = w.window.clone().into();
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let viewport = dom::sync_canvas_backing_size(&w.container, &w.canvas, w.max_pixel_ratio);
        let outcome = w.ctx.borrow_mut().resize(viewport.width, viewport.height);
        log::debug!(
            "[hero] resize {}x{} -> {:?}",
            viewport.width,
            viewport.height,
            outcome
        );
    }) as Box<dyn FnMut(_)>);
    Listener::attach(target, "resize", closure)
}

fn wire_motion_preference(w: &EventWiring) -> Option<Listener> {
    let query = dom::reduced_motion_query(&w.window)?;
    let ctx = w.ctx.clone();
    let mut host = w.host.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MediaQueryListEvent>() else {
            return;
        };
        let reduce = ev.matches();
        log::info!("[hero] prefers-reduced-motion: {}", reduce);
        ctx.borrow_mut().set_reduced_motion(reduce, &mut host);
    }) as Box<dyn FnMut(_)>);
    Listener::attach(query.into(), "change", closure)
}
