use crate::WebContext;
use hero_core::{FrameHandle, FrameHost};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` as a `FrameHost`. Every request reuses the same
/// JS callback; `requested` holds the id of the outstanding request so the
/// callback can report which handle fired.
#[derive(Clone)]
pub struct WebFrameHost {
    window: web::Window,
    tick: TickClosure,
    requested: Rc<Cell<Option<FrameHandle>>>,
}

impl FrameHost for WebFrameHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let tick = self.tick.borrow();
        let closure = tick.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => {
                let handle = FrameHandle(id as i64);
                self.requested.set(Some(handle));
                Some(handle)
            }
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0 as i32);
        if self.requested.get() == Some(handle) {
            self.requested.set(None);
        }
    }
}

impl WebFrameHost {
    /// Id of the request now firing; clears it.
    fn fire(&self) -> Option<FrameHandle> {
        self.requested.take()
    }

    /// Drop the JS callback. Only call once the scheduler is stopped.
    pub fn teardown(&self) {
        self.requested.set(None);
        self.tick.borrow_mut().take();
    }
}

/// Build the tick callback for `ctx` and return the host that schedules it.
pub fn install_loop(ctx: Rc<RefCell<WebContext>>, window: web::Window) -> WebFrameHost {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let host = WebFrameHost {
        window,
        tick: tick.clone(),
        requested: Rc::new(Cell::new(None)),
    };
    let mut tick_host = host.clone();
    let epoch = Instant::now();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(handle) = tick_host.fire() else {
            return;
        };
        let now = epoch.elapsed().as_secs_f64();
        ctx.borrow_mut().frame(handle, now, &mut tick_host);
    }) as Box<dyn FnMut()>));
    host
}
