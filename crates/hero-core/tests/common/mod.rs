// Test doubles for the frame host and renderer.

#![allow(dead_code)]
use hero_core::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Frame host that queues handles until the test fires them.
#[derive(Default)]
pub struct FakeHost {
    next: i64,
    pub live: Vec<FrameHandle>,
    pub requested: usize,
    pub cancelled: Vec<FrameHandle>,
}

impl FrameHost for FakeHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        let h = FrameHandle(self.next);
        self.live.push(h);
        self.requested += 1;
        Some(h)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.live.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

impl FakeHost {
    /// Everything due this frame; callbacks scheduled while firing wait
    /// for the next round.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.live)
    }
}

#[derive(Default, Debug)]
pub struct RenderLog {
    pub draws: Vec<GpuGlobals>,
    pub resizes: Vec<Viewport>,
    pub released: bool,
}

pub struct RecordingRenderer {
    pub log: Rc<RefCell<RenderLog>>,
}

impl PointRenderer for RecordingRenderer {
    fn resize(&mut self, viewport: Viewport) {
        self.log.borrow_mut().resizes.push(viewport);
    }

    fn draw(&mut self, globals: &GpuGlobals) -> HeroResult<()> {
        self.log.borrow_mut().draws.push(*globals);
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().released = true;
    }
}

pub fn small_config() -> HeroConfig {
    HeroConfig {
        grid: 8,
        extent: 4.0,
        ..HeroConfig::default()
    }
}

pub fn make_context() -> (RenderContext<RecordingRenderer>, Rc<RefCell<RenderLog>>) {
    let mut ctx = RenderContext::new(small_config(), Viewport::new(640, 320)).unwrap();
    let log = Rc::new(RefCell::new(RenderLog::default()));
    ctx.attach_renderer(RecordingRenderer { log: log.clone() });
    (ctx, log)
}

/// Fire every due callback once at `now`; returns how many fired.
pub fn run_round(ctx: &mut RenderContext<RecordingRenderer>, host: &mut FakeHost, now: f64) -> usize {
    let due = host.take_due();
    let n = due.len();
    for h in due {
        ctx.frame(h, now, host);
    }
    n
}
