//! Frame scheduling as an explicit state machine.
//!
//! The host (browser `requestAnimationFrame`, a winit event loop, or a test
//! double) only has to hand out and cancel frame handles. The scheduler keeps
//! at most one handle pending, so repeated `start` calls can never grow a
//! second callback chain.

/// Opaque id of one scheduled host callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i64);

/// Whatever delivers "next frame" callbacks.
pub trait FrameHost {
    /// Ask for one callback. `None` means the host cannot schedule at all.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Cancel a callback previously returned by `request_frame`.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing scheduled. Initial and terminal.
    Idle,
    /// One frame callback is pending.
    Running,
    /// Suspended by reduced motion; the last frame stays on screen.
    Paused,
}

#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    pending: Option<FrameHandle>,
    last_tick: Option<f64>,
    ticks: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            pending: None,
            last_tick: None,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Idle/Paused → Running. Returns `false` (and does nothing) when
    /// already running or when the host refuses to schedule.
    pub fn start(&mut self, host: &mut impl FrameHost) -> bool {
        if self.state == SchedulerState::Running {
            return false;
        }
        // Time spent paused must not show up as one huge dt.
        self.last_tick = None;
        match host.request_frame() {
            Some(h) => {
                self.pending = Some(h);
                self.state = SchedulerState::Running;
                log::info!("[frame] running");
                true
            }
            None => {
                log::warn!("[frame] host could not schedule a frame");
                false
            }
        }
    }

    /// Running → Paused. No-op in any other state.
    pub fn pause(&mut self, host: &mut impl FrameHost) -> bool {
        if self.state != SchedulerState::Running {
            return false;
        }
        self.cancel_pending(host);
        self.state = SchedulerState::Paused;
        log::info!("[frame] paused");
        true
    }

    /// Any state → Idle.
    pub fn stop(&mut self, host: &mut impl FrameHost) {
        self.cancel_pending(host);
        self.last_tick = None;
        if self.state != SchedulerState::Idle {
            log::info!("[frame] stopped");
        }
        self.state = SchedulerState::Idle;
    }

    /// Consume the callback `handle` fired at `now_sec`. Returns the tick's
    /// `dt` in seconds, or `None` for a stale or unexpected callback.
    pub fn begin_frame(&mut self, handle: FrameHandle, now_sec: f64) -> Option<f32> {
        if self.state != SchedulerState::Running || self.pending != Some(handle) {
            log::debug!("[frame] ignoring stale callback {:?}", handle);
            return None;
        }
        self.pending = None;
        let dt = match self.last_tick {
            Some(prev) => (now_sec - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.last_tick = Some(now_sec);
        self.ticks += 1;
        Some(dt)
    }

    /// Re-arm after a tick, unless a pause/stop happened during it.
    pub fn end_frame(&mut self, host: &mut impl FrameHost) {
        if self.state != SchedulerState::Running || self.pending.is_some() {
            return;
        }
        match host.request_frame() {
            Some(h) => self.pending = Some(h),
            None => {
                log::warn!("[frame] host stopped scheduling; going idle");
                self.state = SchedulerState::Idle;
            }
        }
    }

    fn cancel_pending(&mut self, host: &mut impl FrameHost) {
        if let Some(h) = self.pending.take() {
            host.cancel_frame(h);
        }
    }
}
