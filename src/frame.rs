use crate::dom;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tunnel_core::{Debouncer, FrameOutcome, FrameScheduler, TunnelSession};
use tunnel_render::TunnelRenderer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: TunnelSession,
    pub gpu: Option<TunnelRenderer<'static>>,

    pub mount: web::HtmlElement,
    pub canvas: web::HtmlCanvasElement,
    pub resize: Debouncer,
    pub resize_timer_armed: bool,
}

impl FrameContext {
    pub fn frame(&mut self, scheduler: &mut RafScheduler) {
        let now = Instant::now();
        self.apply_resize_if_due(now);
        let Some(gpu) = self.gpu.as_mut() else {
            self.session.clear_pending();
            return;
        };
        if let FrameOutcome::Halted = self.session.on_frame(now, gpu, scheduler) {
            log::debug!("frame loop halted after {} frames", self.session.anim().frames());
        }
    }

    /// Resize surface and camera once the debounce window has closed.
    pub fn apply_resize_if_due(&mut self, now: Instant) {
        if self.session.is_disposed() || !self.resize.poll(now) {
            return;
        }
        let viewport = dom::measure(&self.mount);
        if self.session.resize(viewport) {
            dom::sync_canvas_backing_size(&self.canvas, viewport);
            if let Some(gpu) = self.gpu.as_mut() {
                gpu.resize(viewport);
            }
            log::debug!("resized to {}x{}", viewport.width, viewport.height);
        }
    }
}

/// Callback for any resize source: restart the debounce window and make
/// sure a timer will look at it.
pub fn resize_handler(state: Rc<RefCell<FrameContext>>) -> impl FnMut() + 'static {
    move || {
        state.borrow_mut().resize.trigger(Instant::now());
        arm_resize_timer(&state);
    }
}

/// Keep one timeout alive while a resize is pending. A timer that fires a
/// little early (coarse `performance.now()`) re-arms for the time left.
pub fn arm_resize_timer(state: &Rc<RefCell<FrameContext>>) {
    let delay = {
        let mut s = state.borrow_mut();
        if s.resize_timer_armed || s.session.is_disposed() {
            return;
        }
        let Some(left) = s.resize.remaining(Instant::now()) else {
            return;
        };
        s.resize_timer_armed = true;
        left
    };
    let state = state.clone();
    dom::set_timeout(delay.as_millis() as i32 + 1, move || {
        {
            let mut s = state.borrow_mut();
            s.resize_timer_armed = false;
            s.apply_resize_if_due(Instant::now());
        }
        arm_resize_timer(&state);
    });
}

/// Schedules the shared tick closure with `requestAnimationFrame` and keeps
/// the handle so a pending frame can be cancelled on disposal.
#[derive(Clone, Default)]
pub struct RafScheduler {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let Some(w) = web::window() else {
            log::error!("no window to schedule a frame on");
            return;
        };
        if let Some(tick) = self.tick.borrow().as_ref() {
            match w.request_animation_frame(tick.as_ref().unchecked_ref()) {
                Ok(id) => self.handle.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }
}

impl RafScheduler {
    /// Create the frame callback once; every frame reuses it.
    pub fn install(&self, state: Rc<RefCell<FrameContext>>) {
        let mut scheduler = self.clone();
        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            scheduler.handle.set(None);
            state.borrow_mut().frame(&mut scheduler);
        }) as Box<dyn FnMut()>));
    }

    /// Cancel a queued frame and drop the callback, breaking the
    /// closure -> scheduler -> closure cycle.
    pub fn shutdown(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}
