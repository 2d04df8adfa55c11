#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tunnel_core::{Debouncer, TunnelConfig, TunnelSession, RESIZE_DEBOUNCE_MS};
use tunnel_render::TunnelRenderer;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod frame;

use frame::{FrameContext, RafScheduler};

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tunnel-web loaded");
    Ok(())
}

/// Handle owned by JavaScript: one tunnel drawn into one mount element.
#[wasm_bindgen]
pub struct TunnelEffect {
    state: Rc<RefCell<FrameContext>>,
    scheduler: RafScheduler,
    resize_listener: Option<dom::ResizeListener>,
    mount_observer: Option<dom::MountObserver>,
}

#[wasm_bindgen]
impl TunnelEffect {
    /// Build the scene and GPU surface inside `mount`. `options` may be
    /// `undefined` or an object overriding any configuration field.
    pub async fn create(mount: web::HtmlElement, options: JsValue) -> Result<TunnelEffect, JsValue> {
        let config: TunnelConfig = if options.is_undefined() || options.is_null() {
            TunnelConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Self::build(mount, config)
            .await
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Begin or resume animating. No-op while running or after `dispose`.
    pub fn start(&self) {
        let mut scheduler = self.scheduler.clone();
        self.state
            .borrow_mut()
            .session
            .start(Instant::now(), &mut scheduler);
    }

    /// Pause animating. No-op while stopped or after `dispose`.
    pub fn stop(&self) {
        self.state.borrow_mut().session.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.state.borrow().session.is_running()
    }

    /// Stop, detach listeners and release GPU resources and the canvas.
    pub fn dispose(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.session.is_disposed() {
            log::warn!("dispose called on an already disposed tunnel");
            return;
        }
        if let Some(listener) = self.resize_listener.take() {
            listener.detach();
        }
        if let Some(observer) = self.mount_observer.take() {
            observer.disconnect();
        }
        state.resize.cancel();
        self.scheduler.shutdown();
        state.session.clear_pending();

        let state = &mut *state;
        if let Some(mut gpu) = state.gpu.take() {
            state.session.dispose(&mut gpu);
            // dropping the renderer releases the surface and device
        }
        state.canvas.remove();
    }
}

impl TunnelEffect {
    async fn build(mount: web::HtmlElement, config: TunnelConfig) -> anyhow::Result<Self> {
        let canvas = dom::create_canvas(&mount)?;
        let viewport = dom::measure(&mount);
        dom::sync_canvas_backing_size(&canvas, viewport);

        let session = TunnelSession::new(config, viewport);
        let gpu =
            TunnelRenderer::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), session.ctx()).await?;

        let state = Rc::new(RefCell::new(FrameContext {
            session,
            gpu: Some(gpu),
            mount,
            canvas,
            resize: Debouncer::new(Duration::from_millis(RESIZE_DEBOUNCE_MS)),
            resize_timer_armed: false,
        }));

        let scheduler = RafScheduler::default();
        scheduler.install(state.clone());

        // window resizes catch device pixel ratio changes, the observer
        // catches layout-only changes of the mount
        let resize_listener = dom::ResizeListener::attach(frame::resize_handler(state.clone()))?;
        let mount_observer = {
            let mount = state.borrow().mount.clone();
            dom::MountObserver::observe(&mount, frame::resize_handler(state.clone()))?
        };

        log::info!(
            "tunnel created: {}x{} sections={}",
            viewport.width,
            viewport.height,
            state.borrow().session.ctx().scene.sections.len()
        );
        Ok(Self {
            state,
            scheduler,
            resize_listener: Some(resize_listener),
            mount_observer: Some(mount_observer),
        })
    }
}

impl Drop for TunnelEffect {
    fn drop(&mut self) {
        if !self.state.borrow().session.is_disposed() {
            self.dispose();
        }
    }
}
