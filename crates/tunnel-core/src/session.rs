//! Lifecycle of one mounted tunnel, shared by the web handle and the native
//! window: the frame context, its loop and the disposed latch.

use crate::animation::{AnimationLoop, FrameOutcome, FrameRenderer, FrameScheduler};
use crate::camera::Viewport;
use crate::config::TunnelConfig;
use crate::context::RenderContext;
use crate::scene::ResourceRelease;
use instant::Instant;

#[derive(Debug)]
pub struct TunnelSession {
    ctx: RenderContext,
    anim: AnimationLoop,
    disposed: bool,
}

impl TunnelSession {
    pub fn new(config: TunnelConfig, viewport: Viewport) -> Self {
        Self {
            ctx: RenderContext::new(config, viewport),
            anim: AnimationLoop::new(),
            disposed: false,
        }
    }

    pub fn ctx(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn anim(&self) -> &AnimationLoop {
        &self.anim
    }

    pub fn is_running(&self) -> bool {
        self.anim.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Begin or resume. False while running and always false once disposed.
    pub fn start(&mut self, now: Instant, scheduler: &mut impl FrameScheduler) -> bool {
        if self.disposed {
            return false;
        }
        let started = self.anim.start(now, scheduler);
        if started {
            log::info!("tunnel started");
        }
        started
    }

    pub fn stop(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let stopped = self.anim.stop();
        if stopped {
            log::info!("tunnel stopped after {} frames", self.anim.frames());
        }
        stopped
    }

    /// One refresh callback. A callback arriving after `dispose` halts.
    pub fn on_frame(
        &mut self,
        now: Instant,
        renderer: &mut impl FrameRenderer,
        scheduler: &mut impl FrameScheduler,
    ) -> FrameOutcome {
        if self.disposed {
            self.anim.clear_pending();
            return FrameOutcome::Halted;
        }
        self.anim.on_frame(now, &mut self.ctx, renderer, scheduler)
    }

    /// Host dropped the outstanding callback without running it.
    pub fn clear_pending(&mut self) {
        self.anim.clear_pending();
    }

    /// Apply a new surface size; false if unchanged or disposed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        !self.disposed && self.ctx.resize(viewport)
    }

    /// Stop the loop and hand every section resource to `sink`. Only the
    /// first call releases anything; later calls return 0.
    pub fn dispose(&mut self, sink: &mut impl ResourceRelease) -> usize {
        if self.disposed {
            log::warn!("dispose called on an already disposed tunnel");
            return 0;
        }
        self.anim.stop();
        let released = self.ctx.scene.dispose(sink);
        self.disposed = true;
        log::info!("tunnel disposed, {released} scene resources released");
        released
    }
}
