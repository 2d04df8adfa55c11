//! The frame loop: a two-state machine driven by an external refresh
//! scheduler.
//!
//! The loop never schedules more than one callback at a time. `start` only
//! requests a frame when none is outstanding, and `on_frame` checks the state
//! on entry, so a `stop` takes effect at the next callback without aborting
//! one already running.

use crate::clock::FrameClock;
use crate::config::TunnelConfig;
use crate::context::RenderContext;
use crate::fade::distance_opacity;
use crate::scene::TunnelScene;
use instant::Instant;
use std::time::Duration;

/// Host hook that arranges for `AnimationLoop::on_frame` to run at the next
/// display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Draws the scene with the context's camera.
pub trait FrameRenderer {
    fn render(&mut self, ctx: &RenderContext);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Scene advanced, rendered and the next frame requested.
    Rendered { delta: Duration },
    /// Loop was stopped; nothing rendered, nothing rescheduled.
    Halted,
}

#[derive(Debug, Default)]
pub struct AnimationLoop {
    state: LoopState,
    clock: FrameClock,
    frame_pending: bool,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Whether a callback has been requested and has not run yet.
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Frames rendered since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Stopped -> Running. Returns false (and does nothing) if already running.
    pub fn start(&mut self, now: Instant, scheduler: &mut impl FrameScheduler) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        self.clock.reset(now);
        // A callback left over from before `stop` is still queued; it will
        // observe Running and carry the loop on.
        if !self.frame_pending {
            self.frame_pending = true;
            scheduler.request_frame();
        }
        true
    }

    /// Running -> Stopped. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Stopped;
        true
    }

    /// Host forgot about the outstanding callback (e.g. cancelled it).
    pub fn clear_pending(&mut self) {
        self.frame_pending = false;
    }

    /// Body of one display-refresh callback.
    pub fn on_frame(
        &mut self,
        now: Instant,
        ctx: &mut RenderContext,
        renderer: &mut impl FrameRenderer,
        scheduler: &mut impl FrameScheduler,
    ) -> FrameOutcome {
        self.frame_pending = false;
        if !self.is_running() {
            return FrameOutcome::Halted;
        }
        let delta = self.clock.delta(now);

        advance_sections(&mut ctx.scene, &ctx.config);
        renderer.render(ctx);
        self.frames += 1;

        if self.is_running() {
            self.frame_pending = true;
            scheduler.request_frame();
        }
        FrameOutcome::Rendered { delta }
    }
}

/// Move `offset` forward by `speed`, wrapping to `wrap_to` once it reaches
/// `section_length`.
#[inline]
pub fn advance_offset(offset: f32, speed: f32, section_length: f32, wrap_to: f32) -> f32 {
    let next = offset + speed;
    if next >= section_length {
        wrap_to
    } else {
        next
    }
}

/// One frame of scrolling: advance and wrap every section, then write each
/// drawable's distance fade into the material it references.
pub fn advance_sections(scene: &mut TunnelScene, config: &TunnelConfig) {
    let section_length = config.section_length();
    let wrap_to = config.wrap_offset();
    for section in &mut scene.sections {
        section.offset = advance_offset(section.offset, config.scroll_speed, section_length, wrap_to);
        let offset = section.offset;
        for drawable in &section.drawables {
            let distance = (drawable.local_z + offset).abs();
            section.materials[drawable.material.0].opacity =
                distance_opacity(distance, config.tunnel_length);
        }
    }
}
