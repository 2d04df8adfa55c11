use crate::camera::{Camera, Fog, Viewport};
use crate::config::TunnelConfig;
use crate::scene::TunnelScene;

/// Everything a frame reads or mutates, owned in one place and passed
/// explicitly to the loop and the renderer.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub config: TunnelConfig,
    pub scene: TunnelScene,
    pub camera: Camera,
    pub fog: Fog,
    pub viewport: Viewport,
}

impl RenderContext {
    pub fn new(config: TunnelConfig, viewport: Viewport) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("degenerate tunnel configuration: {e}");
        }
        let scene = TunnelScene::build(&config);
        let camera = Camera::for_tunnel(&config, viewport.aspect());
        let fog = Fog::for_tunnel(&config);
        log::debug!(
            "tunnel scene built: sections={} drawables/section={}",
            scene.sections.len(),
            scene.sections.first().map_or(0, |s| s.drawables.len())
        );
        Self {
            config,
            scene,
            camera,
            fog,
            viewport,
        }
    }

    /// Apply a new surface size; returns false if nothing changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport);
        true
    }
}
