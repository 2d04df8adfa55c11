use instant::Instant;
use std::time::Duration;
use tunnel_core::{
    Debouncer, FrameRenderer, FrameScheduler, TunnelConfig, TunnelSession, Viewport,
    RESIZE_DEBOUNCE_MS,
};
use tunnel_render::TunnelRenderer;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

/// Frames are driven by winit redraw requests.
struct RedrawScheduler<'w> {
    window: &'w Window,
}

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

impl RedrawScheduler<'_> {
    fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport {
            width: size.width.max(1),
            height: size.height.max(1),
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Tunnel (native)")
        .with_inner_size(LogicalSize::new(960.0, 600.0))
        .build(&event_loop)
        .expect("window");
    let mut scheduler = RedrawScheduler { window: &window };

    let mut session = TunnelSession::new(TunnelConfig::default(), scheduler.viewport());
    let mut renderer =
        pollster::block_on(TunnelRenderer::new(&window, session.ctx())).expect("gpu");
    let mut resize = Debouncer::new(Duration::from_millis(RESIZE_DEBOUNCE_MS));

    session.start(Instant::now(), &mut scheduler);
    log::info!("space: start/stop, escape: quit");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(_) => resize.trigger(Instant::now()),
                WindowEvent::RedrawRequested => {
                    session.on_frame(Instant::now(), &mut renderer, &mut scheduler);
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match logical_key.as_ref() {
                    Key::Named(NamedKey::Space) => {
                        if !session.stop() {
                            session.start(Instant::now(), &mut scheduler);
                        }
                    }
                    Key::Named(NamedKey::Escape) => {
                        session.dispose(&mut renderer);
                        elwt.exit();
                    }
                    _ => {}
                },
                WindowEvent::CloseRequested => {
                    session.dispose(&mut renderer);
                    elwt.exit();
                }
                _ => {}
            },
            Event::AboutToWait => {
                if session.is_disposed() {
                    return;
                }
                let now = Instant::now();
                if resize.poll(now) {
                    let viewport = scheduler.viewport();
                    if session.resize(viewport) {
                        renderer.resize(viewport);
                        log::debug!("resized to {}x{}", viewport.width, viewport.height);
                        if !session.is_running() {
                            renderer.render(session.ctx());
                        }
                    }
                }
                match resize.remaining(now) {
                    Some(left) => elwt.set_control_flow(ControlFlow::WaitUntil(now + left)),
                    None => elwt.set_control_flow(ControlFlow::Wait),
                }
            }
            _ => {}
        })
        .expect("event loop run");
}
