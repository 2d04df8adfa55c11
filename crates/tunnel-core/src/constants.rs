// Shared tuning constants used by both web and native frontends.

// Tunnel defaults
pub const DEFAULT_RADIUS: f32 = 10.0;
pub const DEFAULT_ANGULAR_SEGMENTS: u32 = 72;
pub const DEFAULT_RING_COUNT: u32 = 60;
pub const DEFAULT_TUNNEL_LENGTH: f32 = 50.0;
pub const DEFAULT_SCROLL_SPEED: f32 = 0.03; // world units per frame, not per second
pub const DEFAULT_LINE_WIDTH: f32 = 1.5;
pub const DEFAULT_BASE_OPACITY: f32 = 0.5;
pub const DEFAULT_COLOR: u32 = 0x000000;
pub const DEFAULT_BACKGROUND: u32 = 0xffffff;
pub const DEFAULT_SECTION_BUFFER_COUNT: u32 = 2;
pub const DEFAULT_CIRCLE_DETAIL: u32 = 256;

// Sample points along each longitudinal line
pub const LONGITUDINAL_SAMPLES: u32 = 201;

// Distance fade
pub const FADE_RANGE_FACTOR: f32 = 0.7; // fraction of the tunnel length the fade spans
pub const FADE_EXPONENT: f32 = 1.5;
pub const FADE_MIN_OPACITY: f32 = 0.2;
pub const FADE_MAX_OPACITY: f32 = 0.7;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR_FACTOR: f32 = 1.5; // far plane = factor * tunnel length

// Fog
pub const FOG_NEAR: f32 = 1.0;
pub const FOG_FAR_FACTOR: f32 = 0.8; // fully fogged at factor * tunnel length

// Surface
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const RESIZE_DEBOUNCE_MS: u64 = 100;
