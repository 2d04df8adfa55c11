//! Camera, fog and viewport sizing.
//!
//! These types avoid platform APIs so both frontends build the same matrices.

use crate::config::{Color, TunnelConfig};
use crate::constants::*;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera at the origin looking down -Z into the tunnel.
    pub fn for_tunnel(config: &TunnelConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR_FACTOR * config.tunnel_length,
        }
    }

    pub fn set_aspect(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Linear fog toward `color` between `near` and `far` view distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn for_tunnel(config: &TunnelConfig) -> Self {
        Self {
            color: config.background,
            near: FOG_NEAR,
            far: FOG_FAR_FACTOR * config.tunnel_length,
        }
    }

    /// 0 = unfogged, 1 = fully fog colored.
    pub fn factor(&self, distance: f32) -> f32 {
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

/// Backing-store size of the render surface in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Size a surface for a container measured in CSS pixels, capping the
    /// device pixel ratio at `MAX_PIXEL_RATIO`. Never returns a zero side.
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let ratio = capped_pixel_ratio(device_pixel_ratio);
        Self {
            width: ((css_width * ratio) as u32).max(1),
            height: ((css_height * ratio) as u32).max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
