//! Tunnel configuration.
//!
//! The record is built once and never mutated afterwards. Every field has a
//! default, and a partial override (for example a JavaScript object with only
//! `radius` set) deserializes into a full configuration.

use crate::constants::*;
use serde::Deserialize;
use thiserror::Error;

/// Problems that make the tunnel degenerate.
///
/// These are advisory: the effect still runs with such values and simply
/// draws nothing useful.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be greater than zero")]
    ZeroCount { field: &'static str },
    #[error("invalid color `{0}`, expected a number or a `#rrggbb` string")]
    InvalidColor(String),
}

/// A 24-bit `0xRRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color(u32);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Number(u32),
    Text(String),
}

impl TryFrom<ColorRepr> for Color {
    type Error = ConfigError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Number(hex) => Ok(Color::from_hex(hex)),
            ColorRepr::Text(text) => Color::parse_css(&text),
        }
    }
}

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    /// Build from a `0xRRGGBB` value; bits above 24 are dropped.
    pub const fn from_hex(hex: u32) -> Self {
        Color(hex & 0x00ff_ffff)
    }

    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse_css(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_owned());
        let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        let expanded: String = match digits.len() {
            6 => digits.to_owned(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Color::from_hex)
            .map_err(|_| invalid())
    }

    /// Linear 0..1 channels.
    pub fn to_rgb(self) -> [f32; 3] {
        let channel = |shift: u32| ((self.0 >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// How drawables of one section reference materials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialSharing {
    /// One material per section. Every drawable writes its fade into the
    /// same material, so the last drawable evaluated wins.
    #[default]
    PerSection,
    /// One material per drawable; each ring fades independently.
    PerDrawable,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TunnelConfig {
    pub radius: f32,
    pub angular_segments: u32,
    pub ring_count: u32,
    pub tunnel_length: f32,
    /// Axial advance applied once per frame.
    pub scroll_speed: f32,
    pub line_width: f32,
    pub base_opacity: f32,
    pub color: Color,
    pub section_buffer_count: u32,
    pub circle_detail: u32,
    /// Clear color, also used as the fog color.
    pub background: Color,
    pub material_sharing: MaterialSharing,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            angular_segments: DEFAULT_ANGULAR_SEGMENTS,
            ring_count: DEFAULT_RING_COUNT,
            tunnel_length: DEFAULT_TUNNEL_LENGTH,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            line_width: DEFAULT_LINE_WIDTH,
            base_opacity: DEFAULT_BASE_OPACITY,
            color: Color::from_hex(DEFAULT_COLOR),
            section_buffer_count: DEFAULT_SECTION_BUFFER_COUNT,
            circle_detail: DEFAULT_CIRCLE_DETAIL,
            background: Color::from_hex(DEFAULT_BACKGROUND),
            material_sharing: MaterialSharing::PerSection,
        }
    }
}

impl TunnelConfig {
    /// Axial span assigned to each buffered section.
    pub fn section_length(&self) -> f32 {
        self.tunnel_length / self.section_buffer_count as f32
    }

    /// Offset a section jumps back to once it scrolls past the camera.
    pub fn wrap_offset(&self) -> f32 {
        -self.section_length() * self.section_buffer_count.saturating_sub(1) as f32
    }

    /// Report the first value that would make the tunnel degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("radius", self.radius),
            ("tunnelLength", self.tunnel_length),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let counts = [
            ("angularSegments", self.angular_segments),
            ("ringCount", self.ring_count),
            ("sectionBufferCount", self.section_buffer_count),
            ("circleDetail", self.circle_detail),
        ];
        for (field, count) in counts {
            if count == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }
        Ok(())
    }
}
