// Host-side tests for configuration defaults, overrides and validation.

use tunnel_core::*;

#[test]
fn defaults_match_documented_values() {
    let c = TunnelConfig::default();
    assert_eq!(c.radius, 10.0);
    assert_eq!(c.angular_segments, 72);
    assert_eq!(c.ring_count, 60);
    assert_eq!(c.tunnel_length, 50.0);
    assert_eq!(c.scroll_speed, 0.03);
    assert_eq!(c.line_width, 1.5);
    assert_eq!(c.base_opacity, 0.5);
    assert_eq!(c.color, Color::BLACK);
    assert_eq!(c.section_buffer_count, 2);
    assert_eq!(c.circle_detail, 256);
    assert_eq!(c.material_sharing, MaterialSharing::PerSection);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_override_keeps_remaining_defaults() {
    let c: TunnelConfig =
        serde_json::from_str(r#"{ "radius": 4.5, "ringCount": 12, "scrollSpeed": 0.1 }"#)
            .expect("parse");
    assert_eq!(c.radius, 4.5);
    assert_eq!(c.ring_count, 12);
    assert_eq!(c.scroll_speed, 0.1);
    assert_eq!(c.tunnel_length, 50.0);
    assert_eq!(c.section_buffer_count, 2);
}

#[test]
fn empty_object_is_the_default_config() {
    let c: TunnelConfig = serde_json::from_str("{}").expect("parse");
    assert_eq!(c, TunnelConfig::default());
}

#[test]
fn colors_accept_numbers_and_css_hex() {
    let c: TunnelConfig =
        serde_json::from_str(r##"{ "color": 16711680, "background": "#00ff00" }"##).expect("parse");
    assert_eq!(c.color, Color::from_hex(0xff0000));
    assert_eq!(c.background, Color::from_hex(0x00ff00));
    assert_eq!(c.color.to_rgb(), [1.0, 0.0, 0.0]);

    assert_eq!(Color::parse_css("#abc"), Ok(Color::from_hex(0xaabbcc)));
    assert!(Color::parse_css("abc").is_err());
    assert!(Color::parse_css("#12345").is_err());
    assert!(Color::parse_css("#gggggg").is_err());

    let bad = serde_json::from_str::<TunnelConfig>(r#"{ "color": "red" }"#);
    assert!(bad.is_err());
}

#[test]
fn material_sharing_parses_camel_case() {
    let c: TunnelConfig =
        serde_json::from_str(r#"{ "materialSharing": "perDrawable" }"#).expect("parse");
    assert_eq!(c.material_sharing, MaterialSharing::PerDrawable);
}

#[test]
fn derived_lengths_follow_buffer_count() {
    let c = TunnelConfig {
        tunnel_length: 60.0,
        section_buffer_count: 3,
        ..TunnelConfig::default()
    };
    assert_eq!(c.section_length(), 20.0);
    assert_eq!(c.wrap_offset(), -40.0);

    let single = TunnelConfig {
        section_buffer_count: 1,
        ..TunnelConfig::default()
    };
    assert_eq!(single.wrap_offset(), 0.0);
}

#[test]
fn validate_reports_degenerate_values_without_rejecting() {
    let zero_length = TunnelConfig {
        tunnel_length: 0.0,
        ..TunnelConfig::default()
    };
    assert_eq!(
        zero_length.validate(),
        Err(ConfigError::NonPositive {
            field: "tunnelLength",
            value: 0.0
        })
    );

    let zero_buffers = TunnelConfig {
        section_buffer_count: 0,
        ..TunnelConfig::default()
    };
    assert_eq!(
        zero_buffers.validate(),
        Err(ConfigError::ZeroCount {
            field: "sectionBufferCount"
        })
    );

    let nan_radius = TunnelConfig {
        radius: f32::NAN,
        ..TunnelConfig::default()
    };
    assert!(matches!(
        nan_radius.validate(),
        Err(ConfigError::NonPositive { field: "radius", .. })
    ));

    // a degenerate config still builds a context
    let ctx = RenderContext::new(
        zero_buffers,
        Viewport {
            width: 10,
            height: 10,
        },
    );
    assert!(ctx.scene.sections.is_empty());
}
