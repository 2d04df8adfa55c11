// Host-side tests for section building and disposal.

use std::collections::HashMap;
use tunnel_core::*;

#[derive(Default)]
struct CountingSink {
    geometries: HashMap<(usize, GeometryId), usize>,
    materials: HashMap<(usize, MaterialId), usize>,
}

impl ResourceRelease for CountingSink {
    fn release_geometry(&mut self, section: usize, geometry: GeometryId) {
        *self.geometries.entry((section, geometry)).or_default() += 1;
    }
    fn release_material(&mut self, section: usize, material: MaterialId) {
        *self.materials.entry((section, material)).or_default() += 1;
    }
}

#[test]
fn default_scene_has_two_sections_at_zero_and_section_length() {
    let config = TunnelConfig::default();
    assert_eq!(config.section_length(), 25.0);
    let scene = TunnelScene::build(&config);
    assert_eq!(scene.sections.len(), 2);
    assert_eq!(scene.sections[0].offset, 0.0);
    assert_eq!(scene.sections[1].offset, 25.0);
    assert_eq!(scene.background, Color::WHITE);
}

#[test]
fn section_has_ring_count_plus_one_rings_and_one_line_batch() {
    let config = TunnelConfig::default();
    let section = TunnelSection::build(&config, 0.0);
    assert_eq!(section.ring_count(), 61);
    assert_eq!(section.drawables.len(), 62);
    let last = section.drawables.last().map(|d| d.kind);
    assert_eq!(last, Some(DrawableKind::LongitudinalLines));
    let half = config.tunnel_length / 2.0;
    for d in section.drawables.iter().filter(|d| d.kind == DrawableKind::Ring) {
        assert!(d.local_z >= -half - 1e-4 && d.local_z <= half + 1e-4);
    }
}

#[test]
fn rings_share_one_geometry_and_one_material() {
    let config = TunnelConfig::default();
    let section = TunnelSection::build(&config, 0.0);
    assert_eq!(section.geometries.len(), 2);
    assert_eq!(section.materials.len(), 1);
    for d in &section.drawables {
        assert_eq!(d.material, MaterialId(0));
    }
    let ring_geometry = section.geometry(GeometryId(0));
    assert_eq!(ring_geometry.topology, Topology::LineStrip);
    assert_eq!(ring_geometry.vertices.len(), 257);
    let material = section.material(MaterialId(0));
    assert_eq!(material.opacity, 0.5);
    assert_eq!(material.line_width, 1.5);
    assert_eq!(material.color, Color::BLACK);
    assert!(material.transparent);
}

#[test]
fn all_sections_are_identical_except_offset() {
    let config = TunnelConfig {
        section_buffer_count: 4,
        ring_count: 8,
        ..TunnelConfig::default()
    };
    let scene = TunnelScene::build(&config);
    let first = &scene.sections[0];
    for (i, s) in scene.sections.iter().enumerate() {
        assert_eq!(s.offset, i as f32 * config.section_length());
        assert_eq!(s.drawables.len(), first.drawables.len());
        assert_eq!(s.materials, first.materials);
        for (a, b) in s.geometries.iter().zip(&first.geometries) {
            assert_eq!(a.vertices, b.vertices);
        }
    }
}

#[test]
fn per_drawable_sharing_gives_every_drawable_its_own_material() {
    let config = TunnelConfig {
        material_sharing: MaterialSharing::PerDrawable,
        ring_count: 5,
        ..TunnelConfig::default()
    };
    let section = TunnelSection::build(&config, 0.0);
    assert_eq!(section.materials.len(), section.drawables.len());
    for (i, d) in section.drawables.iter().enumerate() {
        assert_eq!(d.material, MaterialId(i));
    }
}

#[test]
fn dispose_releases_every_resource_exactly_once() {
    let config = TunnelConfig::default();
    let mut scene = TunnelScene::build(&config);
    let mut sink = CountingSink::default();
    let released = scene.dispose(&mut sink);

    assert_eq!(released, 2 * (2 + 1));
    assert_eq!(sink.geometries.len(), 4);
    assert_eq!(sink.materials.len(), 2);
    assert!(sink.geometries.values().all(|&n| n == 1));
    assert!(sink.materials.values().all(|&n| n == 1));
    assert!(scene.sections.is_empty());

    // nothing left to release a second time
    assert_eq!(scene.dispose(&mut sink), 0);
    assert!(sink.geometries.values().all(|&n| n == 1));
}
