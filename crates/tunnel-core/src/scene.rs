//! Retained scene model: sections of drawables that share geometry and
//! materials, recycled by offset wraparound instead of being rebuilt.

use crate::config::{Color, MaterialSharing, TunnelConfig};
use crate::geometry;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Consecutive vertices are connected.
    LineStrip,
    /// Every pair of vertices is an independent segment.
    LineList,
}

#[derive(Clone, Debug)]
pub struct Geometry {
    pub label: &'static str,
    pub topology: Topology,
    pub vertices: Vec<Vec3>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub line_width: f32,
    pub transparent: bool,
}

impl Material {
    pub fn line(config: &TunnelConfig) -> Self {
        Self {
            color: config.color,
            opacity: config.base_opacity,
            line_width: config.line_width,
            transparent: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawableKind {
    Ring,
    LongitudinalLines,
}

/// One draw of a geometry at a fixed axial position inside its section.
#[derive(Clone, Copy, Debug)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub local_z: f32,
}

#[derive(Clone, Debug)]
pub struct TunnelSection {
    pub offset: f32,
    pub geometries: Vec<Geometry>,
    pub materials: Vec<Material>,
    pub drawables: Vec<Drawable>,
}

impl TunnelSection {
    /// Build one section: `ring_count + 1` rings followed by one batch of
    /// longitudinal lines, all drawing from two shared geometries.
    pub fn build(config: &TunnelConfig, offset: f32) -> Self {
        let ring = Geometry {
            label: "ring_outline",
            topology: Topology::LineStrip,
            vertices: geometry::ring_outline(config.radius, config.circle_detail),
        };
        let lines = Geometry {
            label: "longitudinal_lines",
            topology: Topology::LineList,
            vertices: geometry::longitudinal_lines(
                config.radius,
                config.angular_segments,
                config.tunnel_length,
            ),
        };

        let ring_z = geometry::ring_positions(config.ring_count, config.tunnel_length);
        let drawable_count = ring_z.len() + 1;
        let material_count = match config.material_sharing {
            MaterialSharing::PerSection => 1,
            MaterialSharing::PerDrawable => drawable_count,
        };
        let material_of = |index: usize| MaterialId(index.min(material_count - 1));

        let mut drawables: Vec<Drawable> = ring_z
            .into_iter()
            .enumerate()
            .map(|(i, local_z)| Drawable {
                kind: DrawableKind::Ring,
                geometry: GeometryId(0),
                material: material_of(i),
                local_z,
            })
            .collect();
        drawables.push(Drawable {
            kind: DrawableKind::LongitudinalLines,
            geometry: GeometryId(1),
            material: material_of(drawable_count - 1),
            local_z: 0.0,
        });

        Self {
            offset,
            geometries: vec![ring, lines],
            materials: vec![Material::line(config); material_count],
            drawables,
        }
    }

    pub fn geometry(&self, id: GeometryId) -> &Geometry {
        &self.geometries[id.0]
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn ring_count(&self) -> usize {
        self.drawables
            .iter()
            .filter(|d| d.kind == DrawableKind::Ring)
            .count()
    }
}

/// Receives every GPU-side resource the scene hands back on disposal.
pub trait ResourceRelease {
    fn release_geometry(&mut self, section: usize, geometry: GeometryId);
    fn release_material(&mut self, section: usize, material: MaterialId);
}

#[derive(Clone, Debug)]
pub struct TunnelScene {
    pub sections: Vec<TunnelSection>,
    pub background: Color,
}

impl TunnelScene {
    /// Section `i` starts at offset `i * section_length`.
    pub fn build(config: &TunnelConfig) -> Self {
        let section_length = config.section_length();
        let sections = (0..config.section_buffer_count)
            .map(|i| TunnelSection::build(config, i as f32 * section_length))
            .collect();
        Self {
            sections,
            background: config.background,
        }
    }

    /// Remove every section and report each of its geometries and materials
    /// to `sink` once. Returns the number of resources released.
    pub fn dispose(&mut self, sink: &mut impl ResourceRelease) -> usize {
        let mut released = 0;
        for (index, section) in self.sections.drain(..).enumerate() {
            for g in 0..section.geometries.len() {
                sink.release_geometry(index, GeometryId(g));
                released += 1;
            }
            for m in 0..section.materials.len() {
                sink.release_material(index, MaterialId(m));
                released += 1;
            }
        }
        log::debug!("scene disposed, {released} resources released");
        released
    }
}
