//! CPU-side packing of the scene into GPU buffers.
//!
//! Kept free of device handles so it can be tested on the host.

use smallvec::SmallVec;
use std::ops::Range;
use tunnel_core::{GeometryId, RenderContext, Topology, TunnelScene};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub fog_color: [f32; 4],
    pub fog_near: f32,
    pub fog_far: f32,
    pub _pad: [f32; 2],
}

impl SceneUniforms {
    pub fn from_context(ctx: &RenderContext) -> Self {
        let view = ctx.camera.view_matrix();
        let proj = ctx.camera.projection_matrix();
        let [r, g, b] = ctx.fog.color.to_rgb();
        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            fog_color: [r, g, b, 1.0],
            fog_near: ctx.fog.near,
            fog_far: ctx.fog.far,
            _pad: [0.0; 2],
        }
    }
}

/// Per-drawable data: material color with opacity in `w`, and the world
/// axial position (`local_z + section offset`).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub color: [f32; 4],
    pub z_offset: f32,
    pub _pad: [f32; 3],
}

/// One instanced draw of a section's geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRange {
    pub section: usize,
    pub geometry: GeometryId,
    pub topology: Topology,
    pub vertex_count: u32,
    pub instances: Range<u32>,
}

pub type DrawList = SmallVec<[DrawRange; 8]>;

/// Fill `out` with one instance per drawable, grouped so each section's
/// geometry is drawn with a single instanced call. Opacity is read from the
/// material each drawable references at the time of the call.
pub fn pack_instances(scene: &TunnelScene, out: &mut Vec<InstanceData>) -> DrawList {
    out.clear();
    let mut draws = DrawList::new();
    for (s, section) in scene.sections.iter().enumerate() {
        for (g, geometry) in section.geometries.iter().enumerate() {
            let start = out.len() as u32;
            for d in section.drawables.iter().filter(|d| d.geometry.0 == g) {
                let material = section.material(d.material);
                let [r, gr, b] = material.color.to_rgb();
                out.push(InstanceData {
                    color: [r, gr, b, material.opacity],
                    z_offset: d.local_z + section.offset,
                    _pad: [0.0; 3],
                });
            }
            let end = out.len() as u32;
            if end > start {
                draws.push(DrawRange {
                    section: s,
                    geometry: GeometryId(g),
                    topology: geometry.topology,
                    vertex_count: geometry.vertices.len() as u32,
                    instances: start..end,
                });
            }
        }
    }
    draws
}
