use crate::constants::{EDGE_PX_PER_THICKNESS, SEGMENT_ALPHA_GAIN, SEGMENT_THICKNESS_PX};
use crate::core::constants::NODE_RADIUS;
use crate::core::SceneArena;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LineInstance {
    pub(crate) start: [f32; 4],
    pub(crate) end: [f32; 4],
    pub(crate) color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct NodeInstance {
    pub(crate) center: [f32; 4],
    pub(crate) color: [f32; 4],
}

impl LineInstance {
    pub(crate) const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x4];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

impl NodeInstance {
    pub(crate) const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Edges first, then digit segments, so segments draw on top.
pub(crate) fn pack_lines(scene: &SceneArena, out: &mut Vec<LineInstance>) {
    out.clear();
    out.extend(scene.edges().map(|e| LineInstance {
        start: e.start.extend(e.thickness * EDGE_PX_PER_THICKNESS).to_array(),
        end: e.end.extend(0.0).to_array(),
        color: [e.color[0], e.color[1], e.color[2], e.opacity],
    }));
    out.extend(scene.segments().map(|s| {
        let glow = 0.5 + s.intensity.min(1.0) * 0.5;
        LineInstance {
            start: s.start.extend(SEGMENT_THICKNESS_PX).to_array(),
            end: s.end.extend(0.0).to_array(),
            color: [
                s.color[0] * glow,
                s.color[1] * glow,
                s.color[2] * glow,
                (s.intensity * SEGMENT_ALPHA_GAIN).clamp(0.0, 1.0),
            ],
        }
    }));
}

pub(crate) fn pack_nodes(scene: &SceneArena, out: &mut Vec<NodeInstance>) {
    out.clear();
    out.extend(scene.nodes().map(|n| NodeInstance {
        center: n.position.extend(NODE_RADIUS).to_array(),
        color: [n.color[0], n.color[1], n.color[2], n.emissive_intensity],
    }));
}
