//! Instanced link-line rendering.
//!
//! Every link becomes one instance; the vertex shader builds a thin quad
//! from the segment endpoints and a perpendicular offset of half the
//! stroke width. Alpha fades per instance with pair distance.

use bytemuck::{Pod, Zeroable};

/// Per-line instance data, written every frame.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct LineInstance {
    /// First endpoint in surface coordinates.
    pub a: [f32; 2],
    /// Second endpoint in surface coordinates.
    pub b: [f32; 2],
    /// RGB stroke color.
    pub color: [f32; 3],
    /// Stroke opacity.
    pub alpha: f32,
    /// Stroke width in surface units.
    pub width: f32,
}

pub(super) const ATTRIBUTES: [wgpu::VertexAttribute; 5] = [
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x2, // a
    },
    wgpu::VertexAttribute {
        offset: 8,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x2, // b
    },
    wgpu::VertexAttribute {
        offset: 16,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x3, // color
    },
    wgpu::VertexAttribute {
        offset: 28,
        shader_location: 3,
        format: wgpu::VertexFormat::Float32, // alpha
    },
    wgpu::VertexAttribute {
        offset: 32,
        shader_location: 4,
        format: wgpu::VertexFormat::Float32, // width
    },
];

pub(super) fn create_pipeline(
    device: &wgpu::Device,
    uniform_bind_group_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Line Shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Line Pipeline Layout"),
        bind_group_layouts: &[uniform_bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Line Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &ATTRIBUTES,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

const SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) alpha: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) a: vec2<f32>,
    @location(1) b: vec2<f32>,
    @location(2) color: vec3<f32>,
    @location(3) alpha: f32,
    @location(4) width: f32,
) -> VertexOutput {
    let d = b - a;
    let len = length(d);

    // Coincident endpoints collapse to a zero-area quad.
    var dir = vec2<f32>(1.0, 0.0);
    if len > 1e-6 {
        dir = d / len;
    }
    let perp = vec2<f32>(-dir.y, dir.x) * width * 0.5;

    var pos: vec2<f32>;
    switch vertex_index {
        case 0u: { pos = a - perp; }
        case 1u: { pos = a + perp; }
        case 2u: { pos = b - perp; }
        case 3u: { pos = a + perp; }
        case 4u: { pos = b - perp; }
        default: { pos = b + perp; }
    }

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(pos, 0.0, 1.0);
    out.color = color;
    out.alpha = alpha;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, in.alpha);
}
"#;
