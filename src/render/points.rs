use crate::constants::MIN_LAYER_CAPACITY;
use finale_core::PointBatch;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    pub(crate) position: [f32; 3],
    pub(crate) color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) cam_right: [f32; 4],
    pub(crate) cam_up: [f32; 4],
    pub(crate) tint: [f32; 4],
    pub(crate) params: [f32; 4],
}

const INSTANCE_ATTRIBS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

pub(crate) struct PointPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bgl: wgpu::BindGroupLayout,
}

pub(crate) fn create_point_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> PointPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(super::POINTS_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("points_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let additive = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("points_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_points"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRIBS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_points"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState {
                    color: additive,
                    alpha: additive,
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    PointPipeline { pipeline, bgl }
}

/// GPU state for one scene layer: an instance buffer sized in powers of two
/// and the layer's own uniforms.
pub(crate) struct PointLayer {
    pub(crate) instances: wgpu::Buffer,
    pub(crate) capacity: usize,
    pub(crate) count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) uploaded: bool,
}

impl PointLayer {
    pub(crate) fn new(device: &wgpu::Device, pipeline: &PointPipeline, count: usize) -> Self {
        let capacity = layer_capacity(count);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("points_uniforms"),
            size: std::mem::size_of::<PointUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &pipeline.bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            instances: create_instance_buffer(device, capacity),
            capacity,
            count: 0,
            uniform_buffer,
            bind_group,
            uploaded: false,
        }
    }

    /// Grow the instance buffer if `count` no longer fits. Returns true when
    /// the buffer was replaced and needs a fresh upload.
    pub(crate) fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) -> bool {
        if count <= self.capacity {
            return false;
        }
        self.instances.destroy();
        self.capacity = layer_capacity(count);
        self.instances = create_instance_buffer(device, self.capacity);
        true
    }

    pub(crate) fn destroy(&self) {
        self.instances.destroy();
        self.uniform_buffer.destroy();
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("points_instances"),
        size: (capacity * std::mem::size_of::<PointInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn layer_capacity(count: usize) -> usize {
    count.max(MIN_LAYER_CAPACITY).next_power_of_two()
}

/// Interleave a batch's flat position/colour arrays into instance records.
pub(crate) fn fill_instances(out: &mut Vec<PointInstance>, batch: &PointBatch<'_>, count: usize) {
    out.clear();
    out.reserve(count);
    for i in 0..count {
        let o = i * 3;
        let position = [batch.positions[o], batch.positions[o + 1], batch.positions[o + 2]];
        let color = match batch.colors {
            Some(c) => [c[o], c[o + 1], c[o + 2]],
            None => [1.0, 1.0, 1.0],
        };
        out.push(PointInstance { position, color });
    }
}
