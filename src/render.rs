use crate::constants::{CLEAR_RGB, INITIAL_LINE_CAPACITY, INITIAL_NODE_CAPACITY};
use crate::core::{Camera, SceneArena};
use web_sys as web;

mod helpers;
mod instances;
use instances::{pack_lines, pack_nodes, LineInstance, NodeInstance};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    viewport: [f32; 2],
    near_w: f32,
    _pad: f32,
}

/// Growable instance buffer; reallocated at double size when outgrown.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize, capacity: usize) -> Self {
        Self {
            label,
            buffer: helpers::create_instance_buffer(device, label, (stride * capacity) as u64),
            capacity,
            stride,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let count = bytes.len() / self.stride;
        if count > self.capacity {
            self.capacity = count.next_power_of_two();
            self.buffer = helpers::create_instance_buffer(
                device,
                self.label,
                (self.stride * self.capacity) as u64,
            );
            log::info!("[render] {} grown to {} instances", self.label, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    line_pipeline: wgpu::RenderPipeline,
    node_pipeline: wgpu::RenderPipeline,

    lines: InstanceBuffer,
    nodes: InstanceBuffer,
    line_scratch: Vec<LineInstance>,
    node_scratch: Vec<NodeInstance>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("twin_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::TWIN_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("twin_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let line_pipeline = helpers::make_instanced_pipeline(
            &device,
            "line_pipeline",
            &pl,
            &shader,
            ("vs_line", "fs_line"),
            LineInstance::layout(),
            format,
        );
        let node_pipeline = helpers::make_instanced_pipeline(
            &device,
            "node_pipeline",
            &pl,
            &shader,
            ("vs_node", "fs_node"),
            NodeInstance::layout(),
            format,
        );

        let lines = InstanceBuffer::new(
            &device,
            "line_instances",
            std::mem::size_of::<LineInstance>(),
            INITIAL_LINE_CAPACITY,
        );
        let nodes = InstanceBuffer::new(
            &device,
            "node_instances",
            std::mem::size_of::<NodeInstance>(),
            INITIAL_NODE_CAPACITY,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            line_pipeline,
            node_pipeline,
            lines,
            nodes,
            line_scratch: Vec::with_capacity(INITIAL_LINE_CAPACITY),
            node_scratch: Vec::with_capacity(INITIAL_NODE_CAPACITY),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw the arena as it currently stands. Never mutates the scene.
    pub fn render(&mut self, scene: &SceneArena, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let (right, up) = camera.basis();
        let globals = Globals {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            viewport: [self.width as f32, self.height as f32],
            near_w: camera.znear,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        pack_lines(scene, &mut self.line_scratch);
        pack_nodes(scene, &mut self.node_scratch);
        self.lines.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.line_scratch),
        );
        self.nodes.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.node_scratch),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            let line_count = self.line_scratch.len() as u32;
            if line_count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                rpass.draw(0..4, 0..line_count);
            }
            let node_count = self.node_scratch.len() as u32;
            if node_count > 0 {
                rpass.set_pipeline(&self.node_pipeline);
                rpass.set_vertex_buffer(0, self.nodes.buffer.slice(..));
                rpass.draw(0..4, 0..node_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
