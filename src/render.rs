use crate::constants::{MAX_LAYER_INSTANCES, SPRITE_SOFTNESS};
use finale_core::color::Rgb;
use finale_core::{Camera, FlashDraw, LayerId, PointBatch, RenderBackend};
use fnv::FnvHashMap;
use glam::Vec4;
use web_sys as web;

mod flash;
mod points;

use flash::{create_flash_resources, FlashResources, FlashUniforms};
use points::{create_point_pipeline, fill_instances, PointInstance, PointLayer, PointPipeline, PointUniforms};

// Shaders bundled as string constants
pub(crate) static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub(crate) static FLASH_WGSL: &str = include_str!("../shaders/flash.wgsl");

enum DrawItem {
    Points(LayerId),
    Flash,
}

struct FrameInProgress {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    clear: wgpu::Color,
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

/// WebGPU backend: additive instanced point sprites per scene layer plus a
/// full-screen flash, drawn into the canvas swapchain in one pass.
pub struct GpuRenderer {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    points: PointPipeline,
    layers: FnvHashMap<LayerId, PointLayer>,
    flash: FlashResources,

    scratch: Vec<PointInstance>,
    draws: Vec<DrawItem>,
    frame: Option<FrameInProgress>,

    width: u32,
    height: u32,
    detached: bool,
}

impl GpuRenderer {
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

        let points = create_point_pipeline(&device, format);
        let flash = create_flash_resources(&device, format);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            points,
            layers: FnvHashMap::default(),
            flash,
            scratch: Vec::new(),
            draws: Vec::new(),
            frame: None,
            width,
            height,
            detached: false,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl RenderBackend for GpuRenderer {
    fn surface_size(&self) -> Option<(u32, u32)> {
        if self.detached {
            return None;
        }
        Some((self.width, self.height))
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.detached || width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    fn begin_frame(&mut self, camera: &Camera, clear: Rgb) {
        self.frame = None;
        self.draws.clear();
        if self.detached {
            return;
        }
        let texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("render error: {:?}", e);
                return;
            }
        };
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let view_matrix = camera.view_matrix();
        let right = view_matrix.row(0).truncate();
        let up = view_matrix.row(1).truncate();
        self.frame = Some(FrameInProgress {
            texture,
            view,
            clear: wgpu::Color {
                r: clear[0] as f64,
                g: clear[1] as f64,
                b: clear[2] as f64,
                a: 1.0,
            },
            view_proj: camera.view_projection().to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
        });
    }

    fn draw_points(&mut self, batch: &PointBatch<'_>) -> bool {
        let count = batch.count().min(MAX_LAYER_INSTANCES);
        if self.detached || !batch.style.visible || count == 0 {
            return false;
        }
        let layer = self
            .layers
            .entry(batch.layer)
            .or_insert_with(|| PointLayer::new(&self.device, &self.points, count));
        let grown = layer.ensure_capacity(&self.device, count);
        if batch.dirty || grown || !layer.uploaded {
            fill_instances(&mut self.scratch, batch, count);
            self.queue
                .write_buffer(&layer.instances, 0, bytemuck::cast_slice(&self.scratch));
            layer.uploaded = true;
        }
        layer.count = count as u32;

        // Instances stay current even when the swapchain texture was lost.
        let Some(frame) = &self.frame else {
            return true;
        };
        let style = batch.style;
        let uniforms = PointUniforms {
            view_proj: frame.view_proj,
            model: batch.model.to_cols_array_2d(),
            cam_right: frame.cam_right,
            cam_up: frame.cam_up,
            tint: Vec4::new(style.color[0], style.color[1], style.color[2], style.opacity)
                .to_array(),
            params: [style.size, SPRITE_SOFTNESS, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&layer.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.draws.push(DrawItem::Points(batch.layer));
        true
    }

    fn draw_flash(&mut self, flash: &FlashDraw) {
        if self.frame.is_none() {
            return;
        }
        let uniforms = FlashUniforms {
            color: [flash.color[0], flash.color[1], flash.color[2], flash.opacity],
        };
        self.queue
            .write_buffer(&self.flash.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.draws.push(DrawItem::Flash);
    }

    fn end_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for item in &self.draws {
                match item {
                    DrawItem::Points(id) => {
                        let Some(layer) = self.layers.get(id) else {
                            continue;
                        };
                        rpass.set_pipeline(&self.points.pipeline);
                        rpass.set_bind_group(0, &layer.bind_group, &[]);
                        rpass.set_vertex_buffer(0, layer.instances.slice(..));
                        rpass.draw(0..6, 0..layer.count);
                    }
                    DrawItem::Flash => {
                        rpass.set_pipeline(&self.flash.pipeline);
                        rpass.set_bind_group(0, &self.flash.bind_group, &[]);
                        rpass.draw(0..3, 0..1);
                    }
                }
            }
        }
        self.draws.clear();
        self.queue.submit(Some(encoder.finish()));
        frame.texture.present();
    }

    fn release_layer(&mut self, layer: LayerId) {
        if let Some(gpu) = self.layers.remove(&layer) {
            gpu.destroy();
        }
    }

    fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.frame = None;
        self.draws.clear();
        for (_, gpu) in self.layers.drain() {
            gpu.destroy();
        }
        self.canvas.remove();
        log::info!("[gpu] detached from canvas");
    }
}
