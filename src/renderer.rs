use std::sync::Arc;

use log::{error, info, warn};
use winit::window::Window;

use crate::accumulation::ParameterSnapshot;
use crate::core::GpuContext;
use crate::error::{Result, TracerError};
use crate::shader_source::ShaderSource;
use crate::traits::ShaderHost;
use crate::types::{TracerUniform, UniformField};
use crate::uniforms::{SlotKind, UniformValue};

/// Per-frame values shown in the overlay
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_ms: f32,
    pub frame_counter: i32,
    pub snapshot: ParameterSnapshot,
}

/// A linked tracer program
struct Program {
    label: String,
    pipeline: wgpu::RenderPipeline,
}

/// wgpu shader host: owns the surface, the uniform block and the tracer
/// program, and draws one full-screen pass plus the egui overlay per frame.
pub struct TracerRenderer {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    uniform: TracerUniform,
    uniform_dirty: bool,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    program: Option<Program>,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    show_ui: bool,
}

impl TracerRenderer {
    /// Set up the GPU and try to build the tracer program.
    ///
    /// A program that fails to load or compile is logged and left out; the
    /// renderer still presents (a black frame) so the window stays responsive.
    pub async fn new(window: Arc<Window>, shader: &ShaderSource, show_ui: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| TracerError::Surface(e.to_string()))?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size)?;
        surface.configure(gpu.device(), &surface_config);

        let uniform = TracerUniform::default();
        let uniform_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Tracer Uniform Buffer"),
            size: std::mem::size_of::<TracerUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                    label: Some("tracer_bind_group_layout"),
                });

        let bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("tracer_bind_group"),
        });

        let program = match Self::build_program(
            gpu.device(),
            &bind_group_layout,
            surface_config.format,
            shader,
        ) {
            Ok(program) => {
                info!("Linked shader program {}", program.label);
                Some(program)
            }
            Err(e) => {
                error!("{}", e);
                None
            }
        };

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            gpu.device(),
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        info!("Renderer initialized: {}x{}", size.width, size.height);

        Ok(Self {
            window,
            gpu,
            surface,
            surface_config,
            uniform,
            uniform_dirty: true,
            uniform_buffer,
            bind_group,
            program,
            egui_renderer,
            egui_state,
            egui_ctx,
            show_ui,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| TracerError::Surface("surface reports no formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    /// Compile the WGSL module and build the full-screen pipeline inside a
    /// validation error scope.
    fn build_program(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
        shader: &ShaderSource,
    ) -> Result<Program> {
        let label = shader.label();
        let text = shader.load()?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(text),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Tracer Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Tracer Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(TracerError::ShaderCompile(format!("{}: {}", label, err)));
        }

        Ok(Program { label, pipeline })
    }

    /// Reconfigure the surface. Zero sizes (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    /// Reconfigure with the current size, after the surface was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    /// Let egui see a window event. Returns true when egui consumed it.
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.show_ui && self.egui_state.on_window_event(&self.window, event).consumed
    }

    /// Drop the GPU program now. Later frames present black and uniform
    /// pushes become no-ops.
    pub fn release_program(&mut self) {
        if let Some(program) = self.program.take() {
            info!("Released shader program {}", program.label);
        }
    }

    pub fn program_label(&self) -> Option<&str> {
        self.program.as_ref().map(|p| p.label.as_str())
    }

    pub fn render(&mut self, stats: &FrameStats) -> std::result::Result<(), wgpu::SurfaceError> {
        if self.uniform_dirty {
            self.gpu.queue().write_buffer(
                &self.uniform_buffer,
                0,
                bytemuck::cast_slice(std::slice::from_ref(&self.uniform)),
            );
            self.uniform_dirty = false;
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Tracer Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Tracer Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if let Some(program) = &self.program {
                render_pass.set_pipeline(&program.pipeline);
                render_pass.set_bind_group(0, &self.bind_group, &[]);
                render_pass.draw(0..3, 0..1);
            }
        }

        if self.show_ui {
            self.draw_overlay(&mut encoder, &view, stats);
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn draw_overlay(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        stats: &FrameStats,
    ) {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let resolution = (self.surface_config.width, self.surface_config.height);
        let program = self.program_label().unwrap_or("none").to_string();
        let stats = *stats;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Tracer")
                .title_bar(true)
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .default_width(250.0)
                .show(ctx, |ui| {
                    ui.heading(
                        egui::RichText::new(format!("{:.0} FPS", stats.fps))
                            .size(32.0)
                            .color(egui::Color32::from_rgb(74, 158, 255)),
                    );
                    ui.label(
                        egui::RichText::new(format!("{:.2} ms", stats.frame_ms))
                            .size(14.0)
                            .color(egui::Color32::GRAY),
                    );

                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(5.0);

                    let snapshot = stats.snapshot;
                    ui.label(
                        egui::RichText::new("Camera")
                            .size(16.0)
                            .color(egui::Color32::from_rgb(100, 200, 100)),
                    );
                    ui.monospace(format!(
                        "Pos: ({:.2}, {:.2}, {:.2})",
                        snapshot.ray_origin.x, snapshot.ray_origin.y, snapshot.ray_origin.z
                    ));
                    ui.monospace(format!(
                        "Dir: ({:.2}, {:.2}, {:.2})",
                        snapshot.forward_dir.x, snapshot.forward_dir.y, snapshot.forward_dir.z
                    ));
                    ui.monospace(format!("FOV: {:.1}°", snapshot.fov_deg));

                    ui.add_space(5.0);
                    ui.separator();
                    ui.add_space(5.0);

                    ui.label(
                        egui::RichText::new("Accumulation")
                            .size(16.0)
                            .color(egui::Color32::from_rgb(200, 100, 200)),
                    );
                    ui.monospace(snapshot.to_string());
                    ui.monospace(format!("Frames: {}", stats.frame_counter));
                    ui.monospace(format!("Time: {:.2}s", snapshot.time));
                    ui.monospace(format!("Resolution: {}x{}", resolution.0, resolution.1));
                    ui.monospace(format!("Program: {}", program));
                });
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(self.gpu.device(), self.gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            self.gpu.device(),
            self.gpu.queue(),
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

impl ShaderHost for TracerRenderer {
    type Slot = UniformField;

    fn has_program(&self) -> bool {
        self.program.is_some()
    }

    fn resolve_slot(&self, name: &str) -> Option<(UniformField, SlotKind)> {
        self.program.as_ref()?;
        UniformField::from_name(name).map(|field| (field, field.kind()))
    }

    fn write_slot(&mut self, slot: UniformField, value: UniformValue) {
        if self.uniform.write(slot, value) {
            self.uniform_dirty = true;
        } else {
            warn!("Ignored {:?} value for uniform {}", value.kind(), slot.name());
        }
    }
}

impl Drop for TracerRenderer {
    fn drop(&mut self) {
        self.release_program();
    }
}
