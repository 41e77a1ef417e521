use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use log::{error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window as WinitWindow, WindowId},
};

use progressive_tracer::cli::Cli;
use progressive_tracer::config::AppConfig;
use progressive_tracer::core::{Action, Clock, FpsCounter, InputTracker, WinitController};
use progressive_tracer::renderer::{FrameStats, TracerRenderer};
use progressive_tracer::shader_source::ShaderSource;
use progressive_tracer::traits::WindowContext;
use progressive_tracer::window::Window;
use progressive_tracer::{AccumulationController, Camera, UniformSync};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    config: AppConfig,
    shader: ShaderSource,
    window: Option<Window>,
    renderer: Option<TracerRenderer>,
    sync: Option<UniformSync<TracerRenderer>>,
    controller: WinitController,
    tracker: InputTracker,
    camera: Camera,
    accumulation: AccumulationController,
    clock: Clock,
    fps: FpsCounter,
}

impl App {
    fn new(config: AppConfig, shader: ShaderSource) -> Self {
        let camera = Camera::new(&config.camera, config.window.width, config.window.height);
        let accumulation = AccumulationController::new(&config.accumulation);
        let tracker = InputTracker::new(config.bindings.clone());

        Self {
            config,
            shader,
            window: None,
            renderer: None,
            sync: None,
            controller: WinitController::new(),
            tracker,
            camera,
            accumulation,
            clock: Clock::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn viewport(&self) -> Vec2 {
        let (width, height) = self.camera.viewport();
        Vec2::new(width as f32, height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        if self.camera.resize(width, height) {
            self.accumulation.invalidate();
            let viewport = self.viewport();
            if let (Some(renderer), Some(sync)) = (&mut self.renderer, &self.sync) {
                sync.update_viewport(renderer, viewport);
            }
            info!("Viewport resized to {}x{}", width, height);
        }
    }

    /// One frame: input, camera, accumulation, uniforms, draw, cursor, title
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.clock.tick();
        let input = self.tracker.snapshot(&self.controller);

        if input.pressed(Action::Quit) {
            self.shutdown(event_loop);
            return;
        }

        let update = self.camera.update(delta, &input);
        let snapshot = self
            .accumulation
            .update(delta, update.moved, &input, self.camera.pose());
        trace!("{}", snapshot);

        let new_fps = self.fps.tick(delta);
        let mut fatal = false;

        if let Some(renderer) = &mut self.renderer {
            if let Some(sync) = &self.sync {
                sync.push(renderer, &snapshot);
            }

            let stats = FrameStats {
                fps: self.fps.fps(),
                frame_ms: self.fps.frame_ms(),
                frame_counter: self.accumulation.frame_counter(),
                snapshot,
            };
            match renderer.render(&stats) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("Surface out of memory, exiting");
                    fatal = true;
                }
                Err(e) => warn!("Render error: {}", e),
            }
        }
        if fatal {
            self.shutdown(event_loop);
            return;
        }

        if let Some(window) = &self.window {
            window.set_cursor_mode(update.cursor);
            if let Some(fps) = new_fps {
                window.set_title(&format!("FPS: {:.0} ({:.2}ms)", fps, self.fps.frame_ms()));
            }
        }

        self.controller.reset_deltas();
    }

    /// Release the GPU program before the window goes away
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.sync = None;
        if let Some(renderer) = &mut self.renderer {
            renderer.release_program();
        }
        info!("Shutting down after {} frames", self.clock.frame_number());
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WinitWindow::default_attributes()
                .with_title(self.config.window.title.as_str())
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut renderer = match pollster::block_on(TracerRenderer::new(
            window.clone(),
            &self.shader,
            self.config.window.show_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera.resize(size.width, size.height);

        self.sync = match UniformSync::link(&mut renderer, self.viewport()) {
            Ok(sync) => Some(sync),
            Err(e) => {
                error!("Uniforms not linked: {}", e);
                None
            }
        };

        self.window = Some(Window::new(window));
        self.renderer = Some(renderer);
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let overlay_consumed = match &mut self.renderer {
            Some(renderer) => renderer.handle_event(&event),
            None => false,
        };
        self.controller.route_event(&event, overlay_consumed);

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.controller.accumulate_raw_delta(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.app_config().context("Failed to load configuration")?;
    let shader = cli.shader_source();

    info!("Controls: {}", config.bindings.describe());

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, shader);
    event_loop.run_app(&mut app).context("Event loop failed")?;

    Ok(())
}
