//! Window management via winit.
//!
//! Implements [`winit::application::ApplicationHandler`] to drive the event
//! loop: window and GPU creation, keyboard forwarding, resize, and the frame
//! itself (update the scene, draw it into a [`DrawList`], render the list).

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::config::GameConfig;
use crate::draw::DrawList;
use crate::error::{Error, Result};
use crate::input::{Bindings, Controls, Input, KeyCode};
use crate::render::{render_frame, ClearColor, GpuContext};
use crate::render3d::Renderer;
use crate::scene::{Outcome, Scene};
use crate::time::Time;

/// Frames between frame-rate log lines.
const FRAME_LOG_INTERVAL: u64 = 600;

/// GPU-side state, created once the window exists.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: Renderer,
}

/// The application state that winit drives.
pub struct TiggerApp {
    config: GameConfig,
    scene: Scene,
    input: Input<KeyCode>,
    bindings: Bindings,
    time: Time,
    draw_list: DrawList,
    graphics: Option<Graphics>,
    last_outcome: Outcome,
    /// Set when startup fails inside the event loop.
    error: Option<Error>,
}

impl TiggerApp {
    pub fn new(config: GameConfig) -> Result<Self> {
        let scene = Scene::new(&config)?;
        Ok(Self {
            config,
            scene,
            input: Input::new(),
            bindings: Bindings::default(),
            time: Time::new(),
            draw_list: DrawList::new(),
            graphics: None,
            last_outcome: Outcome::Playing,
            error: None,
        })
    }

    fn create_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let window = &self.config.window;
        let attrs = Window::default_attributes()
            .with_title(&window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(window.width, window.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| Error::Gpu(format!("cannot create window: {e}")))?,
        );

        let gpu = GpuContext::new(window.clone())?;
        let renderer = Renderer::new(&gpu, &self.config.assets, ClearColor(self.config.window.clear_color));
        let (w, h) = gpu.surface_size();
        self.scene.camera_mut().set_aspect(w, h);

        Ok(Graphics {
            window,
            gpu,
            renderer,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.time.update();
        if self.time.frame_count() % FRAME_LOG_INTERVAL == 0 {
            log::debug!(
                "frame {} at {:.1}s, {:.0} fps",
                self.time.frame_count(),
                self.time.elapsed().as_secs_f32(),
                self.time.fps()
            );
        }

        let controls = Controls::from_input(&self.input, &self.bindings);
        if controls.quit {
            log::info!("Escape pressed, exiting.");
            event_loop.exit();
            return;
        }

        if let Err(err) = self.scene.update(&controls, self.time.delta_secs()) {
            log::error!("scene update failed: {err}");
            event_loop.exit();
            return;
        }
        self.input.clear_just();

        let outcome = self.scene.outcome();
        if outcome != self.last_outcome {
            match outcome {
                Outcome::Won => log::info!("All spheres cleared, you win!"),
                Outcome::Lost => log::info!("Too many bombs lost, game over."),
                Outcome::Playing => {}
            }
            self.last_outcome = outcome;
        }

        self.scene.draw(&mut self.draw_list);

        let Some(graphics) = &mut self.graphics else {
            return;
        };
        let renderer = &mut graphics.renderer;
        let list = &self.draw_list;
        match render_frame(&graphics.gpu, |frame| renderer.render(frame, list)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = graphics.gpu.surface_size();
                graphics.gpu.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory!");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
            }
        }

        graphics.window.request_redraw();
    }
}

impl ApplicationHandler for TiggerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.create_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(graphics) = &mut self.graphics {
                    graphics.gpu.resize(size.width, size.height);
                }
                self.scene.camera_mut().set_aspect(size.width, size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.input.press(key_code),
                        ElementState::Released => self.input.release(key_code),
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Open the window and run until it closes.
pub fn run(config: GameConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| Error::Gpu(format!("cannot start event loop: {e}")))?;
    let mut app = TiggerApp::new(config)?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Gpu(format!("event loop failed: {e}")))?;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
