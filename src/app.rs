use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

use crate::game::config::ViewerConfig;
use crate::game::inventory::Inventory;
use crate::render::engine::RenderEngine;
use crate::ui::icons::IconAtlas;
use crate::ui::recipe_viewer::RecipeViewer;

struct RunningState {
    engine: RenderEngine,
    viewer: RecipeViewer,
}

pub struct App {
    config: ViewerConfig,
    running: Option<RunningState>,
    next_frame: Instant,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config, running: None, next_frame: Instant::now() }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.graphics.frame_rate_cap.max(1) as f64)
    }

    fn render_frame(running: &mut RunningState) -> Result<(), wgpu::SurfaceError> {
        let window = running.engine.gpu.window.clone();
        let viewer = &mut running.viewer;
        let egui_output = running.engine.egui.run_frame(&window, |ctx| viewer.show(ctx));

        let frame = running.engine.draw_and_submit(&egui_output)?;
        window.pre_present_notify();
        frame.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Octolens")
            .with_inner_size(winit::dpi::LogicalSize::new(960, 640));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("create window"),
        );
        let engine = RenderEngine::new(window);
        let icons = Rc::new(IconAtlas::generate(&engine.egui.ctx));
        let viewer = RecipeViewer::new(&self.config, icons, Inventory::starting_inventory());

        self.running = Some(RunningState { engine, viewer });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        use winit::keyboard::{KeyCode, PhysicalKey};

        let Some(running) = &mut self.running else {
            return;
        };
        let window = running.engine.gpu.window.clone();
        let response = running.engine.egui.on_window_event(&window, &event);
        if response.repaint {
            window.request_redraw();
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                running.engine.gpu.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !event.state.is_pressed() || running.engine.egui.wants_keyboard_input() {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::KeyR) => {
                        running.viewer.open = !running.viewer.open;
                        log::info!("viewer: {}", if running.viewer.open { "ON" } else { "OFF" });
                    }
                    _ => {}
                }
            }
            WindowEvent::RedrawRequested => match Self::render_frame(running) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let gpu = &running.engine.gpu;
                    gpu.surface.configure(&gpu.device, &gpu.config);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                Err(e) => log::error!("render error: {e:?}"),
            },
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.config.save();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Slots cycle on the wall clock, so keep redrawing at the capped rate
        let now = Instant::now();
        if now >= self.next_frame {
            self.next_frame = now + self.frame_interval();
            if let Some(running) = &self.running {
                running.engine.gpu.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
