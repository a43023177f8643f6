use std::sync::Arc;
use winit::window::Window;

/// The egui side of a frame: winit input in, tessellated paint jobs out.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    pub renderer: egui_wgpu::Renderer,
}

impl EguiIntegration {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: Arc<Window>) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(ctx.clone(), ctx.viewport_id(), &window, None, None, None);
        let renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());
        Self { ctx, state, renderer }
    }

    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> egui_winit::EventResponse {
        self.state.on_window_event(window, event)
    }

    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// One egui pass over the pending input. Platform output (cursor,
    /// clipboard) is applied before returning.
    pub fn run_frame(&mut self, window: &Window, mut build: impl FnMut(&egui::Context)) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
        build(&self.ctx);
        let full_output = self.ctx.end_pass();
        self.state.handle_platform_output(window, full_output.platform_output.clone());
        full_output
    }

    pub fn screen(&self, window: &Window, size_in_pixels: [u32; 2]) -> egui_wgpu::ScreenDescriptor {
        egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: window.scale_factor() as f32,
        }
    }

    /// Upload the frame's new textures and vertex data; the returned jobs go to
    /// `renderer.render` inside the pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        screen: &egui_wgpu::ScreenDescriptor,
        full_output: &egui::FullOutput,
    ) -> Vec<egui::ClippedPrimitive> {
        for (id, delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        let jobs = self.ctx.tessellate(full_output.shapes.clone(), full_output.pixels_per_point);
        self.renderer.update_buffers(device, queue, encoder, &jobs, screen);
        jobs
    }

    /// Call once the frame using `full_output` has been submitted.
    pub fn free_textures(&mut self, full_output: &egui::FullOutput) {
        full_output.textures_delta.free.iter().for_each(|id| self.renderer.free_texture(id));
    }
}
