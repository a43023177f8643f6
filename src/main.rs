mod app;
mod game;
mod render;
mod ui;
mod viewer;

use app::App;
use game::config::ViewerConfig;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    let config = ViewerConfig::load();
    log::info!(
        "{} recipes per page, {} hidden items",
        config.viewer.recipes_per_page,
        config.viewer.hidden_items.len()
    );

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("event loop error");
}
