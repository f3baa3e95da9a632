mod components;
mod events;
mod model;
mod registry;
mod render;
mod scene;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tech-map starting");
    yew::Renderer::<App>::new().render();
}
