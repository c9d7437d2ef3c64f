mod assistant;
mod board;
mod components;
mod config;
mod render;
mod util;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
