pub mod admin_key_modal;
pub mod app;
pub mod assistant_widget;
pub mod chat_bubble;
pub mod circuit_background;

pub use app::App;
