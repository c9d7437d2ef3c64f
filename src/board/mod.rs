pub mod config;
pub mod controller;
pub mod glyphs;
pub mod layout;
pub mod rng;
pub mod scene;

pub use config::BoardConfig;
pub use controller::{BoardController, FrameLoop, Regen};
pub use glyphs::{Glyph, GlyphKind};
pub use layout::{TraceLine, Viewport};
pub use rng::{MathRandom, RandomSource};
pub use scene::{LayerLayout, Scene};
