//! Drawing: the primitive surface, the scene painter and the TUI renderer

pub mod icons;
pub mod renderer;
pub mod scene;
pub mod surface;

pub use icons::{IconHandle, IconIndex, IconLookup, IconSource};
pub use renderer::{FrameView, Renderer};
pub use scene::draw_scene;
pub use surface::{CellCanvas, DrawCommand, RecordingSurface, Shade, Surface};
