//! 2D rendering module
//!
//! Scene code draws through the `Surface` trait; the browser backend wraps a
//! canvas 2D context, the recorder keeps commands in memory.

pub mod color;
pub mod overlay;
pub mod recording;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

pub use color::{Rgba, palette};
pub use overlay::render_cursor;
pub use recording::{DrawCmd, RecordingSurface};
pub use scene::render_session;
pub use surface::{Font, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
