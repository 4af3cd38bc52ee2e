//! Terminal canvas for the heightfield viewer.
//!
//! Frames from `core` are rasterized into a framebuffer of character cells,
//! then flushed to the terminal. Only changed cells are rewritten between
//! frames.
//!
//! Goals:
//! - Keep `core` free of terminal concerns
//! - Keep rasterization pure so it can be unit-tested
//! - Map the y-up canvas onto the y-down cell grid in one place

pub mod canvas_view;
pub mod fb;
pub mod raster;
pub mod renderer;

pub use heightview_core as core;
pub use heightview_types as types;

pub use canvas_view::{CanvasView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use raster::{draw_line, fill_triangle, CanvasMap, Region};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
