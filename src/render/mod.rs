//! Rendering: draw surfaces, raster primitives and the waveform renderer.

mod font;
mod primitives;
mod surface;
mod waveform;

pub use primitives::{draw_line, draw_rect, draw_text};
pub use surface::{DisplayList, DrawCommand, Surface, TextAlign, TextStyle};
pub use waveform::{render, RowLayout, WaveformRenderer, WaveformTheme};
