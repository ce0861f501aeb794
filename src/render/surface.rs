//! Render targets.
//!
//! The waveform renderer talks to a [`Surface`] only. Three surfaces ship
//! with the crate: [`Framebuffer`] (raster pixels, bitmap-font text), the SVG encoder
//! (vector, see [`crate::output::SvgEncoder`]) and [`DisplayList`], which
//! records primitives for inspection.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

use super::primitives::{draw_line, draw_rect, draw_text};

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    Start,
    /// Text is centred on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Font size, color and alignment for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Rgba,
    /// Alignment relative to the anchor point.
    pub align: TextAlign,
}

impl TextStyle {
    /// Create a text style.
    #[must_use]
    pub const fn new(size: f32, color: Rgba, align: TextAlign) -> Self {
        Self { size, color, align }
    }
}

/// Drawing target for the waveform renderer.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Implementations clip anything outside their bounds.
pub trait Surface {
    /// Discard all previous content and fill with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Stroke a straight line of the given width.
    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    /// Draw a text run anchored at `at` (baseline).
    fn text(&mut self, at: Point, text: &str, style: TextStyle);
}

impl Surface for Framebuffer {
    fn clear(&mut self, color: Rgba) {
        Framebuffer::clear(self, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        let x0 = rect.x.round();
        let y0 = rect.y.round();
        let x1 = rect.right().round();
        let y1 = rect.bottom().round();
        draw_rect(
            self,
            x0 as i32,
            y0 as i32,
            (x1 - x0.max(0.0)).max(0.0) as u32,
            (y1 - y0.max(0.0)).max(0.0) as u32,
            color,
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        let thickness = width.round().max(1.0);
        let half = (thickness / 2.0).floor();

        if (from.y - to.y).abs() < f32::EPSILON {
            let (x0, x1) = if from.x <= to.x { (from.x, to.x) } else { (to.x, from.x) };
            let rect = Rect::new(x0.round(), from.y.round() - half, x1.round() - x0.round() + 1.0, thickness);
            Surface::fill_rect(self, rect, color);
        } else if (from.x - to.x).abs() < f32::EPSILON {
            let (y0, y1) = if from.y <= to.y { (from.y, to.y) } else { (to.y, from.y) };
            let rect = Rect::new(from.x.round() - half, y0.round(), thickness, y1.round() - y0.round() + 1.0);
            Surface::fill_rect(self, rect, color);
        } else {
            draw_line(
                self,
                from.x.round() as i32,
                from.y.round() as i32,
                to.x.round() as i32,
                to.y.round() as i32,
                color,
            );
        }
    }

    /// Text is drawn with the built-in 5x7 bitmap font.
    fn text(&mut self, at: Point, text: &str, style: TextStyle) {
        draw_text(self, at, text, style);
    }
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole-surface fill.
    Clear(Rgba),
    /// Filled rectangle.
    FillRect {
        /// Rectangle bounds.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// Stroked line.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// Text run.
    Text {
        /// Anchor point.
        at: Point,
        /// Text content.
        text: String,
        /// Font and alignment.
        style: TextStyle,
    },
}

/// Surface that records primitives instead of rasterizing them.
///
/// `clear` drops everything recorded before it, so after a render the list
/// holds exactly one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in drawing order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// True when nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Lines stroked with `color`, as `(from, to)` pairs.
    pub fn lines_with_color(&self, color: Rgba) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Line { from, to, color: c, .. } if *c == color => Some((*from, *to)),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, at: Point, text: &str, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            style,
        });
    }
}
