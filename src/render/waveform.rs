//! Multi-signal waveform renderer.
//!
//! Rendering is a pure function of (document, viewport, selection): every
//! call clears the surface and repaints it, so identical inputs always give
//! identical output.
//!
//! Each visible row is drawn by one left-to-right sweep over the changes
//! returned by [`Signal::changes_in_range`] for the visible time window. The
//! change list is already time-ordered, so nothing is sorted or filtered per
//! frame and the cost is proportional to what is on screen.

use crate::color::Rgba;
use crate::document::Document;
use crate::geometry::{Point, Rect};
use crate::selection::Selection;
use crate::timeline::{Signal, Time, Value};
use crate::viewport::{TimeTransform, Viewport};

use super::surface::{Surface, TextAlign, TextStyle};

/// Colors used by the waveform renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveformTheme {
    /// Canvas background.
    pub background: Rgba,
    /// Plot area fill.
    pub plot: Rgba,
    /// Grid lines.
    pub grid: Rgba,
    /// Signal names and axis labels.
    pub label: Rgba,
    /// Logic high (`1`).
    pub high: Rgba,
    /// Logic low (`0`).
    pub low: Rgba,
    /// Unknown or high impedance (`X`, `Z`).
    pub unknown: Rgba,
    /// Time cursor line.
    pub cursor: Rgba,
}

impl Default for WaveformTheme {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(0x1e, 0x1e, 0x1e),
            plot: Rgba::rgb(0x25, 0x25, 0x26),
            grid: Rgba::rgb(0x33, 0x33, 0x33),
            label: Rgba::rgb(0xD4, 0xD4, 0xD4),
            high: Rgba::rgb(0x56, 0x9C, 0xD6),
            low: Rgba::rgb(0xCE, 0x91, 0x78),
            unknown: Rgba::rgb(0x80, 0x80, 0x80),
            cursor: Rgba::rgb(0xFF, 0xD7, 0x00),
        }
    }
}

impl WaveformTheme {
    /// Color for a logic value.
    #[must_use]
    pub const fn value_color(&self, value: Value) -> Rgba {
        match value {
            Value::One => self.high,
            Value::Zero => self.low,
            Value::X | Value::Z => self.unknown,
        }
    }
}

/// Row geometry and stroke sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Height of one signal row.
    pub height: f64,
    /// Gap between rows.
    pub spacing: f64,
    /// Inset of the high/low levels from the row edges.
    pub level_inset: f64,
    /// Waveform stroke width.
    pub line_width: f32,
    /// Signal name font size.
    pub label_size: f32,
    /// Axis and value label font size.
    pub small_label_size: f32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            height: 30.0,
            spacing: 10.0,
            level_inset: 4.0,
            line_width: 2.0,
            label_size: 12.0,
            small_label_size: 10.0,
        }
    }
}

impl RowLayout {
    /// Top y of visible row `row`.
    #[must_use]
    pub fn row_top(&self, top: f64, row: usize) -> f64 {
        top + row as f64 * (self.height + self.spacing)
    }

    /// Vertical level encoding `value` in a row starting at `row_top`.
    #[must_use]
    pub fn level(&self, row_top: f64, value: Value) -> f64 {
        match value {
            Value::One => row_top + self.level_inset,
            Value::Zero => row_top + self.height - self.level_inset,
            Value::X | Value::Z => row_top + self.height / 2.0,
        }
    }
}

/// Waveform renderer with a theme and row layout.
///
/// # Example
///
/// ```
/// use trueno_wave::prelude::*;
///
/// let (doc, _) = parse("$timescale 1ns $end\n$var wire 1 ! clk $end\n#0\n0!\n#5\n1!\n").unwrap();
/// let viewport = Viewport::new(640, 200);
/// let selection = Selection::all(doc.signal_count());
///
/// let mut fb = Framebuffer::new(640, 200).unwrap();
/// WaveformRenderer::new().render(&doc, &viewport, &selection, &mut fb);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveformRenderer {
    theme: WaveformTheme,
    layout: RowLayout,
}

impl WaveformRenderer {
    /// Renderer with the default theme and layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color theme.
    #[must_use]
    pub fn theme(mut self, theme: WaveformTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the row layout.
    #[must_use]
    pub fn layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Current theme.
    #[must_use]
    pub const fn current_theme(&self) -> &WaveformTheme {
        &self.theme
    }

    /// Repaint `surface` from the three view inputs.
    ///
    /// Does nothing when the viewport has no area or the document declares
    /// no signals. An empty selection draws background, grid and axis only.
    pub fn render<S: Surface + ?Sized>(
        &self,
        document: &Document,
        viewport: &Viewport,
        selection: &Selection,
        surface: &mut S,
    ) {
        if !viewport.is_drawable() || document.signals().is_empty() {
            return;
        }

        let theme = &self.theme;
        let left = viewport.plot_left();
        let right = viewport.plot_right();
        let top = viewport.plot_top();
        let bottom = viewport.plot_bottom();

        surface.clear(theme.background);
        surface.fill_rect(
            Rect::new(left as f32, top as f32, (right - left) as f32, (bottom - top) as f32),
            theme.plot,
        );

        self.draw_grid(document, viewport, surface);

        let transform = viewport.transform(document.duration());
        let window = TimeWindow::new(&transform, left, right);
        let count = document.signal_count();

        for (row, index) in selection.iter().filter(|&i| i < count).enumerate() {
            let row_top = self.layout.row_top(top, row);
            if row_top >= bottom {
                // Rows stack downward; the rest are below the plot too.
                break;
            }
            if let Some(signal) = document.signal(index) {
                self.draw_row(signal, row_top, &transform, &window, surface);
            }
        }

        if let Some(cursor) = viewport.cursor() {
            let x = transform.pixel_x(cursor as f64);
            if (left..=right).contains(&x) {
                surface.line(
                    Point::new(x as f32, top as f32),
                    Point::new(x as f32, bottom as f32),
                    theme.cursor,
                    1.0,
                );
            }
        }
    }

    fn draw_grid<S: Surface + ?Sized>(&self, document: &Document, viewport: &Viewport, surface: &mut S) {
        let top = viewport.plot_top() as f32;
        let bottom = viewport.plot_bottom() as f32;
        let label_y = (f64::from(viewport.canvas_height()) - 10.0) as f32;
        let style = TextStyle::new(self.layout.small_label_size, self.theme.label, TextAlign::Middle);
        let timescale = document.timescale();

        for line in viewport.grid(document.duration()) {
            let x = line.x as f32;
            surface.line(Point::new(x, top), Point::new(x, bottom), self.theme.grid, 1.0);
            surface.text(Point::new(x, label_y), &timescale.format_ticks(line.time), style);
        }
    }

    fn draw_row<S: Surface + ?Sized>(
        &self,
        signal: &Signal,
        row_top: f64,
        transform: &TimeTransform,
        window: &TimeWindow,
        surface: &mut S,
    ) {
        let theme = &self.theme;
        let layout = &self.layout;

        surface.text(
            Point::new((window.left - 10.0) as f32, (row_top + layout.height / 2.0 + 4.0) as f32),
            signal.name(),
            TextStyle::new(layout.label_size, theme.label, TextAlign::End),
        );

        let mut current = signal.value_at(window.start);
        let mut prev_x = window.left;

        for change in signal.changes_in_range(window.start, window.end) {
            let x = transform.pixel_x(change.time as f64);
            if x < window.left {
                // Already folded into the initial value.
                continue;
            }
            if x > window.right {
                break;
            }

            let from_level = layout.level(row_top, current);
            let to_level = layout.level(row_top, change.value);
            self.segment(surface, prev_x, x, from_level, current);
            if (from_level - to_level).abs() > f64::EPSILON {
                surface.line(
                    Point::new(x as f32, from_level as f32),
                    Point::new(x as f32, to_level as f32),
                    theme.value_color(change.value),
                    layout.line_width,
                );
            }

            current = change.value;
            prev_x = x;
        }

        self.segment(surface, prev_x, window.right, layout.level(row_top, current), current);

        surface.text(
            Point::new((window.left + 10.0) as f32, (row_top + 12.0) as f32),
            &current.to_string(),
            TextStyle::new(layout.small_label_size, theme.value_color(current), TextAlign::Start),
        );
    }

    fn segment<S: Surface + ?Sized>(&self, surface: &mut S, x0: f64, x1: f64, y: f64, value: Value) {
        if x1 <= x0 {
            return;
        }
        surface.line(
            Point::new(x0 as f32, y as f32),
            Point::new(x1 as f32, y as f32),
            self.theme.value_color(value),
            self.layout.line_width,
        );
    }
}

/// Visible pixel span and the tick range that covers it.
#[derive(Debug, Clone, Copy)]
struct TimeWindow {
    left: f64,
    right: f64,
    start: Time,
    end: Time,
}

impl TimeWindow {
    fn new(transform: &TimeTransform, left: f64, right: f64) -> Self {
        let start = transform.time_at(left).max(0.0).floor();
        let end = transform.time_at(right).max(0.0).ceil();
        // Float-to-int casts saturate, so huge windows stay in range.
        Self {
            left,
            right,
            start: start as Time,
            end: end as Time,
        }
    }
}

/// Render with the default theme and layout.
///
/// See [`WaveformRenderer::render`].
pub fn render<S: Surface + ?Sized>(
    document: &Document,
    viewport: &Viewport,
    selection: &Selection,
    surface: &mut S,
) {
    WaveformRenderer::new().render(document, viewport, selection, surface);
}
