//! View state and the time/pixel coordinate transform.
//!
//! A [`Viewport`] holds the zoom factor, horizontal scroll offset and canvas
//! geometry of one open waveform view. It knows nothing about document
//! content: transforms take the document duration as an argument.
//!
//! ```text
//! pixel_x(t) = padding.left + t * (plot_width / duration) * zoom - scroll
//! ```

use crate::timeline::Time;

/// Default lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Default upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;
/// Default multiplicative zoom step for one wheel notch.
pub const DEFAULT_WHEEL_STEP: f64 = 1.1;
/// Number of equal grid divisions across the plot width.
pub const GRID_DIVISIONS: usize = 5;

/// Fixed layout margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    /// Label gutter on the left.
    pub left: f64,
    /// Margin above the first row.
    pub top: f64,
    /// Margin right of the plot.
    pub right: f64,
    /// Axis-label margin at the bottom.
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 150.0,
            top: 40.0,
            right: 20.0,
            bottom: 30.0,
        }
    }
}

/// One vertical grid line with its time label value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    /// Pixel x of the line.
    pub x: f64,
    /// Time (in ticks) the line stands for.
    pub time: f64,
}

/// Time/pixel mapping frozen for one duration and one view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeTransform {
    left: f64,
    pixels_per_tick: f64,
    scroll: f64,
}

impl TimeTransform {
    /// Pixel x for time `t` (ticks).
    #[must_use]
    pub fn pixel_x(&self, t: f64) -> f64 {
        self.left + t * self.pixels_per_tick - self.scroll
    }

    /// Time (ticks) under pixel `px`; the inverse of [`TimeTransform::pixel_x`].
    ///
    /// Returns 0 when the plot has no width.
    #[must_use]
    pub fn time_at(&self, px: f64) -> f64 {
        if self.pixels_per_tick <= 0.0 {
            return 0.0;
        }
        (px - self.left + self.scroll) / self.pixels_per_tick
    }

    /// Horizontal scale in pixels per tick, zoom included.
    #[must_use]
    pub const fn pixels_per_tick(&self) -> f64 {
        self.pixels_per_tick
    }
}

/// Mutable view state for one open waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    scroll_offset: f64,
    canvas_width: i32,
    canvas_height: i32,
    padding: Padding,
    min_zoom: f64,
    max_zoom: f64,
    wheel_step: f64,
    cursor: Option<Time>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Viewport {
    /// Create a viewport at zoom 1, scrolled to time 0.
    ///
    /// Non-positive dimensions are allowed; rendering is then a no-op.
    #[must_use]
    pub fn new(canvas_width: i32, canvas_height: i32) -> Self {
        Self {
            zoom: 1.0,
            scroll_offset: 0.0,
            canvas_width,
            canvas_height,
            padding: Padding::default(),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            wheel_step: DEFAULT_WHEEL_STEP,
            cursor: None,
        }
    }

    /// Set layout padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
        self
    }

    /// Set zoom bounds. Bounds are reordered if given backwards and the lower
    /// bound is kept strictly positive.
    #[must_use]
    pub fn with_zoom_limits(mut self, min: f64, max: f64) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min_zoom = lo.max(f64::MIN_POSITIVE);
        self.max_zoom = hi.max(self.min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
        self
    }

    /// Set the multiplicative zoom step used by [`Viewport::apply_wheel`].
    #[must_use]
    pub fn with_wheel_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 1.0 {
            self.wheel_step = step;
        }
        self
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current scroll offset in pixels.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn canvas_width(&self) -> i32 {
        self.canvas_width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn canvas_height(&self) -> i32 {
        self.canvas_height
    }

    /// Layout padding.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Lower zoom bound.
    #[must_use]
    pub const fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Upper zoom bound.
    #[must_use]
    pub const fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Time marked by the cursor line, if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<Time> {
        self.cursor
    }

    /// Place or remove the cursor line.
    pub fn set_cursor(&mut self, cursor: Option<Time>) {
        self.cursor = cursor;
    }

    /// True when the canvas has positive width and height.
    #[must_use]
    pub const fn is_drawable(&self) -> bool {
        self.canvas_width > 0 && self.canvas_height > 0
    }

    /// Width available for waveforms between the gutters.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (f64::from(self.canvas_width) - self.padding.left - self.padding.right).max(0.0)
    }

    /// Left edge of the plot area.
    #[must_use]
    pub const fn plot_left(&self) -> f64 {
        self.padding.left
    }

    /// Right edge of the plot area.
    #[must_use]
    pub fn plot_right(&self) -> f64 {
        self.padding.left + self.plot_width()
    }

    /// Top edge of the plot area.
    #[must_use]
    pub const fn plot_top(&self) -> f64 {
        self.padding.top
    }

    /// Bottom edge of the plot area (above the axis labels).
    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        (f64::from(self.canvas_height) - self.padding.bottom).max(self.padding.top)
    }

    /// Width of the whole timeline at the current zoom.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.plot_width() * self.zoom
    }

    /// Largest allowed scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.content_width() - self.plot_width()).max(0.0)
    }

    /// Change the canvas size, keeping scroll within bounds.
    pub fn resize(&mut self, canvas_width: i32, canvas_height: i32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.scroll_to(self.scroll_offset);
    }

    /// Transform for a document of `duration` ticks.
    ///
    /// A zero duration is scaled as if it were one tick, so every change sits
    /// at the plot's left edge.
    #[must_use]
    pub fn transform(&self, duration: Time) -> TimeTransform {
        let duration = duration.max(1) as f64;
        TimeTransform {
            left: self.padding.left,
            pixels_per_tick: self.plot_width() / duration * self.zoom,
            scroll: self.scroll_offset,
        }
    }

    /// Pixel x for time `t` in a document of `duration` ticks.
    #[must_use]
    pub fn pixel_x(&self, t: f64, duration: Time) -> f64 {
        self.transform(duration).pixel_x(t)
    }

    /// Time under pixel `px` in a document of `duration` ticks.
    #[must_use]
    pub fn time_at(&self, px: f64, duration: Time) -> f64 {
        self.transform(duration).time_at(px)
    }

    /// Time range `[start, end]` visible between the plot edges.
    #[must_use]
    pub fn visible_time_range(&self, duration: Time) -> (f64, f64) {
        let transform = self.transform(duration);
        (
            transform.time_at(self.plot_left()),
            transform.time_at(self.plot_right()),
        )
    }

    /// Set zoom, keeping the time under the plot centre fixed.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_at(zoom, None);
    }

    /// Set zoom, keeping the time under `anchor_px` fixed.
    ///
    /// `None` anchors at the centre of the plot area. The resulting zoom and
    /// scroll offset are clamped to their bounds.
    pub fn zoom_at(&mut self, zoom: f64, anchor_px: Option<f64>) {
        if zoom.is_nan() {
            return;
        }
        let anchor = anchor_px.unwrap_or_else(|| self.plot_left() + self.plot_width() / 2.0);

        // Duration-free: the tick scale cancels out of the anchor equation.
        let content_x = (anchor - self.padding.left + self.scroll_offset) / self.zoom;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.scroll_to(self.padding.left + content_x * self.zoom - anchor);
    }

    /// Multiply zoom by `factor` around `anchor_px`.
    pub fn zoom_by(&mut self, factor: f64, anchor_px: Option<f64>) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom_at(self.zoom * factor, anchor_px);
        }
    }

    /// Set the scroll offset, clamped to `[0, max_scroll]`.
    pub fn scroll_to(&mut self, offset: f64) {
        let offset = if offset.is_nan() { 0.0 } else { offset };
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
    }

    /// Scroll by `delta` pixels.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_offset + delta);
    }

    /// Apply one wheel event.
    ///
    /// With `zoom_modifier` held, wheel-down zooms out and wheel-up zooms in
    /// around the pointer. Otherwise both deltas scroll horizontally.
    pub fn apply_wheel(&mut self, delta_x: f64, delta_y: f64, zoom_modifier: bool, pointer_x: Option<f64>) {
        if zoom_modifier {
            let factor = if delta_y > 0.0 {
                1.0 / self.wheel_step
            } else {
                self.wheel_step
            };
            self.zoom_by(factor, pointer_x);
        } else {
            self.scroll_by(delta_x + delta_y);
        }
    }

    /// Grid lines spanning the full timeline, independent of zoom and scroll.
    ///
    /// Returns `GRID_DIVISIONS + 1` lines, from the plot's left edge to its
    /// right edge. Line `i` is labelled `duration * i / GRID_DIVISIONS`; the
    /// closing line at `i = GRID_DIVISIONS` marks the end of the dump.
    #[must_use]
    pub fn grid(&self, duration: Time) -> Vec<GridLine> {
        let width = self.plot_width();
        (0..=GRID_DIVISIONS)
            .map(|i| {
                let fraction = i as f64 / GRID_DIVISIONS as f64;
                GridLine {
                    x: self.plot_left() + width * fraction,
                    time: duration as f64 * fraction,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> Viewport {
        // plot width = 1170 - 150 - 20 = 1000
        Viewport::new(1170, 400)
    }

    #[test]
    fn test_plot_geometry() {
        let vp = viewport();
        assert_relative_eq!(vp.plot_width(), 1000.0);
        assert_relative_eq!(vp.plot_left(), 150.0);
        assert_relative_eq!(vp.plot_right(), 1150.0);
        assert_relative_eq!(vp.plot_bottom(), 370.0);
        assert!(vp.is_drawable());
        assert!(!Viewport::new(0, 10).is_drawable());
        assert!(!Viewport::new(10, -1).is_drawable());
    }

    #[test]
    fn test_pixel_x_maps_duration_to_plot_edges() {
        let vp = viewport();
        assert_relative_eq!(vp.pixel_x(0.0, 100), 150.0);
        assert_relative_eq!(vp.pixel_x(100.0, 100), 1150.0);
        assert_relative_eq!(vp.pixel_x(50.0, 100), 650.0);
    }

    #[test]
    fn test_zero_duration_collapses_to_left_edge() {
        let vp = viewport();
        assert_relative_eq!(vp.pixel_x(0.0, 0), 150.0);
        assert!(vp.transform(0).pixels_per_tick().is_finite());
    }

    #[test]
    fn test_time_at_inverts_pixel_x() {
        let mut vp = viewport();
        vp.set_zoom(3.7);
        vp.scroll_to(812.5);
        for t in [0.0, 1.0, 33.3, 99.9, 100.0] {
            assert_relative_eq!(vp.time_at(vp.pixel_x(t, 100), 100), t, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_doubling_zoom_doubles_distance_from_left() {
        let mut vp = viewport();
        let before = vp.pixel_x(40.0, 100) - vp.plot_left();
        vp.zoom_at(2.0, Some(vp.plot_left()));
        assert_relative_eq!(vp.scroll_offset(), 0.0);
        let after = vp.pixel_x(40.0, 100) - vp.plot_left();
        assert_relative_eq!(after, before * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = viewport();
        vp.set_zoom(50.0);
        assert_relative_eq!(vp.zoom(), DEFAULT_MAX_ZOOM);
        vp.set_zoom(0.0001);
        assert_relative_eq!(vp.zoom(), DEFAULT_MIN_ZOOM);
        vp.set_zoom(f64::NAN);
        assert_relative_eq!(vp.zoom(), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn test_zoom_preserves_time_under_anchor() {
        let mut vp = viewport();
        vp.set_zoom(2.0);
        vp.scroll_to(300.0);
        let anchor = 700.0;
        let t = vp.time_at(anchor, 100);

        vp.zoom_at(3.0, Some(anchor));
        assert_relative_eq!(vp.pixel_x(t, 100), anchor, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_without_pointer_anchors_at_center() {
        let mut vp = viewport();
        vp.set_zoom(4.0);
        vp.scroll_to(1000.0);
        let center = vp.plot_left() + vp.plot_width() / 2.0;
        let t = vp.time_at(center, 100);

        vp.set_zoom(2.0);
        assert_relative_eq!(vp.pixel_x(t, 100), center, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_out_clamps_scroll() {
        let mut vp = viewport();
        vp.set_zoom(10.0);
        vp.scroll_to(9000.0);
        vp.zoom_at(1.0, Some(1100.0));
        assert_relative_eq!(vp.scroll_offset(), 0.0);
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut vp = viewport();
        vp.scroll_by(-50.0);
        assert_relative_eq!(vp.scroll_offset(), 0.0);

        vp.scroll_by(500.0);
        assert_relative_eq!(vp.scroll_offset(), 0.0, epsilon = 1e-12);

        vp.set_zoom(2.0);
        vp.scroll_to(5000.0);
        assert_relative_eq!(vp.scroll_offset(), 1000.0);
        assert!(vp.scroll_offset() + vp.plot_width() <= vp.content_width() + 1e-9);
    }

    #[test]
    fn test_resize_reclamps_scroll() {
        let mut vp = viewport();
        vp.set_zoom(2.0);
        vp.scroll_to(1000.0);
        vp.resize(670, 400);
        assert_relative_eq!(vp.scroll_offset(), 500.0);
    }

    #[test]
    fn test_wheel_with_modifier_zooms() {
        let mut vp = viewport();
        vp.apply_wheel(0.0, -1.0, true, Some(400.0));
        assert_relative_eq!(vp.zoom(), DEFAULT_WHEEL_STEP);
        vp.apply_wheel(0.0, 1.0, true, Some(400.0));
        assert_relative_eq!(vp.zoom(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wheel_without_modifier_scrolls() {
        let mut vp = viewport();
        vp.set_zoom(3.0);
        let before = vp.scroll_offset();
        vp.apply_wheel(10.0, 30.0, false, None);
        assert_relative_eq!(vp.scroll_offset(), before + 40.0);
    }

    #[test]
    fn test_zoom_limits_builder() {
        let vp = Viewport::new(400, 300).with_zoom_limits(5.0, 2.0);
        assert_relative_eq!(vp.min_zoom(), 2.0);
        assert_relative_eq!(vp.max_zoom(), 5.0);
        assert_relative_eq!(vp.zoom(), 2.0);
    }

    #[test]
    fn test_grid_ignores_zoom_and_scroll() {
        let mut vp = viewport();
        let before = vp.grid(100);
        vp.set_zoom(7.0);
        vp.scroll_to(2000.0);
        assert_eq!(vp.grid(100), before);

        assert_eq!(before.len(), GRID_DIVISIONS + 1);
        assert_relative_eq!(before[0].x, 150.0);
        assert_relative_eq!(before[5].x, 1150.0);
        assert_relative_eq!(before[1].time, 20.0);
        assert_relative_eq!(before[5].time, 100.0);
    }

    #[test]
    fn test_visible_time_range() {
        let mut vp = viewport();
        assert_eq!(vp.visible_time_range(100), (0.0, 100.0));
        vp.set_zoom(2.0);
        vp.scroll_to(500.0);
        let (start, end) = vp.visible_time_range(100);
        assert_relative_eq!(start, 25.0);
        assert_relative_eq!(end, 75.0);
    }
}
