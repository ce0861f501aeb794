//! Render Verification Tests
//!
//! Renders real documents onto every surface and checks pixels, recorded
//! primitives and SVG output.
//!
//! Run: cargo test --test render_test

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use std::fmt::Write;

use approx::assert_relative_eq;

use trueno_wave::color::Rgba;
use trueno_wave::document::Document;
use trueno_wave::dump::parse;
use trueno_wave::framebuffer::Framebuffer;
use trueno_wave::output::{PngEncoder, SvgEncoder};
use trueno_wave::render::{render, DisplayList, DrawCommand, RowLayout, WaveformRenderer, WaveformTheme};
use trueno_wave::selection::Selection;
use trueno_wave::viewport::Viewport;

const CLOCK: &str = "\
$timescale 1ns $end
$var wire 1 ! clk $end
$enddefinitions $end
#0
0!
#5
1!
#10
0!
";

fn clock() -> Document {
    parse(CLOCK).unwrap().0
}

/// 1170 px wide: the plot spans x = 150..1150, 100 px per tick at zoom 1.
fn wide_viewport() -> Viewport {
    Viewport::new(1170, 300)
}

fn framebuffer_for(viewport: &Viewport) -> Framebuffer {
    Framebuffer::new(viewport.canvas_width() as u32, viewport.canvas_height() as u32).unwrap()
}

// ============================================================================
// Raster output
// ============================================================================

#[test]
fn pixel_clock_levels_and_edges() {
    let doc = clock();
    let viewport = wide_viewport();
    let theme = WaveformTheme::default();
    let mut fb = framebuffer_for(&viewport);

    render(&doc, &viewport, &Selection::all(1), &mut fb);

    // Row 0 spans y = 40..70: high level at y = 44, low at y = 66.
    assert_eq!(fb.get_pixel(10, 10), Some(theme.background));
    assert_eq!(fb.get_pixel(400, 200), Some(theme.plot));
    assert_eq!(fb.get_pixel(400, 66), Some(theme.low));
    assert_eq!(fb.get_pixel(400, 44), Some(theme.plot));
    assert_eq!(fb.get_pixel(900, 44), Some(theme.high));
    assert_eq!(fb.get_pixel(900, 66), Some(theme.plot));
    // Rising edge at t = 5 is drawn in the new value's color.
    assert_eq!(fb.get_pixel(650, 55), Some(theme.high));
}

#[test]
fn pixel_grid_lines_span_plot_height() {
    let doc = clock();
    let viewport = wide_viewport();
    let theme = WaveformTheme::default();
    let mut fb = framebuffer_for(&viewport);

    render(&doc, &viewport, &Selection::new(), &mut fb);

    for x in [150, 350, 550, 750, 950, 1150] {
        assert_eq!(fb.get_pixel(x, 40), Some(theme.grid), "grid top at x={x}");
        assert_eq!(fb.get_pixel(x, 269), Some(theme.grid), "grid bottom at x={x}");
    }
    // Between axis labels.
    assert_eq!(fb.get_pixel(250, 285), Some(theme.background));
}

#[test]
fn pixel_labels_are_rasterized() {
    let doc = clock();
    let viewport = wide_viewport();
    let theme = WaveformTheme::default();
    let mut fb = framebuffer_for(&viewport);

    render(&doc, &viewport, &Selection::all(1), &mut fb);

    let gutter = (0..150)
        .flat_map(|x| (0..300).map(move |y| (x, y)))
        .filter(|&(x, y)| fb.get_pixel(x, y) != Some(theme.background))
        .count();
    assert!(gutter > 0, "signal name missing from the gutter");
    // "clk" ends at x = 140 on the baseline y = 59; the `l` stem is at x = 131.
    for y in 52..59 {
        assert_eq!(fb.get_pixel(131, y), Some(theme.label), "name stem at y={y}");
    }
    assert_eq!(fb.get_pixel(131, 59), Some(theme.background));

    // "0ns" is centred under the first grid line, baseline y = 290.
    assert_eq!(fb.get_pixel(142, 285), Some(theme.label));
    let axis_band = (150..1170)
        .flat_map(|x| (275..300).map(move |y| (x, y)))
        .filter(|&(x, y)| fb.get_pixel(x, y) == Some(theme.label))
        .count();
    assert!(axis_band > 50, "axis labels missing: {axis_band} pixels");

    // Value label at the row's top left, drawn in the value's color.
    assert_eq!(fb.get_pixel(160, 47), Some(theme.low));
}

#[test]
fn pixel_luminance_separates_blank_and_drawn_frames() {
    let doc = clock();
    let viewport = wide_viewport();
    let theme = WaveformTheme::default();

    let mut blank = framebuffer_for(&viewport);
    blank.clear(theme.background);
    let (blank_min, blank_max, blank_mean) = blank.luminance_stats();
    assert_relative_eq!(blank_min, blank_max);

    let mut grid_only = framebuffer_for(&viewport);
    render(&doc, &viewport, &Selection::new(), &mut grid_only);
    let (grid_min, grid_max, grid_mean) = grid_only.luminance_stats();
    assert_relative_eq!(grid_min, blank_min, epsilon = 1e-3);
    assert!(grid_max > blank_max);
    assert!(grid_mean > blank_mean);

    let mut full = framebuffer_for(&viewport);
    render(&doc, &viewport, &Selection::all(1), &mut full);
    let (_, _, full_mean) = full.luminance_stats();
    assert!(full_mean > grid_mean);
}

#[test]
fn pixel_empty_selection_has_no_signal_colors() {
    let doc = clock();
    let theme = WaveformTheme::default();

    for (zoom, scroll) in [(1.0, 0.0), (3.0, 700.0), (10.0, 9000.0), (0.1, 50.0)] {
        let mut viewport = wide_viewport();
        viewport.set_zoom(zoom);
        viewport.scroll_to(scroll);
        let mut fb = framebuffer_for(&viewport);

        render(&doc, &viewport, &Selection::new(), &mut fb);

        assert_eq!(fb.count_color(theme.high), 0, "zoom {zoom} scroll {scroll}");
        assert_eq!(fb.count_color(theme.low), 0, "zoom {zoom} scroll {scroll}");
        assert!(fb.count_color(theme.grid) > 0);
    }
}

#[test]
fn pixel_zero_sized_viewport_leaves_surface_untouched() {
    let doc = clock();
    let mut fb = Framebuffer::new(64, 64).unwrap();
    fb.clear(Rgba::WHITE);

    render(&doc, &Viewport::new(0, 64), &Selection::all(1), &mut fb);
    render(&doc, &Viewport::new(64, -3), &Selection::all(1), &mut fb);

    assert_eq!(fb.count_color(Rgba::WHITE), 64 * 64);
}

#[test]
fn pixel_render_is_deterministic() {
    let doc = clock();
    let mut viewport = wide_viewport();
    viewport.zoom_at(2.5, Some(600.0));
    let selection = Selection::all(1);

    let mut first = framebuffer_for(&viewport);
    render(&doc, &viewport, &selection, &mut first);
    let mut second = framebuffer_for(&viewport);
    second.clear(Rgba::WHITE);
    render(&doc, &viewport, &selection, &mut second);

    assert_eq!(first.to_compact_pixels(), second.to_compact_pixels());
    assert_eq!(PngEncoder::to_bytes(&first).unwrap(), PngEncoder::to_bytes(&second).unwrap());
}

#[test]
fn pixel_custom_theme_and_layout() {
    let doc = clock();
    let viewport = wide_viewport();
    let theme = WaveformTheme {
        high: Rgba::rgb(0, 255, 0),
        ..WaveformTheme::default()
    };
    let layout = RowLayout {
        height: 60.0,
        ..RowLayout::default()
    };
    let mut fb = framebuffer_for(&viewport);

    WaveformRenderer::new()
        .theme(theme)
        .layout(layout)
        .render(&doc, &viewport, &Selection::all(1), &mut fb);

    // Low level now at 40 + 60 - 4 = 96.
    assert_eq!(fb.get_pixel(400, 96), Some(theme.low));
    assert_eq!(fb.get_pixel(900, 44), Some(Rgba::rgb(0, 255, 0)));
}

// ============================================================================
// Recorded primitives
// ============================================================================

fn many_signals(count: usize) -> Document {
    let mut text = String::from("$timescale 1ns $end\n");
    for i in 0..count {
        let _ = writeln!(text, "$var wire 1 s{i} sig_{i} $end");
    }
    text.push_str("#0\n");
    for i in 0..count {
        let _ = writeln!(text, "1s{i}");
    }
    text.push_str("#100\n");
    parse(&text).unwrap().0
}

#[test]
fn primitives_rows_below_plot_are_culled() {
    let doc = many_signals(20);
    // Plot spans y = 40..170; rows start at 40, 80, 120, 160, 200, ...
    let viewport = Viewport::new(800, 200);
    let mut list = DisplayList::new();

    render(&doc, &viewport, &Selection::all(20), &mut list);

    let names: Vec<&str> = list.texts().filter(|t| t.starts_with("sig_")).collect();
    assert_eq!(names, vec!["sig_0", "sig_1", "sig_2", "sig_3"]);
}

#[test]
fn primitives_hidden_rows_close_the_gap() {
    let doc = many_signals(3);
    let viewport = Viewport::new(800, 400);
    let selection: Selection = [0, 2].into_iter().collect();
    let mut list = DisplayList::new();

    render(&doc, &viewport, &selection, &mut list);

    let label_y: Vec<f32> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { at, text, .. } if text.starts_with("sig_") => Some(at.y),
            _ => None,
        })
        .collect();
    // Second visible row sits directly under the first (30 + 10 px pitch).
    assert_eq!(label_y, vec![59.0, 99.0]);
}

#[test]
fn primitives_segments_stay_inside_plot() {
    let doc = clock();
    let theme = WaveformTheme::default();
    let mut viewport = wide_viewport();
    viewport.set_zoom(7.0);
    viewport.scroll_to(2345.0);
    let mut list = DisplayList::new();

    render(&doc, &viewport, &Selection::all(1), &mut list);

    let segments: Vec<_> = list
        .lines_with_color(theme.high)
        .chain(list.lines_with_color(theme.low))
        .collect();
    assert!(!segments.is_empty());
    for (from, to) in segments {
        for x in [from.x, to.x] {
            assert!((150.0..=1150.0).contains(&x), "x = {x} outside plot");
        }
    }
}

#[test]
fn primitives_unknown_before_first_change() {
    let (doc, _) = parse("$timescale 1ns $end\n$var wire 1 a late $end\n#5\n1a\n#10\n").unwrap();
    let theme = WaveformTheme::default();
    let mut list = DisplayList::new();

    render(&doc, &wide_viewport(), &Selection::all(1), &mut list);

    let unknown: Vec<_> = list.lines_with_color(theme.unknown).collect();
    assert_eq!(unknown.len(), 1);
    assert!((unknown[0].0.x - 150.0).abs() < f32::EPSILON);
    assert!((unknown[0].1.x - 650.0).abs() < f32::EPSILON);
    // X sits mid-row.
    assert!((unknown[0].0.y - 55.0).abs() < f32::EPSILON);
}

// ============================================================================
// Vector output
// ============================================================================

#[test]
fn svg_contains_labels_and_waveform() {
    let doc = clock();
    let viewport = wide_viewport();
    let mut svg = SvgEncoder::new(1170, 300);

    render(&doc, &viewport, &Selection::all(1), &mut svg);
    let out = svg.render();

    assert!(out.contains(">clk</text>"));
    assert!(out.contains(">0ns</text>"));
    assert!(out.contains(">10ns</text>"));
    assert!(out.contains(&WaveformTheme::default().high.to_css()));
    assert!(out.contains(r#"fill="rgb(30,30,30)""#));
}

#[test]
fn svg_rerender_replaces_previous_frame() {
    let doc = clock();
    let mut svg = SvgEncoder::new(1170, 300);

    render(&doc, &wide_viewport(), &Selection::all(1), &mut svg);
    let full = svg.elements().len();
    render(&doc, &wide_viewport(), &Selection::new(), &mut svg);

    assert!(svg.elements().len() < full);
    assert!(!svg.render().contains(">clk</text>"));
}
