//! Benchmark for per-frame waveform rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write;
use trueno_wave::document::Document;
use trueno_wave::dump::parse;
use trueno_wave::framebuffer::Framebuffer;
use trueno_wave::output::SvgEncoder;
use trueno_wave::render::{render, DisplayList};
use trueno_wave::selection::Selection;
use trueno_wave::viewport::Viewport;

fn clock_document(signals: usize, edges: u64) -> Document {
    let mut text = String::from("$timescale 1ns $end\n");
    for i in 0..signals {
        let _ = writeln!(text, "$var wire 1 c{i} clk_{i} $end");
    }
    for t in 0..edges {
        let _ = writeln!(text, "#{t}");
        for i in 0..signals {
            let _ = writeln!(text, "{}c{i}", (t + i as u64) % 2);
        }
    }
    parse(&text).unwrap().0
}

fn render_zoom_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_framebuffer");
    let doc = clock_document(12, 100_000);
    let selection = Selection::all(doc.signal_count());

    // Higher zoom shows fewer changes per frame.
    for zoom in [1.0, 10.0] {
        let mut viewport = Viewport::new(1200, 600);
        viewport.set_zoom(zoom);
        let mut fb = Framebuffer::new(1200, 600).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(format!("zoom_{zoom}")), &viewport, |b, vp| {
            b.iter(|| render(black_box(&doc), vp, &selection, &mut fb));
        });
    }

    group.finish();
}

fn render_surface_benchmark(c: &mut Criterion) {
    let doc = clock_document(12, 2_000);
    let selection = Selection::all(doc.signal_count());
    let viewport = Viewport::new(1200, 600);

    c.bench_function("render_display_list", |b| {
        let mut list = DisplayList::new();
        b.iter(|| render(black_box(&doc), &viewport, &selection, &mut list));
    });

    c.bench_function("render_svg", |b| {
        b.iter(|| {
            let mut svg = SvgEncoder::new(1200, 600);
            render(black_box(&doc), &viewport, &selection, &mut svg);
            svg.render()
        });
    });
}

criterion_group!(benches, render_zoom_benchmark, render_surface_benchmark);
criterion_main!(benches);
