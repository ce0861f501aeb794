//! WebAssembly bindings for trueno-wave.
//!
//! One [`WaveformView`] holds a parsed dump together with its viewport and
//! selection. JavaScript forwards input events and asks for frames.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { WaveformView } from 'trueno-wave';
//!
//! await init();
//!
//! const view = new WaveformView(await file.text(), canvas.width, canvas.height);
//! console.log(view.warnings());
//!
//! canvas.addEventListener('wheel', (e) => {
//!     e.preventDefault();
//!     view.wheel(e.deltaX, e.deltaY, e.ctrlKey, e.offsetX);
//!     draw();
//! });
//!
//! function draw() {
//!     const pixels = new Uint8ClampedArray(view.render_rgba());
//!     ctx.putImageData(new ImageData(pixels, canvas.width, canvas.height), 0, 0);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::config::ViewerConfig;
use crate::document::Document;
use crate::dump::{parse, ParseWarning};
use crate::framebuffer::Framebuffer;
use crate::output::PngEncoder;
use crate::render::WaveformRenderer;
use crate::selection::Selection;
use crate::viewport::Viewport;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An open waveform: document, view state and visible signals.
#[wasm_bindgen]
pub struct WaveformView {
    document: Document,
    warnings: Vec<ParseWarning>,
    viewport: Viewport,
    selection: Selection,
    renderer: WaveformRenderer,
}

#[wasm_bindgen]
impl WaveformView {
    /// Parse `text` and open a view of `width` x `height` pixels showing
    /// every signal.
    ///
    /// Throws when the text is not a value-change dump at all.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, width: i32, height: i32) -> Result<WaveformView, JsValue> {
        let (document, warnings) = parse(text).map_err(js_err)?;
        let selection = Selection::all(document.signal_count());
        Ok(Self {
            document,
            warnings,
            viewport: Viewport::new(width, height),
            selection,
            renderer: WaveformRenderer::new(),
        })
    }

    /// Apply a YAML viewer configuration (theme, rows, zoom policy,
    /// padding). The canvas size stays as it is.
    pub fn configure(&mut self, yaml: &str) -> Result<(), JsValue> {
        let config = ViewerConfig::parse(yaml).map_err(js_err)?;
        config.validate().map_err(js_err)?;

        let mut viewport = config.viewport();
        viewport.resize(self.viewport.canvas_width(), self.viewport.canvas_height());
        viewport.set_cursor(self.viewport.cursor());
        self.viewport = viewport;
        self.renderer = WaveformRenderer::new()
            .theme(config.theme().map_err(js_err)?)
            .layout(config.layout());
        Ok(())
    }

    /// Parse diagnostics, one human-readable line each.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Declared signal names in declaration order.
    pub fn signal_names(&self) -> Vec<String> {
        self.document
            .signals()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Last timestamp in the dump, in ticks.
    pub fn duration(&self) -> f64 {
        self.document.duration() as f64
    }

    /// Timescale text, e.g. `"1ns"`.
    pub fn timescale(&self) -> String {
        self.document.timescale().to_string()
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    /// Current scroll offset in pixels.
    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset()
    }

    /// Set zoom, keeping the time under `anchor_x` fixed (plot centre when
    /// omitted).
    pub fn set_zoom(&mut self, zoom: f64, anchor_x: Option<f64>) {
        self.viewport.zoom_at(zoom, anchor_x);
    }

    /// Scroll to `offset` pixels.
    pub fn scroll_to(&mut self, offset: f64) {
        self.viewport.scroll_to(offset);
    }

    /// Forward a wheel event.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, zoom_modifier: bool, pointer_x: f64) {
        self.viewport
            .apply_wheel(delta_x, delta_y, zoom_modifier, Some(pointer_x));
    }

    /// Flip visibility of signal `index`. Returns the new visibility.
    pub fn toggle_signal(&mut self, index: usize) -> bool {
        if index >= self.document.signal_count() {
            return false;
        }
        self.selection.toggle(index)
    }

    /// Whether signal `index` is shown.
    pub fn is_visible(&self, index: usize) -> bool {
        self.selection.contains(index)
    }

    /// Place the cursor at time `t` (ticks); a negative value removes it.
    pub fn set_cursor(&mut self, t: f64) {
        let cursor = (t.is_finite() && t >= 0.0).then(|| t.round() as u64);
        self.viewport.set_cursor(cursor);
    }

    /// Time under pixel `x`, in ticks.
    pub fn time_at(&self, x: f64) -> f64 {
        self.viewport.time_at(x, self.document.duration())
    }

    /// Change the canvas size.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport.resize(width, height);
    }

    /// Render a frame as tightly packed RGBA bytes (`width * height * 4`).
    ///
    /// Returns an empty buffer for a zero-sized canvas.
    pub fn render_rgba(&self) -> Result<Vec<u8>, JsValue> {
        match self.render_frame()? {
            Some(fb) => Ok(fb.to_compact_pixels()),
            None => Ok(Vec::new()),
        }
    }

    /// Render a frame as PNG bytes.
    pub fn render_png(&self) -> Result<Vec<u8>, JsValue> {
        match self.render_frame()? {
            Some(fb) => PngEncoder::to_bytes(&fb).map_err(js_err),
            None => Ok(Vec::new()),
        }
    }

    /// Render a frame as a `data:image/png;base64,...` URL.
    pub fn render_data_url(&self) -> Result<String, JsValue> {
        match self.render_frame()? {
            Some(fb) => PngEncoder::to_data_url(&fb).map_err(js_err),
            None => Ok(String::new()),
        }
    }
}

impl WaveformView {
    fn render_frame(&self) -> Result<Option<Framebuffer>, JsValue> {
        if !self.viewport.is_drawable() {
            return Ok(None);
        }
        let width = u32::try_from(self.viewport.canvas_width()).map_err(js_err)?;
        let height = u32::try_from(self.viewport.canvas_height()).map_err(js_err)?;
        let mut fb = Framebuffer::new(width, height).map_err(js_err)?;
        self.renderer
            .render(&self.document, &self.viewport, &self.selection, &mut fb);
        Ok(Some(fb))
    }
}
