//! # Trueno-Wave
//!
//! Digital waveform viewing for value-change dumps.
//!
//! Parses the textual dump written by hardware simulators into an immutable
//! [`Document`](document::Document) of per-signal timelines, then renders any
//! selection of signals through a zoomable, scrollable [`Viewport`](viewport::Viewport)
//! onto a raster framebuffer, an SVG document or a recorded display list.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_wave::prelude::*;
//!
//! let text = "$timescale 1ns $end\n$var wire 1 ! clk $end\n#0\n0!\n#5\n1!\n#10\n0!\n";
//! let (doc, warnings) = parse(text)?;
//! assert!(warnings.is_empty());
//!
//! let mut viewport = Viewport::new(800, 200);
//! viewport.zoom_at(2.0, Some(viewport.plot_left()));
//!
//! let mut fb = Framebuffer::new(800, 200)?;
//! render(&doc, &viewport, &Selection::all(doc.signal_count()), &mut fb);
//! let png = PngEncoder::to_bytes(&fb)?;
//! assert!(!png.is_empty());
//! # Ok::<(), trueno_wave::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `wave-render` command-line renderer
//! - `wasm`: browser bindings

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Model
// ============================================================================

/// Dump parsing: text to [`document::Document`] plus diagnostics.
pub mod dump;

/// Immutable parsed dump.
pub mod document;

/// Per-signal change lists and point/range queries.
pub mod timeline;

// ============================================================================
// View State
// ============================================================================

/// Zoom, scroll and the time/pixel transform.
pub mod viewport;

/// Visible signal set.
pub mod selection;

/// Viewer configuration (YAML).
pub mod config;

// ============================================================================
// Rendering
// ============================================================================

/// Color types.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Draw surfaces and the waveform renderer.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Support
// ============================================================================

/// Stderr debug logging for front ends.
pub mod debug;

/// Error types for trueno-wave operations.
pub mod error;

pub use error::{Error, ParseError, Result};

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_wave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::ViewerConfig;
    pub use crate::document::Document;
    pub use crate::dump::{parse, parse_reader, DumpParser, ParseWarning, Timescale, WarningKind};
    pub use crate::error::{Error, ParseError, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::render::{render, DisplayList, RowLayout, Surface, WaveformRenderer, WaveformTheme};
    pub use crate::selection::Selection;
    pub use crate::timeline::{Change, Signal, Time, Value};
    pub use crate::viewport::Viewport;
}

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
