//! wave-render: render a value-change dump to PNG or SVG.
//!
//! ```text
//! wave-render trace.vcd -o trace.png
//! wave-render trace.vcd --list
//! wave-render trace.vcd -s clk -s rst --zoom 4 --anchor 150 -o zoomed.svg
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use trueno_wave::config::ViewerConfig;
use trueno_wave::document::Document;
use trueno_wave::dump::{parse_reader, ParseOutput};
use trueno_wave::framebuffer::Framebuffer;
use trueno_wave::output::{PngEncoder, SvgEncoder};
use trueno_wave::render::WaveformRenderer;
use trueno_wave::selection::Selection;
use trueno_wave::{debug, info, time_scope, warn};

/// Render value-change dumps to images
#[derive(Parser, Debug)]
#[command(name = "wave-render")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render value-change dump waveforms to PNG or SVG", long_about = None)]
struct Cli {
    /// Dump file to read (`-` for stdin)
    input: PathBuf,

    /// Output file; `.svg` selects vector output, anything else PNG
    #[arg(short, long, default_value = "waveform.png")]
    output: PathBuf,

    /// List declared signals and exit
    #[arg(short, long)]
    list: bool,

    /// Signal to show, by name (repeatable; default: all)
    #[arg(short, long = "signal")]
    signals: Vec<String>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Zoom factor
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Pixel x kept fixed while zooming (default: plot centre)
    #[arg(long, requires = "zoom")]
    anchor: Option<f64>,

    /// Horizontal scroll offset in pixels, applied after zoom
    #[arg(long)]
    scroll: Option<f64>,

    /// Draw a cursor line at this time (ticks)
    #[arg(long)]
    cursor: Option<u64>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print debug output to stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        debug::enable();
    } else {
        debug::init_from_env();
    }

    let config = load_config(cli.config.as_deref())?;
    let (document, warnings) = read_dump(&cli.input)?;

    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    info!(
        "parse",
        "{} signals, {} changes, duration {} x {}",
        document.signal_count(),
        document.change_count(),
        document.duration(),
        document.timescale()
    );

    if cli.list {
        print_signals(&document);
        return Ok(());
    }

    let selection = select(&document, &cli.signals)?;
    render_to_file(&cli, &config, &document, &selection)
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let config = match path {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => match ViewerConfig::default_path() {
            Some(path) if path.exists() => {
                info!("config", "using {}", path.display());
                ViewerConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?
            }
            _ => ViewerConfig::default(),
        },
    };
    config.validate()?;
    Ok(config)
}

fn read_dump(path: &Path) -> Result<ParseOutput> {
    time_scope!("parse", format!("read {}", path.display()));

    if path.as_os_str() == "-" {
        return Ok(parse_reader(io::stdin().lock())?);
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

fn print_signals(document: &Document) {
    println!("timescale: {}", document.timescale());
    if let Some(date) = document.date() {
        println!("date:      {date}");
    }
    if let Some(version) = document.version() {
        println!("version:   {version}");
    }
    println!("duration:  {}", document.duration());
    println!();
    println!("{:>5}  {:<8}  {:>5}  {:>8}  NAME", "INDEX", "ID", "WIDTH", "CHANGES");
    for (index, signal) in document.signals().iter().enumerate() {
        println!(
            "{:>5}  {:<8}  {:>5}  {:>8}  {}",
            index,
            signal.identifier(),
            signal.bit_width(),
            signal.changes().len(),
            signal.name()
        );
    }
}

fn select(document: &Document, names: &[String]) -> Result<Selection> {
    if names.is_empty() {
        return Ok(Selection::all(document.signal_count()));
    }
    let mut selection = Selection::new();
    for name in names {
        match document.find(name) {
            Some((index, _)) => {
                selection.insert(index);
            }
            None => bail!("no signal named '{name}' (use --list to see declared signals)"),
        }
    }
    Ok(selection)
}

fn render_to_file(cli: &Cli, config: &ViewerConfig, document: &Document, selection: &Selection) -> Result<()> {
    let width = cli.width.unwrap_or(config.canvas.width);
    let height = cli.height.unwrap_or(config.canvas.height);

    let mut viewport = config.viewport();
    viewport.resize(i32::try_from(width)?, i32::try_from(height)?);
    if let Some(zoom) = cli.zoom {
        viewport.zoom_at(zoom, cli.anchor);
    }
    if let Some(scroll) = cli.scroll {
        viewport.scroll_to(scroll);
    }
    viewport.set_cursor(cli.cursor);

    if document.signals().is_empty() {
        warn!("render", "document declares no signals; output is blank");
    }
    info!(
        "render",
        "{}x{} zoom {:.3} scroll {:.1}",
        width,
        height,
        viewport.zoom(),
        viewport.scroll_offset()
    );

    let renderer = WaveformRenderer::new()
        .theme(config.theme()?)
        .layout(config.layout());

    time_scope!("render", format!("write {}", cli.output.display()));
    let is_svg = cli
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let mut svg = SvgEncoder::new(width, height);
        renderer.render(document, &viewport, selection, &mut svg);
        svg.write_to_file(&cli.output)?;
    } else {
        let mut fb = Framebuffer::new(width, height)?;
        renderer.render(document, &viewport, selection, &mut fb);
        if debug::is_enabled() {
            let (min, max, mean) = fb.luminance_stats();
            debug!(
                "render",
                "frame luminance min {:.1} max {:.1} mean {:.1} ({:?})",
                min,
                max,
                mean,
                Framebuffer::backend()
            );
        }
        PngEncoder::write_to_file(&fb, &cli.output)?;
    }

    eprintln!("wrote {}", cli.output.display());
    Ok(())
}
