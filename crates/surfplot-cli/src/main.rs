//! surfplot CLI
//!
//! Loads graph settings files, builds the surfaces and writes a standalone
//! HTML viewer, or prints statistics.
//!
//! # Usage
//!
//! ```bash
//! # Write surfplot.html with every graph
//! surfplot saddle.json sphere.json
//!
//! # Choose the output path
//! surfplot saddle.json -o viewer/index.html
//!
//! # Print statistics only
//! surfplot --summary saddle.json
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use surfplot_core::PlotError;
use surfplot_render::{Graph, GraphSettings, Scene};

/// Plot 3D surfaces described by graph settings files
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Print per-graph statistics instead of writing a viewer
    #[clap(short, long)]
    summary: bool,

    /// HTML file to write
    #[clap(short, long, default_value = "surfplot.html")]
    output: PathBuf,

    /// Graph settings files (JSON)
    #[clap(required = true)]
    settings: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut scene = Scene::new();
    let mut failures = 0;
    for path in &args.settings {
        match load_graph(&mut scene, path) {
            Ok(()) => {}
            Err(e) => {
                failures += 1;
                match e.downcast_ref::<PlotError>() {
                    Some(plot) => report(path, plot),
                    None => error!("{}: {e:#}", path.display()),
                }
            }
        }
    }

    if scene.is_empty() {
        bail!("no graph could be built");
    }
    let first = scene.graphs().next().map(|(id, _)| id);
    if let Some(first) = first {
        scene.set_active(first)?;
    }

    if args.summary {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for (_, graph) in scene.graphs() {
            print_summary(&mut out, graph)?;
        }
    } else {
        scene.fit_camera();
        let file = File::create(&args.output)
            .with_context(|| format!("cannot create {}", args.output.display()))?;
        let mut writer = BufWriter::new(file);
        scene.export_html(&mut writer)?;
        writer.flush()?;
        info!(
            "wrote {} graph(s), {} triangles to {}",
            scene.len(),
            scene.total_triangles(),
            args.output.display()
        );
    }

    if failures > 0 {
        bail!("{failures} settings file(s) failed");
    }
    Ok(())
}

fn load_graph(scene: &mut Scene, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let settings = GraphSettings::from_json(&json)?;
    let id = scene.add_graph(settings)?;
    if let Some(graph) = scene.graph(id) {
        if graph.lattice().defined_count() == 0 {
            warn!("{}: surface is undefined everywhere", path.display());
        }
    }
    Ok(())
}

/// Log a build failure with the offending field and error location.
fn report(path: &Path, err: &PlotError) {
    let (Some(field), Some(eval)) = (err.field(), err.eval_error()) else {
        error!("{}: {err}", path.display());
        return;
    };
    error!(
        "{}: invalid {field} (code {}): {}\n    {}\n    {}",
        path.display(),
        eval.code.code(),
        eval.message,
        eval.expression,
        caret_line(eval.position, eval.token.chars().count())
    );
}

/// Marker line underlining `len` characters starting at `position`.
fn caret_line(position: usize, len: usize) -> String {
    format!("{}{}", " ".repeat(position), "^".repeat(len.max(1)))
}

fn print_summary(out: &mut impl Write, graph: &Graph) -> std::io::Result<()> {
    let sampler = graph.sampler();
    let cols = sampler.col_range();
    let rows = sampler.row_range();
    let res = sampler.resolution();
    let lattice = graph.lattice();
    let mesh = graph.mesh();

    writeln!(out, "{}", graph.label())?;
    writeln!(out, "  system:     {}", sampler.kind())?;
    writeln!(
        out,
        "  domain:     columns [{}, {}], rows [{}, {}]",
        cols.min, cols.max, rows.min, rows.max
    )?;
    writeln!(out, "  resolution: {} x {}", res.rows, res.columns)?;
    writeln!(
        out,
        "  defined:    {}/{}",
        lattice.defined_count(),
        lattice.len()
    )?;
    writeln!(
        out,
        "  mesh:       {} triangles, {} restarts, {} grid indices",
        mesh.triangle_count(),
        mesh.restart_count(),
        mesh.grid.len()
    )?;
    if let Some(bb) = graph.bounding_box() {
        writeln!(
            out,
            "  bounds:     ({:.4}, {:.4}, {:.4}) .. ({:.4}, {:.4}, {:.4})",
            bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
        )?;
    }
    for line in graph.cursor_text().lines() {
        writeln!(out, "  cursor:     {line}")?;
    }
    writeln!(out)
}
