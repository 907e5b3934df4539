use anyhow::{Context, Result};
use clap::Parser;
use midsplit::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod record;

use record::RunRecord;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Split a polygon along midpoint chords read from stdin and assign watchtowers to the faces")]
struct Cmd {
    /// Watchtower CSV
    towers: PathBuf,
    /// Polygon vertices as whitespace-separated `x y` pairs
    polygon: PathBuf,
    /// Report destination
    output: PathBuf,
    /// Also write `<output-stem>.run.json` with the applied splits and per-face towers
    #[arg(long)]
    record: bool,
}

fn main() -> Result<()> {
    // stdout carries the plotting stream, so logs go to stderr.
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let stdout = std::io::stdout();
    run(&cmd, std::io::stdin().lock(), stdout.lock())
}

/// Load, split with the commands in `splits`, assign, then write the plotting
/// stream to `plot` and the report (plus the record) to disk.
fn run<R: BufRead, W: Write>(cmd: &Cmd, splits: R, plot: W) -> Result<()> {
    tracing::info!(
        towers = %cmd.towers.display(),
        polygon = %cmd.polygon.display(),
        output = %cmd.output.display(),
        "run"
    );
    let mut towers = io::read_towers(&cmd.towers)?;
    let outline = io::read_polygon(&cmd.polygon)?;
    let mut dcel = Dcel::from_polygon(&outline)
        .with_context(|| format!("loading {}", cmd.polygon.display()))?;

    let applied = io::apply_splits(&mut dcel, splits)?;
    let regions = assign_towers(&dcel, &mut towers);
    tracing::info!(
        towers = towers.len(),
        vertices = outline.len(),
        splits = applied.len(),
        faces = dcel.num_faces(),
        located = towers.iter().filter(|t| t.region.is_some()).count(),
        "subdivided"
    );

    let mut plot = BufWriter::new(plot);
    io::write_plot_stream(&mut plot, &dcel, &towers)?;
    plot.flush()?;

    let file = File::create(&cmd.output)
        .with_context(|| format!("creating {}", cmd.output.display()))?;
    let mut report = BufWriter::new(file);
    io::write_report(&mut report, &regions, &towers)
        .with_context(|| format!("writing {}", cmd.output.display()))?;
    report.flush()?;

    if cmd.record {
        let rec = RunRecord::new(&outline, &applied, &regions, &towers);
        let path = record::write_record(&cmd.output, &rec)?;
        tracing::info!(path = %path.display(), "record");
    }
    Ok(())
}
