//! File formats: tower CSV, polygon coordinates, split commands, report and
//! the `@W`/`@E` plotting stream.

use anyhow::{bail, Context, Result};
use midsplit::prelude::*;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::record::SplitRecord;

/// Exact first line of a tower file.
pub const TOWER_HEADER: &str =
    "Watchtower ID,Postcode,Population Served,Watchtower Point of Contact Name,x,y";

const COLUMNS: [&str; 6] = [
    "Watchtower ID",
    "Postcode",
    "Population Served",
    "Watchtower Point of Contact Name",
    "x",
    "y",
];

/// Read towers from a CSV with the exact [`TOWER_HEADER`]. All towers start unassigned.
pub fn read_towers(path: &Path) -> Result<Vec<Watchtower>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .with_context(|| format!("reading header of {}", path.display()))?;
    let header = header.trim_end_matches(['\n', '\r']);
    if header != TOWER_HEADER {
        bail!("wrong header in {}: {header:?}", path.display());
    }

    // Schema inference off: every column arrives as text and is parsed below.
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()
        .with_context(|| format!("parsing {}", path.display()))?;
    let [id, postcode, pop, contact, x, y] = COLUMNS.map(|name| df.column(name));
    let (id, postcode, pop, contact, x, y) = (
        id?.str()?,
        postcode?.str()?,
        pop?.str()?,
        contact?.str()?,
        x?.str()?,
        y?.str()?,
    );

    let mut towers = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let line = row + 2;
        let field = |ca: &StringChunked| ca.get(row).unwrap_or("").trim().to_string();
        let population = parse_field::<i64>(&field(pop), "Population Served", line)?;
        let cx = parse_field::<f64>(&field(x), "x", line)?;
        let cy = parse_field::<f64>(&field(y), "y", line)?;
        towers.push(Watchtower {
            id: field(id),
            postcode: field(postcode),
            population,
            contact: field(contact),
            coord: Coord::new(cx, cy),
            region: None,
        });
    }
    Ok(towers)
}

fn parse_field<T: std::str::FromStr>(raw: &str, column: &str, line: usize) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| anyhow::anyhow!("line {line}: {column} is not a number: {raw:?}"))
}

/// Whitespace-separated `x y` pairs, implicitly closed.
pub fn read_polygon(path: &Path) -> Result<Vec<Coord>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("opening {}", path.display()))?;
    let values = text
        .split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("{}: bad coordinate {tok:?}", path.display()))
        })
        .collect::<Result<Vec<f64>>>()?;
    if values.len() % 2 != 0 {
        bail!("{}: odd number of coordinates", path.display());
    }
    Ok(values.chunks_exact(2).map(|p| Coord::new(p[0], p[1])).collect())
}

/// Leading integer after optional whitespace: a sign, then digits. Whatever
/// follows the digits is left for the next read, so `4abc` reads as 4.
fn scan_int(s: &str) -> Option<(i64, &str)> {
    let s = s.trim_start();
    let sign = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (num, rest) = s.split_at(sign + digits);
    Some((num.parse().ok()?, rest))
}

/// First two integers on a split line, or `None` to end the stream.
pub fn parse_split(line: &str) -> Option<(i64, i64)> {
    let (a, rest) = scan_int(line)?;
    let (b, _) = scan_int(rest)?;
    Some((a, b))
}

/// Apply split commands until end of input or the first unparsable line.
/// Returns the applied splits in order.
pub fn apply_splits<R: BufRead>(dcel: &mut Dcel, input: R) -> Result<Vec<SplitRecord>> {
    let mut applied = Vec::new();
    for line in input.lines() {
        let line = line.context("reading split commands")?;
        let Some((a, b)) = parse_split(&line) else {
            tracing::debug!(line, "split stream ended");
            break;
        };
        let face = dcel
            .split(a, b)
            .with_context(|| format!("split {a} {b}"))?;
        applied.push(SplitRecord { a, b, face: face.0 });
    }
    Ok(applied)
}

fn write_tower<W: Write>(out: &mut W, t: &Watchtower) -> std::io::Result<()> {
    writeln!(
        out,
        "Watchtower ID: {}, Postcode: {}, Population Served: {}, \
         Watchtower Point of Contact Name: {}, x: {:.6}, y: {:.6}",
        t.id, t.postcode, t.population, t.contact, t.coord.x, t.coord.y
    )
}

/// Per-face tower listing followed by per-face population totals.
pub fn write_report<W: Write>(
    out: &mut W,
    regions: &[Region],
    towers: &[Watchtower],
) -> std::io::Result<()> {
    for region in regions {
        writeln!(out, "{}", region.face)?;
        for &k in &region.towers {
            write_tower(out, &towers[k])?;
        }
    }
    for region in regions {
        writeln!(
            out,
            "Face {} population served: {}",
            region.face, region.population
        )?;
    }
    Ok(())
}

/// `@W<face> x y` per tower, then `@E<id> <face> sx sy ex ey` for every
/// registered half-edge followed by its pair.
pub fn write_plot_stream<W: Write>(
    out: &mut W,
    dcel: &Dcel,
    towers: &[Watchtower],
) -> std::io::Result<()> {
    for t in towers {
        let face = t.region.unwrap_or(OUTER_FACE);
        writeln!(out, "@W{} {:.6} {:.6}", face, t.coord.x, t.coord.y)?;
    }
    for &idx in dcel.registry() {
        let e = dcel.half_edge(idx);
        for he in [e, dcel.half_edge(e.pair)] {
            writeln!(
                out,
                "@E{} {} {:.6} {:.6} {:.6} {:.6}",
                he.id, he.face, he.start.x, he.start.y, he.end.x, he.end.y
            )?;
        }
    }
    Ok(())
}
