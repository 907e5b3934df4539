//! JSON run record written next to the report with `--record`.
//!
//! Holds what the text report cannot: the outline as loaded, every split
//! that was applied with the face it created, and the towers that landed in
//! no face.

use anyhow::{Context, Result};
use midsplit::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// One applied split command and the face it created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SplitRecord {
    pub a: i64,
    pub b: i64,
    pub face: i64,
}

#[derive(Debug, Serialize)]
pub struct FaceRecord {
    pub face: i64,
    pub towers: Vec<String>,
    pub population: i64,
}

#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    pub version: &'static str,
    pub outline: Vec<[f64; 2]>,
    pub splits: &'a [SplitRecord],
    pub faces: Vec<FaceRecord>,
    pub unassigned: Vec<String>,
}

impl<'a> RunRecord<'a> {
    pub fn new(
        outline: &[Coord],
        splits: &'a [SplitRecord],
        regions: &[Region],
        towers: &[Watchtower],
    ) -> Self {
        let faces = regions
            .iter()
            .map(|r| FaceRecord {
                face: r.face.0,
                towers: r.towers.iter().map(|&k| towers[k].id.clone()).collect(),
                population: r.population,
            })
            .collect();
        Self {
            version: midsplit::VERSION,
            outline: outline.iter().map(|p| [p.x, p.y]).collect(),
            splits,
            faces,
            unassigned: towers
                .iter()
                .filter(|t| t.region.is_none())
                .map(|t| t.id.clone())
                .collect(),
        }
    }
}

/// `out/report.txt` → `out/report.run.json`.
pub fn record_path(report: &Path) -> PathBuf {
    let mut name = report
        .file_stem()
        .unwrap_or(report.as_os_str())
        .to_os_string();
    name.push(".run.json");
    report.with_file_name(name)
}

/// Write the record beside `report` and return its path.
pub fn write_record(report: &Path, record: &RunRecord<'_>) -> Result<PathBuf> {
    let path = record_path(report);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), record)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
