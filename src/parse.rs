use crate::reader::FileData;
use crate::shape::PolygonShape;
use anyhow::Result;
use flatgeobuf::{FallibleStreamingIterator, FgbReader};
use geo::algorithm::orient::{Direction, Orient};
use geo_types::{Geometry, MultiPolygon};
use geozero::ToGeo;
use std::io::BufReader;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Rewind every polygon to exterior clockwise, interiors
    /// counter-clockwise before labeling.
    pub normalize_winding: bool,
}

/// One feature of the source file. `shape` is `None` when the feature's
/// geometry has no area.
#[derive(Debug, Clone)]
pub struct Record {
    pub index: usize,
    pub shape: Option<PolygonShape>,
}

pub struct ParsedFile {
    pub file_name: String,
    pub records: Vec<Record>,
}

fn to_shape(geometry: Geometry<f64>, options: &ParseOptions) -> Option<PolygonShape> {
    let multi = match geometry {
        Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
        Geometry::MultiPolygon(mp) => mp,
        Geometry::Rect(r) => MultiPolygon::new(vec![r.to_polygon()]),
        Geometry::Triangle(t) => MultiPolygon::new(vec![t.to_polygon()]),
        _ => return None,
    };
    let multi = if options.normalize_winding {
        multi.orient(Direction::Reversed)
    } else {
        multi
    };
    Some(multi.into())
}

pub fn parse_fgb_content(file: &FileData, options: &ParseOptions) -> Result<ParsedFile> {
    let mut reader = BufReader::new(file.contents.reopen()?);
    let mut features = FgbReader::open(&mut reader)?.select_all()?;

    let mut records = Vec::new();
    while let Some(feature) = features.next()? {
        let index = records.len();
        let shape = to_shape(feature.to_geo()?, options);
        if shape.is_none() {
            log::debug!("{}: record {} is not a polygon", file.file_name, index);
        }
        records.push(Record { index, shape });
    }
    log::info!("{}: read {} record(s)", file.file_name, records.len());

    Ok(ParsedFile {
        file_name: file.file_name.clone(),
        records,
    })
}
