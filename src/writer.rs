use crate::constants::{COLUMN_CHORD_LENGTH, COLUMN_INDEX, COLUMN_SOURCE, LAYER_NAME};
use crate::processor::LabeledFile;
use anyhow::Result;
use flatgeobuf::{
    ColumnType, FgbCrs, FgbWriter, FgbWriterOptions, GeometryType,
    geozero::{ColumnValue, PropertyProcessor},
};
use geo_types::{Geometry, Point};
use std::io::{BufWriter, Write};
use std::{fs::File, path::Path, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    pub write_index: bool,
    pub epsg: Option<i32>,
}

/// Where labeled points go.
pub enum Destination {
    Fgb { path: PathBuf, options: WriterOptions },
    Text(Box<dyn Write + Send>),
}

pub struct FGBWriter<'a> {
    fgb: FgbWriter<'a>,
    writer: BufWriter<File>,
}

impl FGBWriter<'_> {
    pub fn new(output_path: &Path, options: WriterOptions) -> Result<Self> {
        let writer = BufWriter::new(File::create(output_path)?);

        let mut fgb = FgbWriter::create_with_options(
            LAYER_NAME,
            GeometryType::Point,
            FgbWriterOptions {
                write_index: options.write_index,
                crs: FgbCrs {
                    code: options.epsg.unwrap_or_default(),
                    ..Default::default()
                },
                ..Default::default()
            },
        )?;
        fgb.add_column(COLUMN_SOURCE, ColumnType::String, |_, _| {});
        fgb.add_column(COLUMN_INDEX, ColumnType::ULong, |_, _| {});
        fgb.add_column(COLUMN_CHORD_LENGTH, ColumnType::Double, |_, _| {});

        Ok(FGBWriter { fgb, writer })
    }

    /// Adds one point feature per successfully labeled record.
    pub fn add_labels(&mut self, labeled: &LabeledFile) -> Result<()> {
        for label in &labeled.labels {
            let Ok(chord) = &label.outcome else {
                continue;
            };
            let geometry = Geometry::Point(Point::from(chord.midpoint()));
            let mut props = Ok(());
            self.fgb.add_feature_geom(geometry, |feat| {
                props = write_properties(feat, &labeled.file_name, label.index, chord.length());
            })?;
            props?;
        }
        Ok(())
    }

    /// Flush the writer and finalize the FlatGeobuf file.
    /// No features can be added afterwards.
    pub fn flush(mut self) -> Result<()> {
        self.fgb.write(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn write_properties<P: PropertyProcessor>(
    feat: &mut P,
    source: &str,
    index: usize,
    chord_length: f64,
) -> geozero::error::Result<()> {
    feat.property(0, COLUMN_SOURCE, &ColumnValue::String(source))?;
    feat.property(1, COLUMN_INDEX, &ColumnValue::ULong(index as u64))?;
    feat.property(2, COLUMN_CHORD_LENGTH, &ColumnValue::Double(chord_length))?;
    Ok(())
}

/// Prints `index: x=… y=…` lines, grouped per source file.
///
/// Files arrive in whatever order the workers finish them, so output is
/// held until `flush` and then sorted by file name.
pub struct TextWriter {
    out: Box<dyn Write + Send>,
    files: Vec<LabeledFile>,
}

impl TextWriter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        TextWriter {
            out,
            files: Vec::new(),
        }
    }

    pub fn add_labels(&mut self, labeled: LabeledFile) {
        self.files.push(labeled);
    }

    pub fn flush(mut self) -> Result<()> {
        self.files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        for file in &self.files {
            writeln!(self.out, "{}", file.file_name)?;
            for label in &file.labels {
                match &label.outcome {
                    Ok(chord) => {
                        let point = chord.midpoint();
                        writeln!(self.out, "{}: x={:.6} y={:.6}", label.index, point.x, point.y)?;
                    }
                    Err(e) => writeln!(self.out, "{}: {}", label.index, e)?,
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

pub enum LabelWriter {
    Fgb(FGBWriter<'static>),
    Text(TextWriter),
}

impl LabelWriter {
    pub fn open(destination: Destination) -> Result<Self> {
        Ok(match destination {
            Destination::Fgb { path, options } => LabelWriter::Fgb(FGBWriter::new(&path, options)?),
            Destination::Text(out) => LabelWriter::Text(TextWriter::new(out)),
        })
    }

    pub fn add_labels(&mut self, labeled: LabeledFile) -> Result<()> {
        match self {
            LabelWriter::Fgb(fgb) => fgb.add_labels(&labeled),
            LabelWriter::Text(text) => {
                text.add_labels(labeled);
                Ok(())
            }
        }
    }

    pub fn flush(self) -> Result<()> {
        match self {
            LabelWriter::Fgb(fgb) => fgb.flush(),
            LabelWriter::Text(text) => text.flush(),
        }
    }
}
