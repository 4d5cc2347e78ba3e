use crate::chord::Chord;
use crate::geo::{LabelOptions, widest_chord};
use crate::parse::{ParseOptions, ParsedFile};
use crate::reader::{FileData, iter_fgb_contents};
use crate::writer::{Destination, LabelWriter};
use anyhow::{Result, anyhow};
use crossbeam_channel::bounded;
use indicatif::{MultiProgress, ProgressStyle};
use std::path::PathBuf;
use std::thread;
use std::thread::JoinHandle;
use std::time::Instant;

const CHANNEL_CAPACITY: usize = 100;

/// The outcome for one polygon record.
#[derive(Debug, Clone)]
pub struct Label {
    pub index: usize,
    pub outcome: crate::error::Result<Chord>,
}

#[derive(Debug, Clone)]
pub struct LabeledFile {
    pub file_name: String,
    pub labels: Vec<Label>,
    /// Records without a polygon geometry.
    pub skipped: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    pub files: usize,
    pub labeled: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ProcessSummary {
    fn add(&mut self, file: &LabeledFile) {
        self.files += 1;
        self.skipped += file.skipped;
        for label in &file.labels {
            match label.outcome {
                Ok(_) => self.labeled += 1,
                Err(_) => self.failed += 1,
            }
        }
    }
}

pub fn label_file(parsed: ParsedFile, options: &LabelOptions) -> LabeledFile {
    let mut skipped = 0;
    let labels = parsed
        .records
        .into_iter()
        .filter_map(|record| {
            let Some(shape) = record.shape else {
                skipped += 1;
                return None;
            };
            let outcome = widest_chord(&shape, options);
            if let Err(e) = &outcome {
                log::warn!("{}: record {}: {}", parsed.file_name, record.index, e);
            }
            Some(Label {
                index: record.index,
                outcome,
            })
        })
        .collect();

    LabeledFile {
        file_name: parsed.file_name,
        labels,
        skipped,
    }
}

pub fn process_files(
    src_files: Vec<PathBuf>,
    parse_options: ParseOptions,
    label_options: LabelOptions,
    destination: Destination,
) -> Result<ProcessSummary> {
    let concurrency = num_cpus::get();
    let m = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::stderr_with_hz(2));
    let sty = ProgressStyle::with_template(
        "[{msg}] {elapsed_precise} {bar:40.cyan/blue} {pos:>7}/{len:7}",
    )?
    .progress_chars("##-");

    // Source channels
    let (path_tx, path_rx) = bounded::<PathBuf>(CHANNEL_CAPACITY);
    let read_pb = m.add(
        indicatif::ProgressBar::new(0)
            .with_style(sty.clone())
            .with_message("reading"),
    );
    // Labeling channels
    let (label_tx, label_rx) = bounded::<FileData>(CHANNEL_CAPACITY);
    let label_pb = m.add(
        indicatif::ProgressBar::new(0)
            .with_style(sty.clone())
            .with_message("labeling"),
    );
    // Writer channels
    let (writer_tx, writer_rx) = bounded::<LabeledFile>(CHANNEL_CAPACITY);
    let writer_pb = m.add(
        indicatif::ProgressBar::new(0)
            .with_style(sty.clone())
            .with_message("writing"),
    );

    let start = Instant::now();
    let mut handles: Vec<JoinHandle<()>> = Vec::new();
    {
        let read_pb = read_pb.clone();
        handles.push(thread::spawn(move || {
            for path in src_files {
                read_pb.inc_length(1);
                if path_tx.send(path).is_err() {
                    break;
                }
            }
        }));
    }
    for _ in 0..concurrency {
        let path_rx = path_rx.clone();
        let label_tx = label_tx.clone();
        let read_pb = read_pb.clone();
        let label_pb = label_pb.clone();
        handles.push(thread::spawn(move || {
            while let Ok(path) = path_rx.recv() {
                for item in iter_fgb_contents(&path) {
                    match item {
                        Ok(file_data) => {
                            label_pb.inc_length(1);
                            if label_tx.send(file_data).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            log::error!("reading {}: {}", path.display(), e);
                            eprintln!("Error reading file {}: {}", path.display(), e);
                        }
                    }
                }
                read_pb.inc(1);
            }
        }));
    }
    drop(path_rx);
    drop(label_tx);

    for _ in 0..concurrency {
        let label_rx = label_rx.clone();
        let writer_tx = writer_tx.clone();
        let label_pb = label_pb.clone();
        let writer_pb = writer_pb.clone();
        let parse_options = parse_options.clone();
        handles.push(thread::spawn(move || {
            while let Ok(file_data) = label_rx.recv() {
                let parsed = crate::parse::parse_fgb_content(&file_data, &parse_options);
                label_pb.inc(1);
                match parsed {
                    Ok(parsed) => {
                        let labeled = label_file(parsed, &label_options);
                        writer_pb.inc_length(1);
                        if writer_tx.send(labeled).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        log::error!("parsing {}: {}", file_data.file_name, e);
                        eprintln!("Error parsing file {}: {}", file_data.file_name, e);
                    }
                }
            }
        }));
    }
    drop(label_rx);
    drop(writer_tx);

    let writer_handle: JoinHandle<Result<ProcessSummary>> = {
        let writer_pb = writer_pb.clone();
        thread::spawn(move || {
            let mut writer = LabelWriter::open(destination)?;
            let mut summary = ProcessSummary::default();
            while let Ok(labeled) = writer_rx.recv() {
                summary.add(&labeled);
                writer.add_labels(labeled)?;
                writer_pb.inc(1);
            }
            writer.flush()?;
            Ok(summary)
        })
    };

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("worker thread panicked"))?;
    }
    let summary = writer_handle
        .join()
        .map_err(|_| anyhow!("writer thread panicked"))??;
    let elapsed = start.elapsed();

    read_pb.finish();
    label_pb.finish();
    writer_pb.finish();

    log::info!("processed {:?} in {:?}", summary, elapsed);
    eprintln!(
        "\nFinished processing files in {}.{:03}",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    Ok(summary)
}
