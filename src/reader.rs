use crate::constants::{SourceKind, get_source_kind};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::ZipArchive;

/// One FlatGeobuf file, spooled to disk so it can be read with seeking.
pub struct FileData {
    pub file_name: String,
    pub contents: NamedTempFile,
}

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Streams every FlatGeobuf file reachable from `path`: the file itself for
/// `.fgb`, or each `.fgb` entry of a `.zip` (nested archives included).
/// Other paths yield nothing.
pub fn iter_fgb_contents(
    path: &Path,
) -> Box<dyn Iterator<Item = Result<FileData, ReaderError>> + '_> {
    match get_source_kind(path) {
        Some(SourceKind::FlatGeobuf) => Box::new(std::iter::once(read_fgb_file(path))),
        Some(SourceKind::Zip) => match read_zip_archive(path) {
            Ok(iter) => Box::new(iter),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
        None => {
            log::warn!("ignoring unsupported source {}", path.display());
            Box::new(std::iter::empty())
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn spool<R: Read>(src: &mut R) -> Result<NamedTempFile, ReaderError> {
    let mut tmp = NamedTempFile::new()?;
    io::copy(src, tmp.as_file_mut())?;
    tmp.as_file_mut().seek(SeekFrom::Start(0))?;
    Ok(tmp)
}

fn read_fgb_file(path: &Path) -> Result<FileData, ReaderError> {
    let mut src = File::open(path)?;
    Ok(FileData {
        file_name: file_name_of(path),
        contents: spool(&mut src)?,
    })
}

// streams archive entries without extracting the whole archive
struct ZipFgbIter<R: Read + Seek> {
    archive: ZipArchive<R>,
    index: usize,
    nested: Option<Box<ZipFgbIter<File>>>,
}

impl<R: Read + Seek> ZipFgbIter<R> {
    fn new(archive: ZipArchive<R>) -> Self {
        ZipFgbIter {
            archive,
            index: 0,
            nested: None,
        }
    }

    fn open_nested(tmp: &NamedTempFile) -> Result<ZipFgbIter<File>, ReaderError> {
        let mut file = tmp.as_file().try_clone()?;
        file.seek(SeekFrom::Start(0))?;
        Ok(ZipFgbIter::new(ZipArchive::new(file)?))
    }
}

impl<R: Read + Seek> Iterator for ZipFgbIter<R> {
    type Item = Result<FileData, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(n) = &mut self.nested {
                if let Some(item) = n.next() {
                    return Some(item);
                }
                self.nested = None;
            }
            if self.index >= self.archive.len() {
                return None;
            }
            let idx = self.index;
            self.index += 1;

            let mut entry = match self.archive.by_index(idx) {
                Ok(e) => e,
                Err(e) => return Some(Err(ReaderError::Zip(e))),
            };
            if entry.is_dir() {
                continue;
            }
            let entry_path = match entry.enclosed_name() {
                Some(p) => p.to_path_buf(),
                None => continue,
            };

            match get_source_kind(&entry_path) {
                Some(SourceKind::FlatGeobuf) => {
                    return Some(spool(&mut entry).map(|contents| FileData {
                        file_name: file_name_of(&entry_path),
                        contents,
                    }));
                }
                Some(SourceKind::Zip) => {
                    match spool(&mut entry).and_then(|tmp| Self::open_nested(&tmp)) {
                        Ok(mut nested_it) => {
                            if let Some(item) = nested_it.next() {
                                self.nested = Some(Box::new(nested_it));
                                return Some(item);
                            }
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
                None => continue,
            }
        }
    }
}

fn read_zip_archive(path: &Path) -> Result<ZipFgbIter<File>, ReaderError> {
    let file = File::open(path)?;
    let archive = ZipArchive::new(file)?;
    Ok(ZipFgbIter::new(archive))
}
