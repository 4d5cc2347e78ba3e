use std::path::Path;

pub const LAYER_NAME: &str = "pointinpoly";
pub const LOG_FILE_NAME: &str = "pointinpoly.log";

// Output columns
pub const COLUMN_SOURCE: &str = "source";
pub const COLUMN_INDEX: &str = "index";
pub const COLUMN_CHORD_LENGTH: &str = "chord_length";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    FlatGeobuf,
    Zip,
}

pub fn get_source_kind(path: &Path) -> Option<SourceKind> {
    let ext = path
        .extension()
        .and_then(|os_str| os_str.to_str())
        .map(|s| s.to_lowercase());

    match ext.as_deref() {
        Some("fgb") => Some(SourceKind::FlatGeobuf),
        Some("zip") => Some(SourceKind::Zip),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_source_kind() {
        assert_eq!(
            get_source_kind(Path::new("parcels.fgb")),
            Some(SourceKind::FlatGeobuf)
        );
        assert_eq!(
            get_source_kind(Path::new("dir/PARCELS.FGB")),
            Some(SourceKind::FlatGeobuf)
        );
        assert_eq!(get_source_kind(Path::new("batch.zip")), Some(SourceKind::Zip));
    }

    #[test]
    fn test_get_source_kind_unknown() {
        assert_eq!(get_source_kind(Path::new("parcels.shp")), None);
        assert_eq!(get_source_kind(Path::new("README")), None);
        assert_eq!(get_source_kind(Path::new("")), None);
    }
}
