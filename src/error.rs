#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Quality must be a positive number of scan-lines, got {0}")]
    InvalidQuality(u32),
    #[error("No interior chord found across {quality} scan-line(s)")]
    NoInteriorFound { quality: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
