use thiserror::Error;

/// Failure of one image-load attempt.
///
/// Callers only ever see the coarse [`Error::Load`] wrapper; these variants
/// exist so the fused format-detection-and-load policy stays inspectable in
/// logs and tests. `UnknownFormat` means the bytes carried neither the PNG
/// signature nor a JPEG SOI marker, everything else means the format was
/// recognized but the data could not be turned into a luminance buffer.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unrecognized image format")]
    UnknownFormat,

    #[error("corrupt PNG data: {0}")]
    CorruptPng(String),

    #[error("corrupt JPEG data: {0}")]
    CorruptJpeg(String),

    #[error("row stride {stride} does not match expected {expected} bytes")]
    RowStrideMismatch { stride: usize, expected: usize },

    #[error("buffer of {len} bytes matches no supported channel count for {width}x{height}")]
    UnsupportedChannelCount {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),
}

/// Global error for a whole decode call. When this is returned, no per-code
/// results exist; per-symbol decode failures never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// The image could not be loaded. The outward message is deliberately
    /// fixed: wrong-format and corrupt-data inputs are indistinguishable to
    /// the caller, the detail lives in the error source.
    #[error("failed to load image")]
    Load(#[from] LoadError),
}

pub type Result<T> = std::result::Result<T, Error>;
