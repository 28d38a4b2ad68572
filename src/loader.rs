//! Format-specific image loaders. Each external codec sits behind the same
//! narrow capability interface so the pipeline never touches codec handles.

mod jpeg_reader;
mod png_reader;
mod raw_reader;

pub use jpeg_reader::JpegReader;
pub use png_reader::PngReader;
pub use raw_reader::RawReader;

pub(crate) use png_reader::PNG_SIGNATURE;

use crate::error::LoadError;
use crate::pixels::PixelBuffer;

/// Decodes one image representation into the single-channel luminance buffer
/// the QR engine scans. Implementations own all codec resource handling;
/// every exit path releases codec state through ordinary drops.
pub trait GrayscaleSource {
    fn decode_to_grayscale(&self, data: &[u8]) -> Result<PixelBuffer, LoadError>;
}
