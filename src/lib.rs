//! QR code decoding pipeline.
//!
//! Hands raw image bytes (PNG or JPEG container bytes, or a raw pixel buffer
//! with explicit dimensions) to the quirc engine and returns a structured
//! result list: one entry per located symbol, each either a decoded code with
//! its metadata or an isolated per-symbol error. A whole call fails with a
//! single global error only when the image itself cannot be loaded.
//!
//! ```no_run
//! let png_bytes = std::fs::read("code.png").unwrap();
//! for result in qrscan::decode(&png_bytes).unwrap() {
//!     match result {
//!         qrscan::CodeResult::Code(code) => {
//!             println!("v{} {:?}: {:?}", code.version, code.ecc_level, code.data)
//!         }
//!         qrscan::CodeResult::Error { err } => println!("undecodable symbol: {err}"),
//!     }
//! }
//! ```

pub mod codes;
pub mod error;
pub mod loader;
pub mod pipeline;

mod assemble;
mod engine;
mod pixels;

pub use codes::{
    CodeList, CodeResult, DecodedCode, EccLevel, Mode, VERSION_MAX, VERSION_MIN, eci_name,
};
pub use error::{Error, LoadError, Result};
pub use pipeline::{DecodePipeline, ImageSource};
pub use pixels::PixelBuffer;

/// Decodes every QR code in PNG or JPEG container bytes; the format is
/// auto-detected.
pub fn decode(img: &[u8]) -> Result<CodeList> {
    DecodePipeline::new().decode(img)
}

/// Decodes every QR code in a raw pixel buffer. The channel count is inferred
/// from the buffer length: `width*height` bytes is grayscale, three times
/// that is RGB, four times is RGBA.
pub fn decode_raw(img: &[u8], width: usize, height: usize) -> Result<CodeList> {
    DecodePipeline::new().decode_raw(img, width, height)
}
