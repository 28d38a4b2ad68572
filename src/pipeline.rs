use log::{debug, warn};

use crate::assemble;
use crate::codes::CodeList;
use crate::engine;
use crate::error::{Error, LoadError};
use crate::loader::{GrayscaleSource, JpegReader, PNG_SIGNATURE, PngReader, RawReader};
use crate::pixels::PixelBuffer;

/// One decode request: container bytes with the format sniffed from content,
/// or a raw pixel buffer with explicit dimensions. Explicit dimensions always
/// win over content sniffing.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Container(&'a [u8]),
    Raw {
        data: &'a [u8],
        width: usize,
        height: usize,
    },
}

/// Decode orchestrator: format detection, loading, engine scan, assembly.
///
/// Each call is a self-contained unit of work owning its pixel buffer, its
/// engine instance and its result list, so one pipeline value can serve any
/// number of concurrent calls without locking. Generic over the container
/// loaders so tests can inject failing codecs.
pub struct DecodePipeline<P = PngReader, J = JpegReader> {
    png: P,
    jpeg: J,
}

impl DecodePipeline {
    pub fn new() -> Self {
        Self {
            png: PngReader,
            jpeg: JpegReader,
        }
    }
}

impl Default for DecodePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, J> DecodePipeline<P, J>
where
    P: GrayscaleSource,
    J: GrayscaleSource,
{
    pub fn with_custom(png: P, jpeg: J) -> Self {
        Self { png, jpeg }
    }

    /// Decodes PNG or JPEG container bytes, auto-detecting the format.
    pub fn decode(&self, img: &[u8]) -> Result<CodeList, Error> {
        self.decode_source(ImageSource::Container(img))
    }

    /// Decodes a raw pixel buffer; `width` and `height` must be positive and
    /// the buffer length must match a supported channel count.
    pub fn decode_raw(&self, img: &[u8], width: usize, height: usize) -> Result<CodeList, Error> {
        self.decode_source(ImageSource::Raw {
            data: img,
            width,
            height,
        })
    }

    /// Runs one full decode: any load failure is global and short-circuits
    /// with no partial results; once symbols are located, each one's decode
    /// outcome is isolated to its own slot.
    pub fn decode_source(&self, source: ImageSource<'_>) -> Result<CodeList, Error> {
        let buffer = self.load(source).map_err(|err| {
            warn!("image load failed: {err}");
            Error::Load(err)
        })?;
        let outcomes = engine::scan(&buffer);
        Ok(assemble::assemble(outcomes))
    }

    /// Fused format detection and loading. The PNG signature is the only
    /// content sniffing performed; both a signature miss and a PNG decode
    /// failure fall through to the JPEG attempt.
    fn load(&self, source: ImageSource<'_>) -> Result<PixelBuffer, LoadError> {
        match source {
            ImageSource::Raw {
                data,
                width,
                height,
            } => RawReader::new(width, height).decode_to_grayscale(data),
            ImageSource::Container(data) => {
                let png_failure = if data.len() >= PNG_SIGNATURE.len()
                    && data[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
                {
                    match self.png.decode_to_grayscale(data) {
                        Ok(buffer) => return Ok(buffer),
                        Err(err) => {
                            debug!("PNG load failed, falling through to JPEG: {err}");
                            Some(err)
                        }
                    }
                } else {
                    None
                };

                self.jpeg.decode_to_grayscale(data).map_err(|jpeg_err| {
                    // Input that carried the PNG signature but satisfied
                    // neither loader is a corrupt PNG, not an unknown format.
                    match png_failure {
                        Some(png_err) if matches!(jpeg_err, LoadError::UnknownFormat) => png_err,
                        _ => jpeg_err,
                    }
                })
            }
        }
    }
}
