use log::debug;

use crate::error::LoadError;
use crate::loader::GrayscaleSource;
use crate::pixels::{PixelBuffer, luminance};

/// Loader for caller-supplied pixel buffers with explicit dimensions.
///
/// The channel count is inferred solely from the buffer's total byte length:
/// `w*h` bytes is grayscale, `3*w*h` is RGB, `4*w*h` is RGBA, anything else
/// is unsupported. This inference and the luminance formula are part of the
/// output contract for existing callers.
pub struct RawReader {
    width: usize,
    height: usize,
}

impl RawReader {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl GrayscaleSource for RawReader {
    fn decode_to_grayscale(&self, data: &[u8]) -> Result<PixelBuffer, LoadError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(LoadError::InvalidDimensions(width, height));
        }
        let pixel_count = width
            .checked_mul(height)
            .ok_or(LoadError::InvalidDimensions(width, height))?;

        let channels = if data.len() == pixel_count {
            1
        } else if Some(data.len()) == pixel_count.checked_mul(3) {
            3
        } else if Some(data.len()) == pixel_count.checked_mul(4) {
            4
        } else {
            return Err(LoadError::UnsupportedChannelCount {
                len: data.len(),
                width,
                height,
            });
        };

        debug!("raw buffer: {}x{}, {} channel(s)", width, height, channels);

        let gray = if channels == 1 {
            data.to_vec()
        } else {
            // Alpha, when present, is ignored outright: no blending, no
            // premultiplication.
            data.chunks_exact(channels)
                .map(|px| luminance(px[0], px[1], px[2]))
                .collect()
        };

        PixelBuffer::new(width, height, gray)
    }
}
