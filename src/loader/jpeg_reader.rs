use std::io::Cursor;

use jpeg_decoder::PixelFormat;
use log::debug;

use crate::error::LoadError;
use crate::loader::GrayscaleSource;
use crate::pixels::{PixelBuffer, luminance};

/// Every JPEG stream opens with the two-byte SOI marker.
const SOI_MARKER: [u8; 2] = [0xff, 0xd8];

/// JPEG loader. Format detection is fused with loading: control reaches this
/// reader for any container input that is not a PNG, so the SOI peek below is
/// what tells "not an image at all" apart from "a JPEG that would not decode".
/// It affects only the internal error tag, never which loader runs.
pub struct JpegReader;

impl GrayscaleSource for JpegReader {
    fn decode_to_grayscale(&self, data: &[u8]) -> Result<PixelBuffer, LoadError> {
        if data.len() < SOI_MARKER.len() || data[..SOI_MARKER.len()] != SOI_MARKER {
            return Err(LoadError::UnknownFormat);
        }

        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder.decode().map_err(corrupt)?;
        let info = decoder
            .info()
            .ok_or_else(|| LoadError::CorruptJpeg("decoder reported no image info".to_owned()))?;

        let width = info.width as usize;
        let height = info.height as usize;

        debug!(
            "decoded JPEG: {}x{} {:?}",
            width, height, info.pixel_format
        );

        let gray: Vec<u8> = match info.pixel_format {
            PixelFormat::L8 => pixels,
            // Big-endian 16-bit luma; keep the high byte.
            PixelFormat::L16 => pixels.chunks_exact(2).map(|px| px[0]).collect(),
            PixelFormat::RGB24 => pixels
                .chunks_exact(3)
                .map(|px| luminance(px[0], px[1], px[2]))
                .collect(),
            // Assumes Adobe-inverted CMYK, the form the decoder emits for
            // APP14-marked streams; a raw CMYK stream would land with its
            // tones reversed, which the binary threshold downstream tolerates.
            PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .map(|px| {
                    let (c, m, y, k) = (
                        u16::from(px[0]),
                        u16::from(px[1]),
                        u16::from(px[2]),
                        u16::from(px[3]),
                    );
                    luminance(
                        (c * k / 255) as u8,
                        (m * k / 255) as u8,
                        (y * k / 255) as u8,
                    )
                })
                .collect(),
        };

        PixelBuffer::new(width, height, gray)
    }
}

fn corrupt(err: jpeg_decoder::Error) -> LoadError {
    LoadError::CorruptJpeg(err.to_string())
}
