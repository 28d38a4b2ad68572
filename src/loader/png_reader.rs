use std::io::Cursor;

use log::debug;
use png::{BitDepth, ColorType, Transformations};

use crate::error::LoadError;
use crate::loader::GrayscaleSource;
use crate::pixels::{PixelBuffer, luminance};

/// First four bytes of the canonical PNG signature, the only content sniffing
/// the format detector performs.
pub(crate) const PNG_SIGNATURE: [u8; 4] = [0x89, b'P', b'N', b'G'];

/// PNG loader. The codec is asked to normalize every source encoding down to
/// 8-bit samples: palette images expand to RGB, sub-8-bit grayscale expands
/// to 8-bit, a tRNS chunk materializes as an alpha channel, 16-bit samples
/// reduce to 8-bit, and interlaced images are de-interlaced by the frame
/// reader. The remaining color-type reduction to one luminance byte per pixel
/// happens here; alpha is discarded, never blended.
pub struct PngReader;

impl GrayscaleSource for PngReader {
    fn decode_to_grayscale(&self, data: &[u8]) -> Result<PixelBuffer, LoadError> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

        let mut reader = decoder.read_info().map_err(corrupt)?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).map_err(corrupt)?;
        buf.truncate(info.buffer_size());

        let width = info.width as usize;
        let height = info.height as usize;
        let samples = info.color_type.samples();

        // The reduction below assumes exactly one byte per sample. A stride
        // the codec reports differently would silently shear the image.
        let expected = width * samples;
        if info.bit_depth != BitDepth::Eight || info.line_size != expected {
            return Err(LoadError::RowStrideMismatch {
                stride: info.line_size,
                expected,
            });
        }

        debug!(
            "decoded PNG: {}x{} {:?}, {} samples/pixel",
            width, height, info.color_type, samples
        );

        let gray: Vec<u8> = match info.color_type {
            ColorType::Grayscale => buf,
            ColorType::GrayscaleAlpha => buf.chunks_exact(2).map(|px| px[0]).collect(),
            ColorType::Rgb => buf
                .chunks_exact(3)
                .map(|px| luminance(px[0], px[1], px[2]))
                .collect(),
            ColorType::Rgba => buf
                .chunks_exact(4)
                .map(|px| luminance(px[0], px[1], px[2]))
                .collect(),
            ColorType::Indexed => {
                // EXPAND leaves no palette behind on well-formed files.
                return Err(LoadError::CorruptPng(
                    "palette image was not expanded".to_owned(),
                ));
            }
        };

        PixelBuffer::new(width, height, gray)
    }
}

fn corrupt(err: png::DecodingError) -> LoadError {
    LoadError::CorruptPng(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    fn encode(img: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]))
    }

    #[test]
    fn grayscale_png_round_trips() {
        let img = gradient(20, 10);
        let bytes = encode(DynamicImage::ImageLuma8(img.clone()));

        let buffer = PngReader.decode_to_grayscale(&bytes).unwrap();
        assert_eq!(buffer.width(), 20);
        assert_eq!(buffer.height(), 10);
        assert_eq!(buffer.data(), img.into_raw().as_slice());
    }

    #[test]
    fn rgba_png_strips_alpha_and_reduces() {
        // Opaque-red pixels with a fully transparent alpha channel: alpha
        // must be dropped, not blended, so every pixel lands on luma(red).
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 0, 0, 0]));
        let bytes = encode(DynamicImage::ImageRgba8(img));

        let buffer = PngReader.decode_to_grayscale(&bytes).unwrap();
        assert!(buffer.data().iter().all(|&px| px == 54));
    }

    #[test]
    fn sixteen_bit_png_reduces_to_eight() {
        let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(6, 6, Luma([0xffff]));
        let bytes = encode(DynamicImage::ImageLuma16(img));

        let buffer = PngReader.decode_to_grayscale(&bytes).unwrap();
        assert_eq!(buffer.width(), 6);
        assert!(buffer.data().iter().all(|&px| px == 0xff));
    }

    #[test]
    fn truncated_png_is_corrupt() {
        let bytes = encode(DynamicImage::ImageLuma8(gradient(16, 16)));
        let err = PngReader
            .decode_to_grayscale(&bytes[..bytes.len() / 2])
            .unwrap_err();
        assert!(matches!(err, LoadError::CorruptPng(_)));
    }

    #[test]
    fn garbage_is_corrupt_not_a_panic() {
        let err = PngReader.decode_to_grayscale(b"not a png").unwrap_err();
        assert!(matches!(err, LoadError::CorruptPng(_)));
    }
}
