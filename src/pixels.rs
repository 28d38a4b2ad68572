use crate::error::LoadError;

/// Owned 8-bit single-channel luminance grid, row-major, no padding.
///
/// Every loader produces one of these; the engine adapter consumes it for the
/// duration of a single decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps a grayscale buffer, enforcing the `width * height` length
    /// invariant.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::InvalidDimensions(width, height));
        }
        let expected = width
            .checked_mul(height)
            .ok_or(LoadError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(LoadError::RowStrideMismatch {
                stride: data.len() / height.max(1),
                expected: width,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Colorimetric (perceptual luminance-preserving) RGB reduction, truncated to
/// an 8-bit integer. The exact coefficients and the truncation are part of the
/// output contract for raw-buffer callers.
#[inline]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_len_must_match_dimensions() {
        assert!(PixelBuffer::new(4, 4, vec![0; 16]).is_ok());
        let err = PixelBuffer::new(4, 4, vec![0; 17]).unwrap_err();
        assert!(matches!(err, LoadError::RowStrideMismatch { .. }));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(LoadError::InvalidDimensions(0, 4))
        ));
        assert!(matches!(
            PixelBuffer::new(4, 0, Vec::new()),
            Err(LoadError::InvalidDimensions(4, 0))
        ));
    }

    #[test]
    fn luminance_of_gray_is_identity_like() {
        // Equal channels collapse to (0.2126 + 0.7152 + 0.0722) * v = v,
        // modulo float truncation.
        for v in [0u8, 1, 54, 127, 200, 255] {
            let y = luminance(v, v, v);
            assert!(y == v || y + 1 == v, "gray {v} mapped to {y}");
        }
    }

    #[test]
    fn luminance_of_pure_red() {
        // 0.2126 * 255 = 54.213, truncated to 54.
        assert_eq!(luminance(255, 0, 0), 54);
    }

    #[test]
    fn luminance_of_pure_green_and_blue() {
        assert_eq!(luminance(0, 255, 0), 182); // 0.7152 * 255 = 182.376
        assert_eq!(luminance(0, 0, 255), 18); // 0.0722 * 255 = 18.411
    }
}
