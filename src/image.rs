#[cfg(feature = "image")]
use std::path::{Path, PathBuf};

#[cfg(feature = "image")]
use image::{ImageBuffer, Rgb};

#[cfg(feature = "image")]
use crate::error::{Error, Result};

/// Number of interleaved channels in a converted frame (packed RGB8).
pub(crate) const FRAME_CHANNELS: usize = 3;

/// A frame after pixel format conversion: interleaved 8-bit RGB, owned by
/// the wrapper rather than by an SDK buffer.
///
/// `padding_x` is the number of alignment bytes at the end of each row of
/// the underlying buffer. Converted output is normally packed, but the
/// accessors handle padded layouts so a frame can also describe a raw
/// transport buffer.
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    padding_x: u32,
}

impl Frame {
    pub(crate) fn from_parts(data: Vec<u8>, width: u32, height: u32, padding_x: u32) -> Self {
        Self {
            data,
            width,
            height,
            padding_x,
        }
    }

    /// Get the width of this frame in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of this frame in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of extra bytes at the end of each line for alignment.
    pub fn padding_x(&self) -> u32 {
        self.padding_x
    }

    /// Get one pixel as an `[R, G, B]` slice.
    ///
    /// # Arguments
    ///
    /// * `x`: Horizontal coordinate of the requested pixel.
    /// * `y`: Vertical coordinate of the requested pixel.
    ///
    /// returns: Option<&[u8]> The three channel values, or `None` when the
    /// coordinates fall outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        // stride is the total length of a row in bytes
        let stride = self.width as usize * FRAME_CHANNELS + self.padding_x as usize;
        let offset = stride * y + x * FRAME_CHANNELS;
        self.data.get(offset..offset + FRAME_CHANNELS)
    }

    /// Raw interleaved data, including any row padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the frame, dropping row padding so the result is a packed
    /// `width * height * 3` buffer.
    pub fn into_packed(self) -> Vec<u8> {
        if self.padding_x == 0 {
            return self.data;
        }
        let row = self.width as usize * FRAME_CHANNELS;
        let stride = row + self.padding_x as usize;
        let mut packed = Vec::with_capacity(row * self.height as usize);
        for y in 0..self.height as usize {
            packed.extend_from_slice(&self.data[y * stride..y * stride + row]);
        }
        packed
    }
}

#[cfg(feature = "image")]
impl TryFrom<Frame> for ImageBuffer<Rgb<u8>, Vec<u8>> {
    type Error = Error;

    /// Converts the frame to an [ImageBuffer] suitable for encoding with
    /// the `image` crate.
    fn try_from(frame: Frame) -> Result<Self> {
        let width = frame.width();
        let height = frame.height();
        Self::from_raw(width, height, frame.into_packed()).ok_or(Error::BufferLayout)
    }
}

/// Builds the output file path for a capture: `dir/name.ext`, with the
/// extension taken from the requested image format.
#[cfg(feature = "image")]
pub(crate) fn output_path(dir: &Path, name: &str, format: image::ImageFormat) -> PathBuf {
    let ext = format.extensions_str().first().copied().unwrap_or("jpg");
    dir.join(format!("{name}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32, padding_x: u32) -> Frame {
        let stride = width as usize * FRAME_CHANNELS + padding_x as usize;
        let mut data = vec![0xEEu8; stride * height as usize];
        for y in 0..height as usize {
            for x in 0..width as usize {
                let offset = y * stride + x * FRAME_CHANNELS;
                data[offset] = x as u8;
                data[offset + 1] = y as u8;
                data[offset + 2] = 0x42;
            }
        }
        Frame::from_parts(data, width, height, padding_x)
    }

    #[test]
    fn pixel_indexing_is_row_major() {
        let frame = gradient_frame(4, 3, 0);
        assert_eq!(frame.pixel(0, 0), Some(&[0, 0, 0x42][..]));
        assert_eq!(frame.pixel(3, 2), Some(&[3, 2, 0x42][..]));
    }

    #[test]
    fn pixel_accounts_for_row_padding() {
        let frame = gradient_frame(4, 3, 2);
        assert_eq!(frame.pixel(3, 1), Some(&[3, 1, 0x42][..]));
        assert_eq!(frame.pixel(0, 2), Some(&[0, 2, 0x42][..]));
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let frame = gradient_frame(4, 3, 0);
        assert_eq!(frame.pixel(4, 0), None);
        assert_eq!(frame.pixel(0, 3), None);
    }

    #[test]
    fn into_packed_strips_padding() {
        let padded = gradient_frame(4, 3, 2);
        let packed = padded.into_packed();
        assert_eq!(packed.len(), 4 * 3 * FRAME_CHANNELS);
        // Last pixel of the first row is followed directly by the second row.
        assert_eq!(&packed[3 * FRAME_CHANNELS..4 * FRAME_CHANNELS], &[3, 0, 0x42]);
        assert_eq!(&packed[4 * FRAME_CHANNELS..5 * FRAME_CHANNELS], &[0, 1, 0x42]);
    }

    #[cfg(feature = "image")]
    #[test]
    fn frame_converts_to_image_buffer() {
        use image::{ImageBuffer, Rgb};

        let frame = gradient_frame(4, 3, 2);
        let buffer = ImageBuffer::<Rgb<u8>, _>::try_from(frame).unwrap();
        assert_eq!(buffer.dimensions(), (4, 3));
        assert_eq!(buffer.get_pixel(3, 2).0, [3, 2, 0x42]);
    }

    #[cfg(feature = "image")]
    #[test]
    fn output_path_uses_format_extension() {
        use std::path::Path;

        let path = output_path(Path::new("/tmp/shots"), "ink_circle_4", image::ImageFormat::Jpeg);
        assert_eq!(path, Path::new("/tmp/shots/ink_circle_4.jpg"));

        let path = output_path(Path::new("shots"), "frame", image::ImageFormat::Png);
        assert_eq!(path, Path::new("shots/frame.png"));
    }
}
