use crate::Error;

/// Owned, contiguous, interleaved image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, Error> {
        validate_shape(width, height, channels)?;
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(
        width: usize,
        height: usize,
        channels: usize,
        value: T,
    ) -> Result<Self, Error> {
        validate_shape(width, height, channels)?;
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: 0,
            })?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }
}

/// Borrowed, read-only view over an interleaved buffer.
///
/// A constructed view is never empty and has at least one channel, so
/// samplers may index it with any resolved texel coordinate.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    /// Wraps a buffer whose rows start every `stride` elements.
    pub fn from_slice(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        validate_shape(width, height, channels)?;
        let row_len = width.checked_mul(channels).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if stride < row_len {
            return Err(Error::InvalidStride { stride, row_len });
        }

        let min_len = (height - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(row_len))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn texel(&self, x: usize, y: usize) -> Option<&'a [T]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y * self.stride + x * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Returns the channels of texel `(x, y)` without bounds checks.
    ///
    /// # Safety
    /// Caller must guarantee `x < self.width()` and `y < self.height()`.
    #[inline]
    pub unsafe fn texel_unchecked(&self, x: usize, y: usize) -> &'a [T] {
        debug_assert!(x < self.width && y < self.height);
        let start = y * self.stride + x * self.channels;
        // SAFETY: Caller guarantees `x < width` and `y < height`. With view
        // invariants this implies `start + channels <= data.len()`.
        unsafe { self.data.get_unchecked(start..start + self.channels) }
    }
}

fn validate_shape(width: usize, height: usize, channels: usize) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::Empty);
    }
    if channels == 0 {
        return Err(Error::UnsupportedChannels(channels));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::Error;

    #[test]
    fn view_indexing_with_stride() {
        // 2x2 texels, 2 channels, one padding element per row.
        let data = vec![1u8, 2, 3, 4, 99, 5, 6, 7, 8, 88];
        let view = ImageView::from_slice(2, 2, 2, 5, &data).expect("valid view");

        assert_eq!(view.stride(), 5);
        assert_eq!(view.texel(1, 0), Some(&[3u8, 4][..]));
        assert_eq!(view.texel(0, 1), Some(&[5u8, 6][..]));
        assert_eq!(view.texel(1, 1), Some(&[7u8, 8][..]));
        assert_eq!(view.texel(2, 1), None);
        assert_eq!(view.texel(0, 2), None);
    }

    #[test]
    fn rejects_bad_shapes() {
        let data = vec![0.0f32; 12];

        assert_eq!(
            ImageView::from_slice(0, 3, 4, 0, &data).unwrap_err(),
            Error::Empty
        );
        assert_eq!(
            ImageView::from_slice(1, 1, 0, 1, &data).unwrap_err(),
            Error::UnsupportedChannels(0)
        );
        assert_eq!(
            ImageView::from_slice(2, 2, 3, 5, &data).unwrap_err(),
            Error::InvalidStride {
                stride: 5,
                row_len: 6
            }
        );
        assert_eq!(
            ImageView::from_slice(2, 2, 4, 8, &data).unwrap_err(),
            Error::SizeMismatch {
                expected: 16,
                actual: 12
            }
        );
        assert!(Image::from_vec(3, 1, 4, data.clone()).is_ok());
        assert!(Image::from_vec(4, 1, 4, data).is_err());
    }

    #[test]
    fn any_channel_count_above_zero_is_accepted() {
        let img = Image::from_vec(1, 1, 5, vec![1.0f32, 2.0, 3.0, 4.0, 5.0]).expect("5 channels");
        assert_eq!(img.channels(), 5);
        assert_eq!(img.as_view().texel(0, 0), Some(&[1.0f32, 2.0, 3.0, 4.0, 5.0][..]));

        let wide = Image::new_fill(2, 2, 16, 0u8).expect("16 channels");
        assert_eq!(wide.data().len(), 64);
        assert_eq!(
            Image::from_vec(1, 1, 0, Vec::<f32>::new()).unwrap_err(),
            Error::UnsupportedChannels(0)
        );
    }

    #[test]
    fn owned_image_view_is_packed() {
        let img = Image::from_vec(2, 1, 3, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        let view = img.as_view();

        assert_eq!(view.stride(), 6);
        // SAFETY: (1, 0) is inside the 2x1 image.
        let px = unsafe { view.texel_unchecked(1, 0) };
        assert_eq!(px, &[4, 5, 6]);
    }
}
