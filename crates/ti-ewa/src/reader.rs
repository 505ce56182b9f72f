use ti_core::{ImageView, Texel, WrapMode, wrap_index};

/// Source of texels for the EWA filter.
///
/// The filter only hands out integer lattice coordinates, possibly outside
/// the image; the reader decides the edge policy and whether the tap is a
/// point or an interpolated read.
pub trait PixelReader {
    fn read(&self, x: isize, y: isize) -> [f32; 4];
}

impl<F> PixelReader for F
where
    F: Fn(isize, isize) -> [f32; 4],
{
    #[inline]
    fn read(&self, x: isize, y: isize) -> [f32; 4] {
        self(x, y)
    }
}

/// Point-sampling reader over an [`ImageView`] with a wrap mode per axis.
///
/// Texels resolved outside the image under [`WrapMode::Border`] read as
/// `[0; 4]`. Views with fewer than 4 channels read the missing color
/// channels as 0 and alpha as 1; wider views contribute their first 4.
#[derive(Debug, Clone, Copy)]
pub struct ViewReader<'a, T> {
    view: ImageView<'a, T>,
    wrap_u: WrapMode,
    wrap_v: WrapMode,
}

impl<'a, T: Texel> ViewReader<'a, T> {
    pub fn new(view: ImageView<'a, T>, wrap_u: WrapMode, wrap_v: WrapMode) -> Self {
        Self {
            view,
            wrap_u,
            wrap_v,
        }
    }
}

impl<T: Texel> PixelReader for ViewReader<'_, T> {
    #[inline]
    fn read(&self, x: isize, y: isize) -> [f32; 4] {
        let (Some(x), Some(y)) = (
            wrap_index(x, self.view.width(), self.wrap_u),
            wrap_index(y, self.view.height(), self.wrap_v),
        ) else {
            return [0.0; 4];
        };

        // SAFETY: `wrap_index` only yields indices in `[0, len)`.
        let px = unsafe { self.view.texel_unchecked(x, y) };
        let mut out = [0.0, 0.0, 0.0, 1.0];
        for (o, &p) in out.iter_mut().zip(px) {
            *o = p.to_f32();
        }
        out
    }
}
