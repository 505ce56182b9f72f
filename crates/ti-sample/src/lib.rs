//! Point and area samplers over [`ti_core::ImageView`].
//!
//! Every sampler exists in two shapes:
//! - a generic form writing `img.channels()` values into a caller slot, for
//!   any [`ti_core::Texel`] and any channel count;
//! - a `*4` form returning `[T; 4]` by value, for 4-channel images.
//!
//! Byte images are blended in `f32` and rounded on write-back; nearest
//! sampling copies texels verbatim. No sampler applies the `-0.5` texel-center
//! offset; callers that want center-aligned filtering subtract it first.

mod bilinear;
mod cubic;
mod filter;
mod nearest;

pub use bilinear::{
    bilinear_border, bilinear_border4, bilinear_extend, bilinear_extend4, bilinear_repeat,
    bilinear_repeat4, bilinear_wrapmode,
};
pub use cubic::{
    CubicKernel, cubic_bspline, cubic_bspline4, cubic_extend, cubic_mitchell, cubic_mitchell4,
    cubic_wrapmode, mitchell_netravali,
};
pub use filter::{Filter, sample};
pub use nearest::{
    nearest_border, nearest_border4, nearest_extend, nearest_extend4, nearest_repeat,
    nearest_repeat4, nearest_wrapmode,
};

use ti_core::Texel;

/// Runs a slot-writing sampler and returns its four channels by value.
#[inline]
pub(crate) fn by_value<T: Texel>(channels: usize, f: impl FnOnce(&mut [T])) -> [T; 4] {
    debug_assert_eq!(channels, 4, "by-value samplers expect 4-channel images");
    let mut out = [T::default(); 4];
    f(&mut out);
    out
}
