use ti_core::{Accum, ImageView, Texel, WrapMode, resolve_coord, wrap_index};

use crate::by_value;

/// Indices of the two taps `floor(c)` and `floor(c) + 1` along one axis.
#[inline]
fn tap_pair(coord: f32, len: usize, mode: WrapMode) -> [Option<usize>; 2] {
    match mode {
        WrapMode::Repeat => {
            let first = resolve_coord(coord, len, mode);
            let second = first.map(|i| if i + 1 == len { 0 } else { i + 1 });
            [first, second]
        }
        WrapMode::Extend | WrapMode::Border => {
            let i = coord.floor() as isize;
            [wrap_index(i, len, mode), wrap_index(i.saturating_add(1), len, mode)]
        }
    }
}

/// Bilinear blend of the 2x2 taps at `floor(u,v)` and `floor(u,v) + 1`,
/// weighted by the fractional parts of `u` and `v`.
///
/// Each tap is resolved per axis; a border tap outside the image contributes
/// zero for that tap only, so edges fade out instead of cutting off.
pub fn bilinear_wrapmode<T: Texel>(
    img: &ImageView<'_, T>,
    u: f32,
    v: f32,
    wrap_u: WrapMode,
    wrap_v: WrapMode,
    out: &mut [T],
) {
    let channels = img.channels();
    debug_assert!(out.len() >= channels, "output slot shorter than texel");

    let a = u - u.floor();
    let b = v - v.floor();
    let [x1, x2] = tap_pair(u, img.width(), wrap_u);
    let [y1, y2] = tap_pair(v, img.height(), wrap_v);

    let taps = [
        (x1, y1, (1.0 - a) * (1.0 - b)),
        (x2, y1, a * (1.0 - b)),
        (x1, y2, (1.0 - a) * b),
        (x2, y2, a * b),
    ];

    let mut acc = Accum::new(channels);
    for (x, y, w) in taps {
        if let (Some(x), Some(y)) = (x, y) {
            // SAFETY: `tap_pair` only yields indices in `[0, len)`.
            let px = unsafe { img.texel_unchecked(x, y) };
            acc.add(px, w);
        }
    }
    acc.write(&mut out[..channels]);
}

/// Bilinear sampling; taps outside the image are transparent black.
#[inline]
pub fn bilinear_border<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    bilinear_wrapmode(img, u, v, WrapMode::Border, WrapMode::Border, out);
}

/// Bilinear sampling with taps clamped to the image edge.
#[inline]
pub fn bilinear_extend<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    bilinear_wrapmode(img, u, v, WrapMode::Extend, WrapMode::Extend, out);
}

/// Bilinear sampling on a tiled image; the `+1` taps on the last row and
/// column wrap to the first.
#[inline]
pub fn bilinear_repeat<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    bilinear_wrapmode(img, u, v, WrapMode::Repeat, WrapMode::Repeat, out);
}

pub fn bilinear_border4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| bilinear_border(img, u, v, out))
}

pub fn bilinear_extend4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| bilinear_extend(img, u, v, out))
}

pub fn bilinear_repeat4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| bilinear_repeat(img, u, v, out))
}
