use ti_core::{Accum, ImageView, Texel, WrapMode, wrap_index};

use crate::by_value;

/// Separable cubic kernel from the Mitchell-Netravali family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CubicKernel {
    /// `B = 1, C = 0`: no ringing, noticeably soft.
    // snake_case alone would give `b_spline`.
    #[cfg_attr(feature = "serde", serde(rename = "bspline"))]
    BSpline,
    /// `B = C = 1/3`: the usual compromise between blur and ringing.
    Mitchell,
}

impl CubicKernel {
    /// The `(B, C)` parameters of the kernel.
    pub fn params(self) -> (f32, f32) {
        match self {
            Self::BSpline => (1.0, 0.0),
            Self::Mitchell => (1.0 / 3.0, 1.0 / 3.0),
        }
    }

    #[inline]
    pub fn eval(self, t: f32) -> f32 {
        let (b, c) = self.params();
        mitchell_netravali(t, b, c)
    }

    /// Weights of the taps at `floor - 1 ..= floor + 2` for a sample whose
    /// fractional offset from `floor` is `frac`.
    #[inline]
    pub fn weights(self, frac: f32) -> [f32; 4] {
        [
            self.eval(frac + 1.0),
            self.eval(frac),
            self.eval(1.0 - frac),
            self.eval(2.0 - frac),
        ]
    }
}

/// Mitchell-Netravali piecewise cubic with parameters `b` and `c`.
#[inline]
pub fn mitchell_netravali(t: f32, b: f32, c: f32) -> f32 {
    let x = t.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    if x < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * x3 + (-18.0 + 12.0 * b + 6.0 * c) * x2 + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        ((-b - 6.0 * c) * x3
            + (6.0 * b + 30.0 * c) * x2
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn tap_quad(coord_floor: f32, len: usize, mode: WrapMode) -> [Option<usize>; 4] {
    let i = coord_floor as isize;
    core::array::from_fn(|k| wrap_index(i.saturating_add(k as isize - 1), len, mode))
}

/// 4x4 cubic filter over `floor(u,v) - 1 ..= floor(u,v) + 2` with a wrap
/// mode per axis. Border taps outside the image contribute zero.
///
/// Byte output is clamped to `[0, 255]`: the Mitchell kernel has negative
/// lobes and may overshoot near edges.
pub fn cubic_wrapmode<T: Texel>(
    img: &ImageView<'_, T>,
    kernel: CubicKernel,
    u: f32,
    v: f32,
    wrap_u: WrapMode,
    wrap_v: WrapMode,
    out: &mut [T],
) {
    let channels = img.channels();
    debug_assert!(out.len() >= channels, "output slot shorter than texel");

    let uf = u.floor();
    let vf = v.floor();
    let wx = kernel.weights(u - uf);
    let wy = kernel.weights(v - vf);
    let xs = tap_quad(uf, img.width(), wrap_u);
    let ys = tap_quad(vf, img.height(), wrap_v);

    let mut acc = Accum::new(channels);
    for (y, wy) in ys.into_iter().zip(wy) {
        let Some(y) = y else { continue };
        for (x, wx) in xs.into_iter().zip(wx) {
            let Some(x) = x else { continue };
            // SAFETY: `wrap_index` only yields indices in `[0, len)`.
            let px = unsafe { img.texel_unchecked(x, y) };
            acc.add(px, wx * wy);
        }
    }
    acc.write(&mut out[..channels]);
}

/// Cubic filter with all taps clamped to the image edge.
#[inline]
pub fn cubic_extend<T: Texel>(
    img: &ImageView<'_, T>,
    kernel: CubicKernel,
    u: f32,
    v: f32,
    out: &mut [T],
) {
    cubic_wrapmode(img, kernel, u, v, WrapMode::Extend, WrapMode::Extend, out);
}

#[inline]
pub fn cubic_bspline<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    cubic_extend(img, CubicKernel::BSpline, u, v, out);
}

#[inline]
pub fn cubic_mitchell<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    cubic_extend(img, CubicKernel::Mitchell, u, v, out);
}

pub fn cubic_bspline4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| cubic_bspline(img, u, v, out))
}

pub fn cubic_mitchell4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| cubic_mitchell(img, u, v, out))
}
