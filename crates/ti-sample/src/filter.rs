use core::str::FromStr;

use ti_core::{Error, ImageView, Texel, WrapMode};

use crate::{CubicKernel, bilinear_wrapmode, cubic_wrapmode, nearest_wrapmode};

/// Reconstruction filter selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Filter {
    Nearest,
    #[default]
    Bilinear,
    // snake_case alone would give `cubic_b_spline`; keep it equal to `name()`.
    #[cfg_attr(feature = "serde", serde(rename = "cubic_bspline"))]
    CubicBSpline,
    CubicMitchell,
}

impl Filter {
    pub const ALL: [Filter; 4] = [
        Filter::Nearest,
        Filter::Bilinear,
        Filter::CubicBSpline,
        Filter::CubicMitchell,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::CubicBSpline => "cubic_bspline",
            Self::CubicMitchell => "cubic_mitchell",
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownName {
                kind: "filter",
                name: s.to_owned(),
            })
    }
}

/// Samples `img` at `(u, v)` with `filter`, resolving each axis with its own
/// wrap mode, and writes `img.channels()` values into `out`.
pub fn sample<T: Texel>(
    img: &ImageView<'_, T>,
    filter: Filter,
    u: f32,
    v: f32,
    wrap_u: WrapMode,
    wrap_v: WrapMode,
    out: &mut [T],
) {
    match filter {
        Filter::Nearest => nearest_wrapmode(img, u, v, wrap_u, wrap_v, out),
        Filter::Bilinear => bilinear_wrapmode(img, u, v, wrap_u, wrap_v, out),
        Filter::CubicBSpline => {
            cubic_wrapmode(img, CubicKernel::BSpline, u, v, wrap_u, wrap_v, out)
        }
        Filter::CubicMitchell => {
            cubic_wrapmode(img, CubicKernel::Mitchell, u, v, wrap_u, wrap_v, out)
        }
    }
}
