use core::str::FromStr;

use crate::Error;

/// Per-axis policy for coordinates that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WrapMode {
    /// Clamp to the texels at the image edge.
    #[default]
    Extend,
    /// Tile the image; indices wrap with a floored modulo.
    Repeat,
    /// Texels outside the image read as transparent black.
    Border,
}

impl WrapMode {
    pub const ALL: [WrapMode; 3] = [WrapMode::Extend, WrapMode::Repeat, WrapMode::Border];

    pub fn name(self) -> &'static str {
        match self {
            Self::Extend => "extend",
            Self::Repeat => "repeat",
            Self::Border => "border",
        }
    }
}

impl FromStr for WrapMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownName {
                kind: "wrap mode",
                name: s.to_owned(),
            })
    }
}

/// Floored modulo: the result has the sign of `n`, so for positive extents
/// it is always in `[0, n]`.
///
/// `floored_fmod(-0.5, 4.0) == 3.5`, unlike `%` which yields `-0.5`.
#[inline]
pub fn floored_fmod(x: f32, n: f32) -> f32 {
    x - n * (x / n).floor()
}

/// Maps an integer lattice index onto `[0, len)`.
///
/// Returns `None` only for [`WrapMode::Border`] when `i` is outside the image.
#[inline]
pub fn wrap_index(i: isize, len: usize, mode: WrapMode) -> Option<usize> {
    debug_assert!(len > 0, "cannot resolve an index on an empty axis");
    let n = len as isize;
    match mode {
        WrapMode::Extend => Some(i.clamp(0, n - 1) as usize),
        WrapMode::Repeat => Some(i.rem_euclid(n) as usize),
        WrapMode::Border => {
            if i < 0 || i >= n {
                None
            } else {
                Some(i as usize)
            }
        }
    }
}

/// Resolves a continuous coordinate to the texel index containing it.
#[inline]
pub fn resolve_coord(coord: f32, len: usize, mode: WrapMode) -> Option<usize> {
    match mode {
        WrapMode::Repeat => {
            let wrapped = floored_fmod(coord, len as f32);
            // Tiny negative inputs round up to exactly `len`.
            let i = (wrapped.floor() as isize).clamp(0, len as isize - 1);
            Some(i as usize)
        }
        WrapMode::Extend | WrapMode::Border => wrap_index(coord.floor() as isize, len, mode),
    }
}
