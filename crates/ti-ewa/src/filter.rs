use log::trace;
use ti_core::Vec2f;

use crate::ellipse::{Quadratic, ewa_imp2radangle, ewa_radangle2imp};
use crate::reader::PixelReader;
use crate::weights::{EWA_MAXIDX, EWA_TABLE_LEN, ewa_weights};

/// Default cap on the major/minor axis ratio of the footprint. Longer
/// footprints get their minor axis widened, trading some blur for a bounded
/// loop.
pub const EWA_MAX_ECCENTRICITY: f32 = 8.0;

/// Minimum squared footprint radius in texels, with and without interpolated
/// taps (radius 1.25 and 0.875).
const RMIN_INTERPOLATED: f32 = 1.5625;
const RMIN_POINT: f32 = 0.765625;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EwaOptions {
    /// The reader returns interpolated (bilinear) taps. Only the minimum
    /// footprint size depends on it; the filter never interpolates itself.
    pub interpolate: bool,
    /// Average channel 3 like the others. When false the result alpha is 1.
    pub use_alpha: bool,
    /// Upper bound on `a / b`, must be >= 1. `f32::INFINITY` disables the
    /// clamp; the texel loop stays bounded by `EWA_MAXIDX` either way.
    pub max_eccentricity: f32,
}

impl Default for EwaOptions {
    fn default() -> Self {
        Self {
            interpolate: true,
            use_alpha: true,
            max_eccentricity: EWA_MAX_ECCENTRICITY,
        }
    }
}

/// Elliptical weighted average over the footprint spanned by `du` and `dv`
/// around `uv`.
///
/// `uv`, `du` and `dv` are normalized: `(0, 0)..(1, 1)` spans the
/// `width x height` image. Texels are fetched through `reader` at integer
/// lattice positions and weighted by [`ewa_weights`] according to their
/// normalized squared distance from the footprint center.
///
/// - Zero (or non-finite) derivatives read the single texel containing `uv`.
///   Parallel derivatives keep their length and are widened to the minimum
///   footprint across.
/// - A footprint whose bounding box misses the image returns `[0; 4]`
///   without calling `reader`.
/// - If no texel receives weight the result is `[0; 4]`.
pub fn ewa_filter<R: PixelReader + ?Sized>(
    width: usize,
    height: usize,
    opts: &EwaOptions,
    uv: Vec2f,
    du: Vec2f,
    dv: Vec2f,
    reader: &R,
) -> [f32; 4] {
    debug_assert!(width > 0 && height > 0, "EWA needs a non-empty image");
    debug_assert!(opts.max_eccentricity >= 1.0, "eccentricity cap below 1");

    if !uv.is_finite() {
        return [0.0; 4];
    }

    let u0 = uv.x * width as f32;
    let v0 = uv.y * height as f32;

    if is_degenerate(du, dv) {
        trace!("degenerate EWA footprint at ({u0}, {v0}), reading a single texel");
        let tc = reader.read(u0.floor() as isize, v0.floor() as isize);
        return [tc[0], tc[1], tc[2], if opts.use_alpha { tc[3] } else { 1.0 }];
    }

    let footprint = footprint_quadratic(du, dv, width as f32, height as f32);
    let rmin = if opts.interpolate {
        RMIN_INTERPOLATED
    } else {
        RMIN_POINT
    };
    let Quadratic { a, b, c, f } = clamp_footprint(footprint, rmin, opts.max_eccentricity);

    // Half extents of the bounding box, then normalize so that Q = EWA_TABLE_LEN
    // on the ellipse boundary.
    let ue = c.sqrt();
    let ve = a.sqrt();
    let d = EWA_TABLE_LEN as f32 / f;
    let (a, b, c) = (a * d, b * d, c * d);

    let (u1, u2) = lattice_span(u0, ue);
    let (v1, v2) = lattice_span(v0, ve);

    if u2 < 0 || u1 >= width as isize || v2 < 0 || v1 >= height as isize {
        return [0.0; 4];
    }

    // Lattice points are texel corners; distances are measured to centers.
    let u0 = u0 - 0.5;
    let v0 = v0 - 0.5;

    // Q(x, y) is evaluated incrementally along each row: Q(x + 1) - Q(x)
    // grows by a constant 2A per step.
    let ddq = 2.0 * a;
    let uu = u1 as f32 - u0;
    let ac1 = a * (2.0 * uu + 1.0);
    let ac2 = a * uu * uu;
    let bu = b * uu;

    let weights = ewa_weights();
    let mut sum = [0.0f32; 4];
    let mut wsum = 0.0f32;
    for y in v1..=v2 {
        let vv = y as f32 - v0;
        let mut dq = ac1 + b * vv;
        let mut qv = (c * vv + bu) * vv + ac2;
        for x in u1..=u2 {
            if qv < EWA_TABLE_LEN as f32 {
                let wt = weights[if qv < 0.0 { 0 } else { qv as usize }];
                let tc = reader.read(x, y);
                sum[0] += tc[0] * wt;
                sum[1] += tc[1] * wt;
                sum[2] += tc[2] * wt;
                if opts.use_alpha {
                    sum[3] += tc[3] * wt;
                }
                wsum += wt;
            }
            qv += dq;
            dq += ddq;
        }
    }

    if wsum == 0.0 {
        trace!("EWA footprint at ({u0}, {v0}) accumulated no weight");
        return [0.0; 4];
    }

    let inv = 1.0 / wsum;
    [
        sum[0] * inv,
        sum[1] * inv,
        sum[2] * inv,
        if opts.use_alpha { sum[3] * inv } else { 1.0 },
    ]
}

fn is_degenerate(du: Vec2f, dv: Vec2f) -> bool {
    !(du.is_finite() && dv.is_finite()) || (du.dot(du) == 0.0 && dv.dot(dv) == 0.0)
}

/// Implicit ellipse of the footprint in texel units: the image of the unit
/// circle under the Jacobian `[du dv]`.
fn footprint_quadratic(du: Vec2f, dv: Vec2f, width: f32, height: f32) -> Quadratic {
    let ux = du.x * width;
    let vx = du.y * height;
    let uy = dv.x * width;
    let vy = dv.y * height;
    let a = vx * vx + vy * vy;
    let b = -2.0 * (ux * vx + uy * vy);
    let c = ux * ux + uy * uy;
    Quadratic {
        a,
        b,
        c,
        f: a * c - b * b * 0.25,
    }
}

/// Widens footprints that are thinner than `rmin` or more eccentric than
/// `max_ecc`; returns `q` untouched otherwise.
fn clamp_footprint(q: Quadratic, rmin: f32, max_ecc: f32) -> Quadratic {
    let e = ewa_imp2radangle(q);
    let a2 = e.a * e.a;
    let b2 = e.b * e.b;
    if b2 >= rmin && e.ecc <= max_ecc {
        return q;
    }
    if a2 < rmin {
        return Quadratic {
            a: rmin,
            b: 0.0,
            c: rmin,
            f: rmin * rmin,
        };
    }
    let b2 = b2.max(rmin).max(a2 / (max_ecc * max_ecc));
    ewa_radangle2imp(a2, b2, e.th)
}

/// Integer bounds `floor(center - extent) ..= ceil(center + extent)`,
/// limited to `EWA_MAXIDX` texels on each side of the center.
fn lattice_span(center: f32, extent: f32) -> (isize, isize) {
    let max = EWA_MAXIDX as isize;
    let mut lo = (center - extent).floor() as isize;
    let mut hi = (center + extent).ceil() as isize;
    if center - lo as f32 > EWA_MAXIDX as f32 {
        lo = (center as isize).saturating_sub(max);
    }
    if hi as f32 - center > EWA_MAXIDX as f32 {
        hi = (center as isize).saturating_add(max);
    }
    (lo, hi)
}
