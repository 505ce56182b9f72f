//! Elliptical weighted average (EWA) texture filtering.
//!
//! [`ewa_filter`] averages every texel inside the elliptical footprint that
//! the screen-space derivatives `du`/`dv` project onto the texture. Texels are
//! weighted by a radial falloff looked up in a shared 256-entry table
//! ([`ewa_weights`]), and fetched through a [`PixelReader`] so the caller
//! owns the edge policy and tap type. [`ViewReader`] covers the common case
//! of point reads from an [`ti_core::ImageView`].
//!
//! Footprints are kept at least one texel wide and at most
//! [`EWA_MAX_ECCENTRICITY`] times longer than wide; the texel loop is bounded
//! to `EWA_MAXIDX` texels on each side of the center.

mod ellipse;
mod filter;
mod reader;
mod weights;

pub use ellipse::{ECC_UNBOUNDED, Ellipse, Quadratic, ewa_imp2radangle, ewa_radangle2imp};
pub use filter::{EWA_MAX_ECCENTRICITY, EwaOptions, ewa_filter};
pub use reader::{PixelReader, ViewReader};
pub use weights::{EWA_MAXIDX, EWA_TABLE_LEN, ewa_weights, init_ewa_weights};
