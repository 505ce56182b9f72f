//! Umbrella crate for the `texel-interp` workspace.
//!
//! Re-exports the image primitives, the point samplers and the EWA filter so
//! that downstream code depends on a single crate.

pub use ti_core::*;
pub use ti_ewa::*;
pub use ti_sample::*;
