//! Foundational primitives for 2D texel sampling.
//!
//! ## Buffers and Stride
//! Pixel buffers are row-major and interleaved: a texel is `channels`
//! consecutive elements. `stride` is the distance, in elements, between
//! adjacent row starts and may be greater than `width * channels`, which allows
//! borrowed views over padded buffers. Views are read-only.
//!
//! ## Coordinates
//! Sample coordinates are non-normalized: `(0, 0)..(width, height)` spans the
//! image and texel `(x, y)` covers `[x, x + 1) x [y, y + 1)`. Samplers address
//! the texel at `floor(u), floor(v)`; callers that want center-aligned
//! filtering subtract `0.5` themselves.
//!
//! ## Wrap Modes
//! Each axis is resolved independently with [`WrapMode::Extend`] (clamp to
//! the edge), [`WrapMode::Repeat`] (floored modulo) or [`WrapMode::Border`]
//! (outside texels read as transparent black).

mod error;
mod geom;
mod image;
mod pixel;
mod wrap;

pub use error::Error;
pub use geom::Vec2f;
pub use image::{Image, ImageView};
pub use pixel::{Accum, Texel};
pub use wrap::{WrapMode, floored_fmod, resolve_coord, wrap_index};
