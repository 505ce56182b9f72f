use core::fmt;

/// Scalar stored in a pixel buffer.
///
/// Filters blend in `f32`; `from_f32` is where each representation applies
/// its own write-back rule.
pub trait Texel: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn to_f32(self) -> f32;

    fn from_f32(v: f32) -> Self;
}

impl Texel for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    /// Clamps to `[0, 255]` and rounds half up.
    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 255.0) + 0.5) as u8
    }
}

impl Texel for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}

/// Channels summed without touching the heap.
const INLINE_CHANNELS: usize = 4;

/// Weighted per-channel sum in `f32`, shared by every filtering sampler.
///
/// Any channel count is supported; texels wider than four channels spill
/// their sums to a heap buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Accum {
    inline: [f32; INLINE_CHANNELS],
    spill: Vec<f32>,
    channels: usize,
}

impl Accum {
    pub fn new(channels: usize) -> Self {
        debug_assert!(channels >= 1, "texels have at least one channel");
        let spill = if channels > INLINE_CHANNELS {
            vec![0.0; channels]
        } else {
            Vec::new()
        };
        Self {
            inline: [0.0; INLINE_CHANNELS],
            spill,
            channels,
        }
    }

    #[inline]
    fn sums(&self) -> &[f32] {
        if self.channels <= INLINE_CHANNELS {
            &self.inline[..self.channels]
        } else {
            &self.spill
        }
    }

    #[inline]
    fn sums_mut(&mut self) -> &mut [f32] {
        if self.channels <= INLINE_CHANNELS {
            &mut self.inline[..self.channels]
        } else {
            &mut self.spill
        }
    }

    #[inline]
    pub fn add<T: Texel>(&mut self, texel: &[T], weight: f32) {
        for (s, &t) in self.sums_mut().iter_mut().zip(texel) {
            *s += weight * t.to_f32();
        }
    }

    /// Writes the accumulated channels back in the output representation.
    #[inline]
    pub fn write<T: Texel>(&self, out: &mut [T]) {
        for (o, &s) in out.iter_mut().zip(self.sums()) {
            *o = T::from_f32(s);
        }
    }
}
