use ti_core::{ImageView, Texel, WrapMode, resolve_coord};

use crate::by_value;

/// Point sample at `floor(u), floor(v)` with an independent wrap mode per
/// axis. If either axis resolves outside the image (border mode), all
/// channels are zero.
pub fn nearest_wrapmode<T: Texel>(
    img: &ImageView<'_, T>,
    u: f32,
    v: f32,
    wrap_u: WrapMode,
    wrap_v: WrapMode,
    out: &mut [T],
) {
    let channels = img.channels();
    debug_assert!(out.len() >= channels, "output slot shorter than texel");

    let x = resolve_coord(u, img.width(), wrap_u);
    let y = resolve_coord(v, img.height(), wrap_v);
    match (x, y) {
        (Some(x), Some(y)) => {
            // SAFETY: `resolve_coord` returns indices in `[0, len)`.
            let px = unsafe { img.texel_unchecked(x, y) };
            out[..channels].copy_from_slice(px);
        }
        _ => out[..channels].fill(T::default()),
    }
}

/// Nearest sampling; outside texels are transparent black.
#[inline]
pub fn nearest_border<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    nearest_wrapmode(img, u, v, WrapMode::Border, WrapMode::Border, out);
}

/// Nearest sampling clamped to the image edge.
#[inline]
pub fn nearest_extend<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    nearest_wrapmode(img, u, v, WrapMode::Extend, WrapMode::Extend, out);
}

/// Nearest sampling on a tiled image.
#[inline]
pub fn nearest_repeat<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32, out: &mut [T]) {
    nearest_wrapmode(img, u, v, WrapMode::Repeat, WrapMode::Repeat, out);
}

pub fn nearest_border4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| nearest_border(img, u, v, out))
}

pub fn nearest_extend4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| nearest_extend(img, u, v, out))
}

pub fn nearest_repeat4<T: Texel>(img: &ImageView<'_, T>, u: f32, v: f32) -> [T; 4] {
    by_value(img.channels(), |out| nearest_repeat(img, u, v, out))
}

#[cfg(test)]
mod tests {
    use ti_core::{Image, WrapMode};

    use super::{
        nearest_border, nearest_border4, nearest_extend, nearest_extend4, nearest_repeat,
        nearest_repeat4, nearest_wrapmode,
    };

    fn rgba_3x2() -> Image<u8> {
        let mut data = Vec::new();
        for y in 0..2u8 {
            for x in 0..3u8 {
                data.extend_from_slice(&[x * 10 + y, 100 + x, 200 + y, 255 - x]);
            }
        }
        Image::from_vec(3, 2, 4, data).expect("valid image")
    }

    #[test]
    fn integer_coords_return_stored_texel_under_every_policy() {
        let img = rgba_3x2();
        let view = img.as_view();

        for y in 0..2usize {
            for x in 0..3usize {
                let expected: [u8; 4] = view.texel(x, y).expect("in bounds").try_into().unwrap();
                let (u, v) = (x as f32, y as f32);
                assert_eq!(nearest_border4(&view, u, v), expected);
                assert_eq!(nearest_extend4(&view, u, v), expected);
                assert_eq!(nearest_repeat4(&view, u, v), expected);
            }
        }
    }

    #[test]
    fn truncates_fraction_instead_of_rounding() {
        let img = rgba_3x2();
        let view = img.as_view();

        assert_eq!(nearest_extend4(&view, 1.99, 0.99), nearest_extend4(&view, 1.0, 0.0));
        assert_eq!(nearest_extend4(&view, 2.0, 1.5)[0], 21);
    }

    #[test]
    fn border_outside_is_transparent_black() {
        let img = rgba_3x2();
        let view = img.as_view();

        for (u, v) in [(-0.01, 0.0), (3.0, 0.0), (0.0, -0.5), (1.0, 2.0), (-7.0, 9.0)] {
            assert_eq!(nearest_border4(&view, u, v), [0, 0, 0, 0], "({u}, {v})");
        }
    }

    #[test]
    fn extend_clamps_to_edge() {
        let img = rgba_3x2();
        let view = img.as_view();

        assert_eq!(nearest_extend4(&view, -5.0, -5.0), nearest_extend4(&view, 0.0, 0.0));
        assert_eq!(nearest_extend4(&view, 40.0, 1.2), nearest_extend4(&view, 2.0, 1.0));
    }

    #[test]
    fn repeat_is_periodic_including_negative_offsets() {
        let img = rgba_3x2();
        let view = img.as_view();

        for k in [-3i32, -1, 1, 4] {
            for (u, v) in [(0.25f32, 0.5f32), (2.75, 1.0), (1.0, 0.0)] {
                let shifted = nearest_repeat4(&view, u + (k * 3) as f32, v + (k * 2) as f32);
                assert_eq!(shifted, nearest_repeat4(&view, u, v), "k={k} ({u}, {v})");
            }
        }
        // floor(-0.5) = -1 wraps to the last column.
        assert_eq!(nearest_repeat4(&view, -0.5, 0.0), nearest_repeat4(&view, 2.0, 0.0));
    }

    #[test]
    fn wrapmode_mixes_axes_and_zero_fills_on_border() {
        let img = rgba_3x2();
        let view = img.as_view();
        let mut out = [0u8; 4];

        nearest_wrapmode(&view, -1.0, 5.0, WrapMode::Repeat, WrapMode::Extend, &mut out);
        assert_eq!(out, nearest_extend4(&view, 2.0, 1.0));

        out = [7; 4];
        nearest_wrapmode(&view, 4.0, 1.0, WrapMode::Repeat, WrapMode::Border, &mut out);
        assert_eq!(out, nearest_extend4(&view, 1.0, 1.0));

        out = [7; 4];
        nearest_wrapmode(&view, 1.0, 2.0, WrapMode::Repeat, WrapMode::Border, &mut out);
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn float_path_copies_arbitrary_channel_count() {
        let img = Image::from_vec(2, 1, 3, vec![0.1f32, 0.2, 0.3, 1.5, -2.5, 1e9]).expect("img");
        let view = img.as_view();
        let mut out = [9.0f32; 3];

        nearest_extend(&view, 1.7, 0.2, &mut out);
        assert_eq!(out, [1.5, -2.5, 1e9]);

        nearest_border(&view, 2.0, 0.0, &mut out);
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn byte_values_survive_untouched() {
        let data: Vec<u8> = (0..=255u8).collect();
        let img = Image::from_vec(8, 8, 4, data.clone()).expect("valid image");
        let view = img.as_view();

        let mut seen = Vec::new();
        for y in 0..8 {
            for x in 0..8 {
                seen.extend(nearest_extend4(&view, x as f32 + 0.5, y as f32 + 0.5));
            }
        }
        assert_eq!(seen, data);
    }

    #[test]
    fn five_channel_float_image() {
        let data: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let img = Image::from_vec(2, 1, 5, data).expect("valid image");
        let view = img.as_view();
        let mut out = [-1.0f32; 5];

        nearest_extend(&view, 1.2, 0.0, &mut out);
        assert_eq!(out, [5.0, 6.0, 7.0, 8.0, 9.0]);

        nearest_repeat(&view, -0.5, 3.0, &mut out);
        assert_eq!(out, [5.0, 6.0, 7.0, 8.0, 9.0]);

        nearest_border(&view, -0.5, 0.0, &mut out);
        assert_eq!(out, [0.0; 5]);
    }

    #[test]
    fn narrow_float_image_leaves_slot_tail_alone() {
        let img = Image::from_vec(2, 1, 2, vec![1.0f32, 2.0, 3.0, 4.0]).expect("valid image");
        let view = img.as_view();
        let mut out = [9.0f32; 4];

        nearest_repeat(&view, -0.5, 0.0, &mut out);
        assert_eq!(out, [3.0, 4.0, 9.0, 9.0]);

        nearest_border(&view, 5.0, 0.0, &mut out);
        assert_eq!(out, [0.0, 0.0, 9.0, 9.0]);
    }
}
