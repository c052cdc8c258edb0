use image::GrayImage;
use rayon::prelude::*;

/// Median-filter smoothing pass over a grayscale buffer.
///
/// The window is a square of radius `strength.round()`, clipped to the
/// buffer bounds: border pixels consider only in-bounds neighbors, with
/// no wraparound and no synthetic padding value. On even-count windows
/// the lower of the two middle values wins. Radius 0 returns the input
/// unchanged.
///
/// `strength` must be non-negative; the caller validates it before the
/// pipeline starts.
pub fn median_denoise(buffer: &GrayImage, strength: f32) -> GrayImage {
    let radius = strength.round() as u32;
    if radius == 0 {
        return buffer.clone();
    }

    let (w, h) = buffer.dimensions();
    // Window clipping makes any radius beyond the canvas equivalent.
    let radius = radius.min(w.max(h));
    let src: &[u8] = buffer.as_raw();
    let side = (2 * radius + 1) as usize;

    let mut out = GrayImage::new(w, h);
    out.par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as u32;
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(h - 1);
            let mut window = Vec::with_capacity(side * side);
            for x in 0..w {
                let x0 = x.saturating_sub(radius) as usize;
                let x1 = (x + radius).min(w - 1) as usize;
                window.clear();
                for ny in y0..=y1 {
                    let base = (ny * w) as usize;
                    window.extend_from_slice(&src[base + x0..=base + x1]);
                }
                window.sort_unstable();
                out_row[x as usize] = window[(window.len() - 1) / 2];
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gray_image(w: u32, h: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([value]))
    }

    mod median_denoise {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn strength_zero_is_identity() {
                let mut input = GrayImage::new(3, 2);
                for (i, px) in input.pixels_mut().enumerate() {
                    *px = Luma([i as u8 * 40]);
                }
                let result = median_denoise(&input, 0.0);
                assert_eq!(result.as_raw(), input.as_raw());
            }

            #[test]
            fn strength_below_half_rounds_to_identity() {
                let input = gray_image(3, 3, 77);
                let result = median_denoise(&input, 0.4);
                assert_eq!(result.as_raw(), input.as_raw());
            }

            #[test]
            fn constant_image_unchanged() {
                let input = gray_image(5, 5, 200);
                let result = median_denoise(&input, 2.0);
                for px in result.pixels() {
                    assert_eq!(px.0[0], 200);
                }
            }

            #[test]
            fn isolated_outlier_removed() {
                // 3x3 window at the center sees eight zeros and one 255;
                // the median is 0.
                let mut input = gray_image(3, 3, 0);
                input.put_pixel(1, 1, Luma([255]));
                let result = median_denoise(&input, 1.0);
                assert_eq!(result.get_pixel(1, 1).0[0], 0);
            }

            #[test]
            fn corner_window_uses_in_bounds_neighbors_only() {
                // Top-left corner of a 3x3 image with radius 1 sees the
                // 2x2 in-bounds block [10, 20, 30, 40]; the lower middle
                // of the sorted window is 20.
                let mut input = GrayImage::new(3, 3);
                input.put_pixel(0, 0, Luma([10]));
                input.put_pixel(1, 0, Luma([20]));
                input.put_pixel(0, 1, Luma([30]));
                input.put_pixel(1, 1, Luma([40]));
                for (x, y) in [(2, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
                    input.put_pixel(x, y, Luma([255]));
                }
                let result = median_denoise(&input, 1.0);
                assert_eq!(result.get_pixel(0, 0).0[0], 20);
            }

            #[test]
            fn even_window_takes_lower_middle() {
                // 1x2 image with radius 1: both windows contain both
                // pixels, so both outputs are the lower value.
                let mut input = GrayImage::new(2, 1);
                input.put_pixel(0, 0, Luma([10]));
                input.put_pixel(1, 0, Luma([200]));
                let result = median_denoise(&input, 1.0);
                assert_eq!(result.get_pixel(0, 0).0[0], 10);
                assert_eq!(result.get_pixel(1, 0).0[0], 10);
            }

            #[test]
            fn radius_covers_whole_buffer() {
                // Radius larger than the image collapses every window to
                // the full pixel set.
                let mut input = GrayImage::new(3, 1);
                input.put_pixel(0, 0, Luma([5]));
                input.put_pixel(1, 0, Luma([90]));
                input.put_pixel(2, 0, Luma([200]));
                let result = median_denoise(&input, 10.0);
                for px in result.pixels() {
                    assert_eq!(px.0[0], 90);
                }
            }

            #[test]
            fn dimensions_preserved() {
                let input = gray_image(7, 4, 123);
                let result = median_denoise(&input, 2.0);
                assert_eq!(result.dimensions(), (7, 4));
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                /// median_denoise: dimensions preserved for any strength
                #[test]
                fn preserves_dimensions(
                    w in 1u32..16,
                    h in 1u32..16,
                    fill_value in proptest::num::u8::ANY,
                    strength in 0.0f32..4.0
                ) {
                    let input = GrayImage::from_pixel(w, h, Luma([fill_value]));
                    let result = median_denoise(&input, strength);
                    prop_assert_eq!(result.dimensions(), (w, h));
                }

                /// median_denoise: every output value occurs in the input
                /// (the median never invents intensities)
                #[test]
                fn output_values_come_from_input(
                    pixels in proptest::collection::vec(proptest::num::u8::ANY, 16),
                    strength in 0.5f32..3.0
                ) {
                    let input = GrayImage::from_raw(4, 4, pixels.clone()).unwrap();
                    let result = median_denoise(&input, strength);
                    for px in result.pixels() {
                        prop_assert!(pixels.contains(&px.0[0]));
                    }
                }

                /// median_denoise: deterministic for a fixed input
                #[test]
                fn deterministic(
                    pixels in proptest::collection::vec(proptest::num::u8::ANY, 9),
                    strength in 0.0f32..3.0
                ) {
                    let input = GrayImage::from_raw(3, 3, pixels).unwrap();
                    let first = median_denoise(&input, strength);
                    let second = median_denoise(&input, strength);
                    prop_assert_eq!(first.as_raw(), second.as_raw());
                }
            }
        }
    }
}
