use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::edge::IntensityMap;

/// Boolean edge mask with shape `(H, W)`.
pub type EdgeMask = Array2<bool>;

/// Binarize an intensity map: a cell is an edge when its value is
/// strictly greater than `t`.
///
/// With `t = 1.0` a map that never exceeds 1 produces an all-false mask;
/// with `t = 0.0` every cell with a positive value is kept.
pub fn threshold_map(map: &IntensityMap, t: f32) -> EdgeMask {
    map.mapv(|v| v > t)
}

/// Render an edge mask as an 8-bit grayscale image, white where the mask
/// is set.
pub fn mask_to_gray_image(mask: &EdgeMask) -> GrayImage {
    let (h, w) = mask.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        let on = mask[[y as usize, x as usize]];
        Luma([if on { 255 } else { 0 }])
    })
}
