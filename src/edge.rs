use image::GrayImage;
use ndarray::Array2;
use rayon::prelude::*;

/// Normalized gradient-magnitude field with shape `(H, W)` and values in
/// [0, 1].
pub type IntensityMap = Array2<f32>;

/// Compute the normalized edge-intensity map of a grayscale buffer.
///
/// The buffer is scaled to [0, 1], smoothed with a separable Gaussian of
/// standard deviation `sigma`, differentiated with central differences
/// (one-sided at the borders via clamped sampling), and the per-pixel
/// gradient magnitude is divided by its global maximum. An all-zero
/// magnitude field is returned as-is so no division happens.
///
/// Larger sigma suppresses fine texture before the gradient is taken;
/// it is the knob trading detail for noise robustness. `sigma` must be
/// finite and positive; the caller validates it before the pipeline
/// starts.
pub fn detect_edges(buffer: &GrayImage, sigma: f32) -> IntensityMap {
    let (w, h) = buffer.dimensions();
    let (w, h) = (w as usize, h as usize);

    let field: Vec<f32> = buffer
        .as_raw()
        .iter()
        .map(|&v| f32::from(v) / 255.0)
        .collect();
    let blurred = gaussian_smooth(&field, w, h, sigma);

    let mut magnitude = vec![0.0f32; w * h];
    magnitude
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let sample = |x: usize, y: usize| blurred[y * w + x];
            for (x, out) in out_row.iter_mut().enumerate() {
                let gx = sample((x + 1).min(w - 1), y) - sample(x.saturating_sub(1), y);
                let gy = sample(x, (y + 1).min(h - 1)) - sample(x, y.saturating_sub(1));
                *out = (gx * gx + gy * gy).sqrt();
            }
        });

    let max = magnitude.iter().fold(0.0f32, |acc, &v| acc.max(v));
    if max > 0.0 {
        for v in &mut magnitude {
            *v /= max;
        }
    }

    Array2::from_shape_vec((h, w), magnitude).expect("magnitude buffer sized to H*W")
}

/// Separable Gaussian blur over a row-major f32 field: a horizontal pass
/// over rows followed by a vertical pass over columns, each lane handled
/// independently.
fn gaussian_smooth(field: &[f32], w: usize, h: usize, sigma: f32) -> Vec<f32> {
    let kernel = gaussian_kernel(sigma);

    let mut horizontal = vec![0.0f32; w * h];
    horizontal
        .par_chunks_mut(w)
        .zip(field.par_chunks(w))
        .for_each(|(out_row, row)| convolve_clamped(row, &kernel, out_row));

    let columns: Vec<Vec<f32>> = (0..w)
        .into_par_iter()
        .map(|x| {
            let lane: Vec<f32> = (0..h).map(|y| horizontal[y * w + x]).collect();
            let mut out = vec![0.0f32; h];
            convolve_clamped(&lane, &kernel, &mut out);
            out
        })
        .collect();

    let mut blurred = vec![0.0f32; w * h];
    for (x, column) in columns.iter().enumerate() {
        for (y, &v) in column.iter().enumerate() {
            blurred[y * w + x] = v;
        }
    }
    blurred
}

/// 1D Gaussian kernel covering ±3σ (radius `ceil(3σ)`, minimum 1),
/// normalized to unit sum.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    debug_assert!(sigma.is_finite() && sigma > 0.0, "sigma must be > 0");

    let radius = ((3.0 * sigma).ceil() as usize).max(1);
    let sigma2 = sigma * sigma;
    let mut kernel = vec![0.0f32; 2 * radius + 1];
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-(x * x) / (2.0 * sigma2)).exp();
    }

    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Convolve one lane with a symmetric kernel, clamping out-of-bounds
/// samples to the nearest edge value.
fn convolve_clamped(signal: &[f32], kernel: &[f32], out: &mut [f32]) {
    let n = signal.len();
    let radius = kernel.len() / 2;
    for (i, out_i) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &kv) in kernel.iter().enumerate() {
            let idx = (i + k).saturating_sub(radius).min(n - 1);
            acc += signal[idx] * kv;
        }
        *out_i = acc;
    }
}
