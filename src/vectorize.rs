use ndarray::s;
use rayon::prelude::*;

use crate::edge::IntensityMap;
use crate::mask::EdgeMask;
use crate::strip::Strip;

/// Reduce an edge mask to maximal horizontal runs, one [`Strip`] per run.
///
/// Rows carry no state between each other and are processed in parallel;
/// per-row results are concatenated in row order, so the output is
/// row-major and column-ascending within each row, the ordering the
/// encoders rely on. Each strip's intensity is the arithmetic mean of the
/// source map over the run's cells. Rows without set cells contribute
/// nothing; an all-false mask yields an empty Vec.
pub fn extract_strips(mask: &EdgeMask, intensity: &IntensityMap) -> Vec<Strip> {
    assert_eq!(
        mask.dim(),
        intensity.dim(),
        "mask and intensity map dimensions diverged"
    );
    let (h, w) = mask.dim();

    let per_row: Vec<Vec<Strip>> = (0..h)
        .into_par_iter()
        .map(|y| {
            let mut strips = Vec::new();
            let mut run_start = None;
            // One past the end so a run touching the right border closes.
            for x in 0..=w {
                let on = x < w && mask[[y, x]];
                match (on, run_start) {
                    (true, None) => run_start = Some(x),
                    (false, Some(start)) => {
                        strips.push(make_strip(intensity, y, start, x - 1));
                        run_start = None;
                    }
                    _ => {}
                }
            }
            strips
        })
        .collect();

    per_row.into_iter().flatten().collect()
}

fn make_strip(intensity: &IntensityMap, row: usize, col_start: usize, col_end: usize) -> Strip {
    let run = intensity.slice(s![row, col_start..=col_end]);
    Strip {
        row: row as u32,
        col_start: col_start as u32,
        col_end: col_end as u32,
        intensity: run.sum() / run.len() as f32,
    }
}
