//! Ensemble weight grid search.
//!
//! Three base-model scores are mixed linearly; every weight triple on a
//! regular grid is scored by the fraction of positives among the top `k`
//! candidates, and the triples are returned best first.

use std::cmp::Ordering;

use ampbench_core::{AmpError, BenchConfig, Class, Result};
use ampbench_io::TrainingSet;
use serde::Serialize;

/// Tolerance for grid coordinates that should be exactly on a boundary.
const EPSILON: f64 = 1e-9;

/// How the weight grid is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridMode {
    /// `w1 + w2 + w3 = 1`, each weight in `[0, 1]`.
    #[default]
    UnitSum,
    /// Strictly increasing triples `w1 < w2 < w3` from `{0, by, ..., 1}`.
    FullCube,
}

impl std::str::FromStr for GridMode {
    type Err = AmpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "unit_sum" => Ok(GridMode::UnitSum),
            "full_cube" => Ok(GridMode::FullCube),
            other => Err(AmpError::InvalidInput(format!(
                "unknown grid mode '{other}' (expected 'unit_sum' or 'full_cube')"
            ))),
        }
    }
}

/// Number of grid steps in `[0, 1]` at resolution `by`.
fn steps(by: f64) -> Result<usize> {
    if !(by > 0.0 && by < 1.0) {
        return Err(AmpError::InvalidInput(format!(
            "grid resolution {by} outside (0, 1)"
        )));
    }
    Ok((1.0 / by + EPSILON).floor() as usize)
}

/// Generate the weight grid at resolution `by`.
///
/// Coordinates are computed from integer indices so boundary weights are
/// neither lost nor duplicated. In unit-sum mode the third weight is derived
/// as `1 - w1 - w2`; combinations where it would be negative are discarded
/// and a tiny negative rounding residue is clamped to zero.
///
/// # Errors
///
/// Returns an error if `by` is not in `(0, 1)`.
pub fn weight_grid(by: f64, mode: GridMode) -> Result<Vec<[f64; 3]>> {
    let n = steps(by)?;
    let coord = |i: usize| (i as f64 * by).min(1.0);
    let mut grid = Vec::new();
    match mode {
        GridMode::UnitSum => {
            for i in 0..=n {
                for j in 0..=n {
                    let (w1, w2) = (coord(i), coord(j));
                    let w3 = 1.0 - w1 - w2;
                    if w3 < -EPSILON {
                        continue;
                    }
                    grid.push([w1, w2, w3.clamp(0.0, 1.0)]);
                }
            }
        }
        GridMode::FullCube => {
            for i in 0..=n {
                for j in i + 1..=n {
                    for k in j + 1..=n {
                        grid.push([coord(i), coord(j), coord(k)]);
                    }
                }
            }
        }
    }
    tracing::debug!(by, ?mode, size = grid.len(), "generated weight grid");
    Ok(grid)
}

/// Descending order with `NaN` last.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Fraction of positives among the `k` highest-scored candidates.
///
/// Ranking is a stable descending sort, so ties keep their original row
/// order; `NaN` scores rank last. The count is divided by `k` even when
/// fewer than `k` candidates exist.
///
/// # Errors
///
/// Returns an error if `k` is zero or the slices differ in length.
pub fn top_k_fraction_of_ones(scores: &[f64], labels: &[Class], k: usize) -> Result<f64> {
    if k == 0 {
        return Err(AmpError::InvalidInput("k must be positive".into()));
    }
    if scores.len() != labels.len() {
        return Err(AmpError::InvalidInput(format!(
            "scores length {} != labels length {}",
            scores.len(),
            labels.len()
        )));
    }
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));
    let hits = order
        .iter()
        .take(k)
        .filter(|&&i| labels[i] == Class::Positive)
        .count();
    Ok(hits as f64 / k as f64)
}

/// Linear combination of each candidate's three scores. `NaN` propagates.
pub fn ensemble_scores(scores: &[[f64; 3]], weights: [f64; 3]) -> Vec<f64> {
    scores
        .iter()
        .map(|s| s[0] * weights[0] + s[1] * weights[1] + s[2] * weights[2])
        .collect()
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One evaluated weight triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    pub w1: f64,
    pub w2: f64,
    pub w3: f64,
    pub metric: f64,
}

impl GridPoint {
    pub fn weights(&self) -> [f64; 3] {
        [self.w1, self.w2, self.w3]
    }
}

/// Brute-force search over the weight grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSearch {
    pub by: f64,
    pub mode: GridMode,
    pub top_k: usize,
}

impl Default for GridSearch {
    fn default() -> Self {
        Self {
            by: 0.01,
            mode: GridMode::UnitSum,
            top_k: 100,
        }
    }
}

impl GridSearch {
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            by: config.grid_resolution,
            mode: GridMode::UnitSum,
            top_k: config.top_k,
        }
    }

    pub fn with_mode(mut self, mode: GridMode) -> Self {
        self.mode = mode;
        self
    }

    /// Evaluate every grid point, best first. Ties keep grid order.
    pub fn run(&self, training: &TrainingSet) -> Result<Vec<GridPoint>> {
        let grid = weight_grid(self.by, self.mode)?;
        tracing::info!(
            candidates = training.len(),
            positives = training.n_positive(),
            grid = grid.len(),
            top_k = self.top_k,
            "running grid search"
        );
        let evaluate = |w: &[f64; 3]| -> Result<GridPoint> {
            let scores = ensemble_scores(&training.scores, *w);
            let metric = top_k_fraction_of_ones(&scores, &training.labels, self.top_k)?;
            Ok(GridPoint {
                w1: w[0],
                w2: w[1],
                w3: w[2],
                metric,
            })
        };

        #[cfg(feature = "parallel")]
        let mut points = {
            use rayon::prelude::*;
            grid.par_iter().map(evaluate).collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let mut points = grid.iter().map(evaluate).collect::<Result<Vec<_>>>()?;

        points.sort_by(|a, b| descending(a.metric, b.metric));
        if let Some(best) = points.first() {
            tracing::info!(weights = ?best.weights(), metric = best.metric, "best weights");
        }
        Ok(points)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unit_sum_points_lie_on_simplex(inv in 2usize..60) {
            let by = 1.0 / inv as f64;
            let grid = weight_grid(by, GridMode::UnitSum).unwrap();
            prop_assert_eq!(grid.len(), (inv + 1) * (inv + 2) / 2);
            for w in &grid {
                prop_assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-9);
                prop_assert!(w.iter().all(|x| (0.0..=1.0).contains(x)));
            }
        }

        #[test]
        fn top_k_fraction_in_unit_interval(
            rows in proptest::collection::vec((0.0f64..1.0, any::<bool>()), 1..100),
            k in 1usize..120,
        ) {
            let scores: Vec<f64> = rows.iter().map(|r| r.0).collect();
            let labels: Vec<Class> = rows
                .iter()
                .map(|r| if r.1 { Class::Positive } else { Class::Negative })
                .collect();
            let f = top_k_fraction_of_ones(&scores, &labels, k).unwrap();
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }
}
