//! Evaluation of normalized predictions.
//!
//! - [`confusion`] — binary confusion matrix and `NaN`-propagating rates
//! - [`align`] — pairing predictions with ground truth (symmetric drop)
//! - [`pairwise`] — active/inactive pair discrimination
//! - [`benchmark`] — models × datasets runner with pooled `OVERALL` rows
//! - [`grid`] — ensemble weight grid and top-k objective

pub mod align;
pub mod benchmark;
pub mod confusion;
pub mod grid;
pub mod pairwise;

pub use align::{align, AlignKey, Aligned};
pub use benchmark::{
    evaluate_model, save_summary, sorted_files, summary_file_name, BenchmarkRow, BenchmarkRunner,
    DatasetPredictions, OVERALL,
};
pub use confusion::{ConfusionMatrix, Metrics};
pub use grid::{ensemble_scores, top_k_fraction_of_ones, weight_grid, GridMode, GridPoint, GridSearch};
pub use pairwise::{pairwise_discrimination, PairwiseResult};
