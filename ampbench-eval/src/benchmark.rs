//! Benchmark runner: every model against every dataset, plus a pooled row.
//!
//! Directory layout:
//!
//! ```text
//! datasets_dir/            predictions_dir/
//!   a.csv                    <model>/
//!   b.csv                      a_predictions.csv
//!                              b_predictions.csv
//! ```
//!
//! Dataset `*.csv` files and each model's prediction files (`.csv`/`.tsv`)
//! are paired by sorted file name. The pairing is a contract of the caller;
//! a model directory that is missing or holds fewer files than there are
//! datasets aborts the run.

use std::path::{Path, PathBuf};

use ampbench_core::{AmpError, BenchConfig, BenchMode, CanonicalRecord, Result};
use ampbench_io::{read_ground_truth, read_table, write_rows, LabelledSequence};
use ampbench_normalize::{CanonicalNormalizer, Normalizer};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::align::{align, AlignKey, Aligned};
use crate::confusion::Metrics;

/// Dataset name of the per-model pooled row.
pub const OVERALL: &str = "OVERALL";

/// One line of the benchmark summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub model: String,
    pub dataset: String,
    pub tpr: f64,
    pub tnr: f64,
    pub fpr: f64,
    pub fnr: f64,
    pub f1_score: f64,
    pub accuracy: f64,
}

impl BenchmarkRow {
    pub fn new(model: &str, dataset: &str, m: &Metrics) -> Self {
        Self {
            model: model.to_string(),
            dataset: dataset.to_string(),
            tpr: m.tpr,
            tnr: m.tnr,
            fpr: m.fpr,
            fnr: m.fnr,
            f1_score: m.f1_score,
            accuracy: m.accuracy,
        }
    }

    /// Round every rate to `decimals` digits. `NaN` stays `NaN`.
    pub fn rounded(mut self, decimals: u32) -> Self {
        for x in [
            &mut self.tpr,
            &mut self.tnr,
            &mut self.fpr,
            &mut self.fnr,
            &mut self.f1_score,
            &mut self.accuracy,
        ] {
            *x = round_to(*x, decimals);
        }
        self
    }
}

fn round_to(x: f64, decimals: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10f64.powi(decimals as i32);
    (x * scale).round() / scale
}

/// Ground truth and predictions for one dataset.
#[derive(Debug, Clone)]
pub struct DatasetPredictions {
    pub dataset: String,
    pub truth: Vec<LabelledSequence>,
    pub predictions: Vec<CanonicalRecord>,
}

/// Per-dataset rows for one model followed by its pooled `OVERALL` row.
///
/// The pooled row is computed over the concatenation of every aligned
/// dataset, not by averaging per-dataset rates.
pub fn evaluate_model(model: &str, datasets: &[DatasetPredictions], key: AlignKey) -> Result<Vec<BenchmarkRow>> {
    let mut rows = Vec::with_capacity(datasets.len() + 1);
    let mut pooled = Aligned::default();
    for ds in datasets {
        let aligned = align(&ds.truth, &ds.predictions, key);
        let cm = aligned.confusion()?;
        tracing::debug!(model, dataset = %ds.dataset, tn = cm.true_negatives, fp = cm.false_positives,
            fn_ = cm.false_negatives, tp = cm.true_positives, failed = cm.failed, "confusion matrix");
        rows.push(BenchmarkRow::new(model, &ds.dataset, &cm.metrics()));
        pooled.extend(aligned);
    }
    let overall = pooled.confusion()?.metrics();
    rows.push(BenchmarkRow::new(model, OVERALL, &overall));
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Directory-driven runner
// ---------------------------------------------------------------------------

fn io_err(path: &Path, e: std::io::Error) -> AmpError {
    AmpError::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}

/// Regular files in `dir` with one of `extensions`, sorted by file name.
pub fn sorted_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Runs the benchmark for one mode of a configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner<'a> {
    config: &'a BenchConfig,
    mode: BenchMode,
    key: AlignKey,
}

impl<'a> BenchmarkRunner<'a> {
    pub fn new(config: &'a BenchConfig, mode: BenchMode) -> Self {
        Self {
            config,
            mode,
            key: AlignKey::default(),
        }
    }

    pub fn with_align_key(mut self, key: AlignKey) -> Self {
        self.key = key;
        self
    }

    /// Models of the configured mode, in sorted order.
    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self
            .config
            .models_for(self.mode)
            .iter()
            .map(String::as_str)
            .collect();
        models.sort_unstable();
        models
    }

    /// Benchmark every model; rows are rounded to the configured decimals.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file, missing model directory or
    /// prediction/dataset count mismatch.
    pub fn run(&self, datasets_dir: impl AsRef<Path>, predictions_dir: impl AsRef<Path>) -> Result<Vec<BenchmarkRow>> {
        let datasets_dir = datasets_dir.as_ref();
        let predictions_dir = predictions_dir.as_ref();
        let datasets = sorted_files(datasets_dir, &["csv"])?;
        let truths = datasets
            .iter()
            .map(|p| Ok((file_name(p), read_ground_truth(p)?)))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(mode = %self.mode, datasets = truths.len(), "running benchmark");

        let mut rows = Vec::new();
        for model in self.models() {
            let model_dir = predictions_dir.join(model);
            if !model_dir.is_dir() {
                return Err(AmpError::InvalidInput(format!(
                    "missing prediction directory for model '{}': {}",
                    model,
                    model_dir.display()
                )));
            }
            let pred_files = sorted_files(&model_dir, &["csv", "tsv"])?;
            if pred_files.len() < truths.len() {
                return Err(AmpError::InvalidInput(format!(
                    "model '{}' has {} prediction files for {} datasets",
                    model,
                    pred_files.len(),
                    truths.len()
                )));
            }
            if pred_files.len() > truths.len() {
                tracing::warn!(model, extra = pred_files.len() - truths.len(), "surplus prediction files ignored");
            }

            let mut per_dataset = Vec::with_capacity(truths.len());
            for ((dataset, truth), pred_path) in truths.iter().zip(&pred_files) {
                tracing::debug!(model, dataset = %dataset, predictions = %pred_path.display(), "pairing");
                let predictions = CanonicalNormalizer.normalize(read_table(pred_path)?)?;
                per_dataset.push(DatasetPredictions {
                    dataset: dataset.clone(),
                    truth: truth.clone(),
                    predictions,
                });
            }
            let model_rows = evaluate_model(model, &per_dataset, self.key)?;
            if let Some(overall) = model_rows.last() {
                tracing::info!(model, accuracy = overall.accuracy, tpr = overall.tpr, fpr = overall.fpr, "model done");
            }
            rows.extend(model_rows.into_iter().map(|r| r.rounded(self.config.decimals)));
        }
        Ok(rows)
    }
}

/// File name of a summary generated at `at`.
pub fn summary_file_name(at: NaiveDateTime) -> String {
    format!("benchmark_{}.csv", at.format("%Y-%m-%d_%H-%M"))
}

/// Write the summary CSV into `dir`; returns the written path.
pub fn save_summary(rows: &[BenchmarkRow], dir: impl AsRef<Path>, at: NaiveDateTime) -> Result<PathBuf> {
    let path = dir.as_ref().join(summary_file_name(at));
    write_rows(&path, rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "saved benchmark summary");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampbench_core::{Class, Prediction};
    use chrono::NaiveDate;
    use std::fs;

    fn truth(labels: &[u8]) -> Vec<LabelledSequence> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &l)| LabelledSequence {
                name: format!("s{i}"),
                sequence: format!("KW{i}"),
                class: Class::from_num(l).unwrap(),
            })
            .collect()
    }

    fn preds(labels: &[Option<u8>]) -> Vec<CanonicalRecord> {
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let p = l.and_then(Class::from_num).map(Prediction::new);
                CanonicalRecord::new(format!("s{i}"), format!("KW{i}"), p, None)
            })
            .collect()
    }

    #[test]
    fn overall_row_pools_datasets() {
        let data = vec![
            DatasetPredictions {
                dataset: "a.csv".into(),
                truth: truth(&[1, 1, 0, 0]),
                predictions: preds(&[Some(1), Some(0), Some(0), Some(1)]),
            },
            DatasetPredictions {
                dataset: "b.csv".into(),
                truth: truth(&[1, 0]),
                predictions: preds(&[Some(1), None]),
            },
        ];
        let rows = evaluate_model("m", &data, AlignKey::Position).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].accuracy, 0.5);
        assert!(rows[1].tnr.is_nan());
        assert_eq!(rows[2].dataset, OVERALL);
        // pooled: tp=2, fn=1, tn=1, fp=1
        assert!((rows[2].accuracy - 0.6).abs() < 1e-12);
        assert!((rows[2].tpr - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rounding_keeps_nan() {
        let row = BenchmarkRow {
            model: "m".into(),
            dataset: "d".into(),
            tpr: 2.0 / 3.0,
            tnr: f64::NAN,
            fpr: f64::NAN,
            fnr: 1.0 / 3.0,
            f1_score: 0.5,
            accuracy: 0.123456,
        }
        .rounded(4);
        assert_eq!(row.tpr, 0.6667);
        assert_eq!(row.accuracy, 0.1235);
        assert!(row.tnr.is_nan());
    }

    #[test]
    fn summary_name_is_timestamped() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(summary_file_name(at), "benchmark_2024-03-09_14-05.csv");
    }

    fn write(path: &Path, text: &str) {
        fs::write(path, text).unwrap();
    }

    #[test]
    fn runs_over_directories() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("datasets");
        let pred_dir = root.path().join("predictions");
        fs::create_dir_all(&data_dir).unwrap();
        write(&data_dir.join("a.csv"), "name,sequence,active\ns0,KK,1.0\ns1,GG,0.0\n");
        write(&data_dir.join("b.csv"), "name,sequence,active\ns2,LL,1.0\n");
        write(&data_dir.join("notes.txt"), "ignored");

        let mut config = BenchConfig::default();
        config.amp_models = vec!["zeta".into(), "alpha".into()];
        for model in ["alpha", "zeta"] {
            let dir = pred_dir.join(model);
            fs::create_dir_all(&dir).unwrap();
            write(
                &dir.join("a_pred.csv"),
                "id,sequence,prediction,score,prediction_num\ns0,KK,AMP,0.9,1\ns1,GG,non-AMP*,0.1,0\n",
            );
            write(&dir.join("b_pred.tsv"), "id\tsequence\tprediction\tscore\tprediction_num\ns2\tLL\tnon-AMP\t0.2\t0\n");
        }

        let runner = BenchmarkRunner::new(&config, BenchMode::Amp);
        assert_eq!(runner.models(), vec!["alpha", "zeta"]);
        let rows = runner.run(&data_dir, &pred_dir).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].model, "alpha");
        assert_eq!(rows[0].dataset, "a.csv");
        assert_eq!(rows[0].accuracy, 1.0);
        assert_eq!(rows[1].tpr, 0.0);
        assert_eq!(rows[2].dataset, OVERALL);
        assert_eq!(rows[2].accuracy, 0.6667);

        let at = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 0).unwrap();
        let path = save_summary(&rows, root.path(), at).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("model,dataset,tpr,tnr,fpr,fnr,f1_score,accuracy"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn missing_model_dir_fails() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("datasets");
        fs::create_dir_all(&data_dir).unwrap();
        write(&data_dir.join("a.csv"), "name,sequence,active\ns0,KK,1\n");
        let mut config = BenchConfig::default();
        config.toxicity_models = vec!["hemopi".into()];
        let runner = BenchmarkRunner::new(&config, BenchMode::Toxicity);
        assert!(runner.run(&data_dir, root.path()).is_err());
    }

    #[test]
    fn too_few_prediction_files_fails() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("datasets");
        fs::create_dir_all(&data_dir).unwrap();
        write(&data_dir.join("a.csv"), "name,sequence,active\ns0,KK,1\n");
        write(&data_dir.join("b.csv"), "name,sequence,active\ns1,GG,0\n");
        let model_dir = root.path().join("preds").join("m");
        fs::create_dir_all(&model_dir).unwrap();
        write(&model_dir.join("a.csv"), "id,sequence,prediction\ns0,KK,AMP\n");
        let mut config = BenchConfig::default();
        config.amp_models = vec!["m".into()];
        let runner = BenchmarkRunner::new(&config, BenchMode::Amp);
        assert!(runner.run(&data_dir, root.path().join("preds")).is_err());
    }
}
