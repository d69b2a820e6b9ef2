//! Table I/O for ampbench.
//!
//! - **CSV/TSV** — [`read_table`] into a [`RawTable`](ampbench_core::RawTable), [`write_rows`] from serde rows
//! - **JSON** — [`table_from_json_rows`] for row-array service payloads
//! - **Canonical** — [`write_canonical`] with the five canonical columns
//! - **Ground truth** — [`read_ground_truth`], [`fasta_to_csv`]
//! - **Training sets** — [`TrainingSet`] for ensemble weight search

pub mod canonical;
pub mod csv;
pub mod json;
pub mod training;
pub mod truth;

pub use canonical::{write_canonical, CanonicalRow};
pub use csv::{delimiter_for, read_table, read_table_from_reader, write_rows};
pub use json::table_from_json_rows;
pub use training::TrainingSet;
pub use truth::{
    fasta_to_csv, ground_truth_from_fasta, ground_truth_from_table, read_ground_truth, GroundTruthRow,
    LabelledSequence,
};
