//! Shared primitives for the ampbench antimicrobial-peptide benchmarking workspace.
//!
//! `ampbench-core` provides the foundation the other crates build on:
//!
//! - **Error types** — [`AmpError`] and [`Result`] for structured error handling
//! - **Configuration** — [`BenchConfig`], an explicit versioned settings struct
//! - **Canonical schema** — [`CanonicalRecord`] and [`Prediction`]
//! - **Raw tables** — [`RawTable`], the pre-normalization shape of provider output
//! - **Traits** — [`Sequence`], [`Annotated`], [`Summarizable`]

pub mod config;
pub mod error;
pub mod record;
pub mod table;
pub mod traits;

pub use config::{BenchConfig, BenchMode, ALPHABET_SIZE, CONFIG_VERSION};
pub use error::{AmpError, Result};
pub use record::{CanonicalRecord, Class, Prediction, CANONICAL_COLUMNS, NEGATIVE_LABEL, POSITIVE_LABEL};
pub use table::RawTable;
pub use traits::*;
