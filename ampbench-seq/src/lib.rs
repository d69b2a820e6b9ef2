//! Peptide sequence handling for ampbench.
//!
//! - **Alphabet** — [`PeptideAlphabet`], the 21-symbol residue set with integer codes
//! - **FASTA** — [`FastaRecord`] via [`read_fasta`] / [`parse_fasta_str`]
//! - **Encoding** — [`LengthWindow`] checks and [`encode_padded`] model input
//! - **Chunking** — [`chunk_records`] and [`fasta_payload`] for size-limited services

pub mod alphabet;
pub mod chunk;
pub mod encode;
pub mod fasta;

pub use alphabet::{PeptideAlphabet, DEFAULT_ALPHABET};
pub use chunk::{chunk_records, fasta_payload};
pub use encode::{encode_padded, LengthWindow};
pub use fasta::{parse_fasta_str, read_fasta, FastaRecord};
