//! Peptide alphabet used for validation and integer encoding.
//!
//! The position of a residue in the alphabet string is its integer code, so
//! the wildcard `X` leading the default alphabet encodes as `0`, the same value
//! used for padding.

use ampbench_core::{AmpError, Result};

/// Default 21-symbol alphabet: wildcard `X` plus the 20 standard amino acids.
pub const DEFAULT_ALPHABET: &str = "XACDEFGHIKLMNPQRSTVWY";

/// A residue alphabet with a byte-to-code lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeptideAlphabet {
    symbols: Vec<u8>,
    codes: [Option<u8>; 256],
}

impl PeptideAlphabet {
    /// Build an alphabet from a string of distinct symbols (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error for empty, non-ASCII, duplicated or oversized alphabets.
    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(AmpError::InvalidInput("empty alphabet".into()));
        }
        if !symbols.is_ascii() || symbols.len() > u8::MAX as usize {
            return Err(AmpError::InvalidInput(format!(
                "alphabet '{symbols}' must be at most 255 ASCII symbols"
            )));
        }
        let mut codes = [None; 256];
        let upper: Vec<u8> = symbols.bytes().map(|b| b.to_ascii_uppercase()).collect();
        for (i, &b) in upper.iter().enumerate() {
            if codes[b as usize].is_some() {
                return Err(AmpError::InvalidInput(format!(
                    "duplicate symbol '{}' in alphabet",
                    b as char
                )));
            }
            codes[b as usize] = Some(i as u8);
        }
        Ok(Self {
            symbols: upper,
            codes,
        })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Integer code of a residue (case-insensitive).
    #[inline]
    pub fn code(&self, b: u8) -> Option<u8> {
        self.codes[b.to_ascii_uppercase() as usize]
    }

    pub fn is_valid(&self, b: u8) -> bool {
        self.code(b).is_some()
    }

    /// Whether every residue of `seq` is in the alphabet.
    pub fn validate(&self, seq: &[u8]) -> bool {
        seq.iter().all(|&b| self.is_valid(b))
    }
}

impl Default for PeptideAlphabet {
    fn default() -> Self {
        let symbols = DEFAULT_ALPHABET.as_bytes().to_vec();
        let mut codes = [None; 256];
        for (i, &b) in symbols.iter().enumerate() {
            codes[b as usize] = Some(i as u8);
        }
        Self { symbols, codes }
    }
}
