//! Length windows and fixed-width integer encoding for model input.

use ampbench_core::{AmpError, Result};

use crate::alphabet::PeptideAlphabet;

/// Inclusive range of sequence lengths a model is trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl LengthWindow {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(AmpError::InvalidInput(format!(
                "length window min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

/// Encode a sequence as alphabet codes, left-padded with `0` to `width`.
///
/// Sequences longer than `width` keep their last `width` residues.
///
/// # Errors
///
/// Returns an error if a residue is not in the alphabet.
pub fn encode_padded(seq: &[u8], alphabet: &PeptideAlphabet, width: usize) -> Result<Vec<u8>> {
    let start = seq.len().saturating_sub(width);
    let kept = &seq[start..];
    let mut out = vec![0u8; width - kept.len()];
    out.reserve(kept.len());
    for &b in kept {
        let code = alphabet.code(b).ok_or_else(|| {
            AmpError::InvalidInput(format!("residue '{}' not in alphabet", b as char))
        })?;
        out.push(code);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_inclusive() {
        let w = LengthWindow::new(10, 200).unwrap();
        assert!(w.contains(10));
        assert!(w.contains(200));
        assert!(!w.contains(9));
        assert!(!w.contains(201));
        assert!(LengthWindow::new(5, 4).is_err());
    }

    #[test]
    fn short_sequences_are_left_padded() {
        let a = PeptideAlphabet::default();
        let enc = encode_padded(b"AC", &a, 4).unwrap();
        assert_eq!(enc, vec![0, 0, 1, 2]);
    }

    #[test]
    fn long_sequences_keep_the_tail() {
        let a = PeptideAlphabet::default();
        let enc = encode_padded(b"YYAC", &a, 2).unwrap();
        assert_eq!(enc, vec![1, 2]);
    }

    #[test]
    fn unknown_residue_is_an_error() {
        let a = PeptideAlphabet::default();
        assert!(encode_padded(b"AB", &a, 4).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn encoded_width_is_fixed(
            seq in proptest::collection::vec(prop_oneof![Just(b'A'), Just(b'K'), Just(b'W'), Just(b'X')], 0..300),
            width in 1usize..250,
        ) {
            let a = PeptideAlphabet::default();
            let enc = encode_padded(&seq, &a, width).unwrap();
            prop_assert_eq!(enc.len(), width);
        }
    }
}
