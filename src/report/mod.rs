// src/report/mod.rs

//! Turns backend bitstrings into per-qubit syndrome reports.

use crate::core::{READOUT_REGISTER, SurfaceCodeError};
use crate::simulation::ExecutionResult;

/// Labels measured bits with the qubit that produced them.
///
/// # Examples
/// ```
/// use surface_qec::report::ResultFormatter;
///
/// let formatter = ResultFormatter::new(4);
/// assert_eq!(formatter.format_round("0110").unwrap(), "M0: 0 M1: 1 M2: 1 M3: 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultFormatter {
    num_measure: usize,
}

impl ResultFormatter {
    /// Formatter for programs with `num_measure` measurement qubits.
    pub fn new(num_measure: usize) -> Self {
        Self { num_measure }
    }

    /// Renders one round register as `"M<i>: <bit>"` entries.
    ///
    /// # Errors
    /// `InvalidOperation` if `bits` is not exactly one `0`/`1` per measurement qubit.
    pub fn format_round(&self, bits: &str) -> Result<String, SurfaceCodeError> {
        format_labeled('M', bits, self.num_measure)
    }

    /// Renders a whole count key, one line per register.
    ///
    /// Round registers are labeled `M<i>`. When the key carries one more
    /// register than `rounds` and it matches the data-qubit readout, it is
    /// labeled `D<i>`.
    pub fn format_key(&self, key: &str, rounds: usize) -> Result<String, SurfaceCodeError> {
        let registers: Vec<&str> = key.split_whitespace().collect();
        if registers.len() != rounds && registers.len() != rounds + 1 {
            return Err(SurfaceCodeError::InvalidOperation {
                message: format!("expected {} round registers, key has {}", rounds, registers.len()),
            });
        }

        let mut lines = Vec::with_capacity(registers.len());
        for (position, bits) in registers.iter().enumerate() {
            if position < rounds {
                lines.push(format!("round {}: {}", position, self.format_round(bits)?));
            } else {
                lines.push(format!("{}: {}", READOUT_REGISTER, format_labeled('D', bits, bits.len())?));
            }
        }
        Ok(lines.join("\n"))
    }

    /// Renders the most frequent outcome of `result`, or `None` when it holds no shots.
    pub fn report(&self, result: &ExecutionResult, rounds: usize) -> Result<Option<String>, SurfaceCodeError> {
        match result.most_frequent() {
            Some((key, count)) => {
                let body = self.format_key(key, rounds)?;
                Ok(Some(format!("most frequent ({} of {} shots)\n{}", count, result.shots(), body)))
            }
            None => Ok(None),
        }
    }
}

fn format_labeled(prefix: char, bits: &str, expected: usize) -> Result<String, SurfaceCodeError> {
    let len = bits.chars().count();
    if len != expected {
        return Err(SurfaceCodeError::InvalidOperation {
            message: format!("bitstring '{}' has {} bits, expected {}", bits, len, expected),
        });
    }
    let mut entries = Vec::with_capacity(len);
    for (index, bit) in bits.chars().enumerate() {
        if bit != '0' && bit != '1' {
            return Err(SurfaceCodeError::InvalidOperation {
                message: format!("bitstring '{}' contains '{}' at position {}", bits, bit, index),
            });
        }
        entries.push(format!("{}{}: {}", prefix, index, bit));
    }
    Ok(entries.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn round_bits_map_to_measure_indices() -> Result<(), SurfaceCodeError> {
        let formatter = ResultFormatter::new(8);
        assert_eq!(
            formatter.format_round("00010000")?,
            "M0: 0 M1: 0 M2: 0 M3: 1 M4: 0 M5: 0 M6: 0 M7: 0"
        );
        Ok(())
    }

    #[test]
    fn malformed_bitstrings_are_rejected() {
        let formatter = ResultFormatter::new(3);
        assert!(matches!(formatter.format_round("01"), Err(SurfaceCodeError::InvalidOperation { .. })));
        assert!(matches!(formatter.format_round("0a1"), Err(SurfaceCodeError::InvalidOperation { .. })));
        assert!(formatter.format_key("010 011 000", 1).is_err());
    }

    #[test]
    fn key_lines_follow_register_order() -> Result<(), SurfaceCodeError> {
        let formatter = ResultFormatter::new(2);
        let text = formatter.format_key("01 11 101", 2)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["round 0: M0: 0 M1: 1", "round 1: M0: 1 M1: 1", "data_output: D0: 1 D1: 0 D2: 1"]);
        Ok(())
    }

    #[test]
    fn report_uses_most_frequent_outcome() -> Result<(), SurfaceCodeError> {
        let counts: BTreeMap<String, usize> = [("10".to_string(), 1), ("01".to_string(), 4)].into_iter().collect();
        let result = ExecutionResult::from_counts(counts);
        let text = ResultFormatter::new(2).report(&result, 1)?;
        assert_eq!(text.as_deref(), Some("most frequent (4 of 5 shots)\nround 0: M0: 0 M1: 1"));
        Ok(())
    }
}
