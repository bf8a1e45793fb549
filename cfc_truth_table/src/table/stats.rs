use super::TruthTableEntry;
use serde::Serialize;

/// Aggregate counts over a built table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl TableStats {
    pub fn from_entries(entries: &[TruthTableEntry]) -> Self {
        let valid = entries.iter().filter(|entry| entry.valid).count();
        Self {
            total: entries.len(),
            valid,
            invalid: entries.len() - valid,
        }
    }

    /// Valid share as a percentage, 0.0 for an empty table
    pub fn valid_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 * 100.0 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = TableStats::from_entries(&[]);
        assert_eq!(stats, TableStats::default());
        assert_eq!(stats.valid_percentage(), 0.0);
    }

    #[test]
    fn test_valid_percentage() {
        let stats = TableStats {
            total: 96,
            valid: 60,
            invalid: 36,
        };
        assert!((stats.valid_percentage() - 62.5).abs() < f64::EPSILON);
    }
}
