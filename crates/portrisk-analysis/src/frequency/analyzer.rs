//! Ordinal statistics over one response set.
//!
//! Works on per-category counts rather than a sorted copy: with five
//! categories every order statistic is a walk over a `[usize; 5]`.

use portrisk_core::config::{AnalysisConfig, MedianConvention};
use portrisk_core::constants::{DEFAULT_HIGH_CONSENSUS_SHARE, LIKERT_CATEGORIES, LIKERT_MIN};
use portrisk_core::errors::AnalysisError;

use super::types::{CategoryFrequency, ResponseSet, VariableStats};

/// Computes `VariableStats` from a `ResponseSet`. Stateless apart from
/// its conventions, so one instance is shared across rayon workers.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyAnalyzer {
    convention: MedianConvention,
    high_consensus_share: f64,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self {
            convention: MedianConvention::Lower,
            high_consensus_share: DEFAULT_HIGH_CONSENSUS_SHARE,
        }
    }
}

impl FrequencyAnalyzer {
    pub fn new(convention: MedianConvention, high_consensus_share: f64) -> Self {
        Self {
            convention,
            high_consensus_share,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.effective_median_convention(),
            config.effective_high_consensus_share(),
        )
    }

    pub fn convention(&self) -> MedianConvention {
        self.convention
    }

    /// Analyze one response set. Fails with `EmptyInput` when no valid
    /// responses remain.
    pub fn analyze(&self, set: &ResponseSet) -> Result<VariableStats, AnalysisError> {
        if set.is_empty() {
            return Err(AnalysisError::EmptyInput {
                variable: set.key().to_string(),
            });
        }

        let mut counts = [0usize; LIKERT_CATEGORIES];
        for r in set.responses() {
            counts[r.index()] += 1;
        }
        let n = set.len();

        let median = match self.convention {
            MedianConvention::Lower => order_statistic(&counts, (n + 1) / 2) as f64,
            MedianConvention::Interpolated => {
                let lo = order_statistic(&counts, (n + 1) / 2);
                let hi = order_statistic(&counts, n / 2 + 1);
                (lo as f64 + hi as f64) / 2.0
            }
        };
        let mode = lowest_mode(&counts);
        let percentile_25 = nearest_rank(&counts, n, 25.0);
        let percentile_75 = nearest_rank(&counts, n, 75.0);

        let frequencies: Vec<CategoryFrequency> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| CategoryFrequency {
                category: LIKERT_MIN + i as u8,
                count,
                percentage: round2(share(count, n)),
            })
            .collect();

        let high_share = share(counts[3] + counts[4], n);
        let low_share = share(counts[0] + counts[1], n);
        let modal_share = share(counts[(mode - LIKERT_MIN) as usize], n);

        Ok(VariableStats {
            sample_size: n,
            median,
            mode,
            percentile_25,
            percentile_75,
            iqr: f64::from(percentile_75) - f64::from(percentile_25),
            frequencies,
            high_share,
            low_share,
            high_consensus: modal_share > self.high_consensus_share,
        })
    }
}

/// The `rank`-th smallest value (1-based) of the distribution.
fn order_statistic(counts: &[usize; LIKERT_CATEGORIES], rank: usize) -> u8 {
    let mut seen = 0;
    for (i, &c) in counts.iter().enumerate() {
        seen += c;
        if seen >= rank {
            return LIKERT_MIN + i as u8;
        }
    }
    LIKERT_MIN + (LIKERT_CATEGORIES - 1) as u8
}

/// Nearest-rank percentile: the value at rank `ceil(p/100 * n)`, clamped to `1..=n`.
fn nearest_rank(counts: &[usize; LIKERT_CATEGORIES], n: usize, p: f64) -> u8 {
    let rank = ((p / 100.0) * n as f64).ceil() as usize;
    order_statistic(counts, rank.clamp(1, n))
}

/// Highest count wins; on ties the lower category is kept.
fn lowest_mode(counts: &[usize; LIKERT_CATEGORIES]) -> u8 {
    let mut best = 0;
    for i in 1..LIKERT_CATEGORIES {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    LIKERT_MIN + best as u8
}

fn share(count: usize, n: usize) -> f64 {
    count as f64 * 100.0 / n as f64
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_statistic_walks_counts() {
        let counts = [1, 0, 2, 0, 1];
        assert_eq!(order_statistic(&counts, 1), 1);
        assert_eq!(order_statistic(&counts, 2), 3);
        assert_eq!(order_statistic(&counts, 3), 3);
        assert_eq!(order_statistic(&counts, 4), 5);
    }

    #[test]
    fn test_lowest_mode_tie() {
        assert_eq!(lowest_mode(&[0, 3, 0, 3, 1]), 2);
        assert_eq!(lowest_mode(&[0, 0, 0, 0, 4]), 5);
    }

    #[test]
    fn test_nearest_rank_small_n() {
        let counts = [0, 0, 0, 1, 0];
        assert_eq!(nearest_rank(&counts, 1, 25.0), 4);
        assert_eq!(nearest_rank(&counts, 1, 75.0), 4);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
    }
}
