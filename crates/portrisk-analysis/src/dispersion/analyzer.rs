//! Deltas, quadrants, aggregates and per-dimension rollups over matched pairs.

use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use portrisk_core::config::DispersionConfig;
use portrisk_core::constants::{
    DEFAULT_LABELS_PER_QUADRANT, DEFAULT_LABEL_LIMIT, DEFAULT_NEUTRAL_THRESHOLD,
    DIMENSION_TOP_N, MIN_PAIRS_FOR_AGGREGATES,
};
use portrisk_core::errors::AnalysisError;
use portrisk_core::types::{compare_codes, Dimension, FxHashMap};

use super::labels::select_labels;
use super::types::{
    CorrelationStrength, DimensionTrend, DispersionAnalysis, DispersionPoint, DispersionSummary,
    Quadrant, QuadrantCount, TrendBands,
};
use crate::matching::MatchedPair;

#[derive(Debug, Clone)]
pub struct DispersionAnalyzer {
    neutral_threshold: f64,
    bands: TrendBands,
    labels_per_quadrant: usize,
    label_limit: usize,
}

impl Default for DispersionAnalyzer {
    fn default() -> Self {
        Self {
            neutral_threshold: DEFAULT_NEUTRAL_THRESHOLD,
            bands: TrendBands::default(),
            labels_per_quadrant: DEFAULT_LABELS_PER_QUADRANT,
            label_limit: DEFAULT_LABEL_LIMIT,
        }
    }
}

impl DispersionAnalyzer {
    pub fn from_config(config: &DispersionConfig) -> Self {
        Self {
            neutral_threshold: config.effective_neutral_threshold(),
            bands: TrendBands {
                significant: config.effective_significant_band(),
                moderate: config.effective_moderate_band(),
                slight: config.effective_slight_band(),
            },
            labels_per_quadrant: config.effective_labels_per_quadrant(),
            label_limit: config.effective_label_limit(),
        }
    }

    pub fn neutral_threshold(&self) -> f64 {
        self.neutral_threshold
    }

    pub fn bands(&self) -> TrendBands {
        self.bands
    }

    pub fn analyze(&self, pairs: &[MatchedPair]) -> DispersionAnalysis {
        let mut points: Vec<DispersionPoint> = pairs.iter().map(|p| self.project(p)).collect();
        for idx in select_labels(&points, self.labels_per_quadrant, self.label_limit) {
            points[idx].labelled = true;
        }

        let mut errors = Vec::new();
        let summary = self.summarize(&points, &mut errors);
        let quadrants = quadrant_counts(&points);
        let dimensions = self.dimension_trends(&points);

        tracing::info!(
            pairs = points.len(),
            labelled = points.iter().filter(|p| p.labelled).count(),
            mean_delta = summary.as_ref().map(|s| s.mean_delta),
            correlation = summary.as_ref().and_then(|s| s.correlation),
            "temporal dispersion computed"
        );

        DispersionAnalysis {
            points,
            summary,
            quadrants,
            dimensions,
            errors,
        }
    }

    fn project(&self, pair: &MatchedPair) -> DispersionPoint {
        let earlier_median = pair.earlier.median();
        let later_median = pair.later.median();
        DispersionPoint {
            dimension: pair.dimension,
            code: pair.earlier.code().to_string(),
            later_code: pair.later.code().to_string(),
            description: pair
                .earlier
                .description
                .clone()
                .or_else(|| pair.later.description.clone()),
            earlier_median,
            later_median,
            delta: pair.delta,
            abs_delta: pair.delta.abs(),
            combined_median: (earlier_median + later_median) / 2.0,
            quadrant: Quadrant::classify(earlier_median, later_median, self.neutral_threshold),
            variability: (pair.earlier.stats.iqr + pair.later.stats.iqr) / 2.0,
            trend: self.bands.classify(pair.delta),
            earlier_tier: pair.earlier.tier,
            later_tier: pair.later.tier,
            labelled: false,
        }
    }

    fn summarize(
        &self,
        points: &[DispersionPoint],
        errors: &mut Vec<AnalysisError>,
    ) -> Option<DispersionSummary> {
        let n = points.len();
        if n < MIN_PAIRS_FOR_AGGREGATES {
            tracing::warn!(pairs = n, "too few matched pairs for aggregate statistics");
            errors.push(AnalysisError::InsufficientData {
                statistic: "correlation".to_string(),
                required: MIN_PAIRS_FOR_AGGREGATES,
                available: n,
            });
            return None;
        }

        let earlier: Vec<f64> = points.iter().map(|p| p.earlier_median).collect();
        let later: Vec<f64> = points.iter().map(|p| p.later_median).collect();
        let earlier_std = earlier.iter().population_std_dev();
        let later_std = later.iter().population_std_dev();

        let correlation = if earlier_std == 0.0 || later_std == 0.0 {
            let series = if earlier_std == 0.0 { "earlier" } else { "later" };
            tracing::warn!(series, "correlation undefined for constant series");
            errors.push(AnalysisError::UndefinedCorrelation {
                series: series.to_string(),
            });
            None
        } else {
            pearson(&earlier, &later)
        };

        Some(DispersionSummary {
            pairs: n,
            earlier_mean: mean(earlier.iter().copied()),
            earlier_std,
            later_mean: mean(later.iter().copied()),
            later_std,
            mean_delta: mean(points.iter().map(|p| p.delta)),
            correlation,
            correlation_strength: correlation.map(CorrelationStrength::from_r),
            correlation_p_value: correlation.and_then(|r| correlation_p_value(r, n)),
        })
    }

    fn dimension_trends(&self, points: &[DispersionPoint]) -> Vec<DimensionTrend> {
        let mut by_dimension: FxHashMap<Dimension, Vec<&DispersionPoint>> = FxHashMap::default();
        for p in points {
            by_dimension.entry(p.dimension).or_default().push(p);
        }

        Dimension::ALL
            .iter()
            .filter_map(|dim| {
                let members = by_dimension.get(dim)?;
                let mean_delta = mean(members.iter().map(|p| p.delta));
                let mut ranked = members.clone();
                ranked.sort_by(|a, b| {
                    b.variability
                        .total_cmp(&a.variability)
                        .then_with(|| compare_codes(&a.code, &b.code))
                });
                Some(DimensionTrend {
                    dimension: *dim,
                    pairs: members.len(),
                    mean_earlier: mean(members.iter().map(|p| p.earlier_median)),
                    mean_later: mean(members.iter().map(|p| p.later_median)),
                    mean_delta,
                    trend: self.bands.classify(mean_delta),
                    most_variable: ranked
                        .iter()
                        .take(DIMENSION_TOP_N)
                        .map(|p| p.code.clone())
                        .collect(),
                })
            })
            .collect()
    }
}

fn quadrant_counts(points: &[DispersionPoint]) -> Vec<QuadrantCount> {
    let total = points.len();
    Quadrant::ALL
        .iter()
        .map(|&quadrant| {
            let count = points.iter().filter(|p| p.quadrant == quadrant).count();
            QuadrantCount {
                quadrant,
                count,
                percentage: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
            }
        })
        .collect()
}

/// Plain `sum / n`; 0 for no values.
fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Pearson's r. `None` when either series is constant.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let mx = mean(x.iter().copied());
    let my = mean(y.iter().copied());
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Two-sided p-value for `r` over `n` pairs. Needs n ≥ 3 and |r| < 1.
fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 || r.abs() >= 1.0 {
        return None;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some(2.0 * (1.0 - dist.cdf(t.abs())))
}
