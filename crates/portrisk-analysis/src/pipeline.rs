//! End-to-end analysis: ingest → frequency → classification → matching → dispersion.
//!
//! Every stage consumes an immutable collection and returns a new one.
//! Nothing is cached between runs; re-running on the same table yields
//! the same report.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use portrisk_core::config::PortRiskConfig;
use portrisk_core::constants::PRIORITY_MEDIAN;
use portrisk_core::errors::{AnalysisError, IngestError, PipelineResult};
use portrisk_core::types::{BTreeMap, Dimension, Period, VariableKey};

use crate::classification::{tier_distribution, RiskClassifier, RiskRecord, TierDistribution};
use crate::dispersion::{DispersionAnalysis, DispersionAnalyzer};
use crate::frequency::{FrequencyAnalyzer, ResponseSet};
use crate::ingest::{RawTable, ResponseTable};
use crate::matching::{CrossPeriodMatcher, MatchOutcome};

/// Classified-variable rollup for one (dimension, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionPeriodSummary {
    pub dimension: Dimension,
    pub period: Period,
    pub variables: usize,
    /// Median of the variable medians (mean of the two central values for even counts).
    pub median_of_medians: f64,
    pub tiers: TierDistribution,
    /// Codes with median ≥ 4.0, flagged as mitigation priorities.
    pub priority: Vec<String>,
}

/// Run-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    pub rows: usize,
    pub rejected_rows: usize,
    pub null_responses: usize,
    pub variables: usize,
    pub classified: usize,
    pub empty_variables: usize,
    pub pairs: usize,
    pub unmatched_earlier: usize,
    pub unmatched_later: usize,
    pub ambiguous: usize,
}

impl fmt::Display for PipelineDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows ({} rejected, {} null), {} variables ({} classified, {} empty), \
             {} pairs ({} + {} unmatched, {} ambiguous)",
            self.rows,
            self.rejected_rows,
            self.null_responses,
            self.variables,
            self.classified,
            self.empty_variables,
            self.pairs,
            self.unmatched_earlier,
            self.unmatched_later,
            self.ambiguous
        )
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// One record per classified variable × period, sorted by key.
    pub records: Vec<RiskRecord>,
    /// Variables with no valid responses; excluded from classification.
    pub flagged_empty: Vec<VariableKey>,
    pub matching: MatchOutcome,
    pub dispersion: DispersionAnalysis,
    pub dimension_summaries: Vec<DimensionPeriodSummary>,
    pub diagnostics: PipelineDiagnostics,
}

impl AnalysisReport {
    pub fn records_for(&self, period: Period) -> impl Iterator<Item = &RiskRecord> {
        self.records.iter().filter(move |r| r.period() == period)
    }

    pub fn record(&self, key: &VariableKey) -> Option<&RiskRecord> {
        self.records
            .binary_search_by(|r| r.key.cmp(key))
            .ok()
            .map(|i| &self.records[i])
    }

    pub fn summary(&self, dimension: Dimension, period: Period) -> Option<&DimensionPeriodSummary> {
        self.dimension_summaries
            .iter()
            .find(|s| s.dimension == dimension && s.period == period)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Stateless orchestrator built from a resolved configuration.
#[derive(Debug, Clone)]
pub struct RiskAnalysisPipeline {
    frequency: FrequencyAnalyzer,
    classifier: RiskClassifier,
    matcher: CrossPeriodMatcher,
    dispersion: DispersionAnalyzer,
    parallel: bool,
}

impl Default for RiskAnalysisPipeline {
    fn default() -> Self {
        Self::new(&PortRiskConfig::default())
    }
}

impl RiskAnalysisPipeline {
    pub fn new(config: &PortRiskConfig) -> Self {
        Self {
            frequency: FrequencyAnalyzer::from_config(&config.analysis),
            classifier: RiskClassifier::from_config(&config.classification),
            matcher: CrossPeriodMatcher::from_config(&config.matching),
            dispersion: DispersionAnalyzer::from_config(&config.dispersion),
            parallel: config.analysis.effective_parallel(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }

    /// Validate a long-format raw table, then run. Only a missing required
    /// column is returned as `Err`.
    pub fn run_raw(&self, raw: &RawTable) -> Result<PipelineResult<AnalysisReport>, IngestError> {
        let table = ResponseTable::from_raw(raw)?;
        Ok(self.run(&table))
    }

    /// Run every stage over a validated table. Per-variable and per-pair
    /// failures are collected in the result's `errors`; none aborts the run.
    #[tracing::instrument(skip(self, table), fields(rows = table.len()))]
    pub fn run(&self, table: &ResponseTable) -> PipelineResult<AnalysisReport> {
        let mut result = PipelineResult::<AnalysisReport>::default();
        for e in &table.rejected {
            result.add_error(e.clone());
        }

        let sets = table.response_sets();
        let (records, failures) = self.classify_sets(&sets);
        let flagged_empty: Vec<VariableKey> = failures.iter().map(|(k, _)| k.clone()).collect();
        for (_, e) in failures {
            result.add_error(e);
        }

        let matching = match self.matcher.match_periods(&records) {
            Ok(outcome) => {
                for a in &outcome.ambiguities {
                    result.add_error(a.clone());
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping cross-period matching");
                result.add_error(e);
                MatchOutcome::default()
            }
        };

        let dispersion = self.dispersion.analyze(&matching.pairs);
        for e in &dispersion.errors {
            result.add_error(e.clone());
        }

        let dimension_summaries = dimension_summaries(&records);
        let diagnostics = PipelineDiagnostics {
            rows: table.len(),
            rejected_rows: table.rejected.len(),
            null_responses: table.null_count,
            variables: sets.len(),
            classified: records.len(),
            empty_variables: flagged_empty.len(),
            pairs: matching.pairs.len(),
            unmatched_earlier: matching.unmatched_earlier.len(),
            unmatched_later: matching.unmatched_later.len(),
            ambiguous: matching.ambiguities.len(),
        };
        tracing::info!(%diagnostics, errors = result.error_count(), "risk analysis complete");

        result.data = AnalysisReport {
            records,
            flagged_empty,
            matching,
            dispersion,
            dimension_summaries,
            diagnostics,
        };
        result
    }

    /// Frequency + classification for every set. Records come back sorted
    /// by key whatever the scheduling; empty sets come back as failures.
    pub fn classify_sets(
        &self,
        sets: &[ResponseSet],
    ) -> (Vec<RiskRecord>, Vec<(VariableKey, AnalysisError)>) {
        let classify = |set: &ResponseSet| -> Result<RiskRecord, (VariableKey, AnalysisError)> {
            let stats = self
                .frequency
                .analyze(set)
                .map_err(|e| (set.key().clone(), e))?;
            let tier = self.classifier.classify(&stats);
            Ok(RiskRecord::new(
                set.key().clone(),
                set.description().map(str::to_string),
                stats,
                tier,
            ))
        };

        let outcomes: Vec<Result<RiskRecord, (VariableKey, AnalysisError)>> = if self.parallel {
            sets.par_iter().map(classify).collect()
        } else {
            sets.iter().map(classify).collect()
        };

        let mut records = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err((key, e)) => {
                    tracing::warn!(variable = %key, "no valid responses; variable flagged");
                    failures.push((key, e));
                }
            }
        }
        records.sort_by(|a, b| a.key.cmp(&b.key));
        failures.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::debug!(
            classified = records.len(),
            empty = failures.len(),
            parallel = self.parallel,
            "classification stage done"
        );
        (records, failures)
    }
}

/// One summary per (dimension, period) that has at least one record.
pub fn dimension_summaries(records: &[RiskRecord]) -> Vec<DimensionPeriodSummary> {
    let mut groups: BTreeMap<(Dimension, Period), Vec<&RiskRecord>> = BTreeMap::new();
    for r in records {
        groups.entry((r.dimension(), r.period())).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|((dimension, period), members)| {
            let mut medians: Vec<f64> = members.iter().map(|r| r.median()).collect();
            medians.sort_by(f64::total_cmp);
            DimensionPeriodSummary {
                dimension,
                period,
                variables: members.len(),
                median_of_medians: central_value(&medians),
                tiers: tier_distribution(members.iter().copied()),
                priority: members
                    .iter()
                    .filter(|r| r.median() >= PRIORITY_MEDIAN)
                    .map(|r| r.code().to_string())
                    .collect(),
            }
        })
        .collect()
}

/// Median of sorted, non-empty values.
fn central_value(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_value() {
        assert_eq!(central_value(&[1.0, 2.0, 4.0]), 2.0);
        assert_eq!(central_value(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(central_value(&[]), 0.0);
    }
}
