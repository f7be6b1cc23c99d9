//! Two-phase deterministic matcher.

use portrisk_core::config::MatchingConfig;
use portrisk_core::errors::MatchError;
use portrisk_core::types::{compare_codes, BTreeMap, Dimension, Period};

use super::normalize::normalize_description;
use super::types::{CoverageReport, DimensionCoverage, MatchMethod, MatchOutcome, MatchedPair};
use crate::classification::RiskRecord;

/// Candidate indices per key, one list per side.
type Candidates<K> = BTreeMap<K, (Vec<usize>, Vec<usize>)>;

/// Pairs records across an earlier and a later period.
#[derive(Debug, Clone)]
pub struct CrossPeriodMatcher {
    earlier: Period,
    later: Period,
    description_fallback: bool,
}

impl Default for CrossPeriodMatcher {
    fn default() -> Self {
        Self::from_config(&MatchingConfig::default())
    }
}

impl CrossPeriodMatcher {
    pub fn new(earlier: Period, later: Period) -> Self {
        Self {
            earlier,
            later,
            description_fallback: true,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            earlier: config.effective_earlier_period(),
            later: config.effective_later_period(),
            description_fallback: config.effective_description_fallback(),
        }
    }

    pub fn with_description_fallback(mut self, enabled: bool) -> Self {
        self.description_fallback = enabled;
        self
    }

    pub fn earlier_period(&self) -> Period {
        self.earlier
    }

    pub fn later_period(&self) -> Period {
        self.later
    }

    /// Split a mixed record collection by the configured periods and match.
    pub fn match_periods(&self, records: &[RiskRecord]) -> Result<MatchOutcome, MatchError> {
        if self.earlier == self.later {
            return Err(MatchError::SamePeriod {
                period: self.earlier.to_string(),
            });
        }
        let earlier: Vec<&RiskRecord> =
            records.iter().filter(|r| r.period() == self.earlier).collect();
        let later: Vec<&RiskRecord> = records.iter().filter(|r| r.period() == self.later).collect();
        Ok(self.match_refs(&earlier, &later))
    }

    /// Match two record collections, one per period.
    pub fn match_records(&self, earlier: &[RiskRecord], later: &[RiskRecord]) -> MatchOutcome {
        let earlier: Vec<&RiskRecord> = earlier.iter().collect();
        let later: Vec<&RiskRecord> = later.iter().collect();
        self.match_refs(&earlier, &later)
    }

    fn match_refs(&self, earlier: &[&RiskRecord], later: &[&RiskRecord]) -> MatchOutcome {
        let mut state = MatchState::new(earlier.len(), later.len());

        // Phase 1: (dimension, code).
        let mut by_code: Candidates<(Dimension, String)> = BTreeMap::new();
        for (i, r) in earlier.iter().enumerate() {
            by_code
                .entry((r.dimension(), r.code().to_string()))
                .or_default()
                .0
                .push(i);
        }
        for (j, r) in later.iter().enumerate() {
            by_code
                .entry((r.dimension(), r.code().to_string()))
                .or_default()
                .1
                .push(j);
        }
        for ((dimension, code), (left, right)) in &by_code {
            state.resolve(*dimension, code, MatchMethod::Code, left, right, earlier, later);
        }

        // Phase 2: (dimension, normalized description) over what phase 1 left.
        if self.description_fallback {
            let mut by_text: Candidates<(Dimension, String)> = BTreeMap::new();
            for (i, r) in earlier.iter().enumerate() {
                if let Some(key) = state.text_key(r, state.earlier_open(i)) {
                    by_text.entry(key).or_default().0.push(i);
                }
            }
            for (j, r) in later.iter().enumerate() {
                if let Some(key) = state.text_key(r, state.later_open(j)) {
                    by_text.entry(key).or_default().1.push(j);
                }
            }
            for ((dimension, text), (left, right)) in &by_text {
                state.resolve(*dimension, text, MatchMethod::Description, left, right, earlier, later);
            }
        }

        let outcome = state.finish(self.earlier, self.later, earlier, later);
        log_outcome(&outcome);
        outcome
    }
}

/// Per-side bookkeeping: `None` = open, `Some(true)` = paired,
/// `Some(false)` = withdrawn because of an ambiguity.
struct MatchState {
    earlier: Vec<Option<bool>>,
    later: Vec<Option<bool>>,
    pairs: Vec<MatchedPair>,
    ambiguities: Vec<MatchError>,
}

impl MatchState {
    fn new(earlier: usize, later: usize) -> Self {
        Self {
            earlier: vec![None; earlier],
            later: vec![None; later],
            pairs: Vec::new(),
            ambiguities: Vec::new(),
        }
    }

    fn earlier_open(&self, i: usize) -> bool {
        self.earlier[i].is_none()
    }

    fn later_open(&self, j: usize) -> bool {
        self.later[j].is_none()
    }

    fn text_key(&self, record: &RiskRecord, open: bool) -> Option<(Dimension, String)> {
        if !open {
            return None;
        }
        let text = normalize_description(record.description.as_deref()?);
        (!text.is_empty()).then(|| (record.dimension(), text))
    }

    /// Settle one key: exactly one candidate per side pairs; more than one on
    /// either side (with at least one on the other) is ambiguous and withdraws
    /// every candidate; a one-sided key is left open.
    #[allow(clippy::too_many_arguments)]
    fn resolve(
        &mut self,
        dimension: Dimension,
        key: &str,
        method: MatchMethod,
        left: &[usize],
        right: &[usize],
        earlier: &[&RiskRecord],
        later: &[&RiskRecord],
    ) {
        match (left, right) {
            ([], _) | (_, []) => {}
            ([i], [j]) => {
                self.earlier[*i] = Some(true);
                self.later[*j] = Some(true);
                self.pairs.push(MatchedPair::new(
                    key,
                    method,
                    earlier[*i].clone(),
                    later[*j].clone(),
                ));
            }
            _ => {
                for &i in left {
                    self.earlier[i] = Some(false);
                }
                for &j in right {
                    self.later[j] = Some(false);
                }
                self.ambiguities.push(MatchError::Ambiguous {
                    dimension: dimension.to_string(),
                    key: key.to_string(),
                    method: method.to_string(),
                    earlier_candidates: left.len(),
                    later_candidates: right.len(),
                });
            }
        }
    }

    fn finish(
        mut self,
        earlier_period: Period,
        later_period: Period,
        earlier: &[&RiskRecord],
        later: &[&RiskRecord],
    ) -> MatchOutcome {
        self.pairs.sort_by(|a, b| {
            a.dimension
                .cmp(&b.dimension)
                .then_with(|| compare_codes(a.code(), b.code()))
        });
        let unmatched = |sides: &[Option<bool>], records: &[&RiskRecord]| {
            let mut out: Vec<RiskRecord> = sides
                .iter()
                .zip(records)
                .filter(|(s, _)| **s != Some(true))
                .map(|(_, r)| (*r).clone())
                .collect();
            out.sort_by(|a, b| a.key.cmp(&b.key));
            out
        };
        let unmatched_earlier = unmatched(self.earlier.as_slice(), earlier);
        let unmatched_later = unmatched(self.later.as_slice(), later);

        let coverage = coverage_report(
            &self.pairs,
            earlier,
            later,
            &unmatched_earlier,
            &unmatched_later,
            self.ambiguities.len(),
        );

        MatchOutcome {
            earlier_period,
            later_period,
            pairs: self.pairs,
            unmatched_earlier,
            unmatched_later,
            ambiguities: self.ambiguities,
            coverage,
        }
    }
}

fn coverage_report(
    pairs: &[MatchedPair],
    earlier: &[&RiskRecord],
    later: &[&RiskRecord],
    unmatched_earlier: &[RiskRecord],
    unmatched_later: &[RiskRecord],
    ambiguous: usize,
) -> CoverageReport {
    let count = |dim: Dimension, records: &[&RiskRecord]| {
        records.iter().filter(|r| r.dimension() == dim).count()
    };
    let count_owned = |dim: Dimension, records: &[RiskRecord]| {
        records.iter().filter(|r| r.dimension() == dim).count()
    };

    let per_dimension: Vec<DimensionCoverage> = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let earlier_records = count(dimension, earlier);
            let later_records = count(dimension, later);
            let matched = pairs.iter().filter(|p| p.dimension == dimension).count();
            let intended = earlier_records.min(later_records);
            DimensionCoverage {
                dimension,
                earlier_records,
                later_records,
                matched,
                unmatched_earlier: count_owned(dimension, unmatched_earlier),
                unmatched_later: count_owned(dimension, unmatched_later),
                intended,
                coverage_pct: coverage_pct(matched, intended, earlier_records + later_records),
            }
        })
        .collect();

    let intended: usize = per_dimension.iter().map(|d| d.intended).sum();
    CoverageReport {
        total_matched: pairs.len(),
        unmatched_earlier: unmatched_earlier.len(),
        unmatched_later: unmatched_later.len(),
        intended,
        coverage_pct: coverage_pct(pairs.len(), intended, earlier.len() + later.len()),
        matched_by_code: pairs.iter().filter(|p| p.method == MatchMethod::Code).count(),
        matched_by_description: pairs
            .iter()
            .filter(|p| p.method == MatchMethod::Description)
            .count(),
        ambiguous,
        per_dimension,
    }
}

/// 100 for an empty scope, 0 when records exist but nothing could pair.
fn coverage_pct(matched: usize, intended: usize, records: usize) -> f64 {
    if intended == 0 {
        return if records == 0 { 100.0 } else { 0.0 };
    }
    matched as f64 * 100.0 / intended as f64
}

fn log_outcome(outcome: &MatchOutcome) {
    let c = &outcome.coverage;
    tracing::info!(
        earlier = %outcome.earlier_period,
        later = %outcome.later_period,
        matched = c.total_matched,
        by_code = c.matched_by_code,
        by_description = c.matched_by_description,
        coverage_pct = c.coverage_pct,
        "cross-period matching complete"
    );
    for a in &outcome.ambiguities {
        tracing::warn!(error = %a, "ambiguous cross-period match");
    }
    if !c.is_complete() {
        tracing::warn!(
            unmatched_earlier = c.unmatched_earlier,
            unmatched_later = c.unmatched_later,
            "cross-period coverage gap"
        );
    }
}
