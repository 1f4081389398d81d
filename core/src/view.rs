//! Dashboard view — everything the presentation layer draws, as one
//! plain serializable value.
//!
//! A view is derived from a filtered subset and thrown away on the next
//! filter change. It is never persisted.

use crate::{
    account::Account,
    breakdown::{standard_breakdowns, StandardBreakdowns},
    delinquency::{build_delinquency_matrix, DelinquencyMatrix},
    filter_state::FilterChip,
    kpi::{derive_kpis, derive_kpis_against, KpiSnapshot},
    ranking::{rank_top_exposures, RankMetric, RankedExposure},
    trend::{TrendPoint, TrendSource},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    /// Accounts in the loaded universe.
    pub universe_count:  usize,
    /// Accounts left after filtering.
    pub filtered_count:  usize,
    pub active_filters:  Vec<FilterChip>,
    pub kpis:            KpiSnapshot,
    pub breakdowns:      StandardBreakdowns,
    pub matrix:          DelinquencyMatrix,
    pub top_exposures:   Vec<RankedExposure>,
    pub top_npa:         Vec<RankedExposure>,
    pub trend:           Vec<TrendPoint>,
}

impl DashboardView {
    /// Each section is computed independently from the same subset.
    /// KPI change and trend are set against `baseline` when one is given.
    pub fn build(
        filtered: &[Account],
        universe_count: usize,
        active_filters: Vec<FilterChip>,
        top_n: usize,
        trend: &dyn TrendSource,
        baseline: Option<&KpiSnapshot>,
    ) -> Self {
        let kpis = match baseline {
            Some(prior) => derive_kpis_against(filtered, prior),
            None => derive_kpis(filtered),
        };
        Self {
            universe_count,
            filtered_count: filtered.len(),
            active_filters,
            kpis,
            breakdowns: standard_breakdowns(filtered),
            matrix: build_delinquency_matrix(filtered),
            top_exposures: rank_top_exposures(filtered, top_n, RankMetric::CreditExposure),
            top_npa: rank_top_exposures(filtered, top_n, RankMetric::NpaExposure),
            trend: trend.series(filtered),
        }
    }
}
