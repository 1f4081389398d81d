//! Dimensional breakdown and the master slicer.
//!
//! `aggregate_by_dimension` is dimension- and metric-agnostic: it asks the
//! `Dimension` for a grouping key and the `SliceMetric` for a per-account
//! contribution, and knows nothing else about either.
//!
//! Groups come out in first-appearance order. Sorting for display is the
//! caller's job.

use crate::{account::Account, dimension::Dimension, types::Percent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label of the sentinel entry returned for an empty subset.
pub const NO_DATA_LABEL: &str = "No Data";
/// Group label for accounts with no value in an optional dimension.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SliceMetric {
    #[default]
    Exposure,
    Count,
    NpaExposure,
    DelinquentExposure,
}

impl SliceMetric {
    /// What one account adds to its group's total.
    pub fn contribution(&self, account: &Account) -> f64 {
        match self {
            SliceMetric::Exposure => account.credit_exposure,
            SliceMetric::Count    => 1.0,
            SliceMetric::NpaExposure if account.is_delinquent() => account.credit_exposure,
            SliceMetric::DelinquentExposure if account.is_overdue() => account.credit_exposure,
            SliceMetric::NpaExposure | SliceMetric::DelinquentExposure => 0.0,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SliceMetric::Exposure           => "exposure",
            SliceMetric::Count              => "count",
            SliceMetric::NpaExposure        => "npa_exposure",
            SliceMetric::DelinquentExposure => "delinquent_exposure",
        }
    }

    pub fn from_key(key: &str) -> Option<SliceMetric> {
        SliceMetric::all().iter().copied().find(|m| m.key() == key)
    }

    pub fn all() -> &'static [SliceMetric] {
        &[
            SliceMetric::Exposure,
            SliceMetric::Count,
            SliceMetric::NpaExposure,
            SliceMetric::DelinquentExposure,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownEntry {
    pub label:      String,
    pub value:      f64,
    /// Share of the slice total to one decimal. Shares are rounded by
    /// largest remainder so a non-empty slice sums to exactly 100, which
    /// can put one share a tenth above its nearest-decimal value
    /// (three equal groups read 33.4, 33.3, 33.3).
    pub percentage: Percent,
}

impl BreakdownEntry {
    pub fn no_data() -> Self {
        Self { label: NO_DATA_LABEL.to_string(), value: 0.0, percentage: 0.0 }
    }

    pub fn is_no_data(&self) -> bool {
        self.label == NO_DATA_LABEL && self.value == 0.0
    }
}

/// Group `accounts` by `dimension` and reduce `metric` per group.
pub fn aggregate_by_dimension(
    accounts: &[Account],
    dimension: Dimension,
    metric: SliceMetric,
) -> Vec<BreakdownEntry> {
    if accounts.is_empty() {
        return vec![BreakdownEntry::no_data()];
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for account in accounts {
        let label = dimension.value(account).unwrap_or(UNASSIGNED_LABEL);
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label, 0.0));
            groups.len() - 1
        });
        groups[slot].1 += metric.contribution(account);
    }

    let values: Vec<f64> = groups.iter().map(|(_, v)| *v).collect();
    let percentages = normalized_percentages(&values);

    groups
        .into_iter()
        .zip(percentages)
        .map(|((label, value), percentage)| BreakdownEntry {
            label: label.to_string(),
            value,
            percentage,
        })
        .collect()
}

/// Shares of the total, in percent, rounded to one decimal.
///
/// Rounding uses the largest-remainder method on tenths of a percent, so
/// the shares sum to exactly 100.0 and each is within 0.1 of its exact
/// value. All zeros when the total is not positive.
pub fn normalized_percentages(values: &[f64]) -> Vec<Percent> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return vec![0.0; values.len()];
    }
    if values.iter().any(|v| *v < 0.0) {
        // Mixed signs have no meaningful share; plain rounding only.
        return values
            .iter()
            .map(|v| (v / total * 1000.0).round() / 10.0)
            .collect();
    }

    const UNITS: i64 = 1000;
    let exact: Vec<f64> = values.iter().map(|v| v / total * UNITS as f64).collect();
    let mut units: Vec<i64> = exact.iter().map(|e| e.floor() as i64).collect();
    let mut remaining = UNITS - units.iter().sum::<i64>();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for &i in order.iter().cycle().take(values.len() * 2) {
        if remaining <= 0 {
            break;
        }
        units[i] += 1;
        remaining -= 1;
    }

    units.into_iter().map(|u| u as f64 / 10.0).collect()
}

// ── Standard breakdown charts ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardBreakdowns {
    pub exposure_by_region:  Vec<BreakdownEntry>,
    pub exposure_by_segment: Vec<BreakdownEntry>,
    pub exposure_by_product: Vec<BreakdownEntry>,
    pub exposure_by_rating:  Vec<BreakdownEntry>,
    pub npa_by_region:       Vec<BreakdownEntry>,
}

/// The fixed breakdown charts shown on the dashboard.
pub fn standard_breakdowns(accounts: &[Account]) -> StandardBreakdowns {
    StandardBreakdowns {
        exposure_by_region:  aggregate_by_dimension(accounts, Dimension::Region, SliceMetric::Exposure),
        exposure_by_segment: aggregate_by_dimension(accounts, Dimension::Segment, SliceMetric::Exposure),
        exposure_by_product: aggregate_by_dimension(accounts, Dimension::ProductType, SliceMetric::Exposure),
        exposure_by_rating:  aggregate_by_dimension(accounts, Dimension::ExternalRating, SliceMetric::Exposure),
        npa_by_region:       aggregate_by_dimension(accounts, Dimension::Region, SliceMetric::NpaExposure),
    }
}

/// Entries sorted by value, largest first. Stable for equal values.
pub fn sorted_desc(mut entries: Vec<BreakdownEntry>) -> Vec<BreakdownEntry> {
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries
}
