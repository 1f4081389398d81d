//! KPI derivation — headline risk metrics for a filtered subset.
//!
//! Every metric is recomputed from scratch on each filter change and is
//! never persisted. Empty input yields each metric's zero form; every
//! ratio is guarded so the result is 0, never NaN or infinity.
//!
//! RAROC here is a placeholder proxy (scaled average credit score),
//! not a risk-adjusted return model.

use crate::{
    account::Account,
    types::{Amount, Percent},
};
use serde::{Deserialize, Serialize};

/// Credit score scale ceiling used by the RAROC proxy.
pub const MAX_CREDIT_SCORE: f64 = 850.0;
/// RAROC proxy value at a perfect average score.
pub const RAROC_SCALE: f64 = 25.0;
/// Changes smaller than this are reported as stable.
pub const TREND_EPSILON: f64 = 0.005;

// ── Fixed threshold bands ────────────────────────────────────────────────────

pub const NPA_BANDS:          ThresholdBands = ThresholdBands::new(3.0, 5.0);
pub const PAR_BANDS:          ThresholdBands = ThresholdBands::new(5.0, 10.0);
pub const DELINQUENCY_BANDS:  ThresholdBands = ThresholdBands::new(10.0, 20.0);
pub const UTILIZATION_BANDS:  ThresholdBands = ThresholdBands::new(75.0, 90.0);
pub const LGD_BANDS:          ThresholdBands = ThresholdBands::new(45.0, 60.0);
/// The proxy tops out at `RAROC_SCALE`; only near-perfect books go red.
pub const RAROC_BANDS:        ThresholdBands = ThresholdBands::new(15.0, 22.0);

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percent,
    Currency,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdStatus {
    Green,
    Amber,
    Red,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdBands {
    pub green: f64,
    pub amber: f64,
}

impl ThresholdBands {
    pub const fn new(green: f64, amber: f64) -> Self {
        Self { green, amber }
    }

    /// Green if at or below the green bound, amber if at or below the
    /// amber bound, red otherwise. The same rule holds for every metric.
    pub fn classify(&self, value: f64) -> ThresholdStatus {
        if value <= self.green {
            ThresholdStatus::Green
        } else if value <= self.amber {
            ThresholdStatus::Amber
        } else {
            ThresholdStatus::Red
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Threshold {
    pub green:  f64,
    pub amber:  f64,
    pub status: ThresholdStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedMetric {
    pub label:     String,
    pub value:     f64,
    pub unit:      Unit,
    pub trend:     TrendDirection,
    /// Change against the baseline period; 0 without a baseline.
    pub change:    f64,
    pub threshold: Option<Threshold>,
}

impl DerivedMetric {
    fn percent(label: &str, value: Percent, bands: ThresholdBands) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: Unit::Percent,
            trend: TrendDirection::Stable,
            change: 0.0,
            threshold: Some(Threshold {
                green: bands.green,
                amber: bands.amber,
                status: bands.classify(value),
            }),
        }
    }

    fn currency(label: &str, value: Amount) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: Unit::Currency,
            trend: TrendDirection::Stable,
            change: 0.0,
            threshold: None,
        }
    }

    /// The zero form: value 0, stable, and no threshold breach.
    fn zeroed(mut self) -> Self {
        self.value = 0.0;
        self.change = 0.0;
        self.trend = TrendDirection::Stable;
        if let Some(t) = self.threshold.as_mut() {
            t.status = ThresholdStatus::Green;
        }
        self
    }

    fn compared_to(mut self, baseline: &DerivedMetric) -> Self {
        self.change = self.value - baseline.value;
        self.trend = if self.change > TREND_EPSILON {
            TrendDirection::Up
        } else if self.change < -TREND_EPSILON {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };
        self
    }

    pub fn is_breached(&self) -> bool {
        self.threshold
            .is_some_and(|t| t.status == ThresholdStatus::Red)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiSnapshot {
    pub npa:            DerivedMetric,
    pub total_exposure: DerivedMetric,
    pub par:            DerivedMetric,
    pub delinquency:    DerivedMetric,
    pub utilization:    DerivedMetric,
    pub raroc:          DerivedMetric,
    pub lgd:            DerivedMetric,
    pub expected_loss:  DerivedMetric,
}

/// Raw sums every KPI is computed from. One pass over the subset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PortfolioTotals {
    pub account_count:  usize,
    pub overdue_count:  usize,
    pub total_exposure: Amount,
    pub total_limit:    Amount,
    pub npa_exposure:   Amount,
    pub par_exposure:   Amount,
    pub security_value: Amount,
    pub score_sum:      f64,
}

impl PortfolioTotals {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        accounts.iter().fold(Self::default(), |mut t, a| {
            t.account_count += 1;
            t.total_exposure += a.credit_exposure;
            t.total_limit += a.credit_limit;
            t.security_value += a.security_value;
            t.score_sum += a.credit_score;
            if a.is_overdue() {
                t.overdue_count += 1;
            }
            if a.is_delinquent() {
                t.npa_exposure += a.credit_exposure;
            }
            if a.is_at_risk() {
                t.par_exposure += a.credit_exposure;
            }
            t
        })
    }

    pub fn npa_pct(&self) -> Percent {
        ratio_pct(self.npa_exposure, self.total_exposure)
    }

    pub fn par_pct(&self) -> Percent {
        ratio_pct(self.par_exposure, self.total_exposure)
    }

    /// Count-based: how many relationships are overdue, not how much money.
    pub fn delinquency_pct(&self) -> Percent {
        ratio_pct(self.overdue_count as f64, self.account_count as f64)
    }

    pub fn utilization_pct(&self) -> Percent {
        ratio_pct(self.total_exposure, self.total_limit)
    }

    pub fn raroc(&self) -> Percent {
        if self.account_count == 0 {
            return 0.0;
        }
        let avg_score = self.score_sum / self.account_count as f64;
        avg_score / MAX_CREDIT_SCORE * RAROC_SCALE
    }

    /// Unsecured share of exposure, clamped to [0, 100].
    pub fn lgd_pct(&self) -> Percent {
        if self.total_exposure <= 0.0 {
            return 0.0;
        }
        let unsecured = self.total_exposure - self.security_value;
        (unsecured / self.total_exposure * 100.0).clamp(0.0, 100.0)
    }

    pub fn expected_loss(&self) -> Amount {
        self.npa_exposure * self.lgd_pct() / 100.0
    }
}

/// `part / whole × 100`, or 0 when the whole is not positive.
pub fn ratio_pct(part: f64, whole: f64) -> Percent {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

// ── Derivation ───────────────────────────────────────────────────────────────

/// Derive the headline KPIs for `accounts`. Trends are stable and changes
/// 0; use `derive_kpis_against` when a prior-period snapshot is available.
pub fn derive_kpis(accounts: &[Account]) -> KpiSnapshot {
    let totals = PortfolioTotals::from_accounts(accounts);
    let snapshot = KpiSnapshot {
        npa:            DerivedMetric::percent("NPA", totals.npa_pct(), NPA_BANDS),
        total_exposure: DerivedMetric::currency("Total Exposure", totals.total_exposure),
        par:            DerivedMetric::percent("Portfolio at Risk", totals.par_pct(), PAR_BANDS),
        delinquency:    DerivedMetric::percent("Delinquency", totals.delinquency_pct(), DELINQUENCY_BANDS),
        utilization:    DerivedMetric::percent("Utilization", totals.utilization_pct(), UTILIZATION_BANDS),
        raroc:          DerivedMetric::percent("RAROC", totals.raroc(), RAROC_BANDS),
        lgd:            DerivedMetric::percent("LGD", totals.lgd_pct(), LGD_BANDS),
        expected_loss:  DerivedMetric::currency("Expected Loss", totals.expected_loss()),
    };

    if totals.account_count == 0 {
        return snapshot.zeroed();
    }
    log::debug!(
        "kpis: {} accounts, exposure {:.2}, npa {:.2}%, par {:.2}%",
        totals.account_count,
        totals.total_exposure,
        snapshot.npa.value,
        snapshot.par.value,
    );
    snapshot
}

/// Derive KPIs and annotate each with its change against `baseline`
/// (typically the previous period's snapshot from a history feed).
pub fn derive_kpis_against(accounts: &[Account], baseline: &KpiSnapshot) -> KpiSnapshot {
    let current = derive_kpis(accounts);
    if accounts.is_empty() {
        return current;
    }
    KpiSnapshot {
        npa:            current.npa.compared_to(&baseline.npa),
        total_exposure: current.total_exposure.compared_to(&baseline.total_exposure),
        par:            current.par.compared_to(&baseline.par),
        delinquency:    current.delinquency.compared_to(&baseline.delinquency),
        utilization:    current.utilization.compared_to(&baseline.utilization),
        raroc:          current.raroc.compared_to(&baseline.raroc),
        lgd:            current.lgd.compared_to(&baseline.lgd),
        expected_loss:  current.expected_loss.compared_to(&baseline.expected_loss),
    }
}

impl KpiSnapshot {
    fn zeroed(self) -> Self {
        Self {
            npa:            self.npa.zeroed(),
            total_exposure: self.total_exposure.zeroed(),
            par:            self.par.zeroed(),
            delinquency:    self.delinquency.zeroed(),
            utilization:    self.utilization.zeroed(),
            raroc:          self.raroc.zeroed(),
            lgd:            self.lgd.zeroed(),
            expected_loss:  self.expected_loss.zeroed(),
        }
    }

    /// Metrics in display order.
    pub fn metrics(&self) -> [&DerivedMetric; 8] {
        [
            &self.total_exposure,
            &self.npa,
            &self.par,
            &self.delinquency,
            &self.utilization,
            &self.raroc,
            &self.lgd,
            &self.expected_loss,
        ]
    }

    /// Labels of every metric currently in the red band.
    pub fn breaches(&self) -> Vec<&str> {
        self.metrics()
            .into_iter()
            .filter(|m| m.is_breached())
            .map(|m| m.label.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_inclusive_on_the_bound() {
        assert_eq!(NPA_BANDS.classify(3.0), ThresholdStatus::Green);
        assert_eq!(NPA_BANDS.classify(3.01), ThresholdStatus::Amber);
        assert_eq!(NPA_BANDS.classify(5.0), ThresholdStatus::Amber);
        assert_eq!(NPA_BANDS.classify(5.01), ThresholdStatus::Red);
    }

    #[test]
    fn raroc_bands_use_the_same_ceiling_rule() {
        assert_eq!(RAROC_BANDS.classify(2.94), ThresholdStatus::Green);
        assert_eq!(RAROC_BANDS.classify(15.0), ThresholdStatus::Green);
        assert_eq!(RAROC_BANDS.classify(20.0), ThresholdStatus::Amber);
        assert_eq!(RAROC_BANDS.classify(22.0), ThresholdStatus::Amber);
        assert_eq!(RAROC_BANDS.classify(24.0), ThresholdStatus::Red);
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio_pct(10.0, 0.0), 0.0);
        assert_eq!(ratio_pct(0.0, 0.0), 0.0);
        assert!((ratio_pct(1.0, 4.0) - 25.0).abs() < 1e-9);
    }
}
