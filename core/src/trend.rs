//! Trend series for the dashboard's time-series charts.
//!
//! `TrendSource` is the seam a real historical feed plugs into.
//! `SyntheticTrend` is a stand-in: it perturbs the current snapshot with
//! bounded noise and scales exposure along a rising multiplier. Do not
//! grow its noise logic; replace the source instead.

use crate::{
    account::Account,
    kpi::PortfolioTotals,
    rng::{NoiseRng, Stream},
    types::{Amount, Percent},
};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const TREND_POINTS: usize = 12;
/// Default half-width of the NPA/PAR noise band, in percentage points.
pub const DEFAULT_NOISE_PCT: f64 = 0.5;
/// Exposure multiplier at the oldest point; rises linearly to 1.0.
const OLDEST_EXPOSURE_MULTIPLIER: f64 = 0.78;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// Display label, e.g. "Mar 2026".
    pub period:   String,
    pub month:    NaiveDate,
    pub npa:      Percent,
    pub par:      Percent,
    pub exposure: Amount,
}

impl TrendPoint {
    pub fn zero(month: NaiveDate) -> Self {
        Self {
            period: month.format("%b %Y").to_string(),
            month,
            npa: 0.0,
            par: 0.0,
            exposure: 0.0,
        }
    }
}

pub trait TrendSource {
    /// Time-ordered points, oldest first, ending at the current period.
    fn series(&self, accounts: &[Account]) -> Vec<TrendPoint>;
}

/// Month starts for the `count` periods ending at `anchor`'s month.
pub fn trailing_months(anchor: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let start = anchor.with_day(1).unwrap_or(anchor);
    (0..count)
        .map(|i| {
            let back = (count - 1 - i) as u32;
            start.checked_sub_months(Months::new(back)).unwrap_or(start)
        })
        .collect()
}

pub struct SyntheticTrend {
    seed:      u64,
    anchor:    NaiveDate,
    noise_pct: f64,
}

impl SyntheticTrend {
    pub fn new(seed: u64, anchor: NaiveDate) -> Self {
        Self { seed, anchor, noise_pct: DEFAULT_NOISE_PCT }
    }

    pub fn with_noise(mut self, noise_pct: f64) -> Self {
        self.noise_pct = noise_pct.abs();
        self
    }
}

impl TrendSource for SyntheticTrend {
    /// Reseeded on every call, so the same subset always yields the same
    /// series. An empty subset gets a flat zero line with no noise.
    fn series(&self, accounts: &[Account]) -> Vec<TrendPoint> {
        let totals = PortfolioTotals::from_accounts(accounts);
        if totals.account_count == 0 {
            return trailing_months(self.anchor, TREND_POINTS)
                .into_iter()
                .map(TrendPoint::zero)
                .collect();
        }

        let mut rng = NoiseRng::new(self.seed, Stream::Trend);
        let npa = totals.npa_pct();
        let par = totals.par_pct();
        let step = (1.0 - OLDEST_EXPOSURE_MULTIPLIER) / (TREND_POINTS - 1) as f64;

        trailing_months(self.anchor, TREND_POINTS)
            .into_iter()
            .enumerate()
            .map(|(i, month)| {
                let multiplier = OLDEST_EXPOSURE_MULTIPLIER + step * i as f64;
                TrendPoint {
                    period: month.format("%b %Y").to_string(),
                    month,
                    npa: (npa + rng.jitter(self.noise_pct)).clamp(0.0, 100.0),
                    par: (par + rng.jitter(self.noise_pct)).clamp(0.0, 100.0),
                    exposure: (totals.total_exposure * multiplier).max(0.0),
                }
            })
            .collect()
    }
}

/// A fixed series, e.g. replayed from a stored history.
/// Ignores the subset it is given.
pub struct RecordedTrend {
    points: Vec<TrendPoint>,
}

impl RecordedTrend {
    pub fn new(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }
}

impl TrendSource for RecordedTrend {
    fn series(&self, _accounts: &[Account]) -> Vec<TrendPoint> {
        self.points.clone()
    }
}

/// Twelve synthetic points ending at `anchor`'s month.
pub fn synthesize_trend(accounts: &[Account], anchor: NaiveDate, seed: u64) -> Vec<TrendPoint> {
    SyntheticTrend::new(seed, anchor).series(accounts)
}
