//! Top-N exposure ranking.
//!
//! RULES:
//!   - Sort the whole filtered subset first, truncate after.
//!   - Ranks are dense 1..N in sort order. Ties keep collection order
//!     (stable sort); there is no secondary key.
//!   - Portfolio share is against the filtered subset's total exposure.

use crate::{
    account::{Account, CreditStatus},
    kpi::ratio_pct,
    types::{AccountId, Amount, Percent},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    #[default]
    CreditExposure,
    /// Exposure of delinquent (NPA) accounts only.
    NpaExposure,
    /// Exposure of overdue accounts only.
    DelinquentExposure,
}

impl RankMetric {
    /// Whether the account takes part in this ranking at all.
    pub fn includes(&self, account: &Account) -> bool {
        match self {
            RankMetric::CreditExposure     => true,
            RankMetric::NpaExposure        => account.is_delinquent(),
            RankMetric::DelinquentExposure => account.is_overdue(),
        }
    }

    /// The amount ranked on. Zero for accounts this metric excludes.
    pub fn amount(&self, account: &Account) -> Amount {
        match self {
            RankMetric::CreditExposure => account.credit_exposure,
            RankMetric::NpaExposure if account.is_delinquent() => account.credit_exposure,
            RankMetric::DelinquentExposure if account.is_overdue() => account.credit_exposure,
            RankMetric::NpaExposure | RankMetric::DelinquentExposure => 0.0,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RankMetric::CreditExposure     => "credit_exposure",
            RankMetric::NpaExposure        => "npa_exposure",
            RankMetric::DelinquentExposure => "delinquent_exposure",
        }
    }

    pub fn from_key(key: &str) -> Option<RankMetric> {
        [
            RankMetric::CreditExposure,
            RankMetric::NpaExposure,
            RankMetric::DelinquentExposure,
        ]
        .into_iter()
        .find(|m| m.key() == key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedExposure {
    pub rank:            usize,
    pub name:            String,
    pub account_id:      AccountId,
    /// Masked display reference, never the raw identifier.
    pub account_ref:     String,
    pub amount:          Amount,
    pub portfolio_pct:   Percent,
    pub utilization_pct: Percent,
    pub region:          String,
    pub segment:         String,
    pub lob:             String,
    pub external_rating: String,
    pub credit_status:   CreditStatus,
    pub days_past_due:   u32,
}

/// Display reference for an account: a fixed prefix plus the last four
/// characters of its id.
pub fn account_reference(id: &str) -> String {
    let tail: String = {
        let chars: Vec<char> = id.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    };
    format!("XXXX-{tail:0>4}")
}

pub fn rank_top_exposures(
    accounts: &[Account],
    limit: usize,
    metric: RankMetric,
) -> Vec<RankedExposure> {
    let portfolio_total: Amount = accounts.iter().map(|a| a.credit_exposure).sum();

    let mut candidates: Vec<&Account> = accounts.iter().filter(|a| metric.includes(a)).collect();
    candidates.sort_by(|a, b| metric.amount(b).total_cmp(&metric.amount(a)));

    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, a)| {
            let amount = metric.amount(a);
            RankedExposure {
                rank: i + 1,
                name: a.name.clone(),
                account_id: a.id.clone(),
                account_ref: account_reference(&a.id),
                amount,
                portfolio_pct: ratio_pct(amount, portfolio_total),
                utilization_pct: a.utilization_pct(),
                region: a.region.clone(),
                segment: a.segment.clone(),
                lob: a.lob.clone(),
                external_rating: a.external_rating.clone(),
                credit_status: a.credit_status,
                days_past_due: a.days_past_due,
            }
        })
        .collect()
}
