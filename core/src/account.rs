//! The account record — the unit every aggregation works over.
//!
//! RULE: The engine never mutates an Account.
//! Accounts arrive wholesale from an `AccountSource` and are read-only
//! from then on. `credit_exposure <= gross_credit_exposure <= credit_limit`
//! is the intended shape of the data but is not enforced here.

use crate::types::{AccountId, Amount, Percent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CreditStatus {
    #[default]
    Standard,
    Watchlist,
    Delinquent,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard   => "Standard",
            Self::Watchlist  => "Watchlist",
            Self::Delinquent => "Delinquent",
        }
    }

    /// Case-insensitive parse of the label used by upstream feeds.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" | "regular" => Some(Self::Standard),
            "watchlist"            => Some(Self::Watchlist),
            "delinquent" | "npa"   => Some(Self::Delinquent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id:   AccountId,
    pub name: String,

    // ── Categorical dimensions ──────────────────────────────
    pub region:               String,
    /// Geographic sub-field of `region`.
    pub zone:                 String,
    pub segment:              String,
    pub product_type:         String,
    pub lob:                  String,
    pub industry:             String,
    pub party_type:           String,
    pub external_rating:      String,
    pub internal_rating:      String,
    pub credit_status:        CreditStatus,
    pub asset_classification: String,
    pub security_status:      String,
    /// Organisational unit that books the exposure.
    pub branch:               String,
    pub group_name:           String,
    #[serde(default)]
    pub parent_group:         Option<String>,

    // ── Numeric measures ────────────────────────────────────
    pub credit_limit:          Amount,
    pub gross_credit_exposure: Amount,
    pub credit_exposure:       Amount,
    pub undrawn_exposure:      Amount,
    pub days_past_due:         u32,
    pub security_value:        Amount,
    pub credit_score:          f64,
}

impl Account {
    /// Classified non-performing.
    pub fn is_delinquent(&self) -> bool {
        self.credit_status == CreditStatus::Delinquent
    }

    pub fn is_watchlist(&self) -> bool {
        self.credit_status == CreditStatus::Watchlist
    }

    pub fn is_overdue(&self) -> bool {
        self.days_past_due > 0
    }

    /// Portfolio-at-risk population: overdue, or flagged Watchlist/Delinquent.
    /// Always a superset of the NPA population.
    pub fn is_at_risk(&self) -> bool {
        self.is_overdue() || self.is_delinquent() || self.is_watchlist()
    }

    /// Exposure as a share of the sanctioned limit. 0 when the limit is 0.
    pub fn utilization_pct(&self) -> Percent {
        if self.credit_limit > 0.0 {
            self.credit_exposure / self.credit_limit * 100.0
        } else {
            0.0
        }
    }
}
