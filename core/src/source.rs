//! Data-source boundary.
//!
//! RULE: Schema validation happens here and only here.
//! Aggregation functions assume well-formed accounts and stay total.
//! Anything that reaches the engine has finite, non-negative measures.

use crate::{
    account::{Account, CreditStatus},
    error::{DeskError, DeskResult},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Anything that can hand the engine a full account collection.
pub trait AccountSource {
    fn load(&mut self) -> DeskResult<Vec<Account>>;
}

/// An account as it arrives from upstream: every field optional,
/// both snake_case and camelCase spellings accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAccountRecord {
    pub id:   Option<String>,
    pub name: Option<String>,

    pub region:  Option<String>,
    pub zone:    Option<String>,
    pub segment: Option<String>,
    #[serde(alias = "productType")]
    pub product_type: Option<String>,
    pub lob:          Option<String>,
    pub industry:     Option<String>,
    #[serde(alias = "partyType")]
    pub party_type: Option<String>,
    #[serde(alias = "externalRating")]
    pub external_rating: Option<String>,
    #[serde(alias = "internalRating")]
    pub internal_rating: Option<String>,
    #[serde(alias = "creditStatus")]
    pub credit_status: Option<String>,
    #[serde(alias = "assetClassification")]
    pub asset_classification: Option<String>,
    #[serde(alias = "securityStatus")]
    pub security_status: Option<String>,
    pub branch: Option<String>,
    #[serde(alias = "groupName", alias = "group")]
    pub group_name: Option<String>,
    #[serde(alias = "parentGroup")]
    pub parent_group: Option<String>,

    #[serde(alias = "creditLimit")]
    pub credit_limit: Option<f64>,
    #[serde(alias = "grossCreditExposure")]
    pub gross_credit_exposure: Option<f64>,
    #[serde(alias = "creditExposure")]
    pub credit_exposure: Option<f64>,
    #[serde(alias = "undrawnExposure")]
    pub undrawn_exposure: Option<f64>,
    #[serde(alias = "daysPastDue", alias = "overdue")]
    pub days_past_due: Option<f64>,
    #[serde(alias = "securityValue")]
    pub security_value: Option<f64>,
    #[serde(alias = "creditScore")]
    pub credit_score: Option<f64>,
}

fn invalid(id: &str, reason: impl Into<String>) -> DeskError {
    DeskError::InvalidAccount { id: id.to_string(), reason: reason.into() }
}

fn required(id: &str, field: &str, value: Option<f64>) -> DeskResult<f64> {
    let v = value.ok_or_else(|| invalid(id, format!("missing {field}")))?;
    non_negative(id, field, v)
}

fn non_negative(id: &str, field: &str, v: f64) -> DeskResult<f64> {
    if !v.is_finite() {
        return Err(invalid(id, format!("{field} is not a finite number")));
    }
    if v < 0.0 {
        return Err(invalid(id, format!("{field} is negative ({v})")));
    }
    Ok(v)
}

fn text(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Turn one upstream record into an Account, or say why it cannot be one.
pub fn validate_record(raw: RawAccountRecord) -> DeskResult<Account> {
    let id = text(raw.id);
    if id.is_empty() {
        return Err(invalid("<missing>", "missing id"));
    }

    let credit_limit = required(&id, "credit_limit", raw.credit_limit)?;
    let credit_exposure = required(&id, "credit_exposure", raw.credit_exposure)?;
    let credit_score = required(&id, "credit_score", raw.credit_score)?;
    let gross_credit_exposure = match raw.gross_credit_exposure {
        Some(v) => non_negative(&id, "gross_credit_exposure", v)?,
        None => credit_exposure,
    };
    let undrawn_exposure = match raw.undrawn_exposure {
        Some(v) => non_negative(&id, "undrawn_exposure", v)?,
        None => (credit_limit - gross_credit_exposure).max(0.0),
    };
    let security_value = match raw.security_value {
        Some(v) => non_negative(&id, "security_value", v)?,
        None => 0.0,
    };
    let days_past_due = match raw.days_past_due {
        Some(v) => non_negative(&id, "days_past_due", v)?.floor().min(u32::MAX as f64) as u32,
        None => 0,
    };
    let credit_status = match raw.credit_status.as_deref() {
        Some(s) => CreditStatus::parse(s)
            .ok_or_else(|| invalid(&id, format!("unknown credit_status '{s}'")))?,
        None => CreditStatus::Standard,
    };

    if credit_exposure > gross_credit_exposure || gross_credit_exposure > credit_limit {
        log::debug!(
            "account {id}: exposure {credit_exposure} / gross {gross_credit_exposure} / limit {credit_limit} out of order"
        );
    }

    let name = match text(raw.name) {
        n if n.is_empty() => id.clone(),
        n => n,
    };

    Ok(Account {
        name,
        region: text(raw.region),
        zone: text(raw.zone),
        segment: text(raw.segment),
        product_type: text(raw.product_type),
        lob: text(raw.lob),
        industry: text(raw.industry),
        party_type: text(raw.party_type),
        external_rating: text(raw.external_rating),
        internal_rating: text(raw.internal_rating),
        credit_status,
        asset_classification: text(raw.asset_classification),
        security_status: text(raw.security_status),
        branch: text(raw.branch),
        group_name: text(raw.group_name),
        parent_group: raw.parent_group.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        credit_limit,
        gross_credit_exposure,
        credit_exposure,
        undrawn_exposure,
        days_past_due,
        security_value,
        credit_score,
        id,
    })
}

/// Validate a batch. In strict mode the first bad record aborts the load;
/// otherwise bad records are logged and skipped. Duplicate ids are always
/// rejected after the first occurrence.
pub fn validate_records(raws: Vec<RawAccountRecord>, strict: bool) -> DeskResult<Vec<Account>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut accounts = Vec::with_capacity(raws.len());
    let mut rejected = 0usize;

    for raw in raws {
        let result = validate_record(raw).and_then(|a| {
            if seen.insert(a.id.clone()) {
                Ok(a)
            } else {
                Err(DeskError::DuplicateAccount { id: a.id })
            }
        });
        match result {
            Ok(a) => accounts.push(a),
            Err(e) if strict => return Err(e),
            Err(e) => {
                rejected += 1;
                log::warn!("source: skipping record: {e}");
            }
        }
    }

    if rejected > 0 {
        log::warn!("source: {rejected} record(s) rejected, {} loaded", accounts.len());
    }
    Ok(accounts)
}

/// Reads a JSON array of raw account records from disk.
pub struct JsonFileSource {
    path:   String,
    strict: bool,
}

impl JsonFileSource {
    pub fn new(path: impl Into<String>, strict: bool) -> Self {
        Self { path: path.into(), strict }
    }
}

impl AccountSource for JsonFileSource {
    fn load(&mut self) -> DeskResult<Vec<Account>> {
        let content = std::fs::read_to_string(&self.path)?;
        let raws: Vec<RawAccountRecord> = serde_json::from_str(&content)?;
        let accounts = validate_records(raws, self.strict)?;
        log::info!("source: loaded {} accounts from {}", accounts.len(), self.path);
        Ok(accounts)
    }
}

/// An already-validated in-memory collection.
pub struct StaticSource {
    accounts: Vec<Account>,
}

impl StaticSource {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

impl AccountSource for StaticSource {
    fn load(&mut self) -> DeskResult<Vec<Account>> {
        Ok(self.accounts.clone())
    }
}
