//! Shared fixture: the four-company book used across integration tests.
//!
//!   A  LCB  Corporate        AAA  850 / 1000  NORTH    0 DPD  Standard
//!   B  MCB  SME              AA   400 /  500  SOUTH   15 DPD  Watchlist
//!   C  LCB  Large Corporate  BBB  700 /  800  EAST    95 DPD  Delinquent
//!   D  SCB  Corporate        A    500 /  600  WEST     0 DPD  Standard
//!
//! Total exposure 2,450 against a total limit of 2,900.

#![allow(dead_code)]

use riskdesk_core::account::{Account, CreditStatus};

#[allow(clippy::too_many_arguments)]
fn company(
    id: &str,
    name: &str,
    lob: &str,
    party_type: &str,
    rating: &str,
    exposure: f64,
    limit: f64,
    region: &str,
    dpd: u32,
    status: CreditStatus,
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        lob: lob.to_string(),
        party_type: party_type.to_string(),
        external_rating: rating.to_string(),
        credit_status: status,
        credit_limit: limit,
        gross_credit_exposure: exposure,
        credit_exposure: exposure,
        undrawn_exposure: limit - exposure,
        days_past_due: dpd,
        ..Account::default()
    }
}

pub fn company_a() -> Account {
    Account {
        zone: "Delhi".into(),
        segment: "Large Corporate".into(),
        product_type: "Term Loan".into(),
        industry: "Manufacturing".into(),
        internal_rating: "IR-1".into(),
        asset_classification: "Standard".into(),
        security_status: "Secured".into(),
        branch: "NORTH-01".into(),
        group_name: "Alpha Group".into(),
        parent_group: Some("Omega Holdings".into()),
        security_value: 900.0,
        credit_score: 780.0,
        ..company("ACC-0001", "Alpha Steel Ltd", "LCB", "Corporate", "AAA", 850.0, 1000.0, "NORTH", 0, CreditStatus::Standard)
    }
}

pub fn company_b() -> Account {
    Account {
        zone: "Karnataka".into(),
        segment: "SME".into(),
        product_type: "Cash Credit".into(),
        industry: "Textiles".into(),
        internal_rating: "IR-4".into(),
        asset_classification: "SMA-0".into(),
        security_status: "Partially Secured".into(),
        branch: "SOUTH-03".into(),
        group_name: "Beta Holdings".into(),
        security_value: 200.0,
        credit_score: 690.0,
        ..company("ACC-0002", "Beta Fabrics Pvt Ltd", "MCB", "SME", "AA", 400.0, 500.0, "SOUTH", 15, CreditStatus::Watchlist)
    }
}

pub fn company_c() -> Account {
    Account {
        zone: "West Bengal".into(),
        segment: "Large Corporate".into(),
        product_type: "Term Loan".into(),
        industry: "Infrastructure".into(),
        internal_rating: "IR-7".into(),
        asset_classification: "Sub-Standard".into(),
        security_status: "Partially Secured".into(),
        branch: "EAST-02".into(),
        group_name: "Alpha Group".into(),
        security_value: 350.0,
        credit_score: 540.0,
        ..company("ACC-0003", "Gamma Infra Ltd", "LCB", "Large Corporate", "BBB", 700.0, 800.0, "EAST", 95, CreditStatus::Delinquent)
    }
}

pub fn company_d() -> Account {
    Account {
        zone: "Gujarat".into(),
        segment: "Mid Corporate".into(),
        product_type: "Working Capital Demand Loan".into(),
        industry: "Pharma".into(),
        internal_rating: "IR-2".into(),
        asset_classification: "Standard".into(),
        security_status: "Unsecured".into(),
        branch: "WEST-05".into(),
        group_name: "Delta Enterprises".into(),
        security_value: 0.0,
        credit_score: 720.0,
        ..company("ACC-0004", "Delta Pharma Ltd", "SCB", "Corporate", "A", 500.0, 600.0, "WEST", 0, CreditStatus::Standard)
    }
}

pub fn four_companies() -> Vec<Account> {
    vec![company_a(), company_b(), company_c(), company_d()]
}

pub fn ids(accounts: &[Account]) -> Vec<&str> {
    accounts.iter().map(|a| a.id.as_str()).collect()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Route engine logs through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
