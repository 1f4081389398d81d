//! KPI derivation over the four-company book and its edge cases.

mod common;

use common::{assert_close, company_a, company_c, four_companies};
use riskdesk_core::{
    account::Account,
    kpi::{derive_kpis, derive_kpis_against, DerivedMetric, ThresholdStatus, TrendDirection, Unit},
};

fn status(m: &DerivedMetric) -> Option<ThresholdStatus> {
    m.threshold.map(|t| t.status)
}

#[test]
fn four_company_headline_numbers() {
    let kpis = derive_kpis(&four_companies());

    assert_close(kpis.total_exposure.value, 2450.0, 1e-9);
    assert_close(kpis.npa.value, 28.57, 0.01);
    assert_close(kpis.par.value, 44.90, 0.01);
    assert_close(kpis.delinquency.value, 50.0, 1e-9);
    assert_close(kpis.utilization.value, 84.48, 0.01);
}

#[test]
fn secondary_metrics() {
    let kpis = derive_kpis(&four_companies());

    // Security 1450 against 2450 exposure leaves 1000 unsecured.
    assert_close(kpis.lgd.value, 1000.0 / 2450.0 * 100.0, 1e-9);
    assert_close(kpis.expected_loss.value, 700.0 * 1000.0 / 2450.0, 1e-9);
    // Average score 682.5 on an 850 scale.
    assert_close(kpis.raroc.value, 682.5 / 850.0 * 25.0, 1e-9);
    assert_eq!(kpis.expected_loss.unit, Unit::Currency);
    assert!(kpis.expected_loss.threshold.is_none());
}

#[test]
fn threshold_status_follows_bands() {
    let kpis = derive_kpis(&four_companies());

    assert_eq!(status(&kpis.npa), Some(ThresholdStatus::Red));
    assert_eq!(status(&kpis.par), Some(ThresholdStatus::Red));
    assert_eq!(status(&kpis.utilization), Some(ThresholdStatus::Amber));
    assert_eq!(status(&kpis.lgd), Some(ThresholdStatus::Green));
    assert_eq!(status(&kpis.raroc), Some(ThresholdStatus::Amber));
    assert!(kpis.breaches().contains(&"NPA"));
}

#[test]
fn raroc_status_is_green_at_or_below_the_green_bound() {
    let scored = |score: f64| Account {
        id: "S".into(),
        credit_exposure: 100.0,
        credit_limit: 100.0,
        credit_score: score,
        ..Account::default()
    };

    // 100 / 850 × 25 ≈ 2.94: low values sit in the green band.
    let low = derive_kpis(&[scored(100.0)]);
    assert_close(low.raroc.value, 2.94, 0.01);
    assert_eq!(status(&low.raroc), Some(ThresholdStatus::Green));

    // Gamma alone: 540 / 850 × 25 ≈ 15.88, above green and within amber.
    let c = derive_kpis(&[company_c()]);
    assert_eq!(status(&c.raroc), Some(ThresholdStatus::Amber));

    // Alpha alone: 780 / 850 × 25 ≈ 22.94, past the amber bound.
    let a = derive_kpis(&[company_a()]);
    assert_eq!(status(&a.raroc), Some(ThresholdStatus::Red));
    assert!(a.breaches().contains(&"RAROC"));

    for kpis in [&low, &c, &a] {
        let t = kpis.raroc.threshold.unwrap();
        let expected = if kpis.raroc.value <= t.green {
            ThresholdStatus::Green
        } else if kpis.raroc.value <= t.amber {
            ThresholdStatus::Amber
        } else {
            ThresholdStatus::Red
        };
        assert_eq!(t.status, expected);
    }
}

#[test]
fn single_standard_account_is_clean() {
    let kpis = derive_kpis(&[company_a()]);
    assert_eq!(kpis.npa.value, 0.0);
    assert_eq!(kpis.par.value, 0.0);
    assert_eq!(kpis.delinquency.value, 0.0);
    assert_close(kpis.utilization.value, 85.0, 1e-9);
    // Over-collateralised: LGD floors at zero.
    assert_eq!(kpis.lgd.value, 0.0);
}

#[test]
fn empty_input_yields_zero_forms() {
    let kpis = derive_kpis(&[]);
    for m in kpis.metrics() {
        assert_eq!(m.value, 0.0, "{}", m.label);
        assert!(m.value.is_finite());
        assert_eq!(m.trend, TrendDirection::Stable);
        assert!(!m.is_breached(), "{} breached on empty input", m.label);
    }
}

#[test]
fn zero_limit_gives_zero_utilization() {
    let accounts = vec![
        Account { id: "Z1".into(), credit_exposure: 10.0, credit_limit: 0.0, ..Account::default() },
        Account { id: "Z2".into(), credit_exposure: 0.0, credit_limit: 0.0, ..Account::default() },
    ];
    let kpis = derive_kpis(&accounts);
    assert_eq!(kpis.utilization.value, 0.0);
    assert!(kpis.metrics().iter().all(|m| m.value.is_finite()));
}

#[test]
fn zero_exposure_gives_zero_ratios() {
    let accounts = vec![Account { id: "Z".into(), credit_limit: 100.0, ..Account::default() }];
    let kpis = derive_kpis(&accounts);
    assert_eq!(kpis.npa.value, 0.0);
    assert_eq!(kpis.par.value, 0.0);
    assert_eq!(kpis.lgd.value, 0.0);
}

#[test]
fn change_against_baseline_sets_trend() {
    let baseline = derive_kpis(&[company_a()]);
    let current = derive_kpis_against(&four_companies(), &baseline);

    assert_eq!(current.npa.trend, TrendDirection::Up);
    assert_close(current.npa.change, current.npa.value, 1e-9);
    assert_eq!(current.raroc.trend, TrendDirection::Down);

    let same = derive_kpis_against(&[company_a()], &baseline);
    assert_eq!(same.npa.trend, TrendDirection::Stable);
    assert_eq!(same.npa.change, 0.0);
}
