//! Dimensional breakdown and the master slicer.

mod common;

use common::{assert_close, four_companies};
use riskdesk_core::{
    account::Account,
    breakdown::{
        aggregate_by_dimension, normalized_percentages, sorted_desc, standard_breakdowns,
        SliceMetric, NO_DATA_LABEL, UNASSIGNED_LABEL,
    },
    dimension::Dimension,
    sample::SamplePortfolio,
};

#[test]
fn exposure_by_lob_groups_in_first_appearance_order() {
    let entries = aggregate_by_dimension(&four_companies(), Dimension::Lob, SliceMetric::Exposure);
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["LCB", "MCB", "SCB"]);

    assert_close(entries[0].value, 1550.0, 1e-9);
    assert_close(entries[1].value, 400.0, 1e-9);
    assert_close(entries[2].value, 500.0, 1e-9);
    assert_close(entries[0].percentage, 63.3, 1e-9);
}

#[test]
fn percentages_close_to_one_hundred_for_every_dimension_and_metric() {
    let books = [four_companies(), SamplePortfolio::new(120, 5).generate()];
    for book in &books {
        for &dimension in Dimension::all() {
            for &metric in SliceMetric::all() {
                let entries = aggregate_by_dimension(book, dimension, metric);
                let total: f64 = entries.iter().map(|e| e.value).sum();
                if total <= 0.0 {
                    continue;
                }
                let sum: f64 = entries.iter().map(|e| e.percentage).sum();
                assert!(
                    (sum - 100.0).abs() <= 0.1,
                    "{} / {}: percentages sum to {sum}",
                    dimension.key(),
                    metric.key()
                );
            }
        }
    }
}

#[test]
fn count_metric_counts_accounts() {
    let entries = aggregate_by_dimension(&four_companies(), Dimension::PartyType, SliceMetric::Count);
    let corporate = entries.iter().find(|e| e.label == "Corporate").unwrap();
    assert_eq!(corporate.value, 2.0);
    assert_close(corporate.percentage, 50.0, 1e-9);
}

#[test]
fn npa_exposure_only_counts_delinquent_accounts() {
    let entries =
        aggregate_by_dimension(&four_companies(), Dimension::Region, SliceMetric::NpaExposure);
    let east = entries.iter().find(|e| e.label == "EAST").unwrap();
    assert_close(east.value, 700.0, 1e-9);
    assert_close(east.percentage, 100.0, 1e-9);
    let north = entries.iter().find(|e| e.label == "NORTH").unwrap();
    assert_eq!(north.value, 0.0);
    assert_eq!(north.percentage, 0.0);
}

#[test]
fn delinquent_exposure_counts_overdue_accounts() {
    let entries = aggregate_by_dimension(
        &four_companies(),
        Dimension::CreditStatus,
        SliceMetric::DelinquentExposure,
    );
    let total: f64 = entries.iter().map(|e| e.value).sum();
    assert_close(total, 1100.0, 1e-9);
}

#[test]
fn empty_subset_yields_the_sentinel() {
    let entries = aggregate_by_dimension(&[], Dimension::Region, SliceMetric::Exposure);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, NO_DATA_LABEL);
    assert_eq!(entries[0].value, 0.0);
    assert_eq!(entries[0].percentage, 0.0);
    assert!(entries[0].is_no_data());
}

#[test]
fn missing_parent_group_lands_in_unassigned() {
    let entries =
        aggregate_by_dimension(&four_companies(), Dimension::ParentGroup, SliceMetric::Count);
    let unassigned = entries.iter().find(|e| e.label == UNASSIGNED_LABEL).unwrap();
    assert_eq!(unassigned.value, 3.0);
}

#[test]
fn all_zero_values_give_zero_percentages() {
    let accounts = vec![
        Account { id: "Z1".into(), region: "NORTH".into(), ..Account::default() },
        Account { id: "Z2".into(), region: "SOUTH".into(), ..Account::default() },
    ];
    let entries = aggregate_by_dimension(&accounts, Dimension::Region, SliceMetric::Exposure);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.percentage == 0.0));
}

#[test]
fn rounding_never_drifts_past_a_tenth() {
    let values = [1.0, 2.0, 3.0, 5.0, 7.0, 11.0, 13.0];
    let total: f64 = values.iter().sum();
    let shares = normalized_percentages(&values);
    for (v, p) in values.iter().zip(&shares) {
        assert!((p - v / total * 100.0).abs() <= 0.1 + 1e-9);
    }
    assert_close(shares.iter().sum::<f64>(), 100.0, 1e-9);
}

#[test]
fn standard_breakdowns_cover_the_dashboard_charts() {
    let b = standard_breakdowns(&four_companies());
    assert_eq!(b.exposure_by_region.len(), 4);
    assert_eq!(b.exposure_by_segment.len(), 3);
    assert_eq!(b.exposure_by_product.len(), 3);
    assert_eq!(b.exposure_by_rating.len(), 4);

    let top = sorted_desc(b.exposure_by_region);
    assert_eq!(top[0].label, "NORTH");
    assert_eq!(top[1].label, "EAST");
}
