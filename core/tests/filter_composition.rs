//! Filter composition: AND between layers, OR within a value set,
//! order independence, and non-mutation of the input.

mod common;

use common::{four_companies, ids};
use riskdesk_core::{
    filter::{apply_filters, apply_layers, LAYER_ORDER},
    filter_state::{FieldFilter, FilterLayer, FilterState},
};

fn busy_state() -> FilterState {
    FilterState::new()
        .set_lob(["LCB", "MCB", "SCB"])
        .set_rating(["AAA", "AA", "BBB"])
        .set_drill_down_filter(Some(FieldFilter::new("segment", "Large Corporate")))
        .add_page_filter("overview", FieldFilter::new("region", "NORTH"))
        .add_page_filter("overview", FieldFilter::new("region", "EAST"))
        .set_active_page(Some("overview".into()))
        .set_search("ltd")
}

#[test]
fn lob_filter_keeps_a_and_c() {
    let accounts = four_companies();
    let state = FilterState::new().set_lob(["LCB"]);
    let out = apply_filters(&accounts, &state);
    assert_eq!(ids(&out), vec!["ACC-0001", "ACC-0003"]);
}

#[test]
fn lob_and_party_type_keeps_only_a() {
    let accounts = four_companies();
    let state = FilterState::new().set_lob(["LCB"]).set_party_type(["Corporate"]);
    let out = apply_filters(&accounts, &state);
    assert_eq!(ids(&out), vec!["ACC-0001"]);
}

#[test]
fn or_within_and_between() {
    let accounts = four_companies();
    let state = FilterState::new().set_lob(["LCB", "MCB"]).set_party_type(["SME"]);
    let out = apply_filters(&accounts, &state);

    let expected: Vec<&str> = accounts
        .iter()
        .filter(|a| (a.lob == "LCB" || a.lob == "MCB") && a.party_type == "SME")
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids(&out), expected);
    assert_eq!(ids(&out), vec!["ACC-0002"]);
}

#[test]
fn empty_state_passes_everything() {
    let accounts = four_companies();
    let out = apply_filters(&accounts, &FilterState::new());
    assert_eq!(out, accounts);
}

#[test]
fn layer_order_does_not_change_the_result() {
    let accounts = four_companies();
    let state = busy_state();
    let canonical = apply_filters(&accounts, &state);
    assert_eq!(ids(&canonical), vec!["ACC-0001", "ACC-0003"]);

    let reversed: Vec<FilterLayer> = LAYER_ORDER.iter().rev().copied().collect();
    assert_eq!(apply_layers(&accounts, &state, &reversed), canonical);

    // Any split into two groups, applied either way round.
    for split in 1..LAYER_ORDER.len() {
        let (first, second) = LAYER_ORDER.split_at(split);
        let a_then_b = apply_layers(&apply_layers(&accounts, &state, first), &state, second);
        let b_then_a = apply_layers(&apply_layers(&accounts, &state, second), &state, first);
        assert_eq!(a_then_b, canonical, "split at {split}");
        assert_eq!(b_then_a, canonical, "split at {split}, reversed");
    }
}

#[test]
fn input_collection_is_not_mutated() {
    let accounts = four_companies();
    let before = accounts.clone();
    let _ = apply_filters(&accounts, &busy_state());
    assert_eq!(accounts, before);
    assert_eq!(accounts.len(), 4);
}

#[test]
fn unknown_field_matches_nothing() {
    let accounts = four_companies();
    let state = FilterState::new()
        .set_drill_down_filter(Some(FieldFilter::new("no_such_field", "x")));
    assert!(apply_filters(&accounts, &state).is_empty());

    let state = FilterState::new()
        .add_page_filter("p", FieldFilter::new("retired_dimension", "NORTH"))
        .set_active_page(Some("p".into()));
    assert!(apply_filters(&accounts, &state).is_empty());
}

#[test]
fn drill_down_accepts_camel_case_field_names() {
    let accounts = four_companies();
    let state = FilterState::new()
        .set_drill_down_filter(Some(FieldFilter::new("partyType", "Corporate")));
    assert_eq!(ids(&apply_filters(&accounts, &state)), vec!["ACC-0001", "ACC-0004"]);
}

#[test]
fn page_filters_only_apply_on_their_page() {
    let accounts = four_companies();
    let state = FilterState::new().add_page_filter("risk", FieldFilter::new("region", "EAST"));

    // No active page: the page's filters are dormant.
    assert_eq!(apply_filters(&accounts, &state).len(), 4);

    let on_page = state.clone().set_active_page(Some("risk".into()));
    assert_eq!(ids(&apply_filters(&accounts, &on_page)), vec!["ACC-0003"]);

    let elsewhere = state.set_active_page(Some("overview".into()));
    assert_eq!(apply_filters(&accounts, &elsewhere).len(), 4);
}

#[test]
fn page_conditions_on_different_fields_are_and_ed() {
    let accounts = four_companies();
    let state = FilterState::new()
        .add_page_filter("p", FieldFilter::new("lob", "LCB"))
        .add_page_filter("p", FieldFilter::new("region", "NORTH"))
        .add_page_filter("p", FieldFilter::new("region", "WEST"))
        .set_active_page(Some("p".into()));
    assert_eq!(ids(&apply_filters(&accounts, &state)), vec!["ACC-0001"]);
}

#[test]
fn parent_group_filter_skips_accounts_without_one() {
    let accounts = four_companies();
    let state = FilterState::new()
        .set_drill_down_filter(Some(FieldFilter::new("parent_group", "Omega Holdings")));
    assert_eq!(ids(&apply_filters(&accounts, &state)), vec!["ACC-0001"]);
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let accounts = four_companies();

    let by_name = FilterState::new().set_search("GAMMA");
    assert_eq!(ids(&apply_filters(&accounts, &by_name)), vec!["ACC-0003"]);

    let by_group = FilterState::new().set_search("alpha group");
    assert_eq!(ids(&apply_filters(&accounts, &by_group)), vec!["ACC-0001", "ACC-0003"]);

    let by_id = FilterState::new().set_search("acc-0004");
    assert_eq!(ids(&apply_filters(&accounts, &by_id)), vec!["ACC-0004"]);

    let by_industry = FilterState::new().set_search("textiles");
    assert_eq!(ids(&apply_filters(&accounts, &by_industry)), vec!["ACC-0002"]);
}

#[test]
fn blank_search_passes_everything() {
    let accounts = four_companies();
    let state = FilterState::new().set_search("   ");
    assert_eq!(apply_filters(&accounts, &state).len(), 4);
}

#[test]
fn filtering_empty_collection_yields_empty() {
    assert!(apply_filters(&[], &busy_state()).is_empty());
}
