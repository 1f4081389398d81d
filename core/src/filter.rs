//! Filter composition — (collection, filter state) → filtered subset.
//!
//! RULES:
//!   - AND between layers, OR within a layer's value set.
//!   - Layers run in a fixed order: global → drill-down → page → search.
//!     The result does not depend on the order (pure intersection); the
//!     order is fixed only so every run does the same work.
//!   - The input collection is never mutated and its order is preserved.
//!   - A condition on an unknown field matches nothing (fail closed).

use crate::{
    account::Account,
    dimension::Dimension,
    filter_state::{FieldFilter, FilterLayer, FilterState, SortDirection, SortKey, SortSpec},
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Composition order. Never reordered.
pub const LAYER_ORDER: [FilterLayer; 4] = [
    FilterLayer::Global,
    FilterLayer::DrillDown,
    FilterLayer::Page,
    FilterLayer::Search,
];

/// Narrow `accounts` through every filter layer.
pub fn apply_filters(accounts: &[Account], state: &FilterState) -> Vec<Account> {
    apply_layers(accounts, state, &LAYER_ORDER)
}

/// Narrow `accounts` through the given layers only, in the given order.
pub fn apply_layers(
    accounts: &[Account],
    state: &FilterState,
    layers: &[FilterLayer],
) -> Vec<Account> {
    let mut working: Vec<&Account> = accounts.iter().collect();
    for &layer in layers {
        let before = working.len();
        working.retain(|a| passes_layer(layer, a, state));
        log::trace!("filter layer {layer:?}: {before} -> {}", working.len());
    }
    working.into_iter().cloned().collect()
}

pub fn passes_layer(layer: FilterLayer, account: &Account, state: &FilterState) -> bool {
    match layer {
        FilterLayer::Global    => passes_global(account, state),
        FilterLayer::DrillDown => passes_drill_down(account, state),
        FilterLayer::Page      => passes_page_filters(account, state),
        FilterLayer::Search    => passes_search(account, &state.search),
    }
}

fn in_set(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

pub fn passes_global(account: &Account, state: &FilterState) -> bool {
    let g = &state.global;
    in_set(&g.lob, &account.lob)
        && in_set(&g.party_type, &account.party_type)
        && in_set(&g.rating, &account.external_rating)
        && in_set(&g.asset_classification, &account.asset_classification)
}

fn matches_condition(account: &Account, filter: &FieldFilter) -> bool {
    Dimension::from_key(&filter.field)
        .and_then(|d| d.value(account))
        .is_some_and(|v| v == filter.value)
}

pub fn passes_drill_down(account: &Account, state: &FilterState) -> bool {
    match &state.drill_down {
        Some(filter) => matches_condition(account, filter),
        None => true,
    }
}

/// Conditions on the same field are OR-ed, different fields are AND-ed.
pub fn passes_page_filters(account: &Account, state: &FilterState) -> bool {
    let mut by_field: BTreeMap<&str, Vec<&FieldFilter>> = BTreeMap::new();
    for f in state.active_page_filters() {
        by_field.entry(f.field.as_str()).or_default().push(f);
    }
    by_field
        .values()
        .all(|group| group.iter().any(|f| matches_condition(account, f)))
}

/// Case-insensitive substring match on name, id, group and industry.
/// A blank term passes everything.
pub fn passes_search(account: &Account, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [
        account.name.as_str(),
        account.id.as_str(),
        account.group_name.as_str(),
        account.industry.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

// ── Account table ordering ──────────────────────────────────────────────────

const RATING_SCALE: [&str; 22] = [
    "AAA", "AA+", "AA", "AA-", "A+", "A", "A-", "BBB+", "BBB", "BBB-", "BB+", "BB", "BB-",
    "B+", "B", "B-", "CCC+", "CCC", "CCC-", "CC", "C", "D",
];

/// Position on the rating scale, best first. Unrated sorts last.
fn rating_rank(rating: &str) -> usize {
    RATING_SCALE
        .iter()
        .position(|r| r.eq_ignore_ascii_case(rating.trim()))
        .unwrap_or(RATING_SCALE.len())
}

/// A sorted copy of `accounts`. Stable: equal keys keep collection order.
pub fn sort_accounts(accounts: &[Account], sort: SortSpec) -> Vec<Account> {
    let mut sorted = accounts.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_by(sort.key, a, b);
        match sort.direction {
            SortDirection::Asc  => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare_by(key: SortKey, a: &Account, b: &Account) -> Ordering {
    match key {
        SortKey::Name        => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Exposure    => a.credit_exposure.total_cmp(&b.credit_exposure),
        SortKey::CreditLimit => a.credit_limit.total_cmp(&b.credit_limit),
        SortKey::DaysPastDue => a.days_past_due.cmp(&b.days_past_due),
        SortKey::CreditScore => a.credit_score.total_cmp(&b.credit_score),
        SortKey::Rating      => rating_rank(&a.external_rating).cmp(&rating_rank(&b.external_rating)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_scale_orders_best_first() {
        assert!(rating_rank("AAA") < rating_rank("AA"));
        assert!(rating_rank("BBB") < rating_rank("D"));
        assert_eq!(rating_rank("aaa"), 0);
        assert_eq!(rating_rank("NR"), RATING_SCALE.len());
    }
}
