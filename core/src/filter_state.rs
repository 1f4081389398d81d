//! Filter state — every filter layer as one explicit value.
//!
//! RULE: FilterState is never mutated in place.
//! Every transition consumes the old state and returns a new one,
//! replacing a whole sub-object (one value set, the drill-down slot,
//! one page's list). Readers therefore always see a fully-formed state.
//!
//! Layers (applied in this order by `filter::apply_filters`):
//!   1. Global multi-select filters (LOB, party type, rating, asset class)
//!   2. Drill-down filter (single slot)
//!   3. Page-scoped filters (per page, persisted)
//!   4. Free-text search

use crate::types::PageId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One `(field, value)` condition.
/// `field` is kept as the raw key so a filter that references a removed
/// dimension survives round-trips and can still be shown and removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Four independent allowed-value sets. Empty set = no restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalFilters {
    pub lob:                  BTreeSet<String>,
    pub party_type:           BTreeSet<String>,
    pub rating:               BTreeSet<String>,
    pub asset_classification: BTreeSet<String>,
}

impl GlobalFilters {
    pub fn is_active(&self) -> bool {
        !(self.lob.is_empty()
            && self.party_type.is_empty()
            && self.rating.is_empty()
            && self.asset_classification.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    #[default]
    Exposure,
    CreditLimit,
    DaysPastDue,
    CreditScore,
    Rating,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    pub key:       SortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterLayer {
    Global,
    DrillDown,
    Page,
    Search,
}

/// A displayable description of one active condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterChip {
    pub layer: FilterLayer,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub global:       GlobalFilters,
    pub drill_down:   Option<FieldFilter>,
    pub page_filters: BTreeMap<PageId, Vec<FieldFilter>>,
    pub search:       String,
    pub sort:         SortSpec,
    /// Page whose page-scoped filters take part in composition.
    pub active_page:  Option<PageId>,
}

/// Every sanctioned transition of the filter state.
/// This is the only way the orchestrating layer changes filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterAction {
    // ── Global filters ────────────────────────────
    SetLob { values: Vec<String> },
    SetPartyType { values: Vec<String> },
    SetRating { values: Vec<String> },
    SetAssetClassification { values: Vec<String> },
    ClearGlobalFilters,

    // ── Drill-down ────────────────────────────────
    SetDrillDownFilter { filter: Option<FieldFilter> },
    ClearDrillDownFilter,

    // ── Page-scoped ───────────────────────────────
    AddPageFilter { page: PageId, filter: FieldFilter },
    RemovePageFilter { page: PageId, filter: FieldFilter },
    ClearPageFilters { page: PageId },
    SetActivePage { page: Option<PageId> },

    // ── Search / sort ─────────────────────────────
    SetSearch { term: String },
    SetSort { sort: SortSpec },

    Reset,
}

impl FilterAction {
    /// True when applying this action can change persisted page filters.
    pub fn touches_page_filters(&self) -> bool {
        matches!(
            self,
            FilterAction::AddPageFilter { .. }
                | FilterAction::RemovePageFilter { .. }
                | FilterAction::ClearPageFilters { .. }
        )
    }
}

fn value_set(values: impl IntoIterator<Item = impl Into<String>>) -> BTreeSet<String> {
    values.into_iter().map(Into::into).collect()
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from persisted page filters, everything else at defaults.
    pub fn with_page_filters(page_filters: BTreeMap<PageId, Vec<FieldFilter>>) -> Self {
        Self { page_filters, ..Self::default() }
    }

    /// Apply one transition and return the resulting state.
    pub fn apply(self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetLob { values }                 => self.set_lob(values),
            FilterAction::SetPartyType { values }           => self.set_party_type(values),
            FilterAction::SetRating { values }              => self.set_rating(values),
            FilterAction::SetAssetClassification { values } => self.set_asset_classification(values),
            FilterAction::ClearGlobalFilters                => self.clear_global_filters(),
            FilterAction::SetDrillDownFilter { filter }     => self.set_drill_down_filter(filter),
            FilterAction::ClearDrillDownFilter              => self.clear_drill_down_filter(),
            FilterAction::AddPageFilter { page, filter }    => self.add_page_filter(page, filter),
            FilterAction::RemovePageFilter { page, filter } => self.remove_page_filter(&page, &filter),
            FilterAction::ClearPageFilters { page }         => self.clear_page_filters(&page),
            FilterAction::SetActivePage { page }            => self.set_active_page(page),
            FilterAction::SetSearch { term }                => self.set_search(term),
            FilterAction::SetSort { sort }                  => self.set_sort(sort),
            FilterAction::Reset                             => self.reset(),
        }
    }

    // ── Global filters ─────────────────────────────────────────

    pub fn set_lob(self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let global = GlobalFilters { lob: value_set(values), ..self.global };
        Self { global, ..self }
    }

    pub fn set_party_type(self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let global = GlobalFilters { party_type: value_set(values), ..self.global };
        Self { global, ..self }
    }

    pub fn set_rating(self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let global = GlobalFilters { rating: value_set(values), ..self.global };
        Self { global, ..self }
    }

    pub fn set_asset_classification(
        self,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let global = GlobalFilters { asset_classification: value_set(values), ..self.global };
        Self { global, ..self }
    }

    pub fn clear_global_filters(self) -> Self {
        Self { global: GlobalFilters::default(), ..self }
    }

    pub fn has_active_global_filters(&self) -> bool {
        self.global.is_active()
    }

    // ── Drill-down ─────────────────────────────────────────────

    /// Replace the single drill-down slot. `None` clears it.
    pub fn set_drill_down_filter(self, filter: Option<FieldFilter>) -> Self {
        Self { drill_down: filter, ..self }
    }

    pub fn clear_drill_down_filter(self) -> Self {
        self.set_drill_down_filter(None)
    }

    // ── Page-scoped ────────────────────────────────────────────

    /// Append a condition to a page. Adding an identical condition twice
    /// is a no-op.
    pub fn add_page_filter(self, page: impl Into<PageId>, filter: FieldFilter) -> Self {
        let page = page.into();
        let mut page_filters = self.page_filters;
        let mut list = page_filters.remove(&page).unwrap_or_default();
        if !list.contains(&filter) {
            list.push(filter);
        }
        page_filters.insert(page, list);
        Self { page_filters, ..self }
    }

    /// Remove a condition from a page. A page left with no conditions is
    /// dropped from the map entirely.
    pub fn remove_page_filter(self, page: &str, filter: &FieldFilter) -> Self {
        let mut page_filters = self.page_filters;
        if let Some(list) = page_filters.remove(page) {
            let list: Vec<FieldFilter> = list.into_iter().filter(|f| f != filter).collect();
            if !list.is_empty() {
                page_filters.insert(page.to_string(), list);
            }
        }
        Self { page_filters, ..self }
    }

    pub fn clear_page_filters(self, page: &str) -> Self {
        let mut page_filters = self.page_filters;
        page_filters.remove(page);
        Self { page_filters, ..self }
    }

    pub fn set_active_page(self, page: Option<PageId>) -> Self {
        Self { active_page: page, ..self }
    }

    pub fn page_filters_for(&self, page: &str) -> &[FieldFilter] {
        self.page_filters.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Conditions of the active page, empty when no page is active.
    pub fn active_page_filters(&self) -> &[FieldFilter] {
        match &self.active_page {
            Some(page) => self.page_filters_for(page),
            None => &[],
        }
    }

    // ── Search / sort ──────────────────────────────────────────

    pub fn set_search(self, term: impl Into<String>) -> Self {
        Self { search: term.into(), ..self }
    }

    pub fn set_sort(self, sort: SortSpec) -> Self {
        Self { sort, ..self }
    }

    /// Back to defaults. Page-scoped filters and the active page have their
    /// own lifecycle and are kept; use `clear_page_filters` for those.
    pub fn reset(self) -> Self {
        Self {
            page_filters: self.page_filters,
            active_page: self.active_page,
            ..Self::default()
        }
    }

    // ── Display ────────────────────────────────────────────────

    /// Every active condition as a chip, in composition order.
    pub fn active_filter_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        let globals = [
            ("lob", &self.global.lob),
            ("party_type", &self.global.party_type),
            ("external_rating", &self.global.rating),
            ("asset_classification", &self.global.asset_classification),
        ];
        for (field, values) in globals {
            for value in values {
                chips.push(FilterChip {
                    layer: FilterLayer::Global,
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
        if let Some(f) = &self.drill_down {
            chips.push(FilterChip {
                layer: FilterLayer::DrillDown,
                field: f.field.clone(),
                value: f.value.clone(),
            });
        }
        for f in self.active_page_filters() {
            chips.push(FilterChip {
                layer: FilterLayer::Page,
                field: f.field.clone(),
                value: f.value.clone(),
            });
        }
        if !self.search.trim().is_empty() {
            chips.push(FilterChip {
                layer: FilterLayer::Search,
                field: "search".into(),
                value: self.search.clone(),
            });
        }
        chips
    }
}
