//! Dashboard session — the orchestrating layer.
//!
//! RULES:
//!   - The session owns the only mutable state: the current FilterState.
//!   - Every filter change goes through `dispatch`, which applies one pure
//!     transition and replaces the state wholesale.
//!   - Page filters are persisted after a transition that changed them.
//!     A persistence failure is logged and swallowed.
//!   - Views are recomputed from the filtered subset on demand.
//!   - An optional prior-period book goes through the same filters and
//!     supplies the KPI baseline.

use crate::{
    account::Account,
    breakdown::{aggregate_by_dimension, BreakdownEntry, SliceMetric},
    config::DeskConfig,
    dimension::Dimension,
    error::DeskResult,
    filter::{apply_filters, sort_accounts},
    filter_state::{FilterAction, FilterState},
    kpi::{derive_kpis, KpiSnapshot},
    ranking::{rank_top_exposures, RankMetric, RankedExposure},
    source::AccountSource,
    store::{load_page_filters, save_page_filters, DeskStore, KeyValueStore, MemoryStore},
    trend::{SyntheticTrend, TrendSource},
    view::DashboardView,
};

pub struct DeskSession {
    accounts: Vec<Account>,
    /// Prior-period book. Empty when no baseline was loaded.
    baseline: Vec<Account>,
    state:    FilterState,
    store:    Box<dyn KeyValueStore>,
    trend:    Box<dyn TrendSource>,
    config:   DeskConfig,
}

impl DeskSession {
    /// Start a session over `accounts`, restoring persisted page filters.
    /// An unreadable store starts the session with no page filters.
    pub fn open(accounts: Vec<Account>, store: Box<dyn KeyValueStore>, config: DeskConfig) -> Self {
        let page_filters = load_page_filters(store.as_ref());
        let trend = SyntheticTrend::new(config.trend.seed, config.trend.anchor_or_today())
            .with_noise(config.trend.noise_pct);
        log::info!(
            "session: opened over {} accounts, {} page(s) with saved filters",
            accounts.len(),
            page_filters.len()
        );
        Self {
            accounts,
            baseline: Vec::new(),
            state: FilterState::with_page_filters(page_filters),
            store,
            trend: Box::new(trend),
            config,
        }
    }

    /// Build a fully wired session from config: load accounts from
    /// `source`, open the configured store (in memory when no path is set).
    pub fn build(config: DeskConfig, source: &mut dyn AccountSource) -> DeskResult<Self> {
        let accounts = source.load()?;
        let store: Box<dyn KeyValueStore> = match &config.storage.db_path {
            Some(path) => {
                let store = DeskStore::open(path)?;
                store.migrate()?;
                Box::new(store)
            }
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::open(accounts, store, config))
    }

    /// Swap the trend seam, e.g. for a recorded history feed.
    pub fn with_trend_source(mut self, trend: Box<dyn TrendSource>) -> Self {
        self.trend = trend;
        self
    }

    /// Compare KPIs against `accounts`, the same book as of the prior
    /// period.
    pub fn with_baseline(mut self, accounts: Vec<Account>) -> Self {
        log::info!("session: baseline of {} accounts", accounts.len());
        self.baseline = accounts;
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Apply one filter transition.
    pub fn dispatch(&mut self, action: FilterAction) -> &FilterState {
        let before = action
            .touches_page_filters()
            .then(|| self.state.page_filters.clone());

        log::debug!("session: dispatch {action:?}");
        self.state = std::mem::take(&mut self.state).apply(action);

        if let Some(before) = before {
            if before != self.state.page_filters {
                self.persist_page_filters();
            }
        }
        &self.state
    }

    fn persist_page_filters(&mut self) {
        if let Err(e) = save_page_filters(self.store.as_mut(), &self.state.page_filters) {
            log::warn!("session: could not persist page filters, keeping in memory: {e}");
        }
    }

    // ── Derived views ──────────────────────────────────────────

    pub fn filtered(&self) -> Vec<Account> {
        apply_filters(&self.accounts, &self.state)
    }

    /// Filtered accounts in the state's sort order.
    pub fn table(&self) -> Vec<Account> {
        sort_accounts(&self.filtered(), self.state.sort)
    }

    pub fn dashboard(&self) -> DashboardView {
        let filtered = self.filtered();
        log::debug!(
            "session: recompute over {}/{} accounts",
            filtered.len(),
            self.accounts.len()
        );
        DashboardView::build(
            &filtered,
            self.accounts.len(),
            self.state.active_filter_chips(),
            self.config.top_n,
            self.trend.as_ref(),
            self.baseline_kpis().as_ref(),
        )
    }

    /// KPIs of the prior-period book under the current filters. None when
    /// no baseline is loaded or nothing in it passes the filters.
    pub fn baseline_kpis(&self) -> Option<KpiSnapshot> {
        let prior = apply_filters(&self.baseline, &self.state);
        (!prior.is_empty()).then(|| derive_kpis(&prior))
    }

    /// Master slicer: any dimension, any metric, over the filtered subset.
    pub fn slice(&self, dimension: Dimension, metric: SliceMetric) -> Vec<BreakdownEntry> {
        aggregate_by_dimension(&self.filtered(), dimension, metric)
    }

    pub fn top_exposures(&self, limit: usize, metric: RankMetric) -> Vec<RankedExposure> {
        rank_top_exposures(&self.filtered(), limit, metric)
    }
}
