//! RiskDesk core: filtering and aggregation engine for a credit-portfolio
//! risk dashboard.
//!
//! Data flow (fixed):
//!   FilterState ──▶ filter::apply_filters ──▶ filtered subset
//!   filtered subset ──▶ kpi / breakdown / delinquency / ranking / trend
//!
//! Every consumer of the filtered subset is a pure function of it.
//! Only `session` holds mutable state. Only `store` and `source` do I/O.

pub mod account;
pub mod breakdown;
pub mod config;
pub mod delinquency;
pub mod dimension;
pub mod error;
pub mod filter;
pub mod filter_state;
pub mod kpi;
pub mod name_generator;
pub mod ranking;
pub mod rng;
pub mod sample;
pub mod session;
pub mod source;
pub mod store;
pub mod trend;
pub mod types;
pub mod view;
