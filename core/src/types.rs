//! Shared primitive types used across the engine.

/// A stable, unique identifier for an account.
pub type AccountId = String;

/// Identifies a dashboard page that owns its own page-scoped filters.
pub type PageId = String;

/// Monetary amounts are carried as f64 in the source currency unit.
pub type Amount = f64;

/// Percentages are carried on a 0–100 scale.
pub type Percent = f64;
