use crate::{ranking::DEFAULT_TOP_N, trend::DEFAULT_NOISE_PCT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrendConfig {
    pub seed:      u64,
    /// Half-width of the NPA/PAR noise band, in percentage points.
    pub noise_pct: f64,
    /// Month the series ends at. None = the current month.
    pub anchor:    Option<NaiveDate>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { seed: 42, noise_pct: DEFAULT_NOISE_PCT, anchor: None }
    }
}

impl TrendConfig {
    pub fn anchor_or_today(&self) -> NaiveDate {
        self.anchor
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file for page filters. None keeps them in memory only.
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SampleConfig {
    pub accounts: usize,
    pub seed:     u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self { accounts: 500, seed: 20_240_331 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeskConfig {
    pub top_n:         usize,
    /// Abort a file load on the first invalid record instead of skipping it.
    pub strict_source: bool,
    pub trend:         TrendConfig,
    pub storage:       StorageConfig,
    pub sample:        SampleConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            strict_source: false,
            trend: TrendConfig::default(),
            storage: StorageConfig::default(),
            sample: SampleConfig::default(),
        }
    }
}

impl DeskConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use DeskConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DeskConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.top_n == 0 {
            anyhow::bail!("{path}: top_n must be at least 1");
        }
        Ok(config)
    }

    /// Config with fixed values for use in tests: pinned trend anchor,
    /// small sample, no database.
    pub fn default_test() -> Self {
        Self {
            top_n: 5,
            strict_source: true,
            trend: TrendConfig {
                seed: 7,
                noise_pct: DEFAULT_NOISE_PCT,
                anchor: NaiveDate::from_ymd_opt(2026, 3, 1),
            },
            storage: StorageConfig { db_path: None },
            sample: SampleConfig { accounts: 60, seed: 99 },
        }
    }
}
