//! Delinquency matrix — region × days-past-due bucket.
//!
//! The matrix is always complete over the fixed rows and columns.
//! A region with no accounts still shows six zero cells. Accounts whose
//! region is outside the fixed row set are left out of the grid.

use crate::{account::Account, types::Amount};
use serde::{Deserialize, Serialize};

/// Fixed row set.
pub const MATRIX_REGIONS: [&str; 4] = ["NORTH", "SOUTH", "EAST", "WEST"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DpdBucket {
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "0-30")]
    UpTo30,
    #[serde(rename = "31-60")]
    UpTo60,
    #[serde(rename = "61-90")]
    UpTo90,
    #[serde(rename = "91-180")]
    UpTo180,
    #[serde(rename = "180+")]
    Over180,
}

impl DpdBucket {
    /// Upper bounds are inclusive: 30 DPD is in `0-30`, 31 in `31-60`.
    pub fn from_days(days_past_due: u32) -> Self {
        match days_past_due {
            0         => DpdBucket::Current,
            1..=30    => DpdBucket::UpTo30,
            31..=60   => DpdBucket::UpTo60,
            61..=90   => DpdBucket::UpTo90,
            91..=180  => DpdBucket::UpTo180,
            _         => DpdBucket::Over180,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DpdBucket::Current => "current",
            DpdBucket::UpTo30  => "0-30",
            DpdBucket::UpTo60  => "31-60",
            DpdBucket::UpTo90  => "61-90",
            DpdBucket::UpTo180 => "91-180",
            DpdBucket::Over180 => "180+",
        }
    }

    /// Column order.
    pub fn all() -> [DpdBucket; 6] {
        [
            DpdBucket::Current,
            DpdBucket::UpTo30,
            DpdBucket::UpTo60,
            DpdBucket::UpTo90,
            DpdBucket::UpTo180,
            DpdBucket::Over180,
        ]
    }

    fn column(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MatrixCell {
    pub count:    u64,
    pub exposure: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixRow {
    pub region: String,
    /// One cell per bucket, in `buckets` order.
    pub cells:  Vec<MatrixCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelinquencyMatrix {
    pub rows:    Vec<String>,
    pub buckets: Vec<String>,
    pub data:    Vec<MatrixRow>,
}

impl DelinquencyMatrix {
    pub fn cell(&self, region: &str, bucket: DpdBucket) -> Option<&MatrixCell> {
        self.data
            .iter()
            .find(|r| r.region == region)
            .and_then(|r| r.cells.get(bucket.column()))
    }

    /// Column totals across all regions.
    pub fn bucket_totals(&self) -> Vec<MatrixCell> {
        let mut totals = vec![MatrixCell::default(); DpdBucket::all().len()];
        for row in &self.data {
            for (total, cell) in totals.iter_mut().zip(&row.cells) {
                total.count += cell.count;
                total.exposure += cell.exposure;
            }
        }
        totals
    }
}

pub fn build_delinquency_matrix(accounts: &[Account]) -> DelinquencyMatrix {
    let buckets = DpdBucket::all();
    let mut data: Vec<MatrixRow> = MATRIX_REGIONS
        .iter()
        .map(|region| MatrixRow {
            region: region.to_string(),
            cells: vec![MatrixCell::default(); buckets.len()],
        })
        .collect();

    let mut unplaced = 0usize;
    for account in accounts {
        let Some(row) = MATRIX_REGIONS
            .iter()
            .position(|r| r.eq_ignore_ascii_case(account.region.trim()))
        else {
            unplaced += 1;
            continue;
        };
        let cell = &mut data[row].cells[DpdBucket::from_days(account.days_past_due).column()];
        cell.count += 1;
        cell.exposure += account.credit_exposure;
    }
    if unplaced > 0 {
        log::debug!("delinquency matrix: {unplaced} accounts outside the fixed regions");
    }

    DelinquencyMatrix {
        rows: MATRIX_REGIONS.iter().map(|r| r.to_string()).collect(),
        buckets: buckets.iter().map(|b| b.label().to_string()).collect(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        assert_eq!(DpdBucket::from_days(0), DpdBucket::Current);
        assert_eq!(DpdBucket::from_days(1), DpdBucket::UpTo30);
        assert_eq!(DpdBucket::from_days(30), DpdBucket::UpTo30);
        assert_eq!(DpdBucket::from_days(31), DpdBucket::UpTo60);
        assert_eq!(DpdBucket::from_days(60), DpdBucket::UpTo60);
        assert_eq!(DpdBucket::from_days(90), DpdBucket::UpTo90);
        assert_eq!(DpdBucket::from_days(91), DpdBucket::UpTo180);
        assert_eq!(DpdBucket::from_days(180), DpdBucket::UpTo180);
        assert_eq!(DpdBucket::from_days(181), DpdBucket::Over180);
    }

    #[test]
    fn columns_follow_declaration_order() {
        for (i, b) in DpdBucket::all().iter().enumerate() {
            assert_eq!(b.column(), i);
        }
    }
}
