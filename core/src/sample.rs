//! Deterministic sample portfolio.
//!
//! Stands in for the upstream data feed when no account file is given.
//! Same (size, seed) always yields the same accounts. Generated accounts
//! honour `credit_exposure <= gross_credit_exposure <= credit_limit`.

use crate::{
    account::{Account, CreditStatus},
    delinquency::MATRIX_REGIONS,
    error::DeskResult,
    name_generator::NameGenerator,
    rng::{NoiseRng, Stream},
    source::AccountSource,
};

const ZONES: [&[&str]; 4] = [
    &["Delhi", "Punjab", "Uttar Pradesh"],
    &["Karnataka", "Tamil Nadu", "Kerala"],
    &["West Bengal", "Odisha", "Assam"],
    &["Maharashtra", "Gujarat", "Rajasthan"],
];
const LOBS: [&str; 3] = ["LCB", "MCB", "SCB"];
const PARTY_TYPES: [&str; 3] = ["Large Corporate", "Corporate", "SME"];
const SEGMENTS: [&str; 4] = ["Large Corporate", "Mid Corporate", "Emerging Corporate", "SME"];
const PRODUCTS: [&str; 5] = ["Term Loan", "Cash Credit", "Working Capital Demand Loan", "Letter of Credit", "Bank Guarantee"];
const INDUSTRIES: [&str; 8] = ["Manufacturing", "Infrastructure", "Textiles", "Pharma", "IT Services", "Agriculture", "Trading", "Energy"];
const RATINGS: [&str; 8] = ["AAA", "AA", "A", "BBB", "BB", "B", "CCC", "D"];
const SECURITY: [&str; 3] = ["Secured", "Partially Secured", "Unsecured"];

pub struct SamplePortfolio {
    size: usize,
    seed: u64,
}

impl SamplePortfolio {
    pub fn new(size: usize, seed: u64) -> Self {
        Self { size, seed }
    }

    pub fn generate(&self) -> Vec<Account> {
        let mut rng = NoiseRng::new(self.seed, Stream::SamplePortfolio);
        (0..self.size).map(|i| sample_account(&mut rng, i)).collect()
    }
}

impl AccountSource for SamplePortfolio {
    fn load(&mut self) -> DeskResult<Vec<Account>> {
        let accounts = self.generate();
        log::info!("source: generated {} sample accounts (seed {})", accounts.len(), self.seed);
        Ok(accounts)
    }
}

fn days_past_due(rng: &mut NoiseRng) -> u32 {
    if rng.chance(0.78) {
        return 0;
    }
    let (lo, hi) = *rng.pick(&[(1u64, 30u64), (31, 60), (61, 90), (91, 180), (181, 400)]);
    (lo + rng.next_u64_below(hi - lo + 1)) as u32
}

/// Asset classification follows DPD the way regulatory buckets do.
fn asset_classification(dpd: u32) -> &'static str {
    match dpd {
        0        => "Standard",
        1..=30   => "SMA-0",
        31..=60  => "SMA-1",
        61..=90  => "SMA-2",
        91..=365 => "Sub-Standard",
        _        => "Doubtful",
    }
}

fn sample_account(rng: &mut NoiseRng, index: usize) -> Account {
    let region_idx = rng.next_u64_below(MATRIX_REGIONS.len() as u64) as usize;
    let region = MATRIX_REGIONS[region_idx];
    let zone = *rng.pick(ZONES[region_idx]);
    let industry = *rng.pick(&INDUSTRIES);
    let tier = rng.next_u64_below(3) as usize;

    // Larger LOB tiers carry larger limits (crore).
    let limit_floor = [400.0, 80.0, 10.0][tier];
    let credit_limit = rng.pareto(limit_floor, 1.8).min(limit_floor * 12.0);
    let gross_credit_exposure = credit_limit * rng.uniform(0.55, 1.0);
    let credit_exposure = gross_credit_exposure * rng.uniform(0.85, 1.0);

    let dpd = days_past_due(rng);
    let credit_status = if dpd > 90 {
        CreditStatus::Delinquent
    } else if dpd > 0 || rng.chance(0.05) {
        CreditStatus::Watchlist
    } else {
        CreditStatus::Standard
    };

    let rating_floor = match credit_status {
        CreditStatus::Standard   => 0,
        CreditStatus::Watchlist  => 3,
        CreditStatus::Delinquent => 5,
    };
    let rating_idx = rating_floor + rng.next_u64_below(3) as usize;
    let credit_score = match credit_status {
        CreditStatus::Standard   => rng.uniform(680.0, 850.0),
        CreditStatus::Watchlist  => rng.uniform(600.0, 720.0),
        CreditStatus::Delinquent => rng.uniform(450.0, 620.0),
    };

    let security_status = *rng.pick(&SECURITY);
    let cover = match security_status {
        "Secured"           => rng.uniform(0.9, 1.3),
        "Partially Secured" => rng.uniform(0.3, 0.8),
        _                   => 0.0,
    };

    let group_name = NameGenerator::generate_group_name(rng);
    let parent_group = rng
        .chance(0.3)
        .then(|| NameGenerator::generate_group_name(rng));

    Account {
        id: format!("ACC-{:06}", index + 1),
        name: NameGenerator::generate_company_name(rng, industry),
        region: region.to_string(),
        zone: zone.to_string(),
        segment: SEGMENTS[tier + rng.next_u64_below(2) as usize].to_string(),
        product_type: rng.pick(&PRODUCTS).to_string(),
        lob: LOBS[tier].to_string(),
        industry: industry.to_string(),
        party_type: PARTY_TYPES[tier].to_string(),
        external_rating: RATINGS[rating_idx.min(RATINGS.len() - 1)].to_string(),
        internal_rating: format!("IR-{}", rating_idx + 1),
        credit_status,
        asset_classification: asset_classification(dpd).to_string(),
        security_status: security_status.to_string(),
        branch: format!("{region}-{:02}", 1 + rng.next_u64_below(12)),
        group_name,
        parent_group,
        credit_limit,
        gross_credit_exposure,
        credit_exposure,
        undrawn_exposure: credit_limit - gross_credit_exposure,
        days_past_due: dpd,
        security_value: credit_exposure * cover,
        credit_score,
    }
}
