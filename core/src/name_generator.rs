//! Deterministic borrower and group name generation for sample portfolios.
//!
//! All generation is deterministic (same RNG seed = same names).

use crate::rng::NoiseRng;

/// Deterministic name generator using curated word lists
pub struct NameGenerator;

impl NameGenerator {
    /// Borrower name, e.g. "Coastal Polymers Ltd" or "Mehta Textiles Pvt Ltd".
    pub fn generate_company_name(rng: &mut NoiseRng, industry: &str) -> String {
        let trade = Self::trade_word(rng, industry);
        let suffix = rng.pick(Self::company_suffixes());
        if rng.chance(0.5) {
            format!("{} {} {}", rng.pick(Self::prefixes()), trade, suffix)
        } else {
            format!("{} {} {}", rng.pick(Self::family_names()), trade, suffix)
        }
    }

    /// Business group a borrower belongs to, e.g. "Kapoor Group".
    pub fn generate_group_name(rng: &mut NoiseRng) -> String {
        format!("{} {}", rng.pick(Self::family_names()), rng.pick(Self::group_suffixes()))
    }

    /// A word that fits the industry, falling back to a generic one.
    fn trade_word(rng: &mut NoiseRng, industry: &str) -> &'static str {
        let words: &'static [&'static str] = match industry {
            "Manufacturing"  => &["Steel", "Polymers", "Castings", "Engineering"],
            "Infrastructure" => &["Infra", "Builders", "Projects", "Constructions"],
            "Textiles"       => &["Textiles", "Fabrics", "Spinning Mills", "Apparels"],
            "Pharma"         => &["Pharma", "Life Sciences", "Laboratories", "Biotech"],
            "IT Services"    => &["Infotech", "Software", "Digital", "Systems"],
            "Agriculture"    => &["Agro", "Foods", "Agritech", "Harvest"],
            "Trading"        => &["Traders", "Exports", "Commodities", "Distributors"],
            "Energy"         => &["Power", "Renewables", "Energy", "Solar"],
            _                => &["Industries", "Enterprises", "Holdings", "Ventures"],
        };
        *rng.pick(words)
    }

    fn prefixes() -> &'static [&'static str] {
        &[
            "Premier", "Apex", "Coastal", "Deccan", "Eastern", "Everest", "Frontier",
            "Ganga", "Horizon", "Indus", "Meridian", "Northern", "Orbit", "Pinnacle",
            "Sahyadri", "Summit", "Sunrise", "Trident", "Unity", "Vanguard",
        ]
    }

    fn family_names() -> &'static [&'static str] {
        &[
            "Agarwal", "Bansal", "Bhatia", "Chopra", "Desai", "Gupta", "Iyer", "Jain",
            "Joshi", "Kapoor", "Khanna", "Kulkarni", "Malhotra", "Mehta", "Menon",
            "Nair", "Patel", "Rao", "Reddy", "Saxena", "Shah", "Sinha", "Verma",
        ]
    }

    fn company_suffixes() -> &'static [&'static str] {
        &["Ltd", "Pvt Ltd", "LLP", "Industries Ltd", "& Co"]
    }

    fn group_suffixes() -> &'static [&'static str] {
        &["Group", "Holdings", "Enterprises", "Conglomerate"]
    }
}
