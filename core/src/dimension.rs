//! Categorical dimensions an account can be filtered or sliced by.
//!
//! Adding a dimension means adding a variant, its key, and its accessor
//! here. Filtering and aggregation code never matches on dimension names.

use crate::{account::Account, error::DeskError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    Zone,
    Segment,
    ProductType,
    Lob,
    Industry,
    PartyType,
    ExternalRating,
    InternalRating,
    CreditStatus,
    AssetClassification,
    SecurityStatus,
    Branch,
    GroupName,
    ParentGroup,
}

impl Dimension {
    /// Stable key used in persisted filters and on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Region              => "region",
            Dimension::Zone                => "zone",
            Dimension::Segment             => "segment",
            Dimension::ProductType         => "product_type",
            Dimension::Lob                 => "lob",
            Dimension::Industry            => "industry",
            Dimension::PartyType           => "party_type",
            Dimension::ExternalRating      => "external_rating",
            Dimension::InternalRating      => "internal_rating",
            Dimension::CreditStatus        => "credit_status",
            Dimension::AssetClassification => "asset_classification",
            Dimension::SecurityStatus      => "security_status",
            Dimension::Branch              => "branch",
            Dimension::GroupName           => "group_name",
            Dimension::ParentGroup         => "parent_group",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Region              => "Region",
            Dimension::Zone                => "Zone",
            Dimension::Segment             => "Segment",
            Dimension::ProductType         => "Product Type",
            Dimension::Lob                 => "Line of Business",
            Dimension::Industry            => "Industry",
            Dimension::PartyType           => "Party Type",
            Dimension::ExternalRating      => "External Rating",
            Dimension::InternalRating      => "Internal Rating",
            Dimension::CreditStatus        => "Credit Status",
            Dimension::AssetClassification => "Asset Classification",
            Dimension::SecurityStatus      => "Security Status",
            Dimension::Branch              => "Branch",
            Dimension::GroupName           => "Group",
            Dimension::ParentGroup         => "Parent Group",
        }
    }

    /// Resolve a field name coming from a filter chip or a persisted filter.
    /// Accepts the snake_case key and the camelCase spelling used by the UI.
    /// Returns None for fields that no longer exist.
    pub fn from_key(key: &str) -> Option<Dimension> {
        let found = match key {
            "region"                                          => Dimension::Region,
            "zone"                                            => Dimension::Zone,
            "segment"                                         => Dimension::Segment,
            "product_type" | "productType" | "product"        => Dimension::ProductType,
            "lob"                                             => Dimension::Lob,
            "industry"                                        => Dimension::Industry,
            "party_type" | "partyType"                        => Dimension::PartyType,
            "external_rating" | "externalRating" | "rating"   => Dimension::ExternalRating,
            "internal_rating" | "internalRating"              => Dimension::InternalRating,
            "credit_status" | "creditStatus" | "status"       => Dimension::CreditStatus,
            "asset_classification" | "assetClassification"    => Dimension::AssetClassification,
            "security_status" | "securityStatus"              => Dimension::SecurityStatus,
            "branch"                                          => Dimension::Branch,
            "group_name" | "groupName" | "group"              => Dimension::GroupName,
            "parent_group" | "parentGroup"                    => Dimension::ParentGroup,
            _ => return None,
        };
        Some(found)
    }

    /// The account's value for this dimension.
    /// None only for optional fields that are absent on this account.
    pub fn value<'a>(&self, account: &'a Account) -> Option<&'a str> {
        let v = match self {
            Dimension::Region              => account.region.as_str(),
            Dimension::Zone                => account.zone.as_str(),
            Dimension::Segment             => account.segment.as_str(),
            Dimension::ProductType         => account.product_type.as_str(),
            Dimension::Lob                 => account.lob.as_str(),
            Dimension::Industry            => account.industry.as_str(),
            Dimension::PartyType           => account.party_type.as_str(),
            Dimension::ExternalRating      => account.external_rating.as_str(),
            Dimension::InternalRating      => account.internal_rating.as_str(),
            Dimension::CreditStatus        => account.credit_status.as_str(),
            Dimension::AssetClassification => account.asset_classification.as_str(),
            Dimension::SecurityStatus      => account.security_status.as_str(),
            Dimension::Branch              => account.branch.as_str(),
            Dimension::GroupName           => account.group_name.as_str(),
            Dimension::ParentGroup         => return account.parent_group.as_deref(),
        };
        Some(v)
    }

    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Region,
            Dimension::Zone,
            Dimension::Segment,
            Dimension::ProductType,
            Dimension::Lob,
            Dimension::Industry,
            Dimension::PartyType,
            Dimension::ExternalRating,
            Dimension::InternalRating,
            Dimension::CreditStatus,
            Dimension::AssetClassification,
            Dimension::SecurityStatus,
            Dimension::Branch,
            Dimension::GroupName,
            Dimension::ParentGroup,
        ]
    }
}

impl FromStr for Dimension {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::from_key(s).ok_or_else(|| DeskError::UnknownDimension { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_back() {
        for d in Dimension::all() {
            assert_eq!(Dimension::from_key(d.key()), Some(*d));
        }
        assert_eq!(Dimension::all().len(), 15);
    }

    #[test]
    fn ui_spellings_and_unknown_keys() {
        assert_eq!("partyType".parse::<Dimension>().ok(), Some(Dimension::PartyType));
        assert_eq!(Dimension::from_key("rating"), Some(Dimension::ExternalRating));
        assert!(matches!(
            "retired".parse::<Dimension>(),
            Err(DeskError::UnknownDimension { .. })
        ));
    }
}
