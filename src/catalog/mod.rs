//! Static catalog definitions: the closed set of product groups, the
//! per-group structural schema used by CSV ingestion and merge validation,
//! and the color-name lookup table.
//!
//! All of this is pure data resolved at compile time. Group selection is an
//! exhaustive match on [`ProductGroup`], never a runtime lookup table.

mod colors;
mod groups;

pub use colors::hex_for_color;
pub use groups::{FieldSpec, GroupSchema, IdentityField};

use crate::errors::ServiceError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The six product lines carried by the warehouse. Each variant is bound to
/// its own schema; adding a group means adding a variant and the compiler
/// walks every dispatch site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ProductGroup {
    #[sea_orm(string_value = "HEAL")]
    #[serde(rename = "HEAL")]
    Heal,
    #[sea_orm(string_value = "SHIELD")]
    #[serde(rename = "SHIELD")]
    Shield,
    #[sea_orm(string_value = "ELITE")]
    #[serde(rename = "ELITE")]
    Elite,
    #[sea_orm(string_value = "TOGS")]
    #[serde(rename = "TOGS")]
    Togs,
    #[sea_orm(string_value = "SPIRIT")]
    #[serde(rename = "SPIRIT")]
    Spirit,
    #[sea_orm(string_value = "WORK WEAR UNIFORMS")]
    #[serde(rename = "WORK WEAR UNIFORMS")]
    WorkWear,
}

impl ProductGroup {
    pub const ALL: [ProductGroup; 6] = [
        ProductGroup::Heal,
        ProductGroup::Shield,
        ProductGroup::Elite,
        ProductGroup::Togs,
        ProductGroup::Spirit,
        ProductGroup::WorkWear,
    ];

    /// Canonical group name as it appears in CSV files and API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductGroup::Heal => "HEAL",
            ProductGroup::Shield => "SHIELD",
            ProductGroup::Elite => "ELITE",
            ProductGroup::Togs => "TOGS",
            ProductGroup::Spirit => "SPIRIT",
            ProductGroup::WorkWear => "WORK WEAR UNIFORMS",
        }
    }

    /// Resolves a group selector from a request path or CSV cell. Accepts
    /// `_` and `-` as space substitutes so URL segments like
    /// `WORK_WEAR_UNIFORMS` resolve too.
    pub fn parse(input: &str) -> Result<Self, ServiceError> {
        let normalized = input
            .trim()
            .to_ascii_uppercase()
            .replace(['_', '-'], " ");
        match normalized.as_str() {
            "HEAL" => Ok(ProductGroup::Heal),
            "SHIELD" => Ok(ProductGroup::Shield),
            "ELITE" => Ok(ProductGroup::Elite),
            "TOGS" => Ok(ProductGroup::Togs),
            "SPIRIT" => Ok(ProductGroup::Spirit),
            "WORK WEAR UNIFORMS" => Ok(ProductGroup::WorkWear),
            _ => Err(ServiceError::InvalidGroup(input.trim().to_string())),
        }
    }

    /// Structural schema for this group: identity fields, enumerated
    /// domains, defaults. Exhaustive by construction.
    pub fn schema(&self) -> &'static GroupSchema {
        match self {
            ProductGroup::Heal => &groups::HEAL,
            ProductGroup::Shield => &groups::SHIELD,
            ProductGroup::Elite => &groups::ELITE,
            ProductGroup::Togs => &groups::TOGS,
            ProductGroup::Spirit => &groups::SPIRIT,
            ProductGroup::WorkWear => &groups::WORK_WEAR,
        }
    }
}

impl std::fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case("HEAL", ProductGroup::Heal; "heal upper")]
    #[test_case("heal", ProductGroup::Heal; "heal lower")]
    #[test_case(" SHIELD ", ProductGroup::Shield; "shield padded")]
    #[test_case("WORK WEAR UNIFORMS", ProductGroup::WorkWear; "workwear spaces")]
    #[test_case("WORK_WEAR_UNIFORMS", ProductGroup::WorkWear; "workwear underscores")]
    #[test_case("work-wear-uniforms", ProductGroup::WorkWear; "workwear dashes")]
    fn parse_accepts_known_groups(input: &str, expected: ProductGroup) {
        assert_eq!(ProductGroup::parse(input).unwrap(), expected);
    }

    #[test]
    fn parse_rejects_unknown_group() {
        assert_matches!(
            ProductGroup::parse("CASUALS"),
            Err(ServiceError::InvalidGroup(name)) if name == "CASUALS"
        );
    }

    #[test]
    fn every_group_has_a_schema_with_required_category() {
        for group in ProductGroup::ALL {
            let schema = group.schema();
            assert_eq!(schema.group, group);
            assert!(!schema.default_color.is_empty());
            assert!(!schema.sizes.is_empty());
            let category = schema
                .field(IdentityField::Category)
                .expect("category is an identity field everywhere");
            assert!(category.required);
        }
    }

    #[test]
    fn schemas_disagree_on_identity_shape() {
        // SPIRIT and WORK WEAR key products without a sub-category;
        // the other four require one.
        assert!(ProductGroup::Spirit
            .schema()
            .field(IdentityField::SubCategory)
            .is_none());
        assert!(ProductGroup::Heal
            .schema()
            .field(IdentityField::SubCategory)
            .is_some());
    }
}
