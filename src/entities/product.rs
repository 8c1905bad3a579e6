use crate::catalog::ProductGroup;
use crate::errors::ServiceError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Warehouse product. One row per unique combination of group + identity
/// fields; the color/size/quantity tree lives in the `variants` JSON column,
/// preserving the nested document shape the ingestion pipeline merges into.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Short uppercase business identifier exposed to clients.
    #[sea_orm(unique)]
    pub product_ref: String,

    pub product_group: ProductGroup,
    pub group_image_url: Option<String>,

    pub category: Option<String>,
    pub category_image_url: Option<String>,
    pub sub_category: Option<String>,
    pub sub_category_image_url: Option<String>,
    pub gender: Option<String>,
    pub product_type: Option<String>,
    pub product_type_image_url: Option<String>,
    pub fit: Option<String>,
    pub neckline: Option<String>,
    pub sleeves: Option<String>,
    pub fabric: Option<String>,

    /// Unit price. Set on first insert; later ingestion rows never update it.
    pub price: Option<Decimal>,

    #[sea_orm(column_type = "Text", nullable)]
    pub product_details: Option<String>,

    /// Ordered `Vec<Variant>`, keyed by color name.
    #[sea_orm(column_type = "Json")]
    pub variants: Json,

    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Variant color with its display code, as stored inside the variants JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColorSpec {
    pub name: String,
    pub hex_code: Option<String>,
}

/// Per-size on-hand quantity within a variant. Quantities only grow through
/// ingestion; assignment and ordering are the flows that deduct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VariantSize {
    pub size: String,
    pub quantity: i32,
}

/// Color-specific sub-entry of a product, keyed by color name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Variant {
    pub variant_ref: String,
    pub color: ColorSpec,
    pub sizes: Vec<VariantSize>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Variant {
    pub fn size_entry(&self, size: &str) -> Option<&VariantSize> {
        self.sizes.iter().find(|entry| entry.size == size)
    }

    pub fn size_entry_mut(&mut self, size: &str) -> Option<&mut VariantSize> {
        self.sizes.iter_mut().find(|entry| entry.size == size)
    }
}

impl Model {
    /// Decodes the variants JSON column into its typed form.
    pub fn variant_list(&self) -> Result<Vec<Variant>, ServiceError> {
        serde_json::from_value(self.variants.clone()).map_err(|e| {
            ServiceError::InternalError(format!(
                "product {} has undecodable variants: {e}",
                self.product_ref
            ))
        })
    }

    pub fn variant_by_color<'a>(
        variants: &'a [Variant],
        color_name: &str,
    ) -> Option<&'a Variant> {
        variants
            .iter()
            .find(|variant| variant.color.name == color_name)
    }
}

/// Encodes a typed variant list back into the JSON column representation.
pub fn encode_variants(variants: &[Variant]) -> Result<Json, ServiceError> {
    serde_json::to_value(variants)
        .map_err(|e| ServiceError::InternalError(format!("failed to encode variants: {e}")))
}

/// Generates a short uppercase hex business ref, optionally prefixed
/// (products use the bare form, variants `VAR-`).
pub fn short_ref(prefix: &str) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| {
            let digit = rng.gen_range(0..16u8);
            char::from_digit(digit as u32, 16)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();
    format!("{prefix}{suffix}")
}
