//! Read side of the product catalog: browse a group with equality filters
//! and fetch a single product with its per-color availability.

use crate::catalog::ProductGroup;
use crate::entities::product::{self, ColorSpec, Variant};
use crate::entities::Product;
use crate::errors::ServiceError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Equality filters over a group's identity fields. Absent fields do not
/// constrain the listing.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub gender: Option<String>,
    pub product_type: Option<String>,
    pub fit: Option<String>,
    /// Restrict the returned variants to one color name.
    pub color: Option<String>,
}

/// API-facing projection of a product row with decoded variants.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductView {
    pub id: Uuid,
    pub product_ref: String,
    pub product_group: ProductGroup,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub gender: Option<String>,
    pub product_type: Option<String>,
    pub fit: Option<String>,
    pub neckline: Option<String>,
    pub sleeves: Option<String>,
    pub fabric: Option<String>,
    pub price: Option<Decimal>,
    pub product_details: Option<String>,
    pub variants: Vec<Variant>,
    /// Colors with live stock, across all variants of the product.
    pub available_colors: Vec<ColorSpec>,
    /// The group's full catalog palette, for swatch pickers. Empty when the
    /// group's palette is open-ended.
    pub all_colors: Vec<ColorSpec>,
    /// The group's size ladder.
    pub all_sizes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProductCatalogService {
    db: Arc<DatabaseConnection>,
}

impl ProductCatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        group: ProductGroup,
        filter: ProductFilter,
    ) -> Result<Vec<ProductView>, ServiceError> {
        let models = filtered_query(group, &filter)
            .order_by_asc(product::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let color_filter = filter.color.map(|c| c.trim().to_uppercase());
        models
            .into_iter()
            .map(|model| into_view(model, color_filter.as_deref()))
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn get_product(
        &self,
        group: ProductGroup,
        product_ref: &str,
    ) -> Result<ProductView, ServiceError> {
        let model = Product::find()
            .filter(product::Column::ProductGroup.eq(group))
            .filter(product::Column::ProductRef.eq(product_ref))
            .filter(product::Column::IsDeleted.eq(false))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product {product_ref} not found in {group}"))
            })?;
        into_view(model, None)
    }
}

fn filtered_query(group: ProductGroup, filter: &ProductFilter) -> Select<Product> {
    let mut query = Product::find()
        .filter(product::Column::ProductGroup.eq(group))
        .filter(product::Column::IsDeleted.eq(false));

    let fields = [
        (product::Column::Category, &filter.category),
        (product::Column::SubCategory, &filter.sub_category),
        (product::Column::Gender, &filter.gender),
        (product::Column::ProductType, &filter.product_type),
        (product::Column::Fit, &filter.fit),
    ];
    for (column, value) in fields {
        if let Some(value) = value {
            query = query.filter(column.eq(value.trim().to_uppercase()));
        }
    }
    query
}

fn into_view(model: product::Model, color: Option<&str>) -> Result<ProductView, ServiceError> {
    let mut variants: Vec<Variant> = model
        .variant_list()?
        .into_iter()
        .filter(|v| !v.is_deleted)
        .collect();

    let available_colors = variants
        .iter()
        .filter(|v| v.sizes.iter().any(|s| s.quantity > 0))
        .map(|v| v.color.clone())
        .collect();

    if let Some(color) = color {
        variants.retain(|v| v.color.name == color);
    }

    let schema = model.product_group.schema();
    let all_colors = schema
        .colors
        .unwrap_or_default()
        .iter()
        .map(|name| ColorSpec {
            name: (*name).to_string(),
            hex_code: crate::catalog::hex_for_color(name).map(str::to_string),
        })
        .collect();
    let all_sizes = schema.sizes.iter().map(|s| (*s).to_string()).collect();

    Ok(ProductView {
        id: model.id,
        product_ref: model.product_ref,
        product_group: model.product_group,
        category: model.category,
        sub_category: model.sub_category,
        gender: model.gender,
        product_type: model.product_type,
        fit: model.fit,
        neckline: model.neckline,
        sleeves: model.sleeves,
        fabric: model.fabric,
        price: model.price,
        product_details: model.product_details,
        variants,
        available_colors,
        all_colors,
        all_sizes,
        created_at: model.created_at,
    })
}
