//! Variant merge engine. Each normalized row either creates a product or
//! merges its color/size/quantity into an existing one, with additive
//! quantity semantics. Every persistence step runs on the caller's
//! transaction; the engine never commits.

use crate::catalog::{GroupSchema, IdentityField, ProductGroup};
use crate::entities::product::{
    self, encode_variants, short_ref, ColorSpec, Variant, VariantSize,
};
use crate::entities::Product;
use crate::errors::ServiceError;
use crate::ingestion::parser::NormalizedRow;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Select, Set,
};
use uuid::Uuid;

/// Net effect of merging one row: which product was touched, whether it was
/// created, and the quantity delta applied to one (color, size) slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub product_id: Uuid,
    pub product_group: ProductGroup,
    pub created: bool,
    pub color: ColorSpec,
    pub size: String,
    pub quantity_delta: i32,
}

/// Merges one normalized row into the product store.
///
/// Lookup is an exact equality match on the group plus every identity field
/// the group's schema declares; partial matches never count. Matching on
/// color and size is case-sensitive (parsing already uppercased both).
pub async fn merge_row<C: ConnectionTrait>(
    conn: &C,
    row: &NormalizedRow,
) -> Result<MergeOutcome, ServiceError> {
    let schema = row.group.schema();
    validate_against_schema(schema, row)?;

    let existing = identity_query(schema, row).one(conn).await?;

    match existing {
        None => insert_product(conn, row).await,
        Some(model) => merge_into_existing(conn, row, model).await,
    }
}

/// Enumerated-domain validation, deferred from parse time to here where the
/// schema is already in hand.
fn validate_against_schema(schema: &GroupSchema, row: &NormalizedRow) -> Result<(), ServiceError> {
    for spec in schema.identity_fields {
        match row.identity.get(spec.field) {
            None if spec.required => {
                return Err(ServiceError::ValidationError(format!(
                    "line {}: {} requires a value for {}",
                    row.line,
                    schema.group,
                    spec.field.column_name()
                )));
            }
            Some(value) => {
                if let Some(domain) = spec.domain {
                    if !domain.contains(&value) {
                        return Err(ServiceError::SchemaViolation(format!(
                            "line {}: '{value}' is not a legal {} for {}",
                            row.line,
                            spec.field.column_name(),
                            schema.group
                        )));
                    }
                }
            }
            None => {}
        }
    }

    if !schema.sizes.contains(&row.size.as_str()) {
        return Err(ServiceError::SchemaViolation(format!(
            "line {}: '{}' is not a legal size for {}",
            row.line, row.size, schema.group
        )));
    }

    Ok(())
}

/// Exact-match product lookup over group + declared identity fields.
/// A field the schema leaves unset must be NULL on the row too.
fn identity_query(schema: &GroupSchema, row: &NormalizedRow) -> Select<Product> {
    let mut query = Product::find()
        .filter(product::Column::ProductGroup.eq(row.group))
        .filter(product::Column::IsDeleted.eq(false));
    for spec in schema.identity_fields {
        query = filter_identity(query, spec.field, row.identity.get(spec.field));
    }
    query
}

fn filter_identity(
    query: Select<Product>,
    field: IdentityField,
    value: Option<&str>,
) -> Select<Product> {
    let column = match field {
        IdentityField::Category => product::Column::Category,
        IdentityField::SubCategory => product::Column::SubCategory,
        IdentityField::Gender => product::Column::Gender,
        IdentityField::ProductType => product::Column::ProductType,
        IdentityField::Fit => product::Column::Fit,
        IdentityField::Neckline => product::Column::Neckline,
        IdentityField::Sleeves => product::Column::Sleeves,
        IdentityField::Fabric => product::Column::Fabric,
    };
    match value {
        Some(value) => query.filter(column.eq(value)),
        None => query.filter(column.is_null()),
    }
}

async fn insert_product<C: ConnectionTrait>(
    conn: &C,
    row: &NormalizedRow,
) -> Result<MergeOutcome, ServiceError> {
    let unit_price = row.unit_price.ok_or_else(|| {
        ServiceError::ValidationError(format!(
            "line {}: price is required when a row introduces a new product",
            row.line
        ))
    })?;

    let variant = Variant {
        variant_ref: short_ref("VAR-"),
        color: row.color.clone(),
        sizes: vec![VariantSize {
            size: row.size.clone(),
            quantity: row.quantity,
        }],
        image_urls: row.image_urls.clone(),
        is_deleted: false,
    };

    let now = Utc::now();
    let model = product::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_ref: Set(short_ref("")),
        product_group: Set(row.group),
        group_image_url: Set(row.group_image_url.clone()),
        category: Set(row.identity.category.clone()),
        category_image_url: Set(row.identity.category_image_url.clone()),
        sub_category: Set(row.identity.sub_category.clone()),
        sub_category_image_url: Set(row.identity.sub_category_image_url.clone()),
        gender: Set(row.identity.gender.clone()),
        product_type: Set(row.identity.product_type.clone()),
        product_type_image_url: Set(row.identity.product_type_image_url.clone()),
        fit: Set(row.identity.fit.clone()),
        neckline: Set(row.identity.neckline.clone()),
        sleeves: Set(row.identity.sleeves.clone()),
        fabric: Set(row.identity.fabric.clone()),
        price: Set(Some(unit_price)),
        product_details: Set(row.product_details.clone()),
        variants: Set(encode_variants(&[variant])?),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    Ok(MergeOutcome {
        product_id: model.id,
        product_group: row.group,
        created: true,
        color: row.color.clone(),
        size: row.size.clone(),
        quantity_delta: row.quantity,
    })
}

async fn merge_into_existing<C: ConnectionTrait>(
    conn: &C,
    row: &NormalizedRow,
    model: product::Model,
) -> Result<MergeOutcome, ServiceError> {
    let product_id = model.id;
    let mut variants = model.variant_list()?;

    if let Some(variant) = variants
        .iter_mut()
        .find(|v| v.color.name == row.color.name)
    {
        match variant.size_entry_mut(&row.size) {
            Some(entry) => {
                entry.quantity = entry.quantity.checked_add(row.quantity).ok_or_else(|| {
                    ServiceError::ValidationError(format!(
                        "line {}: quantity for {}/{} overflows",
                        row.line, row.color.name, row.size
                    ))
                })?;
            }
            None => variant.sizes.push(VariantSize {
                size: row.size.clone(),
                quantity: row.quantity,
            }),
        }
    } else {
        // New color for this product: append a whole variant.
        variants.push(Variant {
            variant_ref: short_ref("VAR-"),
            color: row.color.clone(),
            sizes: vec![VariantSize {
                size: row.size.clone(),
                quantity: row.quantity,
            }],
            image_urls: row.image_urls.clone(),
            is_deleted: false,
        });
    }

    // The unit price is deliberately left untouched: the first-insert price
    // wins and repricing goes through the explicit product-update flow.
    let mut active: product::ActiveModel = model.into();
    active.variants = Set(encode_variants(&variants)?);
    active.updated_at = Set(Utc::now());
    active.update(conn).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => ServiceError::MergeInconsistency(format!(
            "product {product_id} vanished between lookup and update"
        )),
        other => ServiceError::DatabaseError(other),
    })?;

    Ok(MergeOutcome {
        product_id,
        product_group: row.group,
        created: false,
        color: row.color.clone(),
        size: row.size.clone(),
        quantity_delta: row.quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::parser::IdentityValues;
    use assert_matches::assert_matches;

    fn heal_row() -> NormalizedRow {
        NormalizedRow {
            line: 2,
            group: ProductGroup::Heal,
            group_image_url: None,
            identity: IdentityValues {
                category: Some("COATS".into()),
                sub_category: Some("MEDICAL COATS".into()),
                gender: Some("UNISEX".into()),
                product_type: Some("SHORT COATS".into()),
                fit: Some("CLASSIC".into()),
                fabric: Some("LAB COATS".into()),
                ..Default::default()
            },
            color: ColorSpec {
                name: "BLACK".into(),
                hex_code: Some("#000000".into()),
            },
            size: "M".into(),
            quantity: 10,
            unit_price: Some(rust_decimal_macros::dec!(500)),
            product_details: None,
            image_urls: vec![],
        }
    }

    #[test]
    fn schema_validation_accepts_a_well_formed_row() {
        let row = heal_row();
        assert!(validate_against_schema(row.group.schema(), &row).is_ok());
    }

    #[test]
    fn value_outside_domain_is_a_schema_violation() {
        let mut row = heal_row();
        row.identity.gender = Some("KIDS".into());
        assert_matches!(
            validate_against_schema(row.group.schema(), &row),
            Err(ServiceError::SchemaViolation(msg)) if msg.contains("KIDS")
        );
    }

    #[test]
    fn missing_required_field_is_a_validation_error() {
        let mut row = heal_row();
        row.identity.fabric = None;
        assert_matches!(
            validate_against_schema(row.group.schema(), &row),
            Err(ServiceError::ValidationError(msg)) if msg.contains("fabric")
        );
    }

    #[test]
    fn illegal_size_is_a_schema_violation() {
        let mut row = heal_row();
        row.size = "XXXL".into();
        assert_matches!(
            validate_against_schema(row.group.schema(), &row),
            Err(ServiceError::SchemaViolation(msg)) if msg.contains("XXXL")
        );
    }

    #[test]
    fn colors_are_not_domain_checked() {
        // New shades arrive through uploads; only identity fields and sizes
        // are held to the schema.
        let mut row = heal_row();
        row.color.name = "NEW SEASON TEAL".into();
        assert!(validate_against_schema(row.group.schema(), &row).is_ok());
    }

    #[test]
    fn togs_accepts_numeric_sizes_only() {
        let mut row = heal_row();
        row.group = ProductGroup::Togs;
        row.identity = IdentityValues {
            category: Some("SCHOOL UNIFORMS".into()),
            sub_category: Some("SPORTS UNIFORMS".into()),
            gender: Some("BOY".into()),
            product_type: Some("SHORTS".into()),
            fit: Some("CLASSIC".into()),
            ..Default::default()
        };
        row.color.name = "HOUSE RED".into();
        row.size = "30".into();
        assert!(validate_against_schema(row.group.schema(), &row).is_ok());

        row.size = "M".into();
        assert_matches!(
            validate_against_schema(row.group.schema(), &row),
            Err(ServiceError::SchemaViolation(_))
        );
    }
}
