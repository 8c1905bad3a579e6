mod common;

use assert_matches::assert_matches;
use common::{heal_csv, heal_row, TestApp};
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use uniform_api::catalog::ProductGroup;
use uniform_api::entities::{product, Product, UploadHistory};
use uniform_api::errors::ServiceError;

async fn all_products(app: &TestApp) -> Vec<product::Model> {
    Product::find().all(&*app.db).await.expect("product query")
}

async fn upload_count(app: &TestApp) -> usize {
    UploadHistory::find()
        .all(&*app.db)
        .await
        .expect("ledger query")
        .len()
}

#[tokio::test]
async fn same_triple_sums_within_one_batch() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[
        &heal_row("BLACK", "M", "10", "500"),
        &heal_row("BLACK", "M", "5", "500"),
    ]);

    let receipt = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect("batch commits");

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.message, "Data processed successfully.");
    assert_eq!(receipt.total_amount, dec!(7500));

    let products = all_products(&app).await;
    assert_eq!(products.len(), 1);
    let variants = products[0].variant_list().unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].color.name, "BLACK");
    assert_eq!(variants[0].sizes.len(), 1);
    assert_eq!(variants[0].sizes[0].size, "M");
    assert_eq!(variants[0].sizes[0].quantity, 15);
}

#[tokio::test]
async fn two_colors_one_product_two_variants() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[
        &heal_row("BLACK", "M", "10", "500"),
        &heal_row("WHITE", "M", "7", "500"),
    ]);

    let receipt = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect("batch commits");
    assert_eq!(receipt.total_amount, dec!(8500)); // (10 + 7) x 500

    let products = all_products(&app).await;
    assert_eq!(products.len(), 1);
    let variants = products[0].variant_list().unwrap();
    assert_eq!(variants.len(), 2);
}

#[tokio::test]
async fn re_merging_the_same_row_across_batches_is_additive() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[&heal_row("BLACK", "M", "10", "500")]);

    for _ in 0..2 {
        app.services
            .bulk_uploads
            .process_csv(ProductGroup::Heal, &csv)
            .await
            .expect("batch commits");
    }

    let products = all_products(&app).await;
    assert_eq!(products.len(), 1);
    let variants = products[0].variant_list().unwrap();
    assert_eq!(variants[0].sizes[0].quantity, 20);
    assert_eq!(upload_count(&app).await, 2);
}

#[tokio::test]
async fn new_color_never_mutates_existing_colors() {
    let app = TestApp::new().await;
    app.services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &heal_csv(&[&heal_row("BLACK", "M", "10", "500")]))
        .await
        .expect("first batch");

    app.services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &heal_csv(&[&heal_row("WHITE", "M", "7", "500")]))
        .await
        .expect("second batch");

    let products = all_products(&app).await;
    let variants = products[0].variant_list().unwrap();
    let black = variants.iter().find(|v| v.color.name == "BLACK").unwrap();
    let white = variants.iter().find(|v| v.color.name == "WHITE").unwrap();
    assert_eq!(black.sizes[0].quantity, 10);
    assert_eq!(white.sizes[0].quantity, 7);
}

#[tokio::test]
async fn malformed_quantity_rolls_back_the_whole_batch() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[
        &heal_row("BLACK", "M", "10", "500"),
        &heal_row("BLACK", "L", "abc", "500"),
        &heal_row("WHITE", "S", "4", "500"),
    ]);

    let err = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect_err("batch must abort");
    assert_matches!(err, ServiceError::RowParse { line: 3, .. });

    // Nothing from rows 1 or 3 survives.
    assert!(all_products(&app).await.is_empty());
    assert_eq!(upload_count(&app).await, 0);
}

#[tokio::test]
async fn identity_value_outside_group_domain_aborts_and_rolls_back() {
    let app = TestApp::new().await;
    let bad_gender = heal_row("WHITE", "M", "5", "500").replace("WOMEN", "KIDS");
    let rows = [heal_row("BLACK", "M", "10", "500"), bad_gender];
    let csv = heal_csv(&[&rows[0], &rows[1]]);

    let err = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect_err("batch must abort");
    assert_matches!(err, ServiceError::SchemaViolation(msg) if msg.contains("KIDS"));
    assert!(all_products(&app).await.is_empty());
}

#[tokio::test]
async fn illegal_size_aborts_and_rolls_back() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[
        &heal_row("BLACK", "M", "10", "500"),
        &heal_row("BLACK", "XXXL", "5", "500"),
    ]);

    let err = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect_err("batch must abort");
    assert_matches!(err, ServiceError::SchemaViolation(msg) if msg.contains("XXXL"));
    assert!(all_products(&app).await.is_empty());
}

#[tokio::test]
async fn key_uniqueness_holds_after_any_merge_sequence() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[
        &heal_row("BLACK", "M", "1", "500"),
        &heal_row("BLACK", "M", "2", "500"),
        &heal_row("BLACK", "L", "3", "500"),
        &heal_row("WHITE", "M", "4", "500"),
        &heal_row("WHITE", "M", "5", "500"),
    ]);
    app.services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect("batch commits");

    let products = all_products(&app).await;
    assert_eq!(products.len(), 1);
    let variants = products[0].variant_list().unwrap();

    let mut colors: Vec<_> = variants.iter().map(|v| v.color.name.clone()).collect();
    colors.sort();
    colors.dedup();
    assert_eq!(colors.len(), variants.len(), "one variant per color");

    for variant in &variants {
        let mut sizes: Vec<_> = variant.sizes.iter().map(|s| s.size.clone()).collect();
        sizes.sort();
        sizes.dedup();
        assert_eq!(sizes.len(), variant.sizes.len(), "one entry per size");
    }
}

#[tokio::test]
async fn ledger_total_matches_deltas_times_prices() {
    let app = TestApp::new().await;
    // Two products with different prices in one batch.
    let mut rows = vec![
        heal_row("BLACK", "M", "10", "500"),
        heal_row("BLACK", "M", "5", "500"),
    ];
    let other = heal_row("BLACK", "S", "3", "250")
        .replace("NURSE SCRUB SETS", "REGULAR SCRUB SETS");
    rows.push(other);
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let csv = heal_csv(&refs);

    let receipt = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect("batch commits");

    // 15 x 500 + 3 x 250
    assert_eq!(receipt.total_amount, dec!(8250));

    let detail = app
        .services
        .upload_history
        .get(receipt.upload_id)
        .await
        .expect("detail");
    assert_eq!(detail.total_amount, dec!(8250));
    assert_eq!(detail.total_price, dec!(8250));
    assert_eq!(detail.items.len(), 2);
}

#[tokio::test]
async fn empty_document_records_a_zero_total_ledger_entry() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[]);

    let receipt = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect("empty batch is valid");
    assert_eq!(receipt.total_amount, dec!(0));

    let detail = app
        .services
        .upload_history
        .get(receipt.upload_id)
        .await
        .expect("detail");
    assert!(detail.items.is_empty());
}

#[tokio::test]
async fn later_rows_never_reprice_a_product() {
    let app = TestApp::new().await;
    app.services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &heal_csv(&[&heal_row("BLACK", "M", "10", "500")]))
        .await
        .expect("first batch");

    let receipt = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &heal_csv(&[&heal_row("BLACK", "M", "5", "999")]))
        .await
        .expect("second batch");

    let products = all_products(&app).await;
    assert_eq!(products[0].price, Some(dec!(500)));
    // The second batch's deltas are valued at the sticky price too.
    assert_eq!(receipt.total_amount, dec!(2500));
}

#[tokio::test]
async fn first_insert_without_price_is_rejected() {
    let app = TestApp::new().await;
    let csv = heal_csv(&[&heal_row("BLACK", "M", "10", "")]);

    let err = app
        .services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &csv)
        .await
        .expect_err("unpriced first insert must fail");
    assert_matches!(err, ServiceError::ValidationError(_));
    assert!(all_products(&app).await.is_empty());
}

#[tokio::test]
async fn upload_history_lists_newest_first() {
    let app = TestApp::new().await;
    for quantity in ["1", "2"] {
        app.services
            .bulk_uploads
            .process_csv(
                ProductGroup::Heal,
                &heal_csv(&[&heal_row("BLACK", "M", quantity, "500")]),
            )
            .await
            .expect("batch commits");
    }

    let summaries = app.services.upload_history.list().await.expect("list");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].total_amount, dec!(1000));
    assert_eq!(summaries[1].total_amount, dec!(500));
}
