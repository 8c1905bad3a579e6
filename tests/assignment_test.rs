mod common;

use assert_matches::assert_matches;
use common::{heal_csv, heal_row, TestApp};
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use uniform_api::catalog::ProductGroup;
use uniform_api::entities::assigned_history::AssignmentStatus;
use uniform_api::entities::{AssignedHistory, Product};
use uniform_api::errors::ServiceError;
use uniform_api::services::assignments::AssignmentLine;
use uniform_api::services::stores::CreateStoreInput;
use uuid::Uuid;

fn store_input(name: &str, email: &str) -> CreateStoreInput {
    CreateStoreInput {
        name: name.to_string(),
        address: "12 Market Road".to_string(),
        city: "Hyderabad".to_string(),
        state: "Telangana".to_string(),
        pincode: "500001".to_string(),
        commission_percentage: Some(dec!(5)),
        contact_name: "Asha Rao".to_string(),
        contact_email: email.to_string(),
        contact_phone: Some("+91-9000000000".to_string()),
    }
}

/// Uploads one BLACK/M x10 @500 HEAL product and returns its id.
async fn seed_product(app: &TestApp) -> Uuid {
    app.services
        .bulk_uploads
        .process_csv(ProductGroup::Heal, &heal_csv(&[&heal_row("BLACK", "M", "10", "500")]))
        .await
        .expect("seed upload");
    Product::find()
        .one(&*app.db)
        .await
        .expect("product query")
        .expect("seeded product")
        .id
}

async fn stock_of(app: &TestApp, product_id: Uuid, color: &str, size: &str) -> i32 {
    let product = Product::find_by_id(product_id)
        .one(&*app.db)
        .await
        .expect("product query")
        .expect("product exists");
    let variants = product.variant_list().unwrap();
    let variant = variants.iter().find(|v| v.color.name == color).unwrap();
    variant.size_entry(size).unwrap().quantity
}

#[tokio::test]
async fn assignment_deducts_stock_and_records_priced_history() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let store = app
        .services
        .stores
        .create_store(store_input("City Centre", "city@stores.example"))
        .await
        .expect("store created");

    let entry = app
        .services
        .assignments
        .assign_to_store(
            store.id,
            vec![AssignmentLine {
                product_id,
                color: "BLACK".to_string(),
                size: "M".to_string(),
                quantity: 4,
            }],
        )
        .await
        .expect("assignment commits");

    assert_eq!(entry.total_amount, dec!(2000));
    assert_eq!(entry.status, AssignmentStatus::Assigned);
    assert_eq!(stock_of(&app, product_id, "BLACK", "M").await, 6);

    let items = entry.item_list().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity_assigned, 4);
    assert_eq!(items[0].unit_price, dec!(500));

    let listed = app
        .services
        .assignments
        .list_for_store(store.id)
        .await
        .expect("listing");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn insufficient_stock_rolls_back_every_line() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let store = app
        .services
        .stores
        .create_store(store_input("Mall Branch", "mall@stores.example"))
        .await
        .expect("store created");

    let err = app
        .services
        .assignments
        .assign_to_store(
            store.id,
            vec![
                AssignmentLine {
                    product_id,
                    color: "BLACK".to_string(),
                    size: "M".to_string(),
                    quantity: 2,
                },
                AssignmentLine {
                    product_id,
                    color: "BLACK".to_string(),
                    size: "M".to_string(),
                    quantity: 50,
                },
            ],
        )
        .await
        .expect_err("second line exceeds stock");
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // The first line's deduction must not survive.
    assert_eq!(stock_of(&app, product_id, "BLACK", "M").await, 10);
    assert!(AssignedHistory::find()
        .all(&*app.db)
        .await
        .expect("history query")
        .is_empty());
}

#[tokio::test]
async fn sequential_lines_deduct_from_the_same_product() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let store = app
        .services
        .stores
        .create_store(store_input("Outlet", "outlet@stores.example"))
        .await
        .expect("store created");

    let entry = app
        .services
        .assignments
        .assign_to_store(
            store.id,
            vec![
                AssignmentLine {
                    product_id,
                    color: "BLACK".to_string(),
                    size: "M".to_string(),
                    quantity: 3,
                },
                AssignmentLine {
                    product_id,
                    color: "BLACK".to_string(),
                    size: "M".to_string(),
                    quantity: 3,
                },
            ],
        )
        .await
        .expect("both lines fit");

    assert_eq!(entry.total_amount, dec!(3000));
    assert_eq!(stock_of(&app, product_id, "BLACK", "M").await, 4);
}

#[tokio::test]
async fn receive_transitions_exactly_once() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let store = app
        .services
        .stores
        .create_store(store_input("Receiving", "receiving@stores.example"))
        .await
        .expect("store created");
    let entry = app
        .services
        .assignments
        .assign_to_store(
            store.id,
            vec![AssignmentLine {
                product_id,
                color: "BLACK".to_string(),
                size: "M".to_string(),
                quantity: 1,
            }],
        )
        .await
        .expect("assignment commits");

    let received = app
        .services
        .assignments
        .mark_received(entry.id)
        .await
        .expect("first receive");
    assert_eq!(received.status, AssignmentStatus::Received);
    assert!(received.received_at.is_some());

    let err = app
        .services
        .assignments
        .mark_received(entry.id)
        .await
        .expect_err("second receive must fail");
    assert_matches!(err, ServiceError::InvalidOperation(_));
}

#[tokio::test]
async fn duplicate_store_name_and_address_conflicts() {
    let app = TestApp::new().await;
    app.services
        .stores
        .create_store(store_input("Twin", "first@stores.example"))
        .await
        .expect("first store");

    let err = app
        .services
        .stores
        .create_store(store_input("Twin", "second@stores.example"))
        .await
        .expect_err("same name+address must conflict");
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn assigning_unknown_stock_is_not_found() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let store = app
        .services
        .stores
        .create_store(store_input("Strict", "strict@stores.example"))
        .await
        .expect("store created");

    let err = app
        .services
        .assignments
        .assign_to_store(
            store.id,
            vec![AssignmentLine {
                product_id,
                color: "WHITE".to_string(),
                size: "M".to_string(),
                quantity: 1,
            }],
        )
        .await
        .expect_err("color does not exist");
    assert_matches!(err, ServiceError::NotFound(_));
}
