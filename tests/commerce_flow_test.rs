mod common;

use assert_matches::assert_matches;
use common::{heal_csv, heal_row, TestApp};
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use uniform_api::catalog::ProductGroup;
use uniform_api::entities::order::DeliveryStatus;
use uniform_api::entities::{Order, Product};
use uniform_api::errors::ServiceError;
use uniform_api::services::customers::{AddToCartInput, AddToWishlistInput, CreateCustomerInput};
use uniform_api::services::orders::CreateOrderInput;
use uniform_api::services::products::ProductFilter;
use uuid::Uuid;

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

async fn seed_customer(app: &TestApp, email: &str) -> Uuid {
    app.services
        .customers
        .create_customer(CreateCustomerInput {
            email: email.to_string(),
            name: "Test Customer".to_string(),
            phone: None,
        })
        .await
        .expect("customer created")
        .id
}

async fn stock_of(app: &TestApp, product_id: Uuid) -> i32 {
    let product = Product::find_by_id(product_id)
        .one(&*app.db)
        .await
        .expect("product query")
        .expect("product exists");
    let variants = product.variant_list().unwrap();
    variants[0].size_entry("M").unwrap().quantity
}

#[tokio::test]
async fn catalog_lists_products_with_availability() {
    let app = TestApp::new().await;
    seed_product(&app).await;

    let products = app
        .services
        .products
        .list_products(
            ProductGroup::Heal,
            ProductFilter {
                category: Some("scrubs".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("listing");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].available_colors.len(), 1);
    assert_eq!(products[0].available_colors[0].name, "BLACK");

    let detail = app
        .services
        .products
        .get_product(ProductGroup::Heal, &products[0].product_ref)
        .await
        .expect("detail");
    assert_eq!(detail.price, Some(dec!(500)));

    // A filter that matches nothing returns an empty listing.
    let none = app
        .services
        .products
        .list_products(
            ProductGroup::Heal,
            ProductFilter {
                gender: Some("MEN".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("listing");
    assert!(none.is_empty());
}

#[tokio::test]
async fn cart_lines_merge_additively_on_the_same_key() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "cart@example.com").await;

    for quantity in [2, 3] {
        app.services
            .customers
            .add_to_cart(
                customer_id,
                AddToCartInput {
                    product_id,
                    color: "black".to_string(),
                    size: "m".to_string(),
                    quantity,
                },
            )
            .await
            .expect("cart add");
    }

    let cart = app.services.customers.get_cart(customer_id).await.expect("cart");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 5);
    assert_eq!(cart[0].color.name, "BLACK");
    assert_eq!(cart[0].color.hex_code.as_deref(), Some("#000000"));
}

#[tokio::test]
async fn cart_update_and_removal() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "edit@example.com").await;

    let item = app
        .services
        .customers
        .add_to_cart(
            customer_id,
            AddToCartInput {
                product_id,
                color: "BLACK".to_string(),
                size: "M".to_string(),
                quantity: 2,
            },
        )
        .await
        .expect("cart add");

    let cart = app
        .services
        .customers
        .update_cart_item(customer_id, item.item_id, 7)
        .await
        .expect("update");
    assert_eq!(cart[0].quantity, 7);

    let cart = app
        .services
        .customers
        .remove_cart_item(customer_id, item.item_id)
        .await
        .expect("remove");
    assert!(cart.is_empty());
}

#[tokio::test]
async fn wishlist_is_idempotent_on_the_same_key() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "wish@example.com").await;

    let first = app
        .services
        .customers
        .add_to_wishlist(
            customer_id,
            AddToWishlistInput {
                product_id,
                color: "BLACK".to_string(),
                size: "M".to_string(),
            },
        )
        .await
        .expect("wishlist add");
    let second = app
        .services
        .customers
        .add_to_wishlist(
            customer_id,
            AddToWishlistInput {
                product_id,
                color: "BLACK".to_string(),
                size: "M".to_string(),
            },
        )
        .await
        .expect("repeat add");
    assert_eq!(first.item_id, second.item_id);

    let wishlist = app
        .services
        .customers
        .get_wishlist(customer_id)
        .await
        .expect("wishlist");
    assert_eq!(wishlist.len(), 1);
}

#[tokio::test]
async fn duplicate_customer_email_conflicts() {
    let app = TestApp::new().await;
    seed_customer(&app, "dup@example.com").await;

    let err = app
        .services
        .customers
        .create_customer(CreateCustomerInput {
            email: "dup@example.com".to_string(),
            name: "Other".to_string(),
            phone: None,
        })
        .await
        .expect_err("duplicate email");
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn order_deducts_stock_and_prices_the_line() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "order@example.com").await;

    let order = app
        .services
        .orders
        .create_order(CreateOrderInput {
            customer_id,
            product_id,
            color: "BLACK".to_string(),
            size: "M".to_string(),
            quantity: 3,
            delivery_charges: Some(dec!(50)),
            discount_percentage: Some(dec!(10)),
        })
        .await
        .expect("order placed");

    // 3 x 500 = 1500, minus 10% = 1350, plus 50 delivery
    assert_eq!(order.total_price, dec!(1400));
    assert_eq!(order.delivery_status, DeliveryStatus::Pending);
    assert_eq!(stock_of(&app, product_id).await, 7);

    let listed = app
        .services
        .orders
        .list_for_customer(customer_id)
        .await
        .expect("orders");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn order_beyond_stock_fails_and_changes_nothing() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "greedy@example.com").await;

    let err = app
        .services
        .orders
        .create_order(CreateOrderInput {
            customer_id,
            product_id,
            color: "BLACK".to_string(),
            size: "M".to_string(),
            quantity: 100,
            delivery_charges: None,
            discount_percentage: None,
        })
        .await
        .expect_err("stock too low");
    assert_matches!(err, ServiceError::InsufficientStock(_));

    assert_eq!(stock_of(&app, product_id).await, 10);
    assert!(Order::find().all(&*app.db).await.expect("orders").is_empty());
}

#[tokio::test]
async fn cancelling_an_undelivered_order_restocks() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "cancel@example.com").await;

    let order = app
        .services
        .orders
        .create_order(CreateOrderInput {
            customer_id,
            product_id,
            color: "BLACK".to_string(),
            size: "M".to_string(),
            quantity: 4,
            delivery_charges: None,
            discount_percentage: None,
        })
        .await
        .expect("order placed");
    assert_eq!(stock_of(&app, product_id).await, 6);

    let cancelled = app
        .services
        .orders
        .update_delivery_status(order.id, DeliveryStatus::Cancelled)
        .await
        .expect("cancel");
    assert_eq!(cancelled.delivery_status, DeliveryStatus::Cancelled);
    assert_eq!(stock_of(&app, product_id).await, 10);
}

#[tokio::test]
async fn delivered_orders_cannot_be_cancelled() {
    let app = TestApp::new().await;
    let product_id = seed_product(&app).await;
    let customer_id = seed_customer(&app, "delivered@example.com").await;

    let order = app
        .services
        .orders
        .create_order(CreateOrderInput {
            customer_id,
            product_id,
            color: "BLACK".to_string(),
            size: "M".to_string(),
            quantity: 1,
            delivery_charges: None,
            discount_percentage: None,
        })
        .await
        .expect("order placed");

    for status in [DeliveryStatus::Shipped, DeliveryStatus::Delivered] {
        app.services
            .orders
            .update_delivery_status(order.id, status)
            .await
            .expect("legal transition");
    }

    let err = app
        .services
        .orders
        .update_delivery_status(order.id, DeliveryStatus::Cancelled)
        .await
        .expect_err("delivered orders are final");
    assert_matches!(err, ServiceError::InvalidOperation(_));
    assert_eq!(stock_of(&app, product_id).await, 9);
}
