//! Integration tests for checkout against the in-memory backend.

use checkout::{
    CatalogProvider, CheckoutCoordinator, CheckoutError, InMemoryCatalog, InMemoryOrderBackend,
    OrderTracking, StoreConfig,
};
use common::{CustomerId, LineKey, ProductId, VariationId};
use domain::{Cart, Category, DeliveryDetails, Money, OrderStatus, Product, StatusUpdate, Variation};

type TestCoordinator = CheckoutCoordinator<InMemoryCatalog, InMemoryOrderBackend>;

struct TestHarness {
    coordinator: TestCoordinator,
    catalog: InMemoryCatalog,
    backend: InMemoryOrderBackend,
}

impl TestHarness {
    fn new() -> Self {
        let catalog = InMemoryCatalog::from_parts(
            vec![
                Category::new("fruit-veg", "Fruit & Veg"),
                Category::new("pantry", "Pantry"),
            ],
            vec![
                Product::new("apples", "Gala Apples", "fruit-veg")
                    .with_variation(Variation::new("1kg", "1kg bag", Money::from_cents(599), 100))
                    .with_variation(Variation::new("3kg", "3kg box", Money::from_cents(1499), 2)),
                Product::new("honey", "Wildflower Honey", "pantry")
                    .with_variation(Variation::new("jar", "350g jar", Money::from_cents(875), 1)),
            ],
        );
        let backend = InMemoryOrderBackend::with_catalog(catalog.clone());
        let coordinator =
            CheckoutCoordinator::new(catalog.clone(), backend.clone(), StoreConfig::default());

        Self {
            coordinator,
            catalog,
            backend,
        }
    }

    async fn add(&self, cart: &mut Cart, product: &str, variation: &str) {
        let product = self
            .catalog
            .product(&ProductId::new(product))
            .await
            .unwrap()
            .unwrap();
        let product_ref = product.cart_ref(&VariationId::new(variation)).unwrap();
        cart.add(product_ref);
    }

    async fn stock(&self, product: &str, variation: &str) -> u32 {
        self.catalog
            .product(&ProductId::new(product))
            .await
            .unwrap()
            .unwrap()
            .variation(&VariationId::new(variation))
            .unwrap()
            .inventory
    }
}

fn delivery() -> DeliveryDetails {
    DeliveryDetails::new("Ana Lima", "555-0101", "12 Orchard Way").with_instructions("Ring twice")
}

mod placing_orders {
    use super::*;

    #[tokio::test]
    async fn successful_checkout_clears_cart_and_stores_order() {
        let harness = TestHarness::new();
        let customer_id = CustomerId::new();
        let mut cart = Cart::new();

        harness.add(&mut cart, "apples", "1kg").await;
        harness.add(&mut cart, "apples", "1kg").await;
        harness.add(&mut cart, "honey", "jar").await;

        let order = harness
            .coordinator
            .checkout(&mut cart, customer_id, delivery())
            .await
            .unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.subtotal().cents(), 599 * 2 + 875);
        assert_eq!(order.delivery_fee().cents(), 499);
        assert_eq!(order.total().cents(), 599 * 2 + 875 + 499);
        assert_eq!(order.delivery().instructions.as_deref(), Some("Ring twice"));

        let stored = harness.backend.order(order.id()).await.unwrap();
        assert_eq!(stored.as_ref(), Some(&order));
        assert_eq!(harness.stock("apples", "1kg").await, 98);
        assert_eq!(harness.stock("honey", "jar").await, 0);
    }

    #[tokio::test]
    async fn order_lines_follow_cart_order() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "honey", "jar").await;
        harness.add(&mut cart, "apples", "3kg").await;

        let order = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await
            .unwrap();

        let names: Vec<&str> = order.lines().iter().map(|l| l.unit_label.as_str()).collect();
        assert_eq!(names, vec!["350g jar", "3kg box"]);
    }

    #[tokio::test]
    async fn large_order_gets_free_delivery() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        for _ in 0..9 {
            harness.add(&mut cart, "apples", "1kg").await;
        }

        let order = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await
            .unwrap();

        assert_eq!(order.subtotal().cents(), 5391);
        assert!(order.delivery_fee().is_zero());
    }
}

mod failed_checkout {
    use super::*;

    #[tokio::test]
    async fn submission_failure_leaves_cart_unchanged() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "apples", "1kg").await;
        harness.add(&mut cart, "apples", "1kg").await;
        let before = cart.clone();

        harness.backend.set_fail_on_submit(true).await;
        let result = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await;

        assert!(matches!(result, Err(CheckoutError::Submission(_))));
        assert_eq!(cart, before);
        assert_eq!(harness.backend.order_count().await, 0);
        assert_eq!(harness.stock("apples", "1kg").await, 100);
    }

    #[tokio::test]
    async fn retry_after_failure_succeeds() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "apples", "1kg").await;
        harness.add(&mut cart, "honey", "jar").await;

        harness.backend.set_fail_on_submit(true).await;
        assert!(
            harness
                .coordinator
                .checkout(&mut cart, CustomerId::new(), delivery())
                .await
                .is_err()
        );

        harness.backend.set_fail_on_submit(false).await;
        let order = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await
            .unwrap();

        assert_eq!(order.item_count(), 2);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn stale_inventory_is_rejected() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "apples", "3kg").await;
        harness.add(&mut cart, "apples", "3kg").await;

        harness
            .catalog
            .set_inventory(&ProductId::new("apples"), &VariationId::new("3kg"), 1)
            .await
            .unwrap();

        let result = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await;

        match result {
            Err(CheckoutError::InsufficientInventory {
                key,
                requested,
                available,
            }) => {
                assert_eq!(key, LineKey::new("apples", "3kg"));
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientInventory, got {other:?}"),
        }
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn unpublished_product_is_rejected() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        for _ in 0..3 {
            harness.add(&mut cart, "apples", "1kg").await;
        }

        harness
            .catalog
            .set_published(&ProductId::new("apples"), false)
            .await
            .unwrap();

        let result = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await;
        assert!(matches!(
            result,
            Err(CheckoutError::ProductUnavailable { .. })
        ));
        assert_eq!(cart.line_count(), 1);
    }

    #[tokio::test]
    async fn below_minimum_is_rejected() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "apples", "1kg").await;

        let result = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::BelowMinimum { subtotal, minimum })
                if subtotal.cents() == 599 && minimum.cents() == 1000
        ));
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test]
    async fn incomplete_delivery_is_rejected() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "apples", "3kg").await;

        let result = harness
            .coordinator
            .checkout(
                &mut cart,
                CustomerId::new(),
                DeliveryDetails::new("Ana", "555-0101", " "),
            )
            .await;

        assert!(matches!(result, Err(CheckoutError::Domain(_))));
        assert!(!cart.is_empty());
    }
}

mod order_tracking {
    use super::*;

    #[tokio::test]
    async fn back_office_advances_order_to_delivered() {
        let harness = TestHarness::new();
        let customer_id = CustomerId::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "apples", "3kg").await;

        let order = harness
            .coordinator
            .checkout(&mut cart, customer_id, delivery())
            .await
            .unwrap();

        for update in [
            StatusUpdate::Confirm,
            StatusUpdate::Dispatch,
            StatusUpdate::Deliver,
        ] {
            harness
                .backend
                .update_status(order.id(), update)
                .await
                .unwrap();
        }

        let history = harness.backend.orders_for_customer(customer_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status(), OrderStatus::Delivered);
        assert!(history[0].is_terminal());
    }

    #[tokio::test]
    async fn cancelled_order_returns_stock() {
        let harness = TestHarness::new();
        let mut cart = Cart::new();
        harness.add(&mut cart, "honey", "jar").await;
        harness.add(&mut cart, "apples", "1kg").await;

        let order = harness
            .coordinator
            .checkout(&mut cart, CustomerId::new(), delivery())
            .await
            .unwrap();
        assert_eq!(harness.stock("honey", "jar").await, 0);

        let cancelled = harness
            .backend
            .update_status(
                order.id(),
                StatusUpdate::Cancel {
                    reason: "Store closed early".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(cancelled.status(), OrderStatus::Cancelled);
        assert_eq!(harness.stock("honey", "jar").await, 1);
        assert_eq!(harness.stock("apples", "1kg").await, 100);
    }
}
