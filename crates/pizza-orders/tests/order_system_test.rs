//! Full end-to-end lifecycle against the sandbox ordering service: one
//! declarative order driven from admission through pricing, placement,
//! tracking, and delivery by the real controller and resync driver.

use controller_framework::ControllerHandle;
use pizza_orders::credentials::{CredentialRecord, InMemoryCredentialStore};
use pizza_orders::lifecycle::{OrderSystem, SystemConfig};
use pizza_orders::model::{Address, Customer, OrderSpec, Pizza, PizzaSize};
use pizza_orders::ordering::sandbox::SandboxOrderingService;
use std::sync::Arc;
use std::time::Duration;

fn spec(place_order: bool) -> OrderSpec {
    OrderSpec {
        place_order,
        address: Some(Address {
            street: "742 Evergreen Terrace".to_string(),
            city: "Springfield".to_string(),
            region: "IL".to_string(),
            postal_code: "62704".to_string(),
            phone: "201-555-0123".to_string(),
        }),
        customer: Customer {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
        },
        payment_secret: "card-on-file".to_string(),
        pizzas: vec![
            Pizza {
                size: PizzaSize::Large,
                toppings: vec!["pepperoni".to_string(), "mushrooms".to_string()],
            },
            Pizza {
                size: PizzaSize::Medium,
                toppings: vec!["sausage".to_string()],
            },
        ],
    }
}

fn system(service: Arc<SandboxOrderingService>) -> OrderSystem {
    let config = SystemConfig {
        resync_interval: Duration::from_millis(20),
        ..SystemConfig::default()
    };
    let credentials = Arc::new(InMemoryCredentialStore::new());
    credentials.insert(
        &config.namespace,
        "card-on-file",
        CredentialRecord {
            card_type: Some("visa".to_string()),
            number: Some("4100123422343234".to_string()),
            expiration: Some("0527".to_string()),
            security_code: Some("123".to_string()),
            postal_code: Some("62704".to_string()),
        },
    );
    OrderSystem::new(service, credentials, config)
}

#[tokio::test]
async fn test_order_converges_to_delivered() {
    let service = Arc::new(SandboxOrderingService::new());
    let system = system(service.clone());

    let id = system.orders.create_order(spec(true)).await.unwrap();

    // The resync driver polls the pass until the tracker reports
    // delivery, then stops on its own.
    let watcher = system.watch(id);
    tokio::time::timeout(Duration::from_secs(5), watcher)
        .await
        .expect("order never converged")
        .unwrap();

    let order = system.orders.get(id).await.unwrap().unwrap();
    assert!(order.status.placed);
    assert!(order.status.delivered);

    let order_id = order.status.order_id.expect("order id");
    assert!(order_id.starts_with("SANDBOX-"));

    // Two pizzas, three toppings, half-price coupon.
    assert_eq!(order.status.price.as_deref(), Some("15.24"));

    let store = order.status.store.expect("store observation");
    assert_eq!(store.id, "8252");
    assert!(!store.address.contains('\n'));

    let tracker = order.status.tracker.expect("tracker");
    assert!(tracker.prep.is_some());
    assert!(tracker.bake.is_some());
    assert!(tracker.quality_check.is_some());
    assert!(tracker.out_for_delivery.is_some());
    assert!(tracker.delivered.is_some());

    // Many passes ran; payment was submitted exactly once.
    assert_eq!(service.placements(), 1);

    system.shutdown().await;
}

#[tokio::test]
async fn test_price_always_has_two_decimals() {
    let service = Arc::new(SandboxOrderingService::new());
    let system = system(service);

    let id = system.orders.create_order(spec(false)).await.unwrap();

    let status = system.orders.status(id).await.unwrap().unwrap();
    let price = status.price.expect("price");
    let decimals = price.split('.').nth(1).expect("decimal point");
    assert_eq!(decimals.len(), 2);

    system.shutdown().await;
}

#[tokio::test]
async fn test_priced_only_order_places_after_patch() {
    let service = Arc::new(SandboxOrderingService::new());
    let system = system(service.clone());

    // Created without placement: the pass prices and stops.
    let id = system.orders.create_order(spec(false)).await.unwrap();
    let status = system.orders.status(id).await.unwrap().unwrap();
    assert!(status.price.is_some());
    assert!(!status.placed);
    assert_eq!(service.placements(), 0);

    // Flipping the flag triggers a pass that places.
    system.orders.set_place_order(id, true).await.unwrap();
    let status = system.orders.status(id).await.unwrap().unwrap();
    assert!(status.placed);
    assert!(status.order_id.is_some());
    assert_eq!(service.placements(), 1);

    system.shutdown().await;
}
