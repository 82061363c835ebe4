//! Demo: drive one declarative pizza order from admission to delivery
//! against the in-memory sandbox ordering service.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run   # full specs, drafts, and pass detail
//! ```

use controller_framework::tracing::setup_tracing;
use pizza_orders::credentials::{CredentialRecord, InMemoryCredentialStore};
use pizza_orders::lifecycle::{OrderSystem, SystemConfig};
use pizza_orders::model::{Address, Customer, OrderSpec, Pizza, PizzaSize};
use pizza_orders::ordering::sandbox::SandboxOrderingService;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = SystemConfig::from_env();
    info!(?config, "starting pizza order system");

    // Seed a complete payment credential for the demo order.
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

    let ordering = Arc::new(SandboxOrderingService::new());
    let system = OrderSystem::new(ordering, credentials, config);

    let spec = OrderSpec {
        place_order: true,
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
    };

    let id = system.orders.create_order(spec).await?;
    info!(%id, "order admitted");

    // Resync re-runs the pass until the tracker reports delivery.
    let watcher = system.watch(id);
    watcher.await?;

    if let Some(status) = system.orders.status(id).await? {
        info!(
            order_id = status.order_id.as_deref().unwrap_or(""),
            price = status.price.as_deref().unwrap_or(""),
            delivered = status.delivered,
            "final status"
        );
    }

    system.shutdown().await;
    info!("done");
    Ok(())
}
