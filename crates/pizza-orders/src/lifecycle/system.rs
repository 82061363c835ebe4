//! Runtime orchestration for the pizza order system.

use crate::clients::PizzaOrderClient;
use crate::controller;
use crate::credentials::CredentialStore;
use crate::model::PizzaOrderId;
use crate::ordering::OrderingService;
use crate::reconcile::ReconcileContext;
use controller_framework::resync::spawn_resync;
use controller_framework::ControllerHandle;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Tunables read once at startup.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Capacity of the controller request channel.
    pub channel_capacity: usize,
    /// How often the resync driver re-runs a pass for a watched order.
    pub resync_interval: Duration,
    /// Deadline applied to each individual collaborator call.
    pub call_timeout: Duration,
    /// Namespace payment credential references resolve in.
    pub namespace: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            resync_interval: Duration::from_secs(2),
            call_timeout: Duration::from_secs(10),
            namespace: "default".to_string(),
        }
    }
}

impl SystemConfig {
    /// Defaults overridden from `PIZZA_*` environment variables. Values
    /// that fail to parse are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(capacity) = parse_env("PIZZA_CHANNEL_CAPACITY") {
            config.channel_capacity = capacity;
        }
        if let Some(secs) = parse_env("PIZZA_RESYNC_SECS") {
            config.resync_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_env("PIZZA_CALL_TIMEOUT_SECS") {
            config.call_timeout = Duration::from_secs(secs);
        }
        if let Ok(namespace) = env::var("PIZZA_NAMESPACE") {
            config.namespace = namespace;
        }
        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable configuration value");
            None
        }
    }
}

/// The running pizza order system.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(ordering, credentials, SystemConfig::from_env());
/// let id = system.orders.create_order(spec).await?;
/// let watcher = system.watch(id);
/// watcher.await?;              // resync stops once the order settles
/// system.shutdown().await;
/// ```
pub struct OrderSystem {
    /// Client for the pizza order controller.
    pub orders: PizzaOrderClient,
    resync_interval: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns the controller with the given collaborators wired into its
    /// reconcile context.
    pub fn new(
        ordering: Arc<dyn OrderingService>,
        credentials: Arc<dyn CredentialStore>,
        config: SystemConfig,
    ) -> Self {
        let (controller, orders) = controller::new(config.channel_capacity);
        let context = ReconcileContext {
            ordering,
            credentials,
            namespace: config.namespace,
            call_timeout: config.call_timeout,
        };
        let handle = tokio::spawn(controller.run(context));

        Self {
            orders,
            resync_interval: config.resync_interval,
            handles: vec![handle],
        }
    }

    /// Starts a resync driver for one order. The returned task finishes by
    /// itself once the order is delivered or deleted; await or abort it
    /// before calling [`shutdown`](Self::shutdown), since it holds a
    /// client clone that keeps the controller alive.
    pub fn watch(&self, id: PizzaOrderId) -> JoinHandle<()> {
        spawn_resync(self.orders.inner().clone(), id, self.resync_interval)
    }

    /// Gracefully shuts the system down: drops the clients so the
    /// controller drains its queue and exits, then awaits the task.
    pub async fn shutdown(self) {
        drop(self.orders);
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
