use async_trait::async_trait;
use controller_framework::{ControlledResource, ControllerError, ResourceController};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test Resource ---
//
// A gauge converges its observed level toward a desired target, one step
// per reconcile pass. A shared flag lets tests make the pass fail *after*
// it has already mutated observed state.

#[derive(Clone, Debug, PartialEq)]
struct Gauge {
    id: u32,
    target: u32,
    observed: u32,
}

#[derive(Debug)]
struct GaugeSpec {
    target: u32,
}

#[derive(Debug)]
struct GaugePatch {
    target: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
enum GaugeError {
    #[error("target must be non-zero")]
    ZeroTarget,
    #[error("gauge backend unavailable")]
    BackendDown,
}

#[derive(Clone, Default)]
struct GaugeContext {
    fail_after_step: Arc<AtomicBool>,
}

#[async_trait]
impl ControlledResource for Gauge {
    type Id = u32;
    type Spec = GaugeSpec;
    type Patch = GaugePatch;
    type Context = GaugeContext;
    type Error = GaugeError;

    fn from_spec(id: u32, spec: GaugeSpec) -> Result<Self, Self::Error> {
        if spec.target == 0 {
            return Err(GaugeError::ZeroTarget);
        }
        Ok(Self {
            id,
            target: spec.target,
            observed: 0,
        })
    }

    async fn apply_patch(
        &mut self,
        patch: GaugePatch,
        _ctx: &GaugeContext,
    ) -> Result<(), Self::Error> {
        if let Some(target) = patch.target {
            self.target = target;
        }
        Ok(())
    }

    async fn reconcile(&mut self, ctx: &GaugeContext) -> Result<(), Self::Error> {
        if self.observed < self.target {
            self.observed += 1;
        }
        if ctx.fail_after_step.load(Ordering::SeqCst) {
            return Err(GaugeError::BackendDown);
        }
        Ok(())
    }

    fn settled(&self) -> bool {
        self.observed == self.target
    }
}

// --- Tests ---

#[tokio::test]
async fn test_full_lifecycle() {
    let (controller, client) = ResourceController::<Gauge>::new(10);
    tokio::spawn(controller.run(GaugeContext::default()));

    // 1. Admission runs the first pass before the next request is served.
    let id: u32 = client.create(GaugeSpec { target: 3 }).await.unwrap();
    assert_eq!(id, 1);
    let gauge = client.get(id).await.unwrap().unwrap();
    assert_eq!(gauge.observed, 1);
    assert!(!gauge.settled());

    // 2. Explicit passes converge the rest of the way.
    client.reconcile(id).await.unwrap();
    client.reconcile(id).await.unwrap();
    let gauge = client.get(id).await.unwrap().unwrap();
    assert_eq!(gauge.observed, 3);
    assert!(gauge.settled());

    // 3. A settled resource stays put.
    client.reconcile(id).await.unwrap();
    let gauge = client.get(id).await.unwrap().unwrap();
    assert_eq!(gauge.observed, 3);

    // 4. Patching desired state triggers a pass immediately.
    let patched = client
        .patch(id, GaugePatch { target: Some(5) })
        .await
        .unwrap();
    assert_eq!(patched.target, 5);
    let gauge = client.get(id).await.unwrap().unwrap();
    assert_eq!(gauge.observed, 4);

    // 5. Delete, then reads come back empty.
    client.delete(id).await.unwrap();
    let gone = client.get(id).await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_admission_rejects_invalid_spec() {
    let (controller, client) = ResourceController::<Gauge>::new(10);
    tokio::spawn(controller.run(GaugeContext::default()));

    let result = client.create(GaugeSpec { target: 0 }).await;
    assert!(matches!(result, Err(ControllerError::Resource(_))));

    // A rejected spec does not burn the id.
    let id = client.create(GaugeSpec { target: 1 }).await.unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn test_failed_pass_keeps_prior_mutations() {
    let context = GaugeContext::default();
    let (controller, client) = ResourceController::<Gauge>::new(10);
    tokio::spawn(controller.run(context.clone()));

    context.fail_after_step.store(true, Ordering::SeqCst);

    // Admission succeeds even though its pass fails afterwards.
    let id = client.create(GaugeSpec { target: 3 }).await.unwrap();

    // The pass stepped the gauge before erroring; the step is kept.
    let gauge = client.get(id).await.unwrap().unwrap();
    assert_eq!(gauge.observed, 1);

    // An explicit pass surfaces the propagated error, and still keeps
    // the mutation it made first.
    let result = client.reconcile(id).await;
    assert!(matches!(result, Err(ControllerError::Resource(_))));
    let gauge = client.get(id).await.unwrap().unwrap();
    assert_eq!(gauge.observed, 2);
}

#[tokio::test]
async fn test_reconcile_of_unknown_id_is_clean_noop() {
    let (controller, client) = ResourceController::<Gauge>::new(10);
    tokio::spawn(controller.run(GaugeContext::default()));

    // Never created: the requeue machinery must not see an error.
    let result = client.reconcile(42).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_resync_driver_converges_and_stops() {
    let (controller, client) = ResourceController::<Gauge>::new(10);
    tokio::spawn(controller.run(GaugeContext::default()));

    let id = client.create(GaugeSpec { target: 4 }).await.unwrap();

    let watcher = controller_framework::resync::spawn_resync(
        client.clone(),
        id,
        Duration::from_millis(10),
    );

    // The driver stops on its own once the gauge settles.
    tokio::time::timeout(Duration::from_secs(5), watcher)
        .await
        .expect("resync driver did not stop")
        .unwrap();

    let gauge = client.get(id).await.unwrap().unwrap();
    assert!(gauge.settled());
    assert_eq!(gauge.observed, 4);
}
