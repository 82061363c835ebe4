//! # Resync Driver
//!
//! In-process retries are deliberately absent from the controller: a failed
//! pass leaves status wherever it got to and waits for the next invocation.
//! This module supplies those invocations. `spawn_resync` re-triggers the
//! reconcile pass for one resource on a fixed interval until the resource
//! reports itself settled or disappears, standing in for the watch/requeue
//! machinery a full control plane would provide.

use crate::client::ControllerClient;
use crate::resource::ControlledResource;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Periodically re-runs the reconcile pass for `id` until the resource is
/// [`settled`](ControlledResource::settled) or gone.
///
/// Pass failures are logged and retried on the next tick; that interval
/// *is* the backoff policy. The driver holds a clone of the client, so the
/// controller stays alive while any watch is running; await or abort the
/// returned handle before shutting the system down.
pub fn spawn_resync<R>(
    client: ControllerClient<R>,
    id: R::Id,
    every: Duration,
) -> JoinHandle<()>
where
    R: ControlledResource,
{
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; admission already ran a
        // pass, so skip it.
        tick.tick().await;

        loop {
            tick.tick().await;
            match client.get(id.clone()).await {
                Ok(Some(resource)) if resource.settled() => {
                    info!(%id, "resource settled, stopping resync");
                    break;
                }
                Ok(Some(_)) => {
                    if let Err(e) = client.reconcile(id.clone()).await {
                        warn!(%id, error = %e, "resync pass failed");
                    }
                }
                Ok(None) => {
                    debug!(%id, "resource gone, stopping resync");
                    break;
                }
                Err(e) => {
                    warn!(%id, error = %e, "controller unavailable, stopping resync");
                    break;
                }
            }
        }
    })
}
