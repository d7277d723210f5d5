//! Periodic database heartbeat.
//!
//! Issues a cheap count query on a fixed interval so a hosted database
//! that pauses idle projects keeps the instance awake. Failures are
//! logged and the loop keeps running.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::backend::storage::{BusinessStorage, Connection};

pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// Spawn the heartbeat task. The first ping fires immediately, then one
/// every interval.
pub fn spawn_keepalive<C: Connection>(connection: Arc<C>) -> JoinHandle<()> {
    spawn_keepalive_with_interval(connection, KEEPALIVE_INTERVAL)
}

pub fn spawn_keepalive_with_interval<C: Connection>(
    connection: Arc<C>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let repository = connection.create_business_repository();
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match repository.count_businesses().await {
                Ok(count) => info!("Keepalive ping ok ({} businesses)", count),
                Err(err) => warn!("Keepalive ping failed: {}", err),
            }
        }
    })
}
