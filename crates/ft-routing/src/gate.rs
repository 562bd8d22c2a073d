//! Fleet-wide admission gate for routing-provider calls.
//!
//! The provider's rate limit applies to the whole fleet, so the bound is
//! global, not per vehicle: one `AdmissionGate` is created by the
//! orchestrator and cloned into every task.  It is a counting semaphore;
//! tokio's `Semaphore` queues waiters FIFO, so no task starves.

use std::sync::Arc;

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::{RoutingError, RoutingResult};

/// Bounds the number of concurrently outstanding provider requests.
///
/// Cloning is cheap and yields a handle to the same gate.
#[derive(Clone, Debug)]
pub struct AdmissionGate {
    permits:  Arc<Semaphore>,
    capacity: usize,
}

impl AdmissionGate {
    /// A gate admitting at most `capacity` concurrent requests.
    ///
    /// A capacity of zero is raised to one; a gate that admits nobody would
    /// stall every vehicle forever.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a free slot.  The slot is released when the permit drops.
    pub async fn admit(&self) -> RoutingResult<SemaphorePermit<'_>> {
        self.permits.acquire().await.map_err(|_| RoutingError::GateClosed)
    }

    /// Maximum concurrent requests.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots free right now.
    #[inline]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
