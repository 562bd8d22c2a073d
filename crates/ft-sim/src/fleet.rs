//! `Fleet` and its supervised, running form.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use ft_core::{VehicleId, VehicleStatus};
use ft_mobility::{Clock, MobilityResult, VehicleRunner};
use ft_routing::RouteProvider;
use ft_store::TelemetryStore;

use crate::maintenance::prune_loop;

/// Status receivers keyed by vehicle.
pub type StatusMap = BTreeMap<VehicleId, watch::Receiver<VehicleStatus>>;

/// An assembled, not yet started fleet.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder].
pub struct Fleet<P: RouteProvider, S: TelemetryStore> {
    pub(crate) runners:           Vec<VehicleRunner<P, S>>,
    pub(crate) store:             Arc<S>,
    pub(crate) clock:             Arc<dyn Clock>,
    pub(crate) prune_interval:    Duration,
    pub(crate) arrival_retention: chrono::Duration,
}

impl<P, S> Fleet<P, S>
where
    P: RouteProvider + 'static,
    S: TelemetryStore + 'static,
{
    /// Vehicles that will be simulated, in roster order.
    pub fn vehicle_ids(&self) -> Vec<&VehicleId> {
        self.runners.iter().map(|r| r.vehicle_id()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.runners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// Spawn one task per vehicle plus the maintenance task on the current
    /// tokio runtime.
    pub fn spawn(self) -> RunningFleet {
        let mut tasks = JoinSet::new();
        let mut statuses = StatusMap::new();

        for runner in self.runners {
            let vehicle = runner.vehicle_id().clone();
            statuses.insert(vehicle.clone(), runner.subscribe());
            tasks.spawn(async move { TaskExit::Vehicle { vehicle, result: runner.run().await } });
        }

        let (store, clock) = (self.store, self.clock);
        let (interval, retention) = (self.prune_interval, self.arrival_retention);
        tasks.spawn(async move {
            prune_loop(store, clock, interval, retention).await;
            TaskExit::Maintenance
        });

        info!(vehicles = statuses.len(), "fleet started");
        RunningFleet { tasks, statuses }
    }
}

/// Why a supervised task ended.
#[derive(Debug)]
pub enum TaskExit {
    /// A vehicle runner returned; runners only return on a fatal error.
    Vehicle {
        vehicle: VehicleId,
        result:  MobilityResult<()>,
    },
    Maintenance,
    /// The task panicked or was aborted.
    Aborted,
}

/// A started fleet.  Dropping it aborts every task.
pub struct RunningFleet {
    tasks:    JoinSet<TaskExit>,
    statuses: StatusMap,
}

impl RunningFleet {
    /// Live status of every vehicle.
    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    /// Tasks not yet reaped.
    #[inline]
    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for the next task to end and log why.  `None` once every task
    /// has been reaped.
    pub async fn next_exit(&mut self) -> Option<TaskExit> {
        let exit = match self.tasks.join_next().await? {
            Ok(exit) => exit,
            Err(err) => {
                error!(error = %err, "fleet task panicked or was cancelled");
                TaskExit::Aborted
            }
        };
        match &exit {
            TaskExit::Vehicle { vehicle, result: Err(err) } => {
                error!(vehicle = %vehicle, error = %err, "vehicle runner stopped");
            }
            TaskExit::Vehicle { vehicle, result: Ok(()) } => {
                warn!(vehicle = %vehicle, "vehicle runner returned");
            }
            TaskExit::Maintenance => warn!("maintenance task returned"),
            TaskExit::Aborted => {}
        }
        Some(exit)
    }

    /// Reap tasks until none remain.  One task ending never affects the
    /// others.
    pub async fn supervise(&mut self) {
        while self.next_exit().await.is_some() {}
        info!("all fleet tasks have ended");
    }

    /// Abort every task and wait for them to wind down.
    pub async fn shutdown(mut self) {
        self.tasks.shutdown().await;
        info!("fleet stopped");
    }
}
