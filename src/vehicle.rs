// Copyright 2025 Cowboy AI, LLC.

//! Vehicle entity with an odometer fed by synchronous and deferred drives
//!
//! A [`Vehicle`] is a cheap handle: clones share one odometer, so a caller
//! can keep reading a vehicle while drives scheduled with
//! [`Vehicle::drive_async`] are still pending.
//!
//! ```text
//! drive(legs)          ──sum legs──▶ odometer += total ──▶ total
//! drive_async(d)       ──spawn──▶ [next turn] odometer += d ──▶ PendingDrive resolves d
//! ```

use crate::config::DriveConfig;
use crate::entity::{Entity, EntityId, VehicleMarker};
use crate::errors::{VehicleError, VehicleResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Accumulated distance, stored as `f64` bits so drives never lose updates
#[derive(Debug, Default)]
struct Odometer {
    bits: AtomicU64,
}

impl Odometer {
    fn read(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }

    /// Add `distance` and return the new reading
    fn add(&self, distance: f64) -> f64 {
        let previous = self
            .bits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |bits| {
                Some((f64::from_bits(bits) + distance).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        f64::from_bits(previous) + distance
    }
}

/// A vehicle with fixed identifying attributes and a cumulative odometer
///
/// # Examples
///
/// ```rust
/// use cim_odometer::Vehicle;
///
/// let prius = Vehicle::new("toyota", "prius");
/// assert_eq!(prius.odometer(), 0.0);
///
/// assert_eq!(prius.drive([5]), 5.0);
/// assert_eq!(prius.drive([1, 2, 3]), 6.0);
/// assert_eq!(prius.odometer(), 11.0);
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    entity: Entity<VehicleMarker>,
    make: String,
    model: String,
    odometer: Arc<Odometer>,
    config: DriveConfig,
}

impl Vehicle {
    /// Create a vehicle with the default drive configuration
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_config(make, model, DriveConfig::default())
    }

    /// Create a vehicle that schedules asynchronous drives per `config`
    pub fn with_config(
        make: impl Into<String>,
        model: impl Into<String>,
        config: DriveConfig,
    ) -> Self {
        Self {
            entity: Entity::new(),
            make: make.into(),
            model: model.into(),
            odometer: Arc::new(Odometer::default()),
            config,
        }
    }

    /// Vehicle identity
    pub fn id(&self) -> EntityId<VehicleMarker> {
        self.entity.id
    }

    /// Manufacturer
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Current odometer reading
    pub fn odometer(&self) -> f64 {
        self.odometer.read()
    }

    /// Drive configuration in effect
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Drive one or more legs; their total is added to the odometer and returned
    ///
    /// Legs are not validated. Passing no legs adds and returns zero.
    pub fn drive<L>(&self, legs: impl IntoIterator<Item = L>) -> f64
    where
        L: Into<f64>,
    {
        let total: f64 = legs.into_iter().map(Into::into).sum();
        let odometer = self.odometer.add(total);
        if self.config.trace_drives {
            debug!(vehicle = %self.id(), distance = total, odometer, "drive applied");
        }
        total
    }

    /// Schedule `distance` to be added to the odometer on a later scheduling turn
    ///
    /// Requires a current-thread Tokio runtime. The task is spawned
    /// immediately, so the drive happens even if the returned [`PendingDrive`]
    /// is dropped. The odometer is untouched until the calling task yields;
    /// awaiting the handle resolves with `distance` once it has been applied.
    /// Drives apply in the order they were issued.
    ///
    /// Nothing is scheduled outside a Tokio runtime, where the handle resolves
    /// to [`VehicleError::NoRuntime`], or on a multi-thread runtime, where a
    /// worker could apply the drive while the caller is still running and the
    /// handle resolves to [`VehicleError::UnsupportedRuntime`].
    pub fn drive_async(&self, distance: impl Into<f64>) -> PendingDrive {
        let distance = distance.into();
        let Ok(runtime) = Handle::try_current() else {
            warn!(vehicle = %self.id(), distance, "no runtime to schedule drive");
            return PendingDrive::rejected(distance, VehicleError::NoRuntime);
        };

        let flavor = runtime.runtime_flavor();
        if !matches!(flavor, RuntimeFlavor::CurrentThread) {
            warn!(vehicle = %self.id(), distance, ?flavor, "drive needs a current-thread runtime");
            return PendingDrive::rejected(
                distance,
                VehicleError::UnsupportedRuntime(format!("{flavor:?}")),
            );
        }

        let vehicle_id = self.id();
        let odometer = Arc::clone(&self.odometer);
        let delay = self.config.defer_delay();
        let trace = self.config.trace_drives;

        debug!(vehicle = %vehicle_id, distance, delay_ms = self.config.defer_delay_ms, "drive scheduled");
        let handle = runtime.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let odometer = odometer.add(distance);
            if trace {
                debug!(vehicle = %vehicle_id, distance, odometer, "scheduled drive applied");
            }
            distance
        });

        PendingDrive {
            distance,
            task: Ok(handle),
        }
    }

    /// Point-in-time view of the vehicle
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id(),
            make: self.make.clone(),
            model: self.model.clone(),
            odometer: self.odometer(),
        }
    }
}

impl Serialize for Vehicle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

/// Serializable reading of a [`Vehicle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VehicleSnapshot {
    /// Vehicle identity
    pub id: EntityId<VehicleMarker>,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Odometer reading when the snapshot was taken
    pub odometer: f64,
}

/// Handle to a drive scheduled by [`Vehicle::drive_async`]
///
/// Resolves to the driven distance after it has reached the odometer.
#[derive(Debug)]
#[must_use = "the drive is scheduled regardless; await the handle to observe it"]
pub struct PendingDrive {
    distance: f64,
    task: Result<JoinHandle<f64>, VehicleError>,
}

impl PendingDrive {
    fn rejected(distance: f64, err: VehicleError) -> Self {
        Self {
            distance,
            task: Err(err),
        }
    }

    /// Distance this drive applies
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

impl Future for PendingDrive {
    type Output = VehicleResult<f64>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let handle = match this.task.as_mut() {
            Ok(handle) => handle,
            Err(err) => return Poll::Ready(Err(err.clone())),
        };

        match Pin::new(handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(distance)) => Poll::Ready(Ok(distance)),
            Poll::Ready(Err(err)) => {
                warn!(distance = this.distance, error = %err, "scheduled drive aborted");
                Poll::Ready(Err(VehicleError::DriveAborted {
                    distance: this.distance,
                    reason: err.to_string(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odometer_add_returns_new_reading() {
        let odometer = Odometer::default();
        assert_eq!(odometer.read(), 0.0);
        assert_eq!(odometer.add(5.0), 5.0);
        assert_eq!(odometer.add(6.0), 11.0);
        assert_eq!(odometer.read(), 11.0);
    }

    #[test]
    fn test_new_vehicle() {
        let prius = Vehicle::new("toyota", "prius");
        assert_eq!(prius.make(), "toyota");
        assert_eq!(prius.model(), "prius");
        assert_eq!(prius.odometer(), 0.0);
        assert_eq!(prius.config(), &DriveConfig::default());
    }

    #[test]
    fn test_drive_without_legs_is_zero() {
        let prius = Vehicle::new("toyota", "prius");
        assert_eq!(prius.drive(Vec::<f64>::new()), 0.0);
        assert_eq!(prius.odometer(), 0.0);
    }

    #[test]
    fn test_clones_share_odometer() {
        let prius = Vehicle::new("toyota", "prius");
        let same = prius.clone();

        same.drive([7]);
        assert_eq!(prius.odometer(), 7.0);
        assert_eq!(prius.id(), same.id());
    }

    #[test]
    fn test_drive_async_outside_runtime() {
        let prius = Vehicle::new("toyota", "prius");
        let pending = prius.drive_async(5);
        assert_eq!(pending.distance(), 5.0);

        let result = futures::executor::block_on(pending);
        assert!(matches!(result, Err(VehicleError::NoRuntime)));
        assert_eq!(prius.odometer(), 0.0);
    }

    #[tokio::test]
    async fn test_aborted_drive_surfaces_error() {
        let config = DriveConfig::default().with_defer_delay(std::time::Duration::from_secs(60));
        let prius = Vehicle::with_config("toyota", "prius", config);

        let pending = prius.drive_async(5);
        if let Ok(handle) = pending.task.as_ref() {
            handle.abort();
        }

        let err = pending.await.unwrap_err();
        assert!(matches!(err, VehicleError::DriveAborted { distance, .. } if distance == 5.0));
        assert!(err.is_aborted());
        assert_eq!(prius.odometer(), 0.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_multi_thread_runtime_is_rejected() {
        let prius = Vehicle::new("toyota", "prius");
        let pending = prius.drive_async(5);
        assert!(pending.task.is_err());

        // A worker would have applied the drive by now had it been spawned.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(prius.odometer(), 0.0);

        let err = pending.await.unwrap_err();
        assert!(matches!(err, VehicleError::UnsupportedRuntime(ref flavor) if flavor == "MultiThread"));
        assert!(err.is_runtime_error());
        assert_eq!(prius.odometer(), 0.0);
    }
}
