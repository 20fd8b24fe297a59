// Copyright 2025 Cowboy AI, LLC.

//! # CIM Odometer
//!
//! Two independent building blocks:
//! - **Summation**: [`sum()`] and the [`sum!`] macro reduce numbers passed as
//!   separate arguments or as one array to their total
//! - **Vehicle**: an entity with a fixed make and model whose odometer grows
//!   through synchronous [`Vehicle::drive`] calls and deferred
//!   [`Vehicle::drive_async`] calls
//!
//! ```rust
//! use cim_odometer::{sum, Vehicle};
//!
//! assert_eq!(sum!(1, 2, 3, 5), sum!([1, 2, 3, 5]));
//!
//! # tokio_test::block_on(async {
//! let prius = Vehicle::new("toyota", "prius");
//! prius.drive([1, 2, 3]);
//! let driven = prius.drive_async(5).await.unwrap();
//! assert_eq!(driven, 5.0);
//! assert_eq!(prius.odometer(), 11.0);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod entity;
mod errors;
pub mod sum;
mod vehicle;

pub use config::DriveConfig;
pub use entity::{Entity, EntityId, VehicleMarker};
pub use errors::{VehicleError, VehicleResult};
pub use sum::{sum, SumInput};
pub use vehicle::{PendingDrive, Vehicle, VehicleSnapshot};
