//! # Coaster API
//!
//! Small REST service that manages coasters and the wagons each coaster owns, persisted
//! as one JSON document on disk.
//!
//! ## Entry point
//!
//! Use [`CoasterRegistry`] as the single entry point: open it over a file with
//! [`CoasterRegistry::open`], then [`CoasterRegistry::create`], [`CoasterRegistry::update`],
//! [`CoasterRegistry::add_wagon`] and [`CoasterRegistry::remove_wagon`]. Every call loads
//! the file, applies the change and writes the whole file back.
//!
//! ## Example
//!
//! ```rust
//! use coaster_api::{CoasterRegistry, NewCoaster, NewWagon};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let registry = CoasterRegistry::open(dir.path().join("coasters.json"));
//! let coaster = registry
//!     .create(NewCoaster {
//!         staff_count: Some(5),
//!         customer_count: Some(100),
//!         track_length: Some(250.5),
//!         open_time: Some("09:00".into()),
//!         close_time: Some("18:00".into()),
//!     })
//!     .unwrap();
//! assert!(coaster.wagons.is_empty());
//! let wagon = registry
//!     .add_wagon(&coaster.id, NewWagon { seat_count: Some(4), wagon_speed: Some(12.5) })
//!     .unwrap();
//! registry.remove_wagon(&coaster.id, &wagon.id).unwrap();
//! ```
//!
//! ## Lower-level API
//!
//! [`FileStore`] and [`CoasterRepository`] can be used directly when you manage loading
//! and saving yourself.

pub mod api;
pub mod config;
pub mod error;
pub mod ids;
pub mod persistence;
pub mod registry;
pub mod repository;
pub mod types;
pub mod wagons;

pub use config::{Environment, ServerConfig};
pub use error::{RegistryError, RegistryResult};
pub use persistence::FileStore;
pub use registry::CoasterRegistry;
pub use repository::{CoasterRepository, CoasterSpec};
pub use types::{Coaster, CoasterId, CoasterUpdate, NewCoaster, NewWagon, Wagon, WagonId};
pub use wagons::WagonSpec;
