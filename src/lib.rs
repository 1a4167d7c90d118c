// src/lib.rs
//! GPS Tracker Library
//!
//! Continuously reads NMEA sentences from a line source, decodes fix-bearing
//! sentences into normalized positions, and exposes the last fix plus a
//! bounded history via a push callback and pull accessors, with a circular
//! geofence test on top.

pub mod config;
pub mod error;
pub mod export;
pub mod geofence;
pub mod nmea;
pub mod position;
pub mod source;
pub mod store;
pub mod tracker;

// Re-export main types for convenience
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use geofence::GeofenceStatus;
pub use position::Position;
pub use source::{LineSource, ReplayLineSource, SerialLineSource};
pub use store::PositionStore;
pub use tracker::GpsTracker;
