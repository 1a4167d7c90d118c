// src/position.rs
//! Normalized position record produced by the sentence decoder

use serde::{Deserialize, Serialize};

/// A single resolved geographic fix.
///
/// Latitude and longitude are signed decimal degrees (south and west
/// negative). Altitude is meters above mean sea level and is absent for
/// sentence kinds that do not carry it. The timestamp is epoch seconds and is
/// absent when neither the sentence nor the system clock could resolve one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub timestamp: Option<i64>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>, timestamp: Option<i64>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            timestamp,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)?;
        if let Some(alt) = self.altitude {
            write!(f, " alt {:.1} m", alt)?;
        }
        if let Some(ts) = self.timestamp {
            write!(f, " @ {}", ts)?;
        }
        Ok(())
    }
}
