//! Parking fee configuration.

use serde::{Deserialize, Serialize};

/// Settings for parking charges used by reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingConfig {
    /// Flat fee charged per parking session, in whole currency units.
    #[serde(default = "default_fixed_fee")]
    pub fixed_fee: i64,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            fixed_fee: default_fixed_fee(),
        }
    }
}

fn default_fixed_fee() -> i64 {
    500
}
