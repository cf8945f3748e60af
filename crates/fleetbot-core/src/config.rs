//! Universe configuration
//!
//! Static geometry and speed settings of the game universe the client is
//! connected to. Scraped once at login and then treated as read-only input to
//! the pure calculations.

use serde::{Deserialize, Serialize};

/// Geometry and speed multipliers of one game universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// Number of galaxies
    pub galaxies: u16,
    /// Number of systems per galaxy
    pub systems: u16,
    /// Whether galaxy 1 and galaxy N are adjacent
    pub donut_galaxy: bool,
    /// Whether system 1 and system N are adjacent
    pub donut_system: bool,
    /// Economy speed multiplier
    pub economy_speed: u32,
    /// Fleet speed multiplier
    pub fleet_speed: u32,
    /// Server-side deuterium consumption discount, in (0, 1]
    pub fleet_deut_save_factor: f64,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        // Standard universe settings
        Self {
            galaxies: 9,
            systems: 499,
            donut_galaxy: true,
            donut_system: true,
            economy_speed: 1,
            fleet_speed: 1,
            fleet_deut_save_factor: 1.0,
        }
    }
}

impl UniverseConfig {
    /// True if `coord` addresses a slot that exists in this universe
    pub fn contains(&self, coord: crate::types::Coordinate) -> bool {
        (1..=self.galaxies).contains(&coord.galaxy)
            && (1..=self.systems).contains(&coord.system)
            && (1..=15).contains(&coord.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    #[test]
    fn test_universe_bounds() {
        let universe = UniverseConfig::default();
        assert!(universe.contains(Coordinate::new(1, 1, 1)));
        assert!(universe.contains(Coordinate::new(9, 499, 15)));
        assert!(!universe.contains(Coordinate::new(10, 1, 1)));
        assert!(!universe.contains(Coordinate::new(1, 500, 1)));
        assert!(!universe.contains(Coordinate::new(1, 1, 16)));
    }

    #[test]
    fn test_config_roundtrip() {
        let universe = UniverseConfig {
            fleet_speed: 4,
            fleet_deut_save_factor: 0.5,
            ..UniverseConfig::default()
        };
        let json = serde_json::to_string(&universe).expect("serialize");
        let back: UniverseConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(universe, back);
    }
}
