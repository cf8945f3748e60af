//! Flight physics
//!
//! Pure flight-time and fuel calculations. These take already-known facts
//! (universe geometry, research levels, fleet composition) and never touch
//! the network, which is what lets the client serve them from cache without
//! serializing behind session-locked operations.

use crate::catalog::ShipId;
use crate::config::UniverseConfig;
use crate::errors::GameError;
use crate::types::{Coordinate, FleetSpeed, Researches, ShipsInfos};
use std::time::Duration;

/// Result of a flight estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightEstimate {
    /// One-way travel time
    pub duration: Duration,
    /// Deuterium consumed for the round trip
    pub fuel: i64,
}

// ----------------------------------------------------------------------------
// Distance
// ----------------------------------------------------------------------------

fn wrapped_gap(a: u16, b: u16, size: u16, donut: bool) -> u32 {
    let gap = u32::from(a.abs_diff(b));
    if donut {
        gap.min(u32::from(size) - gap)
    } else {
        gap
    }
}

/// Abstract distance between two coordinates
///
/// Galaxy gaps dominate, then system gaps, then position gaps; two slots at
/// the same position are a fixed short hop. Donut universes wrap at the edge.
pub fn distance(a: Coordinate, b: Coordinate, universe: &UniverseConfig) -> u32 {
    if a.galaxy != b.galaxy {
        return 20_000 * wrapped_gap(a.galaxy, b.galaxy, universe.galaxies, universe.donut_galaxy);
    }
    if a.system != b.system {
        return 2_700 + 95 * wrapped_gap(a.system, b.system, universe.systems, universe.donut_system);
    }
    if a.position != b.position {
        return 1_000 + 5 * u32::from(a.position.abs_diff(b.position));
    }
    5
}

// ----------------------------------------------------------------------------
// Speed & Estimation
// ----------------------------------------------------------------------------

/// Effective speed of the slowest ship present, `None` for an empty fleet
pub fn slowest_speed(ships: &ShipsInfos, researches: &Researches) -> Option<u32> {
    ShipId::ALL
        .iter()
        .filter(|&&id| ships.get(id) > 0)
        .map(|&id| id.speed(researches))
        .min()
}

/// Estimate travel time and fuel for a fleet
///
/// Duration: `round((3500/fraction * sqrt(d * 10 / v) + 10) / fleet_speed)` seconds,
/// where `v` is the slowest ship's effective speed and `d` the abstract
/// distance. Fuel: one unit base plus each ship class's consumption prorated
/// over the distance and discounted by the universe's save factor.
pub fn estimate(
    origin: Coordinate,
    destination: Coordinate,
    speed: FleetSpeed,
    ships: &ShipsInfos,
    researches: &Researches,
    universe: &UniverseConfig,
) -> Result<FlightEstimate, GameError> {
    let v = slowest_speed(ships, researches).ok_or(GameError::EmptyFleet)? as f64;
    let d = f64::from(distance(origin, destination, universe));

    let secs =
        (((3_500.0 / speed.fraction()) * (d * 10.0 / v).sqrt() + 10.0)
            / f64::from(universe.fleet_speed))
        .round() as u64;

    let mut consumption = 0.0;
    for (id, count) in ships.iter() {
        consumption += f64::from(id.fuel_consumption())
            * d
            * universe.fleet_deut_save_factor
            * count as f64
            / 35_000.0;
    }
    let fuel = 1 + consumption as i64;

    Ok(FlightEstimate {
        duration: Duration::from_secs(secs),
        fuel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> UniverseConfig {
        UniverseConfig::default()
    }

    #[test]
    fn test_distance_tiers() {
        let u = universe();
        let home = Coordinate::new(1, 1, 1);

        assert_eq!(distance(home, home, &u), 5);
        assert_eq!(distance(home, Coordinate::new(1, 1, 10), &u), 1_045);
        assert_eq!(distance(home, Coordinate::new(1, 5, 10), &u), 2_700 + 95 * 4);
        assert_eq!(distance(home, Coordinate::new(3, 5, 10), &u), 40_000);
    }

    #[test]
    fn test_donut_wrapping() {
        let u = universe();
        // galaxy 1 and 9 are neighbors in a 9-galaxy donut
        assert_eq!(
            distance(Coordinate::new(1, 1, 1), Coordinate::new(9, 1, 1), &u),
            20_000
        );
        // system 1 and 499 are neighbors in a 499-system donut
        assert_eq!(
            distance(Coordinate::new(1, 1, 1), Coordinate::new(1, 499, 1), &u),
            2_700 + 95
        );

        let flat = UniverseConfig {
            donut_galaxy: false,
            donut_system: false,
            ..universe()
        };
        assert_eq!(
            distance(Coordinate::new(1, 1, 1), Coordinate::new(9, 1, 1), &flat),
            160_000
        );
    }

    #[test]
    fn test_slowest_ship_dominates() {
        let researches = Researches::default();
        let mut ships = ShipsInfos::default();
        ships.set(ShipId::EspionageProbe, 5);
        assert_eq!(
            slowest_speed(&ships, &researches),
            Some(ShipId::EspionageProbe.base_speed())
        );

        ships.set(ShipId::ColonyShip, 1);
        assert_eq!(slowest_speed(&ships, &researches), Some(2_500));

        assert_eq!(slowest_speed(&ShipsInfos::default(), &researches), None);
    }

    #[test]
    fn test_estimate_scaling() {
        let u = universe();
        let researches = Researches::default();
        let mut ships = ShipsInfos::default();
        ships.set(ShipId::SmallCargo, 10);

        let origin = Coordinate::new(1, 1, 1);
        let near = Coordinate::new(1, 1, 5);
        let far = Coordinate::new(4, 100, 5);

        let slow = estimate(origin, far, FleetSpeed::percent(10).unwrap(), &ships, &researches, &u)
            .unwrap();
        let fast = estimate(origin, far, FleetSpeed::MAX, &ships, &researches, &u).unwrap();
        assert!(fast.duration < slow.duration);

        let short = estimate(origin, near, FleetSpeed::MAX, &ships, &researches, &u).unwrap();
        assert!(short.duration < fast.duration);
        assert!(short.fuel < fast.fuel);
        assert!(short.fuel >= 1);
    }

    #[test]
    fn test_estimate_rejects_empty_fleet() {
        let u = universe();
        let result = estimate(
            Coordinate::new(1, 1, 1),
            Coordinate::new(1, 1, 2),
            FleetSpeed::MAX,
            &ShipsInfos::default(),
            &Researches::default(),
            &u,
        );
        assert_eq!(result, Err(GameError::EmptyFleet));
    }
}
