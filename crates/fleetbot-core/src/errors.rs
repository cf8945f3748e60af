//! Error types for the fleetbot client
//!
//! Every fallible operation in the fleetbot crates reports a [`GameError`].
//! Errors are recoverable by design: the serialization controller in the
//! client crate never inspects or suppresses them, it only guarantees that a
//! failed operation releases the session lock on its way out.

use crate::types::{CelestialId, Coordinate, FleetId, MoonId, PlanetId, Resources};
use crate::{ShipId, UnitId};

/// Unified error type for session operations and game-rule calculations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Bad credentials")]
    BadCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid celestial id {0}")]
    InvalidCelestial(CelestialId),

    #[error("Invalid planet id {0}")]
    InvalidPlanet(PlanetId),

    #[error("Invalid moon id {0}")]
    InvalidMoon(MoonId),

    #[error("Coordinate {0} is outside the universe")]
    InvalidCoordinate(Coordinate),

    #[error("Unknown fleet id {0}")]
    UnknownFleet(FleetId),

    #[error("Fleet contains no ships")]
    EmptyFleet,

    #[error("Not enough ships: wanted {wanted} {ship:?}, only {available} available")]
    NotEnoughShips {
        ship: ShipId,
        wanted: i64,
        available: i64,
    },

    #[error("Not enough resources: needed {needed}, available {available}")]
    NotEnoughResources {
        needed: Resources,
        available: Resources,
    },

    #[error("Requirements not met for {0:?}")]
    RequirementsNotMet(UnitId),

    #[error("Invalid fleet speed {0}% (expected a multiple of 10 between 10 and 100)")]
    InvalidSpeed(u8),

    #[error("No free fleet slots")]
    NoFreeFleetSlots,

    #[error("No missile silo (or no missiles) on this planet")]
    NoMissilesAvailable,

    #[error("Network error: {0}")]
    Network(String),
}
