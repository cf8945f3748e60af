//! Fleetbot Core
//!
//! Domain value types, the unit catalog and the pure game-rule calculations
//! shared by every part of the fleetbot automation client. This crate performs
//! no I/O and has no async surface: everything here is a plain value
//! computation that higher layers (the session client, schedulers, tooling)
//! compose under their own concurrency discipline.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod catalog;
pub mod config;
pub mod errors;
pub mod flight;
pub mod types;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use catalog::{BuildingId, DefenseId, DriveClass, ShipId, TechnologyId, UnitId};
pub use config::UniverseConfig;
pub use errors::GameError;
pub use flight::FlightEstimate;
pub use types::{
    CelestialId, Coordinate, DefensesInfos, Facilities, Fleet, FleetId, FleetOrder, FleetSpeed,
    Mission, MoonId, Planet, PlanetId, Researches, ResourceBuildings, Resources, ShipOrder,
    ShipsInfos, Slots, SystemTimeSource, Temperature, TimeSource, Timestamp,
};

/// Result alias used throughout the fleetbot crates
pub type Result<T> = core::result::Result<T, GameError>;
