//! Core value types for the fleetbot client
//!
//! Identifiers, coordinates, resource bundles and fleet descriptions shared by
//! the session client and the pure calculations. All types are plain data with
//! serde support so callers can persist snapshots of game state.

use crate::catalog::{BuildingId, DefenseId, ShipId, UnitId};
use core::fmt;
use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Identifiers
// ----------------------------------------------------------------------------

/// Identifier of a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanetId(pub u32);

/// Identifier of a moon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoonId(pub u32);

/// Identifier of any celestial body (planet or moon)
///
/// The remote server uses a single id space for both, so a planet or moon id
/// converts into a celestial id losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CelestialId(pub u32);

/// Identifier of a fleet in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FleetId(pub u64);

impl From<PlanetId> for CelestialId {
    fn from(id: PlanetId) -> Self {
        CelestialId(id.0)
    }
}

impl From<MoonId> for CelestialId {
    fn from(id: MoonId) -> Self {
        CelestialId(id.0)
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MoonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CelestialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FleetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ----------------------------------------------------------------------------
// Coordinates
// ----------------------------------------------------------------------------

/// Galaxy/system/position coordinate of a celestial body
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub galaxy: u16,
    pub system: u16,
    pub position: u8,
}

impl Coordinate {
    pub const fn new(galaxy: u16, system: u16, position: u8) -> Self {
        Self {
            galaxy,
            system,
            position,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.galaxy, self.system, self.position)
    }
}

// ----------------------------------------------------------------------------
// Resources
// ----------------------------------------------------------------------------

/// A bundle of the three material resources plus energy
///
/// Energy is never part of a price; it only shows up in production reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub metal: i64,
    pub crystal: i64,
    pub deuterium: i64,
    pub energy: i64,
}

impl Resources {
    pub const ZERO: Resources = Resources::new(0, 0, 0);

    pub const fn new(metal: i64, crystal: i64, deuterium: i64) -> Self {
        Self {
            metal,
            crystal,
            deuterium,
            energy: 0,
        }
    }

    /// Total amount of material resources (energy excluded)
    pub fn total(&self) -> i64 {
        self.metal + self.crystal + self.deuterium
    }

    /// True if every material component of `price` is available in `self`
    pub fn covers(&self, price: &Resources) -> bool {
        self.metal >= price.metal
            && self.crystal >= price.crystal
            && self.deuterium >= price.deuterium
    }

    /// Multiply each component, used for per-unit prices
    pub fn times(&self, count: u32) -> Resources {
        let n = i64::from(count);
        Resources {
            metal: self.metal * n,
            crystal: self.crystal * n,
            deuterium: self.deuterium * n,
            energy: self.energy * n,
        }
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, other: Resources) -> Resources {
        Resources {
            metal: self.metal + other.metal,
            crystal: self.crystal + other.crystal,
            deuterium: self.deuterium + other.deuterium,
            energy: self.energy + other.energy,
        }
    }
}

impl Sub for Resources {
    type Output = Resources;

    fn sub(self, other: Resources) -> Resources {
        Resources {
            metal: self.metal - other.metal,
            crystal: self.crystal - other.crystal,
            deuterium: self.deuterium - other.deuterium,
            energy: self.energy - other.energy,
        }
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}m/{}c/{}d",
            self.metal, self.crystal, self.deuterium
        )
    }
}

// ----------------------------------------------------------------------------
// Planets
// ----------------------------------------------------------------------------

/// Surface temperature range of a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Temperature {
    pub min: i32,
    pub max: i32,
}

impl Temperature {
    pub fn mean(&self) -> i32 {
        (self.min + self.max) / 2
    }
}

/// A planet owned by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub coordinate: Coordinate,
    pub temperature: Temperature,
}

// ----------------------------------------------------------------------------
// Fleet Speed & Missions
// ----------------------------------------------------------------------------

/// Fleet travel speed as a percentage of maximum (10%, 20%, ..., 100%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FleetSpeed(u8);

impl FleetSpeed {
    pub const MAX: FleetSpeed = FleetSpeed(100);

    /// Build a speed from a percentage; only multiples of 10 in 10..=100 are
    /// accepted by the server.
    pub fn percent(pct: u8) -> crate::Result<Self> {
        if pct == 0 || pct > 100 || pct % 10 != 0 {
            return Err(crate::GameError::InvalidSpeed(pct));
        }
        Ok(FleetSpeed(pct))
    }

    pub fn as_percent(&self) -> u8 {
        self.0
    }

    /// Speed as a fraction in (0, 1]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for FleetSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Mission a fleet can fly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mission {
    Attack,
    Transport,
    Deployment,
    Espionage,
    Colonize,
    Recycle,
    Destroy,
    Expedition,
}

// ----------------------------------------------------------------------------
// Ships
// ----------------------------------------------------------------------------

/// Ship counts of a fleet or a shipyard hangar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipsInfos {
    pub small_cargo: i64,
    pub large_cargo: i64,
    pub light_fighter: i64,
    pub heavy_fighter: i64,
    pub cruiser: i64,
    pub battleship: i64,
    pub colony_ship: i64,
    pub recycler: i64,
    pub espionage_probe: i64,
    pub bomber: i64,
    pub destroyer: i64,
    pub deathstar: i64,
    pub battlecruiser: i64,
}

impl ShipsInfos {
    /// Number of ships of the given class
    pub fn get(&self, ship: ShipId) -> i64 {
        match ship {
            ShipId::SmallCargo => self.small_cargo,
            ShipId::LargeCargo => self.large_cargo,
            ShipId::LightFighter => self.light_fighter,
            ShipId::HeavyFighter => self.heavy_fighter,
            ShipId::Cruiser => self.cruiser,
            ShipId::Battleship => self.battleship,
            ShipId::ColonyShip => self.colony_ship,
            ShipId::Recycler => self.recycler,
            ShipId::EspionageProbe => self.espionage_probe,
            ShipId::Bomber => self.bomber,
            ShipId::Destroyer => self.destroyer,
            ShipId::Deathstar => self.deathstar,
            ShipId::Battlecruiser => self.battlecruiser,
        }
    }

    /// Set the number of ships of the given class
    pub fn set(&mut self, ship: ShipId, count: i64) {
        let slot = match ship {
            ShipId::SmallCargo => &mut self.small_cargo,
            ShipId::LargeCargo => &mut self.large_cargo,
            ShipId::LightFighter => &mut self.light_fighter,
            ShipId::HeavyFighter => &mut self.heavy_fighter,
            ShipId::Cruiser => &mut self.cruiser,
            ShipId::Battleship => &mut self.battleship,
            ShipId::ColonyShip => &mut self.colony_ship,
            ShipId::Recycler => &mut self.recycler,
            ShipId::EspionageProbe => &mut self.espionage_probe,
            ShipId::Bomber => &mut self.bomber,
            ShipId::Destroyer => &mut self.destroyer,
            ShipId::Deathstar => &mut self.deathstar,
            ShipId::Battlecruiser => &mut self.battlecruiser,
        };
        *slot = count;
    }

    /// Iterate over the non-zero ship classes
    pub fn iter(&self) -> impl Iterator<Item = (ShipId, i64)> + '_ {
        ShipId::ALL
            .iter()
            .map(move |&id| (id, self.get(id)))
            .filter(|&(_, n)| n != 0)
    }

    /// Total number of ships
    pub fn total(&self) -> i64 {
        ShipId::ALL.iter().map(|&id| self.get(id)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// First ship class of `wanted` that `self` cannot supply, if any
    pub fn first_shortfall(&self, wanted: &ShipsInfos) -> Option<(ShipId, i64, i64)> {
        wanted
            .iter()
            .find(|&(id, n)| self.get(id) < n)
            .map(|(id, n)| (id, n, self.get(id)))
    }

    /// Add every class of `other` into `self`
    pub fn add(&mut self, other: &ShipsInfos) {
        for (id, n) in other.iter() {
            self.set(id, self.get(id) + n);
        }
    }

    /// Remove every class of `other` from `self`; counts must already cover it
    pub fn subtract(&mut self, other: &ShipsInfos) {
        for (id, n) in other.iter() {
            self.set(id, self.get(id) - n);
        }
    }
}

// ----------------------------------------------------------------------------
// Building / Defense Levels
// ----------------------------------------------------------------------------

/// Levels of the resource-producing buildings on a celestial body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceBuildings {
    pub metal_mine: u32,
    pub crystal_mine: u32,
    pub deuterium_synthesizer: u32,
    pub solar_plant: u32,
    pub fusion_reactor: u32,
}

impl ResourceBuildings {
    /// Level of the given building, `None` if it is not a resource building
    pub fn level_of(&self, building: BuildingId) -> Option<u32> {
        match building {
            BuildingId::MetalMine => Some(self.metal_mine),
            BuildingId::CrystalMine => Some(self.crystal_mine),
            BuildingId::DeuteriumSynthesizer => Some(self.deuterium_synthesizer),
            BuildingId::SolarPlant => Some(self.solar_plant),
            BuildingId::FusionReactor => Some(self.fusion_reactor),
            _ => None,
        }
    }

    /// Set the level of the given building; `false` if it is not a resource
    /// building
    pub fn set_level(&mut self, building: BuildingId, level: u32) -> bool {
        let slot = match building {
            BuildingId::MetalMine => &mut self.metal_mine,
            BuildingId::CrystalMine => &mut self.crystal_mine,
            BuildingId::DeuteriumSynthesizer => &mut self.deuterium_synthesizer,
            BuildingId::SolarPlant => &mut self.solar_plant,
            BuildingId::FusionReactor => &mut self.fusion_reactor,
            _ => return false,
        };
        *slot = level;
        true
    }
}

/// Levels of the facility buildings on a celestial body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Facilities {
    pub robotics_factory: u32,
    pub shipyard: u32,
    pub research_lab: u32,
    pub missile_silo: u32,
    pub nanite_factory: u32,
}

impl Facilities {
    /// Level of the given building, `None` if it is not a facility
    pub fn level_of(&self, building: BuildingId) -> Option<u32> {
        match building {
            BuildingId::RoboticsFactory => Some(self.robotics_factory),
            BuildingId::Shipyard => Some(self.shipyard),
            BuildingId::ResearchLab => Some(self.research_lab),
            BuildingId::MissileSilo => Some(self.missile_silo),
            BuildingId::NaniteFactory => Some(self.nanite_factory),
            _ => None,
        }
    }

    /// Set the level of the given building; `false` if it is not a facility
    pub fn set_level(&mut self, building: BuildingId, level: u32) -> bool {
        let slot = match building {
            BuildingId::RoboticsFactory => &mut self.robotics_factory,
            BuildingId::Shipyard => &mut self.shipyard,
            BuildingId::ResearchLab => &mut self.research_lab,
            BuildingId::MissileSilo => &mut self.missile_silo,
            BuildingId::NaniteFactory => &mut self.nanite_factory,
            _ => return false,
        };
        *slot = level;
        true
    }
}

/// Defense unit counts on a celestial body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefensesInfos {
    pub rocket_launcher: i64,
    pub light_laser: i64,
    pub heavy_laser: i64,
    pub gauss_cannon: i64,
    pub ion_cannon: i64,
    pub plasma_turret: i64,
    pub small_shield_dome: i64,
    pub large_shield_dome: i64,
    pub anti_ballistic_missiles: i64,
    pub interplanetary_missiles: i64,
}

impl DefensesInfos {
    pub fn get(&self, defense: DefenseId) -> i64 {
        match defense {
            DefenseId::RocketLauncher => self.rocket_launcher,
            DefenseId::LightLaser => self.light_laser,
            DefenseId::HeavyLaser => self.heavy_laser,
            DefenseId::GaussCannon => self.gauss_cannon,
            DefenseId::IonCannon => self.ion_cannon,
            DefenseId::PlasmaTurret => self.plasma_turret,
            DefenseId::SmallShieldDome => self.small_shield_dome,
            DefenseId::LargeShieldDome => self.large_shield_dome,
            DefenseId::AntiBallisticMissiles => self.anti_ballistic_missiles,
            DefenseId::InterplanetaryMissiles => self.interplanetary_missiles,
        }
    }

    pub fn set(&mut self, defense: DefenseId, count: i64) {
        let slot = match defense {
            DefenseId::RocketLauncher => &mut self.rocket_launcher,
            DefenseId::LightLaser => &mut self.light_laser,
            DefenseId::HeavyLaser => &mut self.heavy_laser,
            DefenseId::GaussCannon => &mut self.gauss_cannon,
            DefenseId::IonCannon => &mut self.ion_cannon,
            DefenseId::PlasmaTurret => &mut self.plasma_turret,
            DefenseId::SmallShieldDome => &mut self.small_shield_dome,
            DefenseId::LargeShieldDome => &mut self.large_shield_dome,
            DefenseId::AntiBallisticMissiles => &mut self.anti_ballistic_missiles,
            DefenseId::InterplanetaryMissiles => &mut self.interplanetary_missiles,
        };
        *slot = count;
    }
}

// ----------------------------------------------------------------------------
// Research
// ----------------------------------------------------------------------------

/// Research levels of the player account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Researches {
    pub energy: u32,
    pub laser: u32,
    pub ion: u32,
    pub plasma: u32,
    pub hyperspace: u32,
    pub espionage: u32,
    pub computer: u32,
    pub combustion_drive: u32,
    pub impulse_drive: u32,
    pub hyperspace_drive: u32,
    pub weapons: u32,
    pub shielding: u32,
    pub armour: u32,
}

// ----------------------------------------------------------------------------
// Production & Fleets
// ----------------------------------------------------------------------------

/// A quantified unit in a production queue or missile volley
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipOrder {
    pub unit: UnitId,
    pub count: u32,
}

/// Fleet slot usage of the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slots {
    pub in_use: u32,
    pub total: u32,
}

impl Slots {
    pub fn is_full(&self) -> bool {
        self.in_use >= self.total
    }
}

/// Everything the server needs to dispatch a fleet from a celestial body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetOrder {
    pub ships: ShipsInfos,
    pub speed: FleetSpeed,
    pub destination: Coordinate,
    pub mission: Mission,
    pub cargo: Resources,
}

/// A fleet currently in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub mission: Mission,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub ships: ShipsInfos,
    pub cargo: Resources,
    pub arrival: Timestamp,
}

// ----------------------------------------------------------------------------
// Time
// ----------------------------------------------------------------------------

/// Milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl Add<u64> for Timestamp {
    type Output = Timestamp;

    fn add(self, millis: u64) -> Timestamp {
        Timestamp(self.0 + millis)
    }
}

/// Source of wall-clock time, swappable for deterministic tests
pub trait TimeSource {
    fn now(&self) -> Timestamp;
}

/// Standard library implementation of [`TimeSource`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_cover_and_arithmetic() {
        let bank = Resources::new(1000, 500, 100);
        let price = Resources::new(900, 360, 180);

        assert!(!bank.covers(&price));
        assert!((bank + Resources::new(0, 0, 100)).covers(&price));
        assert_eq!((bank - price).metal, 100);
        assert_eq!(price.times(2), Resources::new(1800, 720, 360));
    }

    #[test]
    fn test_fleet_speed_validation() {
        assert!(FleetSpeed::percent(50).is_ok());
        assert!(FleetSpeed::percent(0).is_err());
        assert!(FleetSpeed::percent(55).is_err());
        assert!(FleetSpeed::percent(110).is_err());
        assert_eq!(FleetSpeed::MAX.fraction(), 1.0);
    }

    #[test]
    fn test_ships_shortfall() {
        let mut hangar = ShipsInfos::default();
        hangar.set(ShipId::SmallCargo, 10);
        hangar.set(ShipId::LightFighter, 3);

        let mut wanted = ShipsInfos::default();
        wanted.set(ShipId::SmallCargo, 5);
        wanted.set(ShipId::LightFighter, 4);

        assert_eq!(
            hangar.first_shortfall(&wanted),
            Some((ShipId::LightFighter, 4, 3))
        );

        wanted.set(ShipId::LightFighter, 3);
        assert_eq!(hangar.first_shortfall(&wanted), None);

        hangar.subtract(&wanted);
        assert_eq!(hangar.small_cargo, 5);
        assert_eq!(hangar.light_fighter, 0);
    }

    #[test]
    fn test_coordinate_roundtrip() {
        let coord = Coordinate::new(4, 212, 8);
        let json = serde_json::to_string(&coord).expect("serialize");
        let back: Coordinate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(coord, back);
        assert_eq!(coord.to_string(), "[4:212:8]");
    }
}
