//! Ship catalog
//!
//! Per-class hull stats plus the drive model: a ship's effective speed is its
//! base speed scaled by the matching drive technology, 10%/20%/30% per level
//! for combustion/impulse/hyperspace drives.

use super::{BuildingId, TechnologyId, UnitId};
use crate::types::{Researches, Resources};
use serde::{Deserialize, Serialize};

/// Drive technology class powering a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveClass {
    Combustion,
    Impulse,
    Hyperspace,
}

impl DriveClass {
    /// Relative speed gain per drive level
    pub fn bonus_per_level(&self) -> f64 {
        match self {
            DriveClass::Combustion => 0.1,
            DriveClass::Impulse => 0.2,
            DriveClass::Hyperspace => 0.3,
        }
    }

    /// Level of the matching drive technology
    pub fn level_in(&self, researches: &Researches) -> u32 {
        match self {
            DriveClass::Combustion => researches.combustion_drive,
            DriveClass::Impulse => researches.impulse_drive,
            DriveClass::Hyperspace => researches.hyperspace_drive,
        }
    }
}

/// Ship classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipId {
    SmallCargo,
    LargeCargo,
    LightFighter,
    HeavyFighter,
    Cruiser,
    Battleship,
    ColonyShip,
    Recycler,
    EspionageProbe,
    Bomber,
    Destroyer,
    Deathstar,
    Battlecruiser,
}

const SMALL_CARGO_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 2),
    (UnitId::Technology(TechnologyId::CombustionDrive), 2),
];
const LARGE_CARGO_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 4),
    (UnitId::Technology(TechnologyId::CombustionDrive), 6),
];
const LIGHT_FIGHTER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 1),
    (UnitId::Technology(TechnologyId::CombustionDrive), 1),
];
const HEAVY_FIGHTER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 3),
    (UnitId::Technology(TechnologyId::ImpulseDrive), 2),
];
const CRUISER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 5),
    (UnitId::Technology(TechnologyId::ImpulseDrive), 4),
    (UnitId::Technology(TechnologyId::Ion), 2),
];
const BATTLESHIP_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 7),
    (UnitId::Technology(TechnologyId::HyperspaceDrive), 4),
];
const COLONY_SHIP_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 4),
    (UnitId::Technology(TechnologyId::ImpulseDrive), 3),
];
const RECYCLER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 4),
    (UnitId::Technology(TechnologyId::CombustionDrive), 6),
    (UnitId::Technology(TechnologyId::Shielding), 2),
];
const ESPIONAGE_PROBE_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 3),
    (UnitId::Technology(TechnologyId::CombustionDrive), 3),
    (UnitId::Technology(TechnologyId::Espionage), 2),
];
const BOMBER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 8),
    (UnitId::Technology(TechnologyId::ImpulseDrive), 6),
    (UnitId::Technology(TechnologyId::Plasma), 5),
];
const DESTROYER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 9),
    (UnitId::Technology(TechnologyId::HyperspaceDrive), 6),
    (UnitId::Technology(TechnologyId::Hyperspace), 5),
];
const DEATHSTAR_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 12),
    (UnitId::Technology(TechnologyId::HyperspaceDrive), 7),
    (UnitId::Technology(TechnologyId::Hyperspace), 6),
];
const BATTLECRUISER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 8),
    (UnitId::Technology(TechnologyId::HyperspaceDrive), 5),
    (UnitId::Technology(TechnologyId::Laser), 12),
];

impl ShipId {
    pub const ALL: [ShipId; 13] = [
        ShipId::SmallCargo,
        ShipId::LargeCargo,
        ShipId::LightFighter,
        ShipId::HeavyFighter,
        ShipId::Cruiser,
        ShipId::Battleship,
        ShipId::ColonyShip,
        ShipId::Recycler,
        ShipId::EspionageProbe,
        ShipId::Bomber,
        ShipId::Destroyer,
        ShipId::Deathstar,
        ShipId::Battlecruiser,
    ];

    /// Per-unit price
    pub fn price(&self) -> Resources {
        match self {
            ShipId::SmallCargo => Resources::new(2_000, 2_000, 0),
            ShipId::LargeCargo => Resources::new(6_000, 6_000, 0),
            ShipId::LightFighter => Resources::new(3_000, 1_000, 0),
            ShipId::HeavyFighter => Resources::new(6_000, 4_000, 0),
            ShipId::Cruiser => Resources::new(20_000, 7_000, 2_000),
            ShipId::Battleship => Resources::new(45_000, 15_000, 0),
            ShipId::ColonyShip => Resources::new(10_000, 20_000, 10_000),
            ShipId::Recycler => Resources::new(10_000, 6_000, 2_000),
            ShipId::EspionageProbe => Resources::new(0, 1_000, 0),
            ShipId::Bomber => Resources::new(50_000, 25_000, 15_000),
            ShipId::Destroyer => Resources::new(60_000, 50_000, 15_000),
            ShipId::Deathstar => Resources::new(5_000_000, 4_000_000, 1_000_000),
            ShipId::Battlecruiser => Resources::new(30_000, 40_000, 15_000),
        }
    }

    /// Base speed before drive bonuses
    pub fn base_speed(&self) -> u32 {
        match self {
            ShipId::SmallCargo => 5_000,
            ShipId::LargeCargo => 7_500,
            ShipId::LightFighter => 12_500,
            ShipId::HeavyFighter => 10_000,
            ShipId::Cruiser => 15_000,
            ShipId::Battleship => 10_000,
            ShipId::ColonyShip => 2_500,
            ShipId::Recycler => 2_000,
            ShipId::EspionageProbe => 100_000_000,
            ShipId::Bomber => 4_000,
            ShipId::Destroyer => 5_000,
            ShipId::Deathstar => 100,
            ShipId::Battlecruiser => 10_000,
        }
    }

    /// Drive technology that propels this hull
    pub fn drive(&self) -> DriveClass {
        match self {
            ShipId::SmallCargo
            | ShipId::LargeCargo
            | ShipId::LightFighter
            | ShipId::Recycler
            | ShipId::EspionageProbe => DriveClass::Combustion,
            ShipId::HeavyFighter | ShipId::Cruiser | ShipId::ColonyShip | ShipId::Bomber => {
                DriveClass::Impulse
            }
            ShipId::Battleship
            | ShipId::Destroyer
            | ShipId::Deathstar
            | ShipId::Battlecruiser => DriveClass::Hyperspace,
        }
    }

    /// Deuterium consumption per 35000 distance units at full count
    pub fn fuel_consumption(&self) -> u32 {
        match self {
            ShipId::SmallCargo => 10,
            ShipId::LargeCargo => 50,
            ShipId::LightFighter => 20,
            ShipId::HeavyFighter => 75,
            ShipId::Cruiser => 300,
            ShipId::Battleship => 500,
            ShipId::ColonyShip => 1_000,
            ShipId::Recycler => 300,
            ShipId::EspionageProbe => 1,
            ShipId::Bomber => 1_000,
            ShipId::Destroyer => 1_000,
            ShipId::Deathstar => 1,
            ShipId::Battlecruiser => 250,
        }
    }

    /// Cargo hold capacity per unit
    pub fn cargo_capacity(&self) -> u32 {
        match self {
            ShipId::SmallCargo => 5_000,
            ShipId::LargeCargo => 25_000,
            ShipId::LightFighter => 50,
            ShipId::HeavyFighter => 100,
            ShipId::Cruiser => 800,
            ShipId::Battleship => 1_500,
            ShipId::ColonyShip => 7_500,
            ShipId::Recycler => 20_000,
            ShipId::EspionageProbe => 5,
            ShipId::Bomber => 500,
            ShipId::Destroyer => 2_000,
            ShipId::Deathstar => 1_000_000,
            ShipId::Battlecruiser => 750,
        }
    }

    /// Effective speed under the account's drive research
    pub fn speed(&self, researches: &Researches) -> u32 {
        let drive = self.drive();
        let level = f64::from(drive.level_in(researches));
        (f64::from(self.base_speed()) * (1.0 + level * drive.bonus_per_level())) as u32
    }

    pub fn requirements(&self) -> &'static [(UnitId, u32)] {
        match self {
            ShipId::SmallCargo => SMALL_CARGO_REQS,
            ShipId::LargeCargo => LARGE_CARGO_REQS,
            ShipId::LightFighter => LIGHT_FIGHTER_REQS,
            ShipId::HeavyFighter => HEAVY_FIGHTER_REQS,
            ShipId::Cruiser => CRUISER_REQS,
            ShipId::Battleship => BATTLESHIP_REQS,
            ShipId::ColonyShip => COLONY_SHIP_REQS,
            ShipId::Recycler => RECYCLER_REQS,
            ShipId::EspionageProbe => ESPIONAGE_PROBE_REQS,
            ShipId::Bomber => BOMBER_REQS,
            ShipId::Destroyer => DESTROYER_REQS,
            ShipId::Deathstar => DEATHSTAR_REQS,
            ShipId::Battlecruiser => BATTLECRUISER_REQS,
        }
    }
}
