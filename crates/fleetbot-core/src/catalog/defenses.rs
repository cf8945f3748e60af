//! Defense catalog

use super::{BuildingId, TechnologyId, UnitId};
use crate::types::Resources;
use serde::{Deserialize, Serialize};

/// Stationary defense units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseId {
    RocketLauncher,
    LightLaser,
    HeavyLaser,
    GaussCannon,
    IonCannon,
    PlasmaTurret,
    SmallShieldDome,
    LargeShieldDome,
    AntiBallisticMissiles,
    InterplanetaryMissiles,
}

const ROCKET_LAUNCHER_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::Shipyard), 1)];
const LIGHT_LASER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 2),
    (UnitId::Technology(TechnologyId::Laser), 3),
];
const HEAVY_LASER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 4),
    (UnitId::Technology(TechnologyId::Energy), 3),
    (UnitId::Technology(TechnologyId::Laser), 6),
];
const GAUSS_CANNON_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 6),
    (UnitId::Technology(TechnologyId::Energy), 6),
    (UnitId::Technology(TechnologyId::Weapons), 3),
    (UnitId::Technology(TechnologyId::Shielding), 1),
];
const ION_CANNON_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 4),
    (UnitId::Technology(TechnologyId::Ion), 4),
];
const PLASMA_TURRET_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 8),
    (UnitId::Technology(TechnologyId::Plasma), 7),
];
const SMALL_SHIELD_DOME_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 1),
    (UnitId::Technology(TechnologyId::Shielding), 2),
];
const LARGE_SHIELD_DOME_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::Shipyard), 6),
    (UnitId::Technology(TechnologyId::Shielding), 6),
];
const ANTI_BALLISTIC_MISSILES_REQS: &[(UnitId, u32)] =
    &[(UnitId::Building(BuildingId::MissileSilo), 2)];
const INTERPLANETARY_MISSILES_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::MissileSilo), 4),
    (UnitId::Technology(TechnologyId::ImpulseDrive), 1),
];

impl DefenseId {
    pub const ALL: [DefenseId; 10] = [
        DefenseId::RocketLauncher,
        DefenseId::LightLaser,
        DefenseId::HeavyLaser,
        DefenseId::GaussCannon,
        DefenseId::IonCannon,
        DefenseId::PlasmaTurret,
        DefenseId::SmallShieldDome,
        DefenseId::LargeShieldDome,
        DefenseId::AntiBallisticMissiles,
        DefenseId::InterplanetaryMissiles,
    ];

    /// Per-unit price
    pub fn price(&self) -> Resources {
        match self {
            DefenseId::RocketLauncher => Resources::new(2_000, 0, 0),
            DefenseId::LightLaser => Resources::new(1_500, 500, 0),
            DefenseId::HeavyLaser => Resources::new(6_000, 2_000, 0),
            DefenseId::GaussCannon => Resources::new(20_000, 15_000, 2_000),
            DefenseId::IonCannon => Resources::new(2_000, 6_000, 0),
            DefenseId::PlasmaTurret => Resources::new(50_000, 50_000, 30_000),
            DefenseId::SmallShieldDome => Resources::new(10_000, 10_000, 0),
            DefenseId::LargeShieldDome => Resources::new(50_000, 50_000, 0),
            DefenseId::AntiBallisticMissiles => Resources::new(8_000, 0, 2_000),
            DefenseId::InterplanetaryMissiles => Resources::new(12_500, 2_500, 10_000),
        }
    }

    /// Hull strength
    pub fn structural_integrity(&self) -> u32 {
        match self {
            DefenseId::RocketLauncher => 2_000,
            DefenseId::LightLaser => 2_000,
            DefenseId::HeavyLaser => 8_000,
            DefenseId::GaussCannon => 35_000,
            DefenseId::IonCannon => 8_000,
            DefenseId::PlasmaTurret => 100_000,
            DefenseId::SmallShieldDome => 20_000,
            DefenseId::LargeShieldDome => 100_000,
            DefenseId::AntiBallisticMissiles => 8_000,
            DefenseId::InterplanetaryMissiles => 15_000,
        }
    }

    pub fn shield_power(&self) -> u32 {
        match self {
            DefenseId::RocketLauncher => 20,
            DefenseId::LightLaser => 25,
            DefenseId::HeavyLaser => 100,
            DefenseId::GaussCannon => 200,
            DefenseId::IonCannon => 500,
            DefenseId::PlasmaTurret => 300,
            DefenseId::SmallShieldDome => 2_000,
            DefenseId::LargeShieldDome => 10_000,
            DefenseId::AntiBallisticMissiles => 1,
            DefenseId::InterplanetaryMissiles => 1,
        }
    }

    pub fn weapon_power(&self) -> u32 {
        match self {
            DefenseId::RocketLauncher => 80,
            DefenseId::LightLaser => 100,
            DefenseId::HeavyLaser => 250,
            DefenseId::GaussCannon => 1_100,
            DefenseId::IonCannon => 150,
            DefenseId::PlasmaTurret => 3_000,
            DefenseId::SmallShieldDome => 1,
            DefenseId::LargeShieldDome => 1,
            DefenseId::AntiBallisticMissiles => 1,
            DefenseId::InterplanetaryMissiles => 12_000,
        }
    }

    pub fn requirements(&self) -> &'static [(UnitId, u32)] {
        match self {
            DefenseId::RocketLauncher => ROCKET_LAUNCHER_REQS,
            DefenseId::LightLaser => LIGHT_LASER_REQS,
            DefenseId::HeavyLaser => HEAVY_LASER_REQS,
            DefenseId::GaussCannon => GAUSS_CANNON_REQS,
            DefenseId::IonCannon => ION_CANNON_REQS,
            DefenseId::PlasmaTurret => PLASMA_TURRET_REQS,
            DefenseId::SmallShieldDome => SMALL_SHIELD_DOME_REQS,
            DefenseId::LargeShieldDome => LARGE_SHIELD_DOME_REQS,
            DefenseId::AntiBallisticMissiles => ANTI_BALLISTIC_MISSILES_REQS,
            DefenseId::InterplanetaryMissiles => INTERPLANETARY_MISSILES_REQS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interplanetary_missiles_entry() {
        let ipm = DefenseId::InterplanetaryMissiles;
        assert_eq!(ipm.price(), Resources::new(12_500, 2_500, 10_000));
        assert_eq!(ipm.structural_integrity(), 15_000);
        assert_eq!(ipm.shield_power(), 1);
        assert_eq!(ipm.weapon_power(), 12_000);

        let reqs = ipm.requirements();
        assert!(reqs.contains(&(UnitId::Building(BuildingId::MissileSilo), 4)));
        assert!(reqs.contains(&(UnitId::Technology(TechnologyId::ImpulseDrive), 1)));
    }

    #[test]
    fn test_every_defense_has_a_shipyard_or_silo_requirement() {
        for defense in DefenseId::ALL {
            let gated = defense.requirements().iter().any(|(unit, _)| {
                matches!(
                    unit,
                    UnitId::Building(BuildingId::Shipyard) | UnitId::Building(BuildingId::MissileSilo)
                )
            });
            assert!(gated, "{defense:?} has no production building requirement");
        }
    }
}
