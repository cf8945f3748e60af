//! Technology catalog

use super::{scaled_cost, BuildingId, UnitId};
use crate::types::{Researches, Resources};
use serde::{Deserialize, Serialize};

/// Account-wide technologies researched in a lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechnologyId {
    Energy,
    Laser,
    Ion,
    Plasma,
    Hyperspace,
    Espionage,
    Computer,
    CombustionDrive,
    ImpulseDrive,
    HyperspaceDrive,
    Weapons,
    Shielding,
    Armour,
}

const ENERGY_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::ResearchLab), 1)];
const LASER_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::ResearchLab), 1),
    (UnitId::Technology(TechnologyId::Energy), 2),
];
const ION_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::ResearchLab), 4),
    (UnitId::Technology(TechnologyId::Energy), 4),
    (UnitId::Technology(TechnologyId::Laser), 5),
];
const PLASMA_REQS: &[(UnitId, u32)] = &[
    (UnitId::Technology(TechnologyId::Energy), 8),
    (UnitId::Technology(TechnologyId::Laser), 10),
    (UnitId::Technology(TechnologyId::Ion), 5),
];
const HYPERSPACE_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::ResearchLab), 7),
    (UnitId::Technology(TechnologyId::Energy), 5),
    (UnitId::Technology(TechnologyId::Shielding), 5),
];
const ESPIONAGE_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::ResearchLab), 3)];
const COMPUTER_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::ResearchLab), 1)];
const COMBUSTION_REQS: &[(UnitId, u32)] = &[(UnitId::Technology(TechnologyId::Energy), 1)];
const IMPULSE_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::ResearchLab), 2),
    (UnitId::Technology(TechnologyId::Energy), 1),
];
const HYPERSPACE_DRIVE_REQS: &[(UnitId, u32)] =
    &[(UnitId::Technology(TechnologyId::Hyperspace), 3)];
const WEAPONS_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::ResearchLab), 4)];
const SHIELDING_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::ResearchLab), 6),
    (UnitId::Technology(TechnologyId::Energy), 3),
];
const ARMOUR_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::ResearchLab), 2)];

impl TechnologyId {
    pub const ALL: [TechnologyId; 13] = [
        TechnologyId::Energy,
        TechnologyId::Laser,
        TechnologyId::Ion,
        TechnologyId::Plasma,
        TechnologyId::Hyperspace,
        TechnologyId::Espionage,
        TechnologyId::Computer,
        TechnologyId::CombustionDrive,
        TechnologyId::ImpulseDrive,
        TechnologyId::HyperspaceDrive,
        TechnologyId::Weapons,
        TechnologyId::Shielding,
        TechnologyId::Armour,
    ];

    /// Cost of level 1; every technology doubles per level
    pub fn base_cost(&self) -> Resources {
        match self {
            TechnologyId::Energy => Resources::new(0, 800, 400),
            TechnologyId::Laser => Resources::new(200, 100, 0),
            TechnologyId::Ion => Resources::new(1_000, 300, 100),
            TechnologyId::Plasma => Resources::new(2_000, 4_000, 1_000),
            TechnologyId::Hyperspace => Resources::new(0, 4_000, 2_000),
            TechnologyId::Espionage => Resources::new(200, 1_000, 200),
            TechnologyId::Computer => Resources::new(0, 400, 600),
            TechnologyId::CombustionDrive => Resources::new(400, 0, 600),
            TechnologyId::ImpulseDrive => Resources::new(2_000, 4_000, 600),
            TechnologyId::HyperspaceDrive => Resources::new(10_000, 20_000, 6_000),
            TechnologyId::Weapons => Resources::new(800, 200, 0),
            TechnologyId::Shielding => Resources::new(200, 600, 0),
            TechnologyId::Armour => Resources::new(1_000, 0, 0),
        }
    }

    /// Price of the given level
    pub fn cost(&self, level: u32) -> Resources {
        scaled_cost(self.base_cost(), 2.0, level)
    }

    pub fn requirements(&self) -> &'static [(UnitId, u32)] {
        match self {
            TechnologyId::Energy => ENERGY_REQS,
            TechnologyId::Laser => LASER_REQS,
            TechnologyId::Ion => ION_REQS,
            TechnologyId::Plasma => PLASMA_REQS,
            TechnologyId::Hyperspace => HYPERSPACE_REQS,
            TechnologyId::Espionage => ESPIONAGE_REQS,
            TechnologyId::Computer => COMPUTER_REQS,
            TechnologyId::CombustionDrive => COMBUSTION_REQS,
            TechnologyId::ImpulseDrive => IMPULSE_REQS,
            TechnologyId::HyperspaceDrive => HYPERSPACE_DRIVE_REQS,
            TechnologyId::Weapons => WEAPONS_REQS,
            TechnologyId::Shielding => SHIELDING_REQS,
            TechnologyId::Armour => ARMOUR_REQS,
        }
    }

    /// Current level of this technology in the account researches
    pub fn level_in(&self, researches: &Researches) -> u32 {
        match self {
            TechnologyId::Energy => researches.energy,
            TechnologyId::Laser => researches.laser,
            TechnologyId::Ion => researches.ion,
            TechnologyId::Plasma => researches.plasma,
            TechnologyId::Hyperspace => researches.hyperspace,
            TechnologyId::Espionage => researches.espionage,
            TechnologyId::Computer => researches.computer,
            TechnologyId::CombustionDrive => researches.combustion_drive,
            TechnologyId::ImpulseDrive => researches.impulse_drive,
            TechnologyId::HyperspaceDrive => researches.hyperspace_drive,
            TechnologyId::Weapons => researches.weapons,
            TechnologyId::Shielding => researches.shielding,
            TechnologyId::Armour => researches.armour,
        }
    }

    /// Raise this technology by one level in `researches`
    pub fn bump_in(&self, researches: &mut Researches) {
        let slot = match self {
            TechnologyId::Energy => &mut researches.energy,
            TechnologyId::Laser => &mut researches.laser,
            TechnologyId::Ion => &mut researches.ion,
            TechnologyId::Plasma => &mut researches.plasma,
            TechnologyId::Hyperspace => &mut researches.hyperspace,
            TechnologyId::Espionage => &mut researches.espionage,
            TechnologyId::Computer => &mut researches.computer,
            TechnologyId::CombustionDrive => &mut researches.combustion_drive,
            TechnologyId::ImpulseDrive => &mut researches.impulse_drive,
            TechnologyId::HyperspaceDrive => &mut researches.hyperspace_drive,
            TechnologyId::Weapons => &mut researches.weapons,
            TechnologyId::Shielding => &mut researches.shielding,
            TechnologyId::Armour => &mut researches.armour,
        };
        *slot += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ion_technology_catalog_entry() {
        assert_eq!(TechnologyId::Ion.cost(1), Resources::new(1_000, 300, 100));
        assert_eq!(TechnologyId::Ion.cost(3), Resources::new(4_000, 1_200, 400));

        let reqs = TechnologyId::Ion.requirements();
        assert!(reqs.contains(&(UnitId::Building(BuildingId::ResearchLab), 4)));
        assert!(reqs.contains(&(UnitId::Technology(TechnologyId::Energy), 4)));
        assert!(reqs.contains(&(UnitId::Technology(TechnologyId::Laser), 5)));
    }

    #[test]
    fn test_level_accessors() {
        let mut researches = Researches::default();
        assert_eq!(TechnologyId::ImpulseDrive.level_in(&researches), 0);

        TechnologyId::ImpulseDrive.bump_in(&mut researches);
        TechnologyId::ImpulseDrive.bump_in(&mut researches);
        assert_eq!(TechnologyId::ImpulseDrive.level_in(&researches), 2);
        assert_eq!(researches.impulse_drive, 2);
    }
}
