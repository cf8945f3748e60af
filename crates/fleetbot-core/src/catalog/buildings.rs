//! Building catalog

use super::{scaled_cost, TechnologyId, UnitId};
use crate::types::Resources;
use serde::{Deserialize, Serialize};

/// Buildings constructible on a celestial body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingId {
    MetalMine,
    CrystalMine,
    DeuteriumSynthesizer,
    SolarPlant,
    FusionReactor,
    RoboticsFactory,
    Shipyard,
    ResearchLab,
    MissileSilo,
    NaniteFactory,
}

const FUSION_REACTOR_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::DeuteriumSynthesizer), 5),
    (UnitId::Technology(TechnologyId::Energy), 3),
];
const SHIPYARD_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::RoboticsFactory), 2)];
const MISSILE_SILO_REQS: &[(UnitId, u32)] = &[(UnitId::Building(BuildingId::Shipyard), 1)];
const NANITE_FACTORY_REQS: &[(UnitId, u32)] = &[
    (UnitId::Building(BuildingId::RoboticsFactory), 10),
    (UnitId::Technology(TechnologyId::Computer), 10),
];

impl BuildingId {
    pub const ALL: [BuildingId; 10] = [
        BuildingId::MetalMine,
        BuildingId::CrystalMine,
        BuildingId::DeuteriumSynthesizer,
        BuildingId::SolarPlant,
        BuildingId::FusionReactor,
        BuildingId::RoboticsFactory,
        BuildingId::Shipyard,
        BuildingId::ResearchLab,
        BuildingId::MissileSilo,
        BuildingId::NaniteFactory,
    ];

    /// Cost of level 1
    pub fn base_cost(&self) -> Resources {
        match self {
            BuildingId::MetalMine => Resources::new(60, 15, 0),
            BuildingId::CrystalMine => Resources::new(48, 24, 0),
            BuildingId::DeuteriumSynthesizer => Resources::new(225, 75, 0),
            BuildingId::SolarPlant => Resources::new(75, 30, 0),
            BuildingId::FusionReactor => Resources::new(900, 360, 180),
            BuildingId::RoboticsFactory => Resources::new(400, 120, 200),
            BuildingId::Shipyard => Resources::new(400, 200, 100),
            BuildingId::ResearchLab => Resources::new(200, 400, 200),
            BuildingId::MissileSilo => Resources::new(20_000, 20_000, 1_000),
            BuildingId::NaniteFactory => Resources::new(1_000_000, 500_000, 100_000),
        }
    }

    /// Per-level cost growth factor
    pub fn increase_factor(&self) -> f64 {
        match self {
            BuildingId::MetalMine => 1.5,
            BuildingId::CrystalMine => 1.6,
            BuildingId::DeuteriumSynthesizer => 1.5,
            BuildingId::SolarPlant => 1.5,
            BuildingId::FusionReactor => 1.8,
            BuildingId::RoboticsFactory => 2.0,
            BuildingId::Shipyard => 2.0,
            BuildingId::ResearchLab => 2.0,
            BuildingId::MissileSilo => 2.0,
            BuildingId::NaniteFactory => 2.0,
        }
    }

    /// Price of the given level
    pub fn cost(&self, level: u32) -> Resources {
        scaled_cost(self.base_cost(), self.increase_factor(), level)
    }

    pub fn requirements(&self) -> &'static [(UnitId, u32)] {
        match self {
            BuildingId::FusionReactor => FUSION_REACTOR_REQS,
            BuildingId::Shipyard => SHIPYARD_REQS,
            BuildingId::MissileSilo => MISSILE_SILO_REQS,
            BuildingId::NaniteFactory => NANITE_FACTORY_REQS,
            _ => &[],
        }
    }
}

/// Energy produced by a fusion reactor of the given level
///
/// `round(30 * level * (1.05 + 0.01 * energy_tech)^level)`
pub fn fusion_reactor_production(level: u32, energy_tech: u32) -> i64 {
    let lvl = f64::from(level);
    let tech = f64::from(energy_tech);
    (30.0 * lvl * (1.05 + tech * 0.01).powf(lvl)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_reactor_cost() {
        assert_eq!(
            BuildingId::FusionReactor.cost(1),
            Resources::new(900, 360, 180)
        );
        assert_eq!(
            BuildingId::FusionReactor.cost(2),
            Resources::new(1620, 648, 324)
        );
    }

    #[test]
    fn test_fusion_reactor_production() {
        // 30 * 5 * 1.10^5 = 150 * 1.61051 = 241.57... -> 242
        assert_eq!(fusion_reactor_production(5, 5), 242);
        // level 0 produces nothing
        assert_eq!(fusion_reactor_production(0, 12), 0);
        // higher energy tech strictly helps
        assert!(fusion_reactor_production(10, 12) > fusion_reactor_production(10, 0));
    }

    #[test]
    fn test_fusion_reactor_requirements() {
        let reqs = BuildingId::FusionReactor.requirements();
        assert!(reqs.contains(&(UnitId::Building(BuildingId::DeuteriumSynthesizer), 5)));
        assert!(reqs.contains(&(UnitId::Technology(TechnologyId::Energy), 3)));
    }
}
