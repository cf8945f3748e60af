//! Unit catalog
//!
//! Static data for the buildable units of the game: buildings, technologies,
//! ships and defenses. Costs follow the exponential model of the server
//! (base cost times an increase factor per level); requirement tables gate
//! what may be started on a given celestial body.

mod buildings;
mod defenses;
mod ships;
mod technologies;

pub use buildings::{fusion_reactor_production, BuildingId};
pub use defenses::DefenseId;
pub use ships::{DriveClass, ShipId};
pub use technologies::TechnologyId;

use crate::types::Resources;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Unified Unit Identifier
// ----------------------------------------------------------------------------

/// Identifier of any buildable unit
///
/// The server uses one id space for everything that can appear in a build
/// queue or a requirement table; this enum keeps the four families apart
/// while still allowing mixed requirement lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitId {
    Building(BuildingId),
    Technology(TechnologyId),
    Ship(ShipId),
    Defense(DefenseId),
}

impl UnitId {
    /// Requirement table of the unit: (prerequisite, minimum level/count)
    pub fn requirements(&self) -> &'static [(UnitId, u32)] {
        match self {
            UnitId::Building(id) => id.requirements(),
            UnitId::Technology(id) => id.requirements(),
            UnitId::Ship(id) => id.requirements(),
            UnitId::Defense(id) => id.requirements(),
        }
    }
}

impl From<BuildingId> for UnitId {
    fn from(id: BuildingId) -> Self {
        UnitId::Building(id)
    }
}

impl From<TechnologyId> for UnitId {
    fn from(id: TechnologyId) -> Self {
        UnitId::Technology(id)
    }
}

impl From<ShipId> for UnitId {
    fn from(id: ShipId) -> Self {
        UnitId::Ship(id)
    }
}

impl From<DefenseId> for UnitId {
    fn from(id: DefenseId) -> Self {
        UnitId::Defense(id)
    }
}

// ----------------------------------------------------------------------------
// Cost Model
// ----------------------------------------------------------------------------

/// Price of level `level` of a levelled unit: base cost scaled by
/// `increase_factor^(level - 1)`, truncated per component.
pub(crate) fn scaled_cost(base: Resources, increase_factor: f64, level: u32) -> Resources {
    let scale = increase_factor.powi(level.saturating_sub(1) as i32);
    Resources {
        metal: (base.metal as f64 * scale) as i64,
        crystal: (base.crystal as f64 * scale) as i64,
        deuterium: (base.deuterium as f64 * scale) as i64,
        energy: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_cost_level_one_is_base() {
        let base = Resources::new(900, 360, 180);
        assert_eq!(scaled_cost(base, 1.8, 1), base);
    }

    #[test]
    fn test_scaled_cost_grows_exponentially() {
        let base = Resources::new(900, 360, 180);
        assert_eq!(scaled_cost(base, 1.8, 2), Resources::new(1620, 648, 324));

        let metal_mine = scaled_cost(Resources::new(60, 15, 0), 1.5, 3);
        assert_eq!(metal_mine, Resources::new(135, 33, 0));
    }
}
