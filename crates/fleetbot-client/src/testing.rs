//! In-memory session for tests and local experimentation
//!
//! [`SimSession`] implements the [`Session`] trait against a small simulated
//! game state instead of the remote server. Builds complete instantly and
//! fleets never land, but costs, requirement gating and fleet validation use
//! the real catalog rules, so error paths behave like the live session.
//!
//! Every `lock`/`unlock` is recorded, which is what the concurrency tests use
//! to assert that outermost transactions never interleave and that the cache
//! fast path takes no lock at all. Failure paths can be provoked on demand:
//! credentials can be invalidated and a one-shot network fault injected.

use crate::session::{NamedLock, Session};
use async_trait::async_trait;
use fleetbot_core::{
    flight, CelestialId, Coordinate, DefensesInfos, Facilities, Fleet, FleetId, FleetOrder,
    GameError, MoonId, Planet, PlanetId, Researches, ResourceBuildings, Resources, Result,
    ShipOrder, ShipsInfos, Slots, SystemTimeSource, Temperature, TimeSource, Timestamp,
    UniverseConfig, UnitId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ----------------------------------------------------------------------------
// Lock Event Log
// ----------------------------------------------------------------------------

/// One observation of the session lock changing hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    Acquired(&'static str),
    Released(&'static str),
}

// ----------------------------------------------------------------------------
// Simulated State
// ----------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SimState {
    logged_in: bool,
    reject_credentials: bool,
    under_attack: bool,
    planets: Vec<Planet>,
    moons: Vec<MoonId>,
    resources: HashMap<CelestialId, Resources>,
    resource_buildings: HashMap<CelestialId, ResourceBuildings>,
    facilities: HashMap<CelestialId, Facilities>,
    hangars: HashMap<CelestialId, ShipsInfos>,
    defenses: HashMap<CelestialId, DefensesInfos>,
    production: HashMap<CelestialId, Vec<ShipOrder>>,
    research: Researches,
    fleets: Vec<Fleet>,
    slots: Slots,
}

impl SimState {
    fn ensure_logged_in(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(GameError::NotLoggedIn)
        }
    }

    fn known(&self, celestial: CelestialId) -> Result<()> {
        if self.resources.contains_key(&celestial) {
            Ok(())
        } else {
            Err(GameError::InvalidCelestial(celestial))
        }
    }

    /// Level/count the player already has of `unit` as seen from `celestial`
    fn unit_level(&self, celestial: CelestialId, unit: UnitId) -> u32 {
        match unit {
            UnitId::Building(b) => self
                .resource_buildings
                .get(&celestial)
                .and_then(|rb| rb.level_of(b))
                .or_else(|| self.facilities.get(&celestial).and_then(|f| f.level_of(b)))
                .unwrap_or(0),
            UnitId::Technology(t) => t.level_in(&self.research),
            UnitId::Ship(s) => self
                .hangars
                .get(&celestial)
                .map(|h| h.get(s).max(0) as u32)
                .unwrap_or(0),
            UnitId::Defense(d) => self
                .defenses
                .get(&celestial)
                .map(|counts| counts.get(d).max(0) as u32)
                .unwrap_or(0),
        }
    }

    fn check_requirements(&self, celestial: CelestialId, unit: UnitId) -> Result<()> {
        for &(req, min_level) in unit.requirements() {
            if self.unit_level(celestial, req) < min_level {
                return Err(GameError::RequirementsNotMet(unit));
            }
        }
        Ok(())
    }

    fn pay(&mut self, celestial: CelestialId, price: Resources) -> Result<()> {
        let bank = self
            .resources
            .get_mut(&celestial)
            .ok_or(GameError::InvalidCelestial(celestial))?;
        if !bank.covers(&price) {
            return Err(GameError::NotEnoughResources {
                needed: price,
                available: *bank,
            });
        }
        *bank = *bank - price;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Sim Session
// ----------------------------------------------------------------------------

/// Simulated game session backed by in-memory state
pub struct SimSession {
    universe: UniverseConfig,
    gate: NamedLock,
    state: Mutex<SimState>,
    research_cache: Mutex<Option<Researches>>,
    events: Mutex<Vec<LockEvent>>,
    fault: Mutex<Option<String>>,
    op_delay: Duration,
    next_fleet_id: AtomicU64,
}

impl SimSession {
    /// Celestial id of the planet seeded by [`SimSession::with_homeworld`]
    pub const HOMEWORLD: CelestialId = CelestialId(1);
    pub const HOMEWORLD_PLANET: PlanetId = PlanetId(1);
    /// Moon orbiting the planet seeded by [`SimSession::with_homeworld`]
    pub const HOMEWORLD_MOON: MoonId = MoonId(1);
    /// Small cargo count seeded on the homeworld
    pub const HOMEWORLD_SMALL_CARGOS: i64 = 50;

    /// Empty session: no planets, logged out
    pub fn new(universe: UniverseConfig) -> Self {
        Self {
            universe,
            gate: NamedLock::new(),
            state: Mutex::new(SimState::default()),
            research_cache: Mutex::new(None),
            events: Mutex::new(Vec::new()),
            fault: Mutex::new(None),
            op_delay: Duration::ZERO,
            next_fleet_id: AtomicU64::new(1),
        }
    }

    /// Logged-in session with one developed planet at [1:1:1]
    pub fn with_homeworld() -> Self {
        let session = Self::new(UniverseConfig::default());
        {
            let mut state = session.state.lock().expect("state mutex poisoned");
            state.logged_in = true;
            state.planets.push(Planet {
                id: Self::HOMEWORLD_PLANET,
                name: "Homeworld".to_string(),
                coordinate: Coordinate::new(1, 1, 1),
                temperature: Temperature { min: -20, max: 40 },
            });
            state.moons.push(Self::HOMEWORLD_MOON);
            state
                .resources
                .insert(Self::HOMEWORLD, Resources::new(500_000, 300_000, 150_000));
            state.resource_buildings.insert(
                Self::HOMEWORLD,
                ResourceBuildings {
                    metal_mine: 20,
                    crystal_mine: 17,
                    deuterium_synthesizer: 12,
                    solar_plant: 20,
                    fusion_reactor: 0,
                },
            );
            state.facilities.insert(
                Self::HOMEWORLD,
                Facilities {
                    robotics_factory: 10,
                    shipyard: 8,
                    research_lab: 10,
                    missile_silo: 4,
                    nanite_factory: 0,
                },
            );
            let mut hangar = ShipsInfos::default();
            hangar.small_cargo = Self::HOMEWORLD_SMALL_CARGOS;
            hangar.large_cargo = 10;
            hangar.light_fighter = 100;
            hangar.colony_ship = 1;
            hangar.espionage_probe = 10;
            hangar.recycler = 5;
            state.hangars.insert(Self::HOMEWORLD, hangar);
            let mut defenses = DefensesInfos::default();
            defenses.rocket_launcher = 200;
            defenses.interplanetary_missiles = 12;
            state.defenses.insert(Self::HOMEWORLD, defenses);
            state.production.insert(Self::HOMEWORLD, Vec::new());
            state.research = Researches {
                energy: 6,
                laser: 6,
                ion: 4,
                espionage: 4,
                computer: 6,
                combustion_drive: 6,
                impulse_drive: 4,
                hyperspace_drive: 0,
                shielding: 4,
                weapons: 3,
                armour: 3,
                ..Researches::default()
            };
            state.slots = Slots {
                in_use: 0,
                total: 9,
            };
        }
        session
    }

    /// Delay injected at the start of every domain operation, to widen the
    /// exclusive window in concurrency tests
    pub fn with_op_delay(mut self, delay: Duration) -> Self {
        self.op_delay = delay;
        self
    }

    // ------------------------------------------------------------------------
    // Test Hooks
    // ------------------------------------------------------------------------

    /// Snapshot of the lock event log
    pub fn lock_events(&self) -> Vec<LockEvent> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Number of times the session lock has been acquired
    pub fn lock_acquisitions(&self) -> usize {
        self.lock_events()
            .iter()
            .filter(|event| matches!(event, LockEvent::Acquired(_)))
            .count()
    }

    /// Name of the section currently holding the session lock
    pub fn holder(&self) -> Option<&'static str> {
        self.gate.holder()
    }

    pub fn set_under_attack(&self, under_attack: bool) {
        self.state.lock().expect("state mutex poisoned").under_attack = under_attack;
    }

    pub fn set_research(&self, research: Researches) {
        self.state.lock().expect("state mutex poisoned").research = research;
    }

    /// When false, `login` fails with [`GameError::BadCredentials`]
    pub fn set_credentials_valid(&self, valid: bool) {
        self.state
            .lock()
            .expect("state mutex poisoned")
            .reject_credentials = !valid;
    }

    /// Make the next fallible operation fail with [`GameError::Network`]
    pub fn inject_network_fault(&self, message: impl Into<String>) {
        *self.fault.lock().expect("fault slot poisoned") = Some(message.into());
    }

    async fn simulate_latency(&self) {
        if !self.op_delay.is_zero() {
            tokio::time::sleep(self.op_delay).await;
        }
    }

    /// Latency plus the injected-fault gate every fallible operation passes
    async fn checkpoint(&self) -> Result<()> {
        self.simulate_latency().await;
        if let Some(message) = self.fault.lock().expect("fault slot poisoned").take() {
            return Err(GameError::Network(message));
        }
        Ok(())
    }
}

#[async_trait]
impl Session for SimSession {
    async fn lock(&self, name: &'static str) {
        self.gate.lock(name).await;
        self.events
            .lock()
            .expect("event log poisoned")
            .push(LockEvent::Acquired(name));
    }

    fn unlock(&self, name: &'static str) {
        self.events
            .lock()
            .expect("event log poisoned")
            .push(LockEvent::Released(name));
        self.gate.unlock(name);
    }

    fn universe(&self) -> &UniverseConfig {
        &self.universe
    }

    fn cached_researches(&self) -> Option<Researches> {
        *self.research_cache.lock().expect("research cache poisoned")
    }

    async fn login(&self) -> Result<()> {
        self.checkpoint().await?;
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.reject_credentials {
            return Err(GameError::BadCredentials);
        }
        state.logged_in = true;
        Ok(())
    }

    async fn logout(&self) {
        self.simulate_latency().await;
        self.state.lock().expect("state mutex poisoned").logged_in = false;
    }

    async fn is_under_attack(&self) -> Result<bool> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        Ok(state.under_attack)
    }

    async fn server_time(&self) -> Result<Timestamp> {
        self.checkpoint().await?;
        self.state
            .lock()
            .expect("state mutex poisoned")
            .ensure_logged_in()?;
        Ok(SystemTimeSource.now())
    }

    async fn planets(&self) -> Result<Vec<Planet>> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        Ok(state.planets.clone())
    }

    async fn planet(&self, planet: PlanetId) -> Result<Planet> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .planets
            .iter()
            .find(|p| p.id == planet)
            .cloned()
            .ok_or(GameError::InvalidPlanet(planet))
    }

    async fn resources(&self, celestial: CelestialId) -> Result<Resources> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .resources
            .get(&celestial)
            .copied()
            .ok_or(GameError::InvalidCelestial(celestial))
    }

    async fn resource_buildings(&self, celestial: CelestialId) -> Result<ResourceBuildings> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .resource_buildings
            .get(&celestial)
            .copied()
            .ok_or(GameError::InvalidCelestial(celestial))
    }

    async fn facilities(&self, celestial: CelestialId) -> Result<Facilities> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .facilities
            .get(&celestial)
            .copied()
            .ok_or(GameError::InvalidCelestial(celestial))
    }

    async fn ships(&self, celestial: CelestialId) -> Result<ShipsInfos> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .hangars
            .get(&celestial)
            .copied()
            .ok_or(GameError::InvalidCelestial(celestial))
    }

    async fn defenses(&self, celestial: CelestialId) -> Result<DefensesInfos> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .defenses
            .get(&celestial)
            .copied()
            .ok_or(GameError::InvalidCelestial(celestial))
    }

    async fn production_queue(&self, celestial: CelestialId) -> Result<Vec<ShipOrder>> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state
            .production
            .get(&celestial)
            .cloned()
            .ok_or(GameError::InvalidCelestial(celestial))
    }

    async fn research(&self) -> Result<Researches> {
        self.checkpoint().await?;
        let research = {
            let state = self.state.lock().expect("state mutex poisoned");
            state.ensure_logged_in()?;
            state.research
        };
        *self.research_cache.lock().expect("research cache poisoned") = Some(research);
        Ok(research)
    }

    async fn build(&self, celestial: CelestialId, unit: UnitId, count: u32) -> Result<()> {
        self.checkpoint().await?;
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state.known(celestial)?;
        state.check_requirements(celestial, unit)?;

        match unit {
            UnitId::Building(building) => {
                let next_level = state.unit_level(celestial, unit) + 1;
                state.pay(celestial, building.cost(next_level))?;
                let placed = state
                    .resource_buildings
                    .get_mut(&celestial)
                    .map(|rb| rb.set_level(building, next_level))
                    .unwrap_or(false)
                    || state
                        .facilities
                        .get_mut(&celestial)
                        .map(|f| f.set_level(building, next_level))
                        .unwrap_or(false);
                debug_assert!(placed, "building belongs to neither family");
            }
            UnitId::Technology(technology) => {
                let next_level = technology.level_in(&state.research) + 1;
                state.pay(celestial, technology.cost(next_level))?;
                technology.bump_in(&mut state.research);
                // the cache keeps the stale snapshot until the next fetch,
                // like the live session
            }
            UnitId::Ship(ship) => {
                state.pay(celestial, ship.price().times(count))?;
                if let Some(hangar) = state.hangars.get_mut(&celestial) {
                    hangar.set(ship, hangar.get(ship) + i64::from(count));
                }
                state
                    .production
                    .entry(celestial)
                    .or_default()
                    .push(ShipOrder { unit, count });
            }
            UnitId::Defense(defense) => {
                state.pay(celestial, defense.price().times(count))?;
                if let Some(defenses) = state.defenses.get_mut(&celestial) {
                    defenses.set(defense, defenses.get(defense) + i64::from(count));
                }
                state
                    .production
                    .entry(celestial)
                    .or_default()
                    .push(ShipOrder { unit, count });
            }
        }
        Ok(())
    }

    async fn cancel_building(&self, celestial: CelestialId) -> Result<()> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state.known(celestial)
    }

    async fn cancel_research(&self, celestial: CelestialId) -> Result<()> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        state.known(celestial)
    }

    async fn fleets(&self) -> Result<(Vec<Fleet>, Slots)> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        Ok((state.fleets.clone(), state.slots))
    }

    async fn slots(&self) -> Result<Slots> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;
        Ok(state.slots)
    }

    async fn send_fleet(&self, from: CelestialId, order: &FleetOrder) -> Result<Fleet> {
        self.checkpoint().await?;
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;

        if order.ships.is_empty() {
            return Err(GameError::EmptyFleet);
        }
        if !self.universe.contains(order.destination) {
            return Err(GameError::InvalidCoordinate(order.destination));
        }
        if state.slots.is_full() {
            return Err(GameError::NoFreeFleetSlots);
        }

        let origin = state
            .planets
            .iter()
            .find(|p| CelestialId::from(p.id) == from)
            .map(|p| p.coordinate)
            .ok_or(GameError::InvalidCelestial(from))?;

        let hangar = state
            .hangars
            .get(&from)
            .ok_or(GameError::InvalidCelestial(from))?;
        if let Some((ship, wanted, available)) = hangar.first_shortfall(&order.ships) {
            return Err(GameError::NotEnoughShips {
                ship,
                wanted,
                available,
            });
        }

        let estimate = flight::estimate(
            origin,
            order.destination,
            order.speed,
            &order.ships,
            &state.research,
            &self.universe,
        )?;
        let freight = order.cargo + Resources::new(0, 0, estimate.fuel);
        state.pay(from, freight)?;

        if let Some(hangar) = state.hangars.get_mut(&from) {
            hangar.subtract(&order.ships);
        }

        let fleet = Fleet {
            id: FleetId(self.next_fleet_id.fetch_add(1, Ordering::Relaxed)),
            mission: order.mission,
            origin,
            destination: order.destination,
            ships: order.ships,
            cargo: order.cargo,
            arrival: SystemTimeSource.now() + estimate.duration.as_millis() as u64,
        };
        state.fleets.push(fleet.clone());
        state.slots.in_use += 1;
        Ok(fleet)
    }

    async fn cancel_fleet(&self, fleet: FleetId) -> Result<()> {
        self.checkpoint().await?;
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;

        let index = state
            .fleets
            .iter()
            .position(|f| f.id == fleet)
            .ok_or(GameError::UnknownFleet(fleet))?;
        let recalled = state.fleets.remove(index);

        // ships return to the origin hangar
        let home = state
            .planets
            .iter()
            .find(|p| p.coordinate == recalled.origin)
            .map(|p| CelestialId::from(p.id));
        if let Some(celestial) = home {
            if let Some(hangar) = state.hangars.get_mut(&celestial) {
                hangar.add(&recalled.ships);
            }
        }
        state.slots.in_use = state.slots.in_use.saturating_sub(1);
        Ok(())
    }

    async fn send_missiles(&self, from: PlanetId, target: Coordinate, count: u32) -> Result<u32> {
        self.checkpoint().await?;
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;

        if !self.universe.contains(target) {
            return Err(GameError::InvalidCoordinate(target));
        }
        let celestial = CelestialId::from(from);
        if !state.planets.iter().any(|p| p.id == from) {
            return Err(GameError::InvalidPlanet(from));
        }

        let silo_level = state
            .facilities
            .get(&celestial)
            .map(|f| f.missile_silo)
            .unwrap_or(0);
        let defenses = state
            .defenses
            .get_mut(&celestial)
            .ok_or(GameError::InvalidCelestial(celestial))?;
        if silo_level == 0 || defenses.interplanetary_missiles == 0 {
            return Err(GameError::NoMissilesAvailable);
        }

        let launched = i64::from(count).min(defenses.interplanetary_missiles);
        defenses.interplanetary_missiles -= launched;
        Ok(launched as u32)
    }

    async fn phalanx(&self, from: MoonId, target: Coordinate) -> Result<Vec<Fleet>> {
        self.checkpoint().await?;
        let state = self.state.lock().expect("state mutex poisoned");
        state.ensure_logged_in()?;

        if !state.moons.contains(&from) {
            return Err(GameError::InvalidMoon(from));
        }
        if !self.universe.contains(target) {
            return Err(GameError::InvalidCoordinate(target));
        }
        Ok(state
            .fleets
            .iter()
            .filter(|f| f.destination == target)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetbot_core::{BuildingId, FleetSpeed, Mission, ShipId, TechnologyId};

    #[tokio::test]
    async fn test_login_gating() {
        let session = SimSession::new(UniverseConfig::default());
        assert_eq!(session.planets().await, Err(GameError::NotLoggedIn));

        session.login().await.expect("login");
        assert_eq!(session.planets().await, Ok(Vec::new()));

        session.logout().await;
        assert_eq!(session.planets().await, Err(GameError::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_build_building_deducts_scaled_cost() {
        let session = SimSession::with_homeworld();
        let before = session.resources(SimSession::HOMEWORLD).await.unwrap();

        // fusion reactor level 1: requirements met by the homeworld setup
        session
            .build(
                SimSession::HOMEWORLD,
                BuildingId::FusionReactor.into(),
                1,
            )
            .await
            .expect("build fusion reactor");

        let after = session.resources(SimSession::HOMEWORLD).await.unwrap();
        assert_eq!(before - after, BuildingId::FusionReactor.cost(1));

        let buildings = session
            .resource_buildings(SimSession::HOMEWORLD)
            .await
            .unwrap();
        assert_eq!(buildings.fusion_reactor, 1);
    }

    #[tokio::test]
    async fn test_build_rejects_unmet_requirements() {
        let session = SimSession::with_homeworld();
        // plasma turret needs plasma technology 7; the homeworld has none
        let err = session
            .build(
                SimSession::HOMEWORLD,
                fleetbot_core::DefenseId::PlasmaTurret.into(),
                1,
            )
            .await
            .expect_err("requirements unmet");
        assert!(matches!(err, GameError::RequirementsNotMet(_)));
    }

    #[tokio::test]
    async fn test_research_fetch_populates_cache() {
        let session = SimSession::with_homeworld();
        assert_eq!(session.cached_researches(), None);

        let fetched = session.research().await.expect("research");
        assert_eq!(session.cached_researches(), Some(fetched));

        // researching a level leaves the cache stale until the next fetch
        session
            .build(SimSession::HOMEWORLD, TechnologyId::Energy.into(), 1)
            .await
            .expect("research energy");
        assert_eq!(session.cached_researches(), Some(fetched));

        let refreshed = session.research().await.expect("research");
        assert_eq!(refreshed.energy, fetched.energy + 1);
        assert_eq!(session.cached_researches(), Some(refreshed));
    }

    #[tokio::test]
    async fn test_send_fleet_lifecycle() {
        let session = SimSession::with_homeworld();
        let mut ships = ShipsInfos::default();
        ships.set(ShipId::LightFighter, 20);
        let order = FleetOrder {
            ships,
            speed: FleetSpeed::percent(50).unwrap(),
            destination: Coordinate::new(1, 10, 4),
            mission: Mission::Attack,
            cargo: Resources::ZERO,
        };

        let fleet = session
            .send_fleet(SimSession::HOMEWORLD, &order)
            .await
            .expect("fleet sent");

        let hangar = session.ships(SimSession::HOMEWORLD).await.unwrap();
        assert_eq!(hangar.light_fighter, 80);

        let (fleets, slots) = session.fleets().await.unwrap();
        assert_eq!(fleets.len(), 1);
        assert_eq!(slots.in_use, 1);

        // the phalanx sees the fleet at its destination
        let seen = session
            .phalanx(SimSession::HOMEWORLD_MOON, order.destination)
            .await
            .expect("phalanx scan");
        assert_eq!(seen.len(), 1);

        session.cancel_fleet(fleet.id).await.expect("recall");
        let hangar = session.ships(SimSession::HOMEWORLD).await.unwrap();
        assert_eq!(hangar.light_fighter, 100);
        let (fleets, slots) = session.fleets().await.unwrap();
        assert!(fleets.is_empty());
        assert_eq!(slots.in_use, 0);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let session = SimSession::new(UniverseConfig::default());
        session.set_credentials_valid(false);

        assert_eq!(session.login().await, Err(GameError::BadCredentials));
        assert_eq!(session.planets().await, Err(GameError::NotLoggedIn));

        session.set_credentials_valid(true);
        session.login().await.expect("login");
        assert!(session.planets().await.is_ok());
    }

    #[tokio::test]
    async fn test_phalanx_rejects_unknown_moon() {
        let session = SimSession::with_homeworld();
        let intruder = MoonId(77);

        let err = session
            .phalanx(intruder, Coordinate::new(1, 2, 3))
            .await
            .expect_err("not our moon");
        assert_eq!(err, GameError::InvalidMoon(intruder));

        session
            .phalanx(SimSession::HOMEWORLD_MOON, Coordinate::new(1, 2, 3))
            .await
            .expect("own moon scans");
    }

    #[tokio::test]
    async fn test_injected_network_fault_is_one_shot() {
        let session = SimSession::with_homeworld();
        session.inject_network_fault("connection reset");

        let err = session
            .resources(SimSession::HOMEWORLD)
            .await
            .expect_err("fault surfaces");
        assert_eq!(err, GameError::Network("connection reset".to_string()));

        // the fault is consumed, the next call goes through
        session
            .resources(SimSession::HOMEWORLD)
            .await
            .expect("session recovered");
    }

    #[tokio::test]
    async fn test_send_missiles_caps_at_stock() {
        let session = SimSession::with_homeworld();
        let launched = session
            .send_missiles(
                SimSession::HOMEWORLD_PLANET,
                Coordinate::new(1, 3, 3),
                100,
            )
            .await
            .expect("volley");
        assert_eq!(launched, 12);

        let err = session
            .send_missiles(SimSession::HOMEWORLD_PLANET, Coordinate::new(1, 3, 3), 1)
            .await
            .expect_err("silo empty");
        assert_eq!(err, GameError::NoMissilesAvailable);
    }
}
