//! Task serialization controller
//!
//! [`SessionLock`] is the gate every session-touching operation passes
//! through. It wraps each public operation in a named critical section backed
//! by the session's exclusion primitive, counts reentrant entries so compound
//! operations can nest wrapped calls without deadlocking, and fires a one-shot
//! completion signal once its outermost transaction has fully released.
//!
//! One handle serves one logical task. Concurrent callers each create their
//! own handle over the same shared session; cross-caller exclusion happens in
//! the session's lock, while the depth counter only tracks nesting within the
//! handle. Handles are cheap: the owning client typically creates one per
//! scheduled job or user command.
//!
//! The futures returned by wrapped operations are not cancellation safe:
//! dropping one between lock acquisition and completion leaves the
//! bookkeeping unbalanced. Run them to completion, as the scheduler that owns
//! the handle always does.

use crate::session::Session;
use crate::signal::{CompletionSignal, CompletionWaiter};
use fleetbot_core::{
    flight, BuildingId, CelestialId, Coordinate, DefenseId, DefensesInfos, Facilities, Fleet,
    FleetId, FleetOrder, FleetSpeed, FlightEstimate, GameError, MoonId, Planet, PlanetId,
    Researches, ResourceBuildings, Resources, Result, ShipId, ShipOrder, ShipsInfos, Slots,
    TechnologyId, Timestamp, UnitId,
};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use tracing::trace;

// ----------------------------------------------------------------------------
// Priorities
// ----------------------------------------------------------------------------

/// Declared urgency of the task owning a handle
///
/// Purely diagnostic: it is carried into the logs of every critical section
/// the handle enters, but the controller enforces total mutual exclusion
/// regardless of priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low = 1,
    Normal = 2,
    Important = 3,
    Critical = 4,
}

// ----------------------------------------------------------------------------
// Session Lock
// ----------------------------------------------------------------------------

/// Reentrant exclusive-access controller over a shared [`Session`]
pub struct SessionLock<S: Session> {
    session: Arc<S>,
    priority: Priority,
    /// Nesting counter; 0 means this handle holds nothing
    depth: AtomicI32,
    /// Name of the outermost critical section; meaningful while depth > 0
    active: Mutex<&'static str>,
    signal: CompletionSignal,
}

/// Scope guard for one critical-section entry
///
/// Dropping the guard is the `Done` of the transaction: it decrements the
/// depth and, on the outermost release, unlocks the session and fires the
/// completion signal, in that order.
struct SectionGuard<'a, S: Session> {
    controller: &'a SessionLock<S>,
}

impl<S: Session> Drop for SectionGuard<'_, S> {
    fn drop(&mut self) {
        let depth = self.controller.depth.fetch_sub(1, Ordering::AcqRel) - 1;
        debug_assert!(depth >= 0, "unbalanced critical-section release");
        if depth == 0 {
            let name = *self
                .controller
                .active
                .lock()
                .expect("active-section mutex poisoned");
            self.controller.session.unlock(name);
            self.controller.signal.complete();
        } else {
            trace!(depth, "left nested critical section");
        }
    }
}

impl<S: Session> SessionLock<S> {
    /// Create a handle with [`Priority::Normal`]
    pub fn new(session: Arc<S>) -> Self {
        Self::with_priority(session, Priority::Normal)
    }

    pub fn with_priority(session: Arc<S>, priority: Priority) -> Self {
        Self {
            session,
            priority,
            depth: AtomicI32::new(0),
            active: Mutex::new(""),
            signal: CompletionSignal::new(),
        }
    }

    /// The shared session this handle serializes against
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Current nesting depth of this handle
    pub fn depth(&self) -> i32 {
        self.depth.load(Ordering::Acquire)
    }

    /// Waiter resolving once this handle's outermost transaction has released
    pub fn completion(&self) -> CompletionWaiter {
        self.signal.subscribe()
    }

    /// Enter the named critical section, acquiring the session lock if this
    /// is the outermost entry for the handle.
    async fn enter(&self, name: &'static str) -> SectionGuard<'_, S> {
        let depth = self.depth.fetch_add(1, Ordering::AcqRel) + 1;
        if depth == 1 {
            *self.active.lock().expect("active-section mutex poisoned") = name;
            trace!(section = name, priority = ?self.priority, "entering critical section");
            self.session.lock(name).await;
        } else {
            trace!(section = name, depth, "entering nested critical section");
        }
        SectionGuard { controller: self }
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    /// Run `callback` inside one outer transaction
    ///
    /// Every wrapped operation invoked on the handle inside the callback
    /// becomes a reentrant no-op with respect to the session lock, so a group
    /// of related operations executes as a single exclusive unit. The
    /// callback's result is returned verbatim; the lock is released on every
    /// exit path.
    pub async fn tx<T, F>(&self, callback: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a SessionLock<S>) -> BoxFuture<'a, Result<T>>,
    {
        let _section = self.enter("Tx").await;
        callback(self).await
    }

    // ------------------------------------------------------------------------
    // Account Operations
    // ------------------------------------------------------------------------

    pub async fn login(&self) -> Result<()> {
        let _section = self.enter("Login").await;
        self.session.login().await
    }

    pub async fn logout(&self) {
        let _section = self.enter("Logout").await;
        self.session.logout().await
    }

    pub async fn is_under_attack(&self) -> Result<bool> {
        let _section = self.enter("IsUnderAttack").await;
        self.session.is_under_attack().await
    }

    pub async fn server_time(&self) -> Result<Timestamp> {
        let _section = self.enter("ServerTime").await;
        self.session.server_time().await
    }

    pub async fn get_planets(&self) -> Result<Vec<Planet>> {
        let _section = self.enter("GetPlanets").await;
        self.session.planets().await
    }

    pub async fn get_planet(&self, planet: PlanetId) -> Result<Planet> {
        let _section = self.enter("GetPlanet").await;
        self.session.planet(planet).await
    }

    // ------------------------------------------------------------------------
    // Celestial Reads
    // ------------------------------------------------------------------------

    pub async fn get_resources(&self, celestial: CelestialId) -> Result<Resources> {
        let _section = self.enter("GetResources").await;
        self.session.resources(celestial).await
    }

    pub async fn get_resources_buildings(
        &self,
        celestial: CelestialId,
    ) -> Result<ResourceBuildings> {
        let _section = self.enter("GetResourcesBuildings").await;
        self.session.resource_buildings(celestial).await
    }

    pub async fn get_facilities(&self, celestial: CelestialId) -> Result<Facilities> {
        let _section = self.enter("GetFacilities").await;
        self.session.facilities(celestial).await
    }

    pub async fn get_ships(&self, celestial: CelestialId) -> Result<ShipsInfos> {
        let _section = self.enter("GetShips").await;
        self.session.ships(celestial).await
    }

    pub async fn get_defense(&self, celestial: CelestialId) -> Result<DefensesInfos> {
        let _section = self.enter("GetDefense").await;
        self.session.defenses(celestial).await
    }

    pub async fn get_production(&self, celestial: CelestialId) -> Result<Vec<ShipOrder>> {
        let _section = self.enter("GetProduction").await;
        self.session.production_queue(celestial).await
    }

    pub async fn get_research(&self) -> Result<Researches> {
        let _section = self.enter("GetResearch").await;
        self.session.research().await
    }

    pub async fn get_slots(&self) -> Result<Slots> {
        let _section = self.enter("GetSlots").await;
        self.session.slots().await
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Start any buildable unit
    pub async fn build(&self, celestial: CelestialId, unit: UnitId, count: u32) -> Result<()> {
        let _section = self.enter("Build").await;
        self.session.build(celestial, unit, count).await
    }

    pub async fn build_building(
        &self,
        celestial: CelestialId,
        building: BuildingId,
    ) -> Result<()> {
        let _section = self.enter("BuildBuilding").await;
        self.session.build(celestial, building.into(), 1).await
    }

    pub async fn build_technology(
        &self,
        celestial: CelestialId,
        technology: TechnologyId,
    ) -> Result<()> {
        let _section = self.enter("BuildTechnology").await;
        self.session.build(celestial, technology.into(), 1).await
    }

    pub async fn build_ships(
        &self,
        celestial: CelestialId,
        ship: ShipId,
        count: u32,
    ) -> Result<()> {
        let _section = self.enter("BuildShips").await;
        self.session.build(celestial, ship.into(), count).await
    }

    pub async fn build_defense(
        &self,
        celestial: CelestialId,
        defense: DefenseId,
        count: u32,
    ) -> Result<()> {
        let _section = self.enter("BuildDefense").await;
        self.session.build(celestial, defense.into(), count).await
    }

    pub async fn cancel_building(&self, celestial: CelestialId) -> Result<()> {
        let _section = self.enter("CancelBuilding").await;
        self.session.cancel_building(celestial).await
    }

    pub async fn cancel_research(&self, celestial: CelestialId) -> Result<()> {
        let _section = self.enter("CancelResearch").await;
        self.session.cancel_research(celestial).await
    }

    // ------------------------------------------------------------------------
    // Fleets
    // ------------------------------------------------------------------------

    pub async fn get_fleets(&self) -> Result<(Vec<Fleet>, Slots)> {
        let _section = self.enter("GetFleets").await;
        self.session.fleets().await
    }

    pub async fn send_fleet(&self, from: CelestialId, order: &FleetOrder) -> Result<Fleet> {
        let _section = self.enter("SendFleet").await;
        self.session.send_fleet(from, order).await
    }

    /// Send the full requested composition or nothing
    ///
    /// Reads the hangar through the wrapped `get_ships` (a nested call inside
    /// this section) and refuses before any mutation if a ship class falls
    /// short.
    pub async fn ensure_fleet(&self, from: CelestialId, order: &FleetOrder) -> Result<Fleet> {
        let _section = self.enter("EnsureFleet").await;
        let hangar = self.get_ships(from).await?;
        if let Some((ship, wanted, available)) = hangar.first_shortfall(&order.ships) {
            return Err(GameError::NotEnoughShips {
                ship,
                wanted,
                available,
            });
        }
        self.session.send_fleet(from, order).await
    }

    pub async fn cancel_fleet(&self, fleet: FleetId) -> Result<()> {
        let _section = self.enter("CancelFleet").await;
        self.session.cancel_fleet(fleet).await
    }

    pub async fn send_ipm(
        &self,
        from: PlanetId,
        target: Coordinate,
        count: u32,
    ) -> Result<u32> {
        let _section = self.enter("SendIPM").await;
        self.session.send_missiles(from, target, count).await
    }

    pub async fn phalanx(&self, from: MoonId, target: Coordinate) -> Result<Vec<Fleet>> {
        let _section = self.enter("Phalanx").await;
        self.session.phalanx(from, target).await
    }

    // ------------------------------------------------------------------------
    // Cached Fast Path
    // ------------------------------------------------------------------------

    /// Estimate flight time and fuel for a fleet
    ///
    /// A pure calculation over cached research levels: when the cache is warm
    /// no session lock is taken and, if the handle is idle, completion is
    /// signaled directly. A cold cache costs one normal locked `research`
    /// fetch; the estimate itself always runs outside the lock.
    pub async fn flight_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        speed: FleetSpeed,
        ships: &ShipsInfos,
    ) -> Result<FlightEstimate> {
        let researches = match self.session.cached_researches() {
            Some(cached) => cached,
            None => {
                let _section = self.enter("FlightTime").await;
                self.session.research().await?
            }
        };
        if self.depth.load(Ordering::Acquire) == 0 {
            self.signal.complete();
        }
        flight::estimate(
            origin,
            destination,
            speed,
            ships,
            &researches,
            self.session.universe(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimSession;
    use fleetbot_core::Mission;

    fn transport_order(destination: Coordinate, small_cargos: i64) -> FleetOrder {
        let mut ships = ShipsInfos::default();
        ships.set(ShipId::SmallCargo, small_cargos);
        FleetOrder {
            ships,
            speed: FleetSpeed::MAX,
            destination,
            mission: Mission::Transport,
            cargo: Resources::ZERO,
        }
    }

    #[tokio::test]
    async fn test_single_operation_locks_once() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));

        let resources = gate
            .get_resources(SimSession::HOMEWORLD)
            .await
            .expect("homeworld resources");
        assert!(resources.metal > 0);

        assert_eq!(session.lock_acquisitions(), 1);
        assert_eq!(session.holder(), None);
        assert_eq!(gate.depth(), 0);
    }

    #[tokio::test]
    async fn test_nested_tx_acquires_session_lock_once() {
        for nested_calls in [0usize, 1, 5] {
            let session = Arc::new(SimSession::with_homeworld());
            let gate = SessionLock::new(Arc::clone(&session));

            gate.tx(|tx| {
                Box::pin(async move {
                    for _ in 0..nested_calls {
                        tx.get_ships(SimSession::HOMEWORLD).await?;
                    }
                    Ok(())
                })
            })
            .await
            .expect("tx completed");

            assert_eq!(session.lock_acquisitions(), 1, "nested={nested_calls}");
            assert_eq!(gate.depth(), 0);
            assert_eq!(session.holder(), None);
        }
    }

    #[tokio::test]
    async fn test_depth_returns_to_zero_after_error() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));

        let bogus = CelestialId(99_999);
        let err = gate.get_resources(bogus).await.expect_err("unknown celestial");
        assert_eq!(err, GameError::InvalidCelestial(bogus));

        // the failed operation released everything on its way out
        assert_eq!(gate.depth(), 0);
        assert_eq!(session.holder(), None);

        // and a follow-up operation goes straight through
        gate.get_resources(SimSession::HOMEWORLD)
            .await
            .expect("lock was left free");
    }

    #[tokio::test]
    async fn test_completion_signal_fires_on_outermost_release() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));
        let waiter = gate.completion();

        gate.tx(|tx| {
            Box::pin(async move {
                tx.get_ships(SimSession::HOMEWORLD).await?;
                tx.get_slots().await?;
                Ok(())
            })
        })
        .await
        .expect("tx completed");

        waiter.wait().await;
        // further operations on the same handle must not re-arm or panic
        gate.get_slots().await.expect("subsequent op");
        gate.completion().wait().await;
    }

    #[tokio::test]
    async fn test_flight_time_fast_path_skips_lock() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));

        // warm the cache through the normal locked path
        gate.get_research().await.expect("research fetch");
        assert_eq!(session.lock_acquisitions(), 1);

        let mut ships = ShipsInfos::default();
        ships.set(ShipId::SmallCargo, 5);
        let estimate = gate
            .flight_time(
                Coordinate::new(1, 1, 1),
                Coordinate::new(1, 42, 8),
                FleetSpeed::MAX,
                &ships,
            )
            .await
            .expect("estimate");
        assert!(estimate.duration.as_secs() > 0);

        // no additional lock traffic for the pure calculation, and the idle
        // handle signaled completion directly
        assert_eq!(session.lock_acquisitions(), 1);
        tokio::time::timeout(std::time::Duration::from_secs(1), gate.completion().wait())
            .await
            .expect("fast path signaled completion");
    }

    #[tokio::test]
    async fn test_flight_time_cold_cache_fetches_once() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));
        let mut ships = ShipsInfos::default();
        ships.set(ShipId::ColonyShip, 1);

        let origin = Coordinate::new(1, 1, 1);
        let target = Coordinate::new(2, 30, 5);

        gate.flight_time(origin, target, FleetSpeed::MAX, &ships)
            .await
            .expect("estimate with cold cache");
        assert_eq!(session.lock_acquisitions(), 1);

        gate.flight_time(origin, target, FleetSpeed::MAX, &ships)
            .await
            .expect("estimate with warm cache");
        assert_eq!(session.lock_acquisitions(), 1);
    }

    #[tokio::test]
    async fn test_ensure_fleet_refuses_shortfall() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));

        let order = transport_order(Coordinate::new(1, 5, 5), 1_000_000);
        let err = gate
            .ensure_fleet(SimSession::HOMEWORLD, &order)
            .await
            .expect_err("hangar cannot cover this");
        assert!(matches!(err, GameError::NotEnoughShips { .. }));

        // compound operation still held the session lock exactly once
        assert_eq!(session.lock_acquisitions(), 1);
        assert_eq!(session.holder(), None);

        // nothing was mutated
        let (fleets, _) = gate.get_fleets().await.expect("fleet list");
        assert!(fleets.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_fleet_sends_when_covered() {
        let session = Arc::new(SimSession::with_homeworld());
        let gate = SessionLock::new(Arc::clone(&session));

        let order = transport_order(Coordinate::new(1, 5, 5), 10);
        let fleet = gate
            .ensure_fleet(SimSession::HOMEWORLD, &order)
            .await
            .expect("fleet sent");
        assert_eq!(fleet.ships.small_cargo, 10);
        assert_eq!(session.lock_acquisitions(), 1);

        let hangar = gate.get_ships(SimSession::HOMEWORLD).await.expect("hangar");
        assert_eq!(
            hangar.small_cargo,
            SimSession::HOMEWORLD_SMALL_CARGOS - 10
        );
    }
}
