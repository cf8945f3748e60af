//! Session collaborator contract
//!
//! [`Session`] is the stateful object that actually talks to the remote game
//! server: it owns the HTTP client, the scraped caches and the coarse-grained
//! exclusion primitive. The serialization controller in [`crate::lock`] never
//! inspects session internals; it only drives the `lock`/`unlock` pair and
//! delegates domain operations through this trait.
//!
//! [`NamedLock`] is the exclusion primitive a session implementation embeds:
//! one permit, acquired exactly once per outermost transaction, with the name
//! of the holding critical section retained for diagnostics.

use async_trait::async_trait;
use fleetbot_core::{
    CelestialId, Coordinate, DefensesInfos, Facilities, Fleet, FleetId, FleetOrder, MoonId,
    Planet, PlanetId, Researches, ResourceBuildings, Resources, Result, ShipOrder, ShipsInfos,
    Slots, Timestamp, UniverseConfig, UnitId,
};
use std::sync::Mutex;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

// ----------------------------------------------------------------------------
// Named Lock
// ----------------------------------------------------------------------------

/// Single-permit lock that remembers which critical section holds it
///
/// `lock` waits until the permit frees up; `unlock` never blocks, which lets
/// the controller release from a synchronous drop path. Waiters are served in
/// the semaphore's FIFO order.
#[derive(Debug)]
pub struct NamedLock {
    permit: Semaphore,
    holder: Mutex<Option<&'static str>>,
}

impl NamedLock {
    pub fn new() -> Self {
        Self {
            permit: Semaphore::new(1),
            holder: Mutex::new(None),
        }
    }

    /// Acquire exclusive access on behalf of the named critical section
    pub async fn lock(&self, name: &'static str) {
        let permit = self
            .permit
            .acquire()
            .await
            .expect("session lock semaphore is never closed");
        permit.forget();
        *self.holder.lock().expect("holder mutex poisoned") = Some(name);
        debug!(section = name, "session lock acquired");
    }

    /// Release exclusive access; `name` should match the acquiring section
    pub fn unlock(&self, name: &'static str) {
        let mut holder = self.holder.lock().expect("holder mutex poisoned");
        if *holder != Some(name) {
            warn!(
                section = name,
                holder = holder.unwrap_or("<free>"),
                "unlock by a section that does not hold the lock"
            );
        }
        *holder = None;
        drop(holder);
        self.permit.add_permits(1);
        debug!(section = name, "session lock released");
    }

    /// Name of the critical section currently holding the lock, if any
    pub fn holder(&self) -> Option<&'static str> {
        *self.holder.lock().expect("holder mutex poisoned")
    }
}

impl Default for NamedLock {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Session Trait
// ----------------------------------------------------------------------------

/// The stateful game-session collaborator
///
/// Implementations perform the real network/scrape work. Every method except
/// `lock`/`unlock`/`universe`/`cached_researches` assumes the caller holds the
/// session lock; the [`SessionLock`](crate::SessionLock) wrappers guarantee
/// that. Failures are reported as recoverable [`fleetbot_core::GameError`]s.
#[async_trait]
pub trait Session: Send + Sync + 'static {
    /// Block until this session grants exclusive access to `name`
    async fn lock(&self, name: &'static str);

    /// Release exclusive access previously granted to `name`; never blocks
    fn unlock(&self, name: &'static str);

    /// Static geometry and speed settings of the connected universe
    fn universe(&self) -> &UniverseConfig;

    /// Research levels from the last `research` fetch, if any
    ///
    /// This is the one cached fact the controller reads without locking: it
    /// feeds pure calculations that touch no remote state.
    fn cached_researches(&self) -> Option<Researches>;

    async fn login(&self) -> Result<()>;
    async fn logout(&self);
    async fn is_under_attack(&self) -> Result<bool>;
    async fn server_time(&self) -> Result<Timestamp>;

    async fn planets(&self) -> Result<Vec<Planet>>;
    async fn planet(&self, planet: PlanetId) -> Result<Planet>;

    async fn resources(&self, celestial: CelestialId) -> Result<Resources>;
    async fn resource_buildings(&self, celestial: CelestialId) -> Result<ResourceBuildings>;
    async fn facilities(&self, celestial: CelestialId) -> Result<Facilities>;
    async fn ships(&self, celestial: CelestialId) -> Result<ShipsInfos>;
    async fn defenses(&self, celestial: CelestialId) -> Result<DefensesInfos>;
    async fn production_queue(&self, celestial: CelestialId) -> Result<Vec<ShipOrder>>;

    /// Fetch research levels and refresh the cache behind `cached_researches`
    async fn research(&self) -> Result<Researches>;

    async fn build(&self, celestial: CelestialId, unit: UnitId, count: u32) -> Result<()>;
    async fn cancel_building(&self, celestial: CelestialId) -> Result<()>;
    async fn cancel_research(&self, celestial: CelestialId) -> Result<()>;

    async fn fleets(&self) -> Result<(Vec<Fleet>, Slots)>;
    async fn slots(&self) -> Result<Slots>;
    async fn send_fleet(&self, from: CelestialId, order: &FleetOrder) -> Result<Fleet>;
    async fn cancel_fleet(&self, fleet: FleetId) -> Result<()>;

    /// Launch up to `count` interplanetary missiles; returns the number sent
    async fn send_missiles(&self, from: PlanetId, target: Coordinate, count: u32) -> Result<u32>;

    /// Scan a coordinate with a moon's sensor phalanx
    async fn phalanx(&self, from: MoonId, target: Coordinate) -> Result<Vec<Fleet>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_named_lock_tracks_holder() {
        let lock = NamedLock::new();
        assert_eq!(lock.holder(), None);

        lock.lock("GetResources").await;
        assert_eq!(lock.holder(), Some("GetResources"));

        lock.unlock("GetResources");
        assert_eq!(lock.holder(), None);
    }

    #[tokio::test]
    async fn test_named_lock_blocks_second_acquirer() {
        let lock = Arc::new(NamedLock::new());
        lock.lock("First").await;

        let contender = {
            let lock = Arc::clone(&lock);
            tokio::spawn(async move {
                lock.lock("Second").await;
                lock.unlock("Second");
            })
        };

        // the contender cannot finish while we hold the permit
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        lock.unlock("First");
        contender.await.expect("contender panicked");
    }
}
