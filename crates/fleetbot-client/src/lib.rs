//! Fleetbot Client
//!
//! Async client layer of the fleetbot automation bot. The central piece is
//! [`SessionLock`], the reentrant serialization controller that turns a shared
//! [`Session`] into something many concurrent tasks can drive safely: every
//! wrapped operation runs inside a named critical section, nested calls within
//! one handle reenter without deadlocking, and each handle fires a completion
//! signal once its outermost transaction releases.
//!
//! ```no_run
//! use fleetbot_client::{SessionLock, testing::SimSession};
//! use std::sync::Arc;
//!
//! # async fn demo() -> fleetbot_core::Result<()> {
//! let session = Arc::new(SimSession::with_homeworld());
//!
//! // one handle per logical task; exclusion happens in the shared session
//! let gate = SessionLock::new(Arc::clone(&session));
//! let done = gate.completion();
//!
//! gate.tx(|tx| {
//!     Box::pin(async move {
//!         let resources = tx.get_resources(SimSession::HOMEWORLD).await?;
//!         let hangar = tx.get_ships(SimSession::HOMEWORLD).await?;
//!         tracing::info!(%resources, ships = hangar.total(), "homeworld state");
//!         Ok(())
//!     })
//! })
//! .await?;
//!
//! done.wait().await;
//! # Ok(())
//! # }
//! ```

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod lock;
pub mod session;
pub mod signal;
pub mod testing;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use lock::{Priority, SessionLock};
pub use session::{NamedLock, Session};
pub use signal::{CompletionSignal, CompletionWaiter};
