//! # System Lifecycle
//!
//! Starting, wiring and shutting down the store actors.
//!
//! ## The DashboardSystem Pattern
//!
//! Individual actors are simple; wiring them together is where the work is.
//! [`DashboardSystem`] does it in two steps:
//!
//! 1. **Actor Creation** - one [`StoreActor`](crate::framework::StoreActor) per
//!    collection, each returning its client
//! 2. **Store Wiring** - each client is wrapped in its resource store together
//!    with the shared `Arc<dyn Gateway>`
//!
//! The gateway is injected rather than built here, so tests pass a
//! [`MockGateway`](crate::gateway::mock::MockGateway) and the binary passes an
//! [`HttpGateway`](crate::gateway::HttpGateway).
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all stores** - closes the sender side of the channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors clean up** - log their final size
//! 4. **Await completion** - wait for all actor tasks to finish
//!
//! A gateway call still in flight when the system shuts down resolves into a
//! send on a closed channel and surfaces as
//! [`FrameworkError::ActorClosed`](crate::framework::FrameworkError::ActorClosed).
//!
//! ## Observability
//!
//! See [`setup_tracing`] and the [`tracing`](self::tracing) module.

pub mod dashboard;
pub mod tracing;

pub use dashboard::*;
pub use self::tracing::*;
