//! # Dashboard Store
//!
//! > **The client-side core of an e-commerce admin dashboard.**
//!
//! The dashboard sits over a public demo REST API that accepts writes but never
//! keeps them. This crate owns what the dashboard needs to stay coherent anyway:
//! a typed gateway to the API, one single-writer store per collection, and the
//! cart total recalculation.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Optimistic update with fallback
//!
//! Every mutator tries the remote first. When the remote does not know the record,
//! the change is applied locally instead; when the remote fails for any other reason,
//! the caller gets the error and the store stays as it was. Records created in the
//! session are tagged [`EntityKey::Local`](model::EntityKey::Local) and never reach
//! the network again.
//!
//! ### One writer per collection
//!
//! Products, carts and orders are each owned by a [`StoreActor`](framework::StoreActor)
//! running in its own Tokio task. Messages are processed one at a time, so no record is
//! ever half-updated and no lock is needed. Gateway calls happen *outside* the actor,
//! in the caller's task: a slow request never blocks a read.
//!
//! ### Derived fields are never stale
//!
//! Cart and order totals are recomputed by the actor, through the
//! [`on_change`](framework::StoreEntity::on_change) hook, before a changed record becomes
//! visible. See [`totals::recalc`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `StoreActor<T>` and its client.
//! - **Key items**: [`StoreEntity`](framework::StoreEntity), [`StoreActor`](framework::StoreActor),
//!   [`StoreClient`](framework::StoreClient).
//!
//! ### 2. The Remote ([`gateway`])
//! The [`Gateway`](gateway::Gateway) trait, its `reqwest` implementation and an
//! expectation-queue mock for tests.
//!
//! ### 3. The Interface ([`store`])
//! Domain-specific stores implementing the fallback policy.
//! - **Key items**: [`ProductStore`](store::ProductStore), [`CartStore`](store::CartStore),
//!   [`OrderStore`](store::OrderStore).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! Spins up the actors, wires the stores and shuts everything down.
//! - **Key items**: [`DashboardSystem`](lifecycle::DashboardSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 5. The Edges ([`config`], [`forms`], [`model`], [`totals`])
//! TOML configuration, input validation, record types and the totals function.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo against the live API
//! RUST_LOG=info cargo run
//!
//! # Point it somewhere else
//! DASHBOARD_API_URL=http://localhost:3000 cargo run
//! ```

pub mod config;
pub mod forms;
pub mod framework;
pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod store;
pub mod totals;
