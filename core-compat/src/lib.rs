//! # Legacy Compatibility Core
//!
//! Feeds modern data providers into a legacy host API that only understands
//! "namespace X changed" signals.
//!
//! ## Overview
//!
//! - [`UpdateCoordinator`] detects the legacy host, builds the adapters and
//!   runs the first-update pass.
//! - [`CapabilityDetector`] answers whether the host is present.
//! - [`SharedNotifier`] is the single path from adapters to the host.
//! - [`adapters`] translates provider data into legacy field sets.
//! - [`PublishedData`] holds the latest field set per namespace.
//!
//! Nothing here is async. `initialise` finishes every first update before it
//! returns, and each notification is a direct synchronous call into the host.

pub mod adapters;
pub mod capability;
pub mod coordinator;
pub mod middleware;
pub mod notifier;
pub mod published;

pub use adapters::{AdapterContext, AdapterFactory, CompatAdapter, DefaultAdapters};
pub use capability::CapabilityDetector;
pub use coordinator::{ActiveBridge, CoordinatorPhase, CoordinatorState, UpdateCoordinator};
pub use middleware::{HostAction, HostMiddleware};
pub use notifier::SharedNotifier;
pub use published::{LegacySnapshot, PublishedData};
