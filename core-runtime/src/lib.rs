//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the compatibility bridge:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the coordination core depends
//! on. It establishes the logging conventions, the configuration builder that
//! collects injected bridges, and the broadcast channel used to observe
//! coordinator and adapter lifecycle.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
