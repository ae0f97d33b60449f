//! Core business logic module
//!
//! This module contains the account registries:
//! - `traits` - Trait abstraction shared by both registries
//! - `registry` - Single-owner registry backed by a HashMap
//! - `shared_registry` - Thread-safe registry used by the HTTP server

pub mod registry;
pub mod shared_registry;
pub mod traits;

pub use registry::Registry;
pub use shared_registry::SharedRegistry;
pub use traits::AccountRegistry;
