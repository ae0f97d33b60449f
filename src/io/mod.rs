//! I/O module
//!
//! Handles loading accounts into a registry at start-up.
//!
//! # Components
//!
//! - `seed` - CSV seed file parsing and the built-in demo account

pub mod seed;

pub use seed::{convert_seed_record, demo_account, load_seed, load_seed_file, seed_demo, SeedRecord};
