//! Profile avatar lifecycle: pick, upload, and clear a single user avatar

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Asset store gateway
pub mod asset_store;

/// Avatar lifecycle controller
pub mod controller;

/// Device asset access
pub mod device;

/// Device image picker capability
pub mod picker;

/// Shared profile state port
pub mod profile;

/// Shared types and environment configuration
pub mod types;
