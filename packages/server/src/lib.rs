// SafetyNet community resource map - API core
//
// Backend for the community-care resource directory: stores organization
// listings, derives the map markers and filter views the frontend renders,
// accepts new listings from the public form, and relays contact messages.
//
// Domains live under domains/*, shared infrastructure under kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
