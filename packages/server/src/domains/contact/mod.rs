//! Contact domain - relays the "contact us" form by email

pub mod actions;
pub mod data;
pub mod edges;

pub use actions::ContactError;
pub use data::{ContactMessageInput, ContactMessageResult};
