// Business domains
pub mod contact;
pub mod map;
pub mod resources;
