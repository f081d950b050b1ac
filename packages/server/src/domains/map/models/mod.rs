pub mod marker;
pub mod viewport;

pub use marker::*;
pub use viewport::*;
