//! Resource actions - business logic over ServerDeps

pub mod queries;
pub mod submit;
pub mod validation;

pub use queries::*;
pub use submit::*;
pub use validation::{
    normalize_phone, normalize_website_url, split_locations, validate_submission,
};
