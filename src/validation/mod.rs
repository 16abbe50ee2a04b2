//! Validation of IP address pool specifications

mod field;
mod pool;
pub use field::{ErrorList, FieldPath, ValidationError, Value};
pub use pool::{derive_subnet, validate, validate_spec};
