//! # Poolcheck library
//!
//! Validates IP address pool specifications before they are accepted.
//!
//! *Note: There is a fair chance you are looking for `src/poolcheck.rs` instead of this file.*

#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod pool;
pub mod validation;
pub mod webhook;
