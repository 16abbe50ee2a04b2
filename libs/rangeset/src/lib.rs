#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod builder;
mod error;
mod family;
mod set;
pub use builder::RangeSetBuilder;
pub use error::{Error, Result};
pub use family::Family;
pub use set::RangeSet;
