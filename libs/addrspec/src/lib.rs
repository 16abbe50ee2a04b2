#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod parse;
mod range;
pub use error::{Error, Result};
pub use parse::{parse, parse_addr, parse_zoned_addr, parses};
pub use range::AddressRange;
