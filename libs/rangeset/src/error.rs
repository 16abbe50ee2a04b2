//! Error types for this library

use addrspec::AddressRange;

use crate::Family;

/// All possible errors thrown while building a `RangeSet`
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("a range set needs at least one range")]
    Empty,
    #[error("range {found} does not belong to the {expected} address family of this set")]
    MixedFamilies { expected: Family, found: AddressRange },
}

/// Result type for `rangeset`
pub type Result<T> = std::result::Result<T, Error>;
