//! Error types for this library

use std::net::IpAddr;

/// All possible errors thrown by `addrspec` functions
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("unable to parse IP address {0:?}")]
    InvalidAddress(String),
    #[error("range endpoints {from} and {to} are not the same address family")]
    MixedFamilies { from: IpAddr, to: IpAddr },
    #[error("range start {from} is greater than range end {to}")]
    InvertedRange { from: IpAddr, to: IpAddr },
    #[error("invalid prefix length in {0:?}")]
    InvalidPrefixLength(String),
    #[error("{0:?} is not a valid IP, range, nor CIDR")]
    Unrecognized(String),
}

/// Result type for `addrspec`
pub type Result<T> = std::result::Result<T, Error>;
