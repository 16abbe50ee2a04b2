use std::{fmt, net::IpAddr};

use addrspec::AddressRange;

/// An IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Get the family of an address
    #[must_use]
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    /// Get the family of a range
    #[must_use]
    pub fn of_range(range: &AddressRange) -> Self {
        Self::of(&range.first())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Convert an address to an integer so that neighbouring addresses can be detected
pub(crate) fn to_bits(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(addr) => u128::from(u32::from(*addr)),
        IpAddr::V6(addr) => u128::from(*addr),
    }
}
