use std::{fmt, net::IpAddr, str::FromStr};

use ipnet::IpNet;

use crate::error::{Error, Result};

/// An inclusive range of IP addresses belonging to a single address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressRange {
    /// First address in the range
    from: IpAddr,
    /// Last address in the range
    to: IpAddr,
}

impl AddressRange {
    /// Construct a new range from two endpoints.
    ///
    /// Both endpoints must belong to the same address family and `from` must not be greater than `to`.
    pub fn new(from: IpAddr, to: IpAddr) -> Result<Self> {
        if from.is_ipv4() != to.is_ipv4() {
            return Err(Error::MixedFamilies { from, to });
        }
        if from > to {
            return Err(Error::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Construct a range covering exactly one address
    #[must_use]
    pub fn single(addr: IpAddr) -> Self {
        Self {
            from: addr,
            to: addr,
        }
    }

    /// First address in the range
    #[must_use]
    pub fn first(&self) -> IpAddr {
        self.from
    }

    /// Last address in the range
    #[must_use]
    pub fn last(&self) -> IpAddr {
        self.to
    }

    #[must_use]
    pub fn is_ipv4(&self) -> bool {
        self.from.is_ipv4()
    }

    /// Check if `other` lies entirely inside this range
    #[must_use]
    pub fn contains_range(&self, other: &AddressRange) -> bool {
        self.is_ipv4() == other.is_ipv4() && self.from <= other.from && other.to <= self.to
    }

    /// Get the smallest range covering both `self` and `other`.
    ///
    /// Returns `None` if the ranges belong to different address families.
    #[must_use]
    pub fn hull(&self, other: &AddressRange) -> Option<AddressRange> {
        if self.is_ipv4() != other.is_ipv4() {
            return None;
        }
        Some(Self {
            from: self.from.min(other.from),
            to: self.to.max(other.to),
        })
    }
}

impl From<IpNet> for AddressRange {
    fn from(net: IpNet) -> Self {
        Self {
            from: net.network(),
            to: net.broadcast(),
        }
    }
}

impl FromStr for AddressRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse(s)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AddressRange {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AddressRange {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        crate::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mixed_families() {
        let from: IpAddr = "10.0.0.1".parse().unwrap();
        let to: IpAddr = "2001:db8::1".parse().unwrap();
        assert_eq!(
            AddressRange::new(from, to),
            Err(Error::MixedFamilies { from, to })
        );
    }

    #[test]
    fn test_new_rejects_inverted() {
        let from: IpAddr = "10.0.0.9".parse().unwrap();
        let to: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(
            AddressRange::new(from, to),
            Err(Error::InvertedRange { from, to })
        );
    }

    #[test]
    fn test_from_ipnet() {
        let range = AddressRange::from("192.168.1.42/24".parse::<IpNet>().unwrap());
        assert_eq!(range.first(), "192.168.1.0".parse::<IpAddr>().unwrap());
        assert_eq!(range.last(), "192.168.1.255".parse::<IpAddr>().unwrap());

        let range = AddressRange::from("2001:db8::/127".parse::<IpNet>().unwrap());
        assert_eq!(range.first(), "2001:db8::".parse::<IpAddr>().unwrap());
        assert_eq!(range.last(), "2001:db8::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_contains() {
        let range = AddressRange::new(
            "10.0.0.1".parse().unwrap(),
            "10.0.0.10".parse().unwrap(),
        )
        .unwrap();
        let inner = AddressRange::single("10.0.0.4".parse().unwrap());
        assert!(range.contains_range(&inner));
        assert!(!inner.contains_range(&range));
        assert!(!range.contains_range(&AddressRange::single("::a".parse().unwrap())));
    }

    #[test]
    fn test_hull() {
        let low = AddressRange::single("10.0.0.1".parse().unwrap());
        let high = AddressRange::single("10.0.0.9".parse().unwrap());
        assert_eq!(
            low.hull(&high),
            Some(AddressRange::new("10.0.0.1".parse().unwrap(), "10.0.0.9".parse().unwrap()).unwrap())
        );
        assert_eq!(high.hull(&low), low.hull(&high));
        assert_eq!(low.hull(&AddressRange::single("::1".parse().unwrap())), None);
    }

    #[test]
    fn test_display() {
        let single = AddressRange::single("10.0.0.5".parse().unwrap());
        assert_eq!(single.to_string(), "10.0.0.5");

        let range = AddressRange::new(
            "2001:db8::1".parse().unwrap(),
            "2001:db8::ff".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(range.to_string(), "2001:db8::1-2001:db8::ff");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_text() {
        let range: AddressRange = serde_json::from_str("\"10.0.0.0/30\"").unwrap();
        assert_eq!(
            serde_json::to_string(&range).unwrap(),
            "\"10.0.0.0-10.0.0.3\""
        );
        assert!(serde_json::from_str::<AddressRange>("\"nope\"").is_err());
    }
}
